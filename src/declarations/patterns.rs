//! Line-oriented patterns recognizing Java method declaration headers.
//!
//! This is a heuristic scanner, not a parser: there is no brace matching and
//! no notion of nesting. A header is recognized at the start of a line or
//! right after `{`, `}` or `;`, which is enough for conventionally formatted
//! code and for one-line class bodies.

use once_cell::sync::Lazy;
use regex::Regex;

static DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?m)(?:^|[{};])[ \t]*",
        r"(?P<decl>",
        // annotations on the same line as the header
        r"(?:@[A-Za-z_$][\w$.]*(?:\([^()]*\))?\s+)*",
        r"(?:(?:public|protected|private|static|final|native|synchronized|abstract|transient|default|strictfp)\s+)*",
        // method-level generic clause
        r"(?:<(?P<tparams>(?:[^<>;{}()]|<(?:[^<>;{}()]|<[^<>;{}()]*>)*>)*)>\s*)?",
        r"(?P<ret>[A-Za-z_$][\w$.]*(?:<(?:[^<>;{}()]|<(?:[^<>;{}()]|<[^<>;{}()]*>)*>)*>)?(?:\s*\[\s*\])*)",
        r"\s+(?P<name>[A-Za-z_$][\w$]*)[ \t]*\(",
        r"(?P<params>(?:[^()]|\([^()]*\))*)\)",
        r"(?:\s*throws\s+[A-Za-z_$][\w$.]*(?:\s*,\s*[A-Za-z_$][\w$.]*)*)?",
        r")",
    ))
    .unwrap()
});

/// Keywords that only ever appear as modifiers.
pub(crate) const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "native",
    "synchronized",
    "abstract",
    "transient",
    "default",
    "strictfp",
];

/// Keywords that can sit where a return type would be but never start a
/// method header. `record` introduces a record's component list.
const STATEMENT_KEYWORDS: &[&str] = &[
    "record",
    "return",
    "throw",
    "new",
    "else",
    "case",
    "do",
    "yield",
    "assert",
    "package",
    "import",
    "goto",
    "break",
    "continue",
    "instanceof",
];

/// Keywords followed by a parenthesized clause that are never method names.
pub(crate) const CONTROL_KEYWORDS: &[&str] = &[
    "if",
    "switch",
    "while",
    "for",
    "catch",
    "synchronized",
    "try",
    "return",
    "new",
    "throw",
    "else",
    "do",
    "assert",
    "super",
    "this",
];

/// One recognized declaration header, borrowed from the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HeaderMatch<'t> {
    /// Byte offset where the header text starts (annotations included).
    pub start: usize,
    /// Byte offset just past the header, including a trailing `{` or `;`.
    pub end: usize,
    pub name: &'t str,
    pub name_start: usize,
    /// Raw text between the parameter list parentheses.
    pub params: &'t str,
    /// Raw method-level generic clause without the angle brackets.
    pub type_params: Option<&'t str>,
}

impl HeaderMatch<'_> {
    pub(crate) fn name_end(&self) -> usize {
        self.name_start + self.name.len()
    }
}

/// Scan `text` for declaration headers in document order.
pub(crate) fn scan_headers(text: &str) -> Vec<HeaderMatch<'_>> {
    DECLARATION
        .captures_iter(text)
        .filter_map(|caps| {
            let decl = caps.name("decl")?;
            let ret = caps.name("ret")?.as_str();
            let name = caps.name("name")?;
            let params = caps.name("params")?;

            if is_rejected_return_type(ret) || CONTROL_KEYWORDS.contains(&name.as_str()) {
                return None;
            }

            Some(HeaderMatch {
                start: decl.start(),
                end: extend_over_terminator(text, decl.end()),
                name: name.as_str(),
                name_start: name.start(),
                params: params.as_str(),
                type_params: caps.name("tparams").map(|m| m.as_str()),
            })
        })
        .collect()
}

/// A modifier in return-type position means the "name" is a constructor's
/// class name; a statement keyword means this is a call, not a header.
fn is_rejected_return_type(ret: &str) -> bool {
    let base = ret
        .split(|c: char| c == '<' || c == '[' || c.is_whitespace())
        .next()
        .unwrap_or(ret);
    MODIFIERS.contains(&base) || STATEMENT_KEYWORDS.contains(&base)
}

fn extend_over_terminator(text: &str, end: usize) -> usize {
    let rest = &text[end..];
    let trimmed = rest.trim_start_matches([' ', '\t']);
    match trimmed.chars().next() {
        Some('{') | Some(';') => end + (rest.len() - trimmed.len()) + 1,
        _ => end,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str) -> Vec<&str> {
        scan_headers(text).into_iter().map(|h| h.name).collect()
    }

    #[test]
    fn test_plain_method_header() {
        let headers = scan_headers("    public int add(int a, int b) {");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].name, "add");
        assert_eq!(headers[0].params, "int a, int b");
        assert_eq!(headers[0].start, 4);
        assert_eq!(headers[0].end, "    public int add(int a, int b) {".len());
    }

    #[test]
    fn test_header_after_brace_on_same_line() {
        assert_eq!(names("class C { void m(int x) {} }"), vec!["m"]);
    }

    #[test]
    fn test_consecutive_headers_on_one_line() {
        assert_eq!(names("void a() {} void b() {}"), vec!["a", "b"]);
    }

    #[test]
    fn test_abstract_headers_ending_in_semicolon() {
        assert_eq!(
            names("abstract void a();\nabstract int b(String s);"),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_control_flow_is_not_a_header() {
        assert!(names("    if (x) {\n    while (y) {\n    for (int i = 0; i < n; i++) {").is_empty());
    }

    #[test]
    fn test_return_call_is_not_a_header() {
        assert!(names("        return compute(x);").is_empty());
        assert!(names("        else handle(x);").is_empty());
    }

    #[test]
    fn test_constructor_is_rejected() {
        assert!(names("    public Foo(int x) {").is_empty());
        assert!(names("    private static Foo(int x) {").is_empty());
    }

    #[test]
    fn test_record_header_is_not_a_method() {
        let text = "public record Point(int x, int y) {\n    double norm() {\n";
        assert_eq!(names(text), vec!["norm"]);
        assert!(names("record Pair<A, B>(A first, B second) {}").is_empty());
    }

    #[test]
    fn test_generic_return_and_method_type_params() {
        let headers =
            scan_headers("  public static <T extends Comparable<T>> List<T> sort(List<T> xs) {");
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].name, "sort");
        assert_eq!(headers[0].type_params, Some("T extends Comparable<T>"));
    }

    #[test]
    fn test_multiline_signature() {
        let text = "    void m(int a,\n           int b) {\n";
        let headers = scan_headers(text);
        assert_eq!(headers.len(), 1);
        assert_eq!(headers[0].params, "int a,\n           int b");
    }

    #[test]
    fn test_throws_clause_is_part_of_header() {
        let text = "  void read() throws IOException, TimeoutException {";
        let headers = scan_headers(text);
        assert_eq!(headers[0].end, text.len());
    }

    #[test]
    fn test_annotation_on_same_line() {
        assert_eq!(names("  @Override public String toString() {"), vec!["toString"]);
    }

    #[test]
    fn test_local_variable_with_call_is_not_a_header() {
        assert!(names("        int s = compute(x);").is_empty());
    }

    #[test]
    fn test_comment_line_is_not_a_header() {
        assert!(names("    // void hidden(int a)").is_empty());
    }
}
