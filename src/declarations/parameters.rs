//! Reduction of a raw parameter list to its ordered parameter types.

use super::generics::GenericBounds;
use super::patterns::MODIFIERS;
use once_cell::sync::Lazy;
use regex::Regex;

static ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[A-Za-z_$][\w$.]*(?:\s*\([^()]*\))?").unwrap());

/// Whitespace before an array suffix, so `int [] a` reads as `int[] a`.
static SPACED_ARRAY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\[\s*\]").unwrap());

/// Split `text` on `separator` occurrences that are not nested in `<>` or `()`.
pub(crate) fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut last = 0;
    for (idx, ch) in text.char_indices() {
        match ch {
            '<' | '(' => depth += 1,
            '>' | ')' => depth = depth.saturating_sub(1),
            c if c == separator && depth == 0 => {
                parts.push(&text[last..idx]);
                last = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&text[last..]);
    parts
}

/// Remove every `<...>` group, nested ones included.
pub(crate) fn strip_generic_args(text: &str) -> String {
    let mut depth = 0usize;
    text.chars()
        .filter(|&ch| match ch {
            '<' => {
                depth += 1;
                false
            }
            '>' => {
                depth = depth.saturating_sub(1);
                false
            }
            _ => depth == 0,
        })
        .collect()
}

/// Parse the text between a header's parentheses into parameter types.
///
/// Each parameter keeps only its type token: annotations, `final` and the
/// variable name are dropped, generic arguments are erased and varargs become
/// arrays. Type parameters found in `bounds` are replaced by their bound.
pub fn parse_parameter_types(raw: &str, bounds: &GenericBounds) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    split_top_level(raw, ',')
        .into_iter()
        .filter_map(|param| parameter_type(param, bounds))
        .collect()
}

fn parameter_type(param: &str, bounds: &GenericBounds) -> Option<String> {
    let without_annotations = ANNOTATION.replace_all(param, " ");
    let erased = strip_generic_args(&without_annotations).replace("...", "[] ");
    let normalized = SPACED_ARRAY.replace_all(&erased, "[]");

    let type_token = normalized
        .split_whitespace()
        .find(|token| !MODIFIERS.contains(token))?;

    Some(resolve_type(type_token, bounds))
}

fn resolve_type(type_token: &str, bounds: &GenericBounds) -> String {
    let base = type_token.trim_end_matches("[]");
    let suffix = &type_token[base.len()..];
    match bounds.resolve(base) {
        Some(bound) => format!("{bound}{suffix}"),
        None => type_token.to_string(),
    }
}
