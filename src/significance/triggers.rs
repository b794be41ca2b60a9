//! Detection of loop constructs and call sites inside changed text.

use crate::declarations::CONTROL_KEYWORDS;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// An identifier followed by an opening parenthesis.
static CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z_$][A-Za-z0-9_$]*[ \t]*\(").unwrap());

const LOOP_KEYWORDS: &[&str] = &["while", "for"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CauseKind {
    Loop,
    Call,
}

/// A loop or call site found in scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Trigger<'t> {
    /// Byte offset of the trigger name.
    pub offset: usize,
    pub name: &'t str,
    /// Name through the balanced closing parenthesis on the same line.
    pub snippet: &'t str,
    pub kind: CauseKind,
}

/// Find every trigger candidate in `text`, in order.
///
/// Keywords that take a parenthesized clause but never loop (`if`, `switch`,
/// `catch`, ...) are skipped; `while` and `for` are reported as loops.
pub(crate) fn find_triggers(text: &str) -> Vec<Trigger<'_>> {
    CANDIDATE
        .find_iter(text)
        .filter_map(|m| {
            let open = m.end() - 1;
            let name = text[m.start()..open].trim_end();
            let is_loop = LOOP_KEYWORDS.contains(&name);
            if !is_loop && CONTROL_KEYWORDS.contains(&name) {
                return None;
            }

            let end = balanced_close(text, open).unwrap_or_else(|| line_end(text, open));
            Some(Trigger {
                offset: m.start(),
                name,
                snippet: text[m.start()..end].trim_end(),
                kind: if is_loop {
                    CauseKind::Loop
                } else {
                    CauseKind::Call
                },
            })
        })
        .collect()
}

/// Offset just past the `)` closing the `(` at `open`, if it is on the same line.
fn balanced_close(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text[open..].char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx + 1);
                }
            }
            '\n' => return None,
            _ => {}
        }
    }
    None
}

fn line_end(text: &str, from: usize) -> usize {
    text[from..]
        .find('\n')
        .map_or(text.len(), |idx| from + idx)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    Code,
    LineComment,
    BlockComment,
    Literal(char),
}

/// Blank out comments while keeping every byte offset and newline in place.
///
/// Covers `//` comments, `/* */` spans and Javadoc continuation lines that
/// start with `*`. Quotes are tracked so `"http://..."` is not a comment.
pub(crate) fn mask_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut state = Scan::Code;
    let mut line_start = true;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\n' {
            out.push('\n');
            line_start = true;
            if state != Scan::BlockComment {
                state = Scan::Code;
            }
            continue;
        }

        match state {
            Scan::Code => match ch {
                '/' if chars.peek() == Some(&'/') => {
                    state = Scan::LineComment;
                    blank(&mut out, ch);
                }
                '/' if chars.peek() == Some(&'*') => {
                    state = Scan::BlockComment;
                    blank(&mut out, ch);
                    if let Some(star) = chars.next() {
                        blank(&mut out, star);
                    }
                }
                '*' if line_start => {
                    state = Scan::LineComment;
                    blank(&mut out, ch);
                }
                '"' | '\'' => {
                    state = Scan::Literal(ch);
                    out.push(ch);
                }
                _ => out.push(ch),
            },
            Scan::LineComment => blank(&mut out, ch),
            Scan::BlockComment => {
                blank(&mut out, ch);
                if ch == '*' && chars.peek() == Some(&'/') {
                    if let Some(slash) = chars.next() {
                        blank(&mut out, slash);
                    }
                    state = Scan::Code;
                }
            }
            Scan::Literal(quote) => {
                out.push(ch);
                if ch == '\\' {
                    if let Some(&escaped) = chars.peek() {
                        if escaped != '\n' {
                            out.push(escaped);
                            chars.next();
                        }
                    }
                } else if ch == quote {
                    state = Scan::Code;
                }
            }
        }

        if !ch.is_whitespace() {
            line_start = false;
        }
    }

    out
}

/// Blank out the given byte spans, keeping newlines.
pub(crate) fn mask_spans(text: &str, spans: impl IntoIterator<Item = (usize, usize)>) -> String {
    let mut bytes = text.as_bytes().to_vec();
    for (start, end) in spans {
        for byte in &mut bytes[start..end.min(text.len())] {
            if *byte != b'\n' {
                *byte = b' ';
            }
        }
    }
    // Spans come from regex matches, so they start and end on char boundaries
    // and every byte of a masked multi-byte char becomes a space.
    String::from_utf8(bytes).unwrap_or_else(|_| text.to_string())
}

fn blank(out: &mut String, ch: char) {
    out.extend(std::iter::repeat_n(' ', ch.len_utf8()));
}
