//! Resolution of generic type parameters to their declared upper bound.

use super::parameters::{split_top_level, strip_generic_args};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static TYPE_DECLARATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:class|interface|enum|record)\s+[A-Za-z_$][\w$]*\s*<").unwrap()
});

static BOUNDED_PARAM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^\s*([A-Za-z_$][\w$]*)\s+extends\s+(.+)$").unwrap());

/// Map from type parameter name to the class name of its upper bound.
///
/// `class C<T extends Comparable<T>, U>` yields `T -> Comparable`; `U` has no
/// bound and stays unresolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericBounds {
    bounds: HashMap<String, String>,
}

impl GenericBounds {
    /// Collect bounds from every type declaration's generic clause in `source`.
    ///
    /// When two declarations bind the same name, the first one wins.
    pub fn scan(source: &str) -> Self {
        let mut result = Self::default();
        for m in TYPE_DECLARATION.find_iter(source) {
            let open = m.end() - 1;
            if let Some(clause) = angle_clause(source, open) {
                result = result.merge_missing(&Self::from_clause(clause));
            }
        }
        result
    }

    /// Parse a generic clause without its outer angle brackets.
    pub fn from_clause(clause: &str) -> Self {
        let bounds = split_top_level(clause, ',')
            .into_iter()
            .filter_map(|item| {
                let caps = BOUNDED_PARAM.captures(item)?;
                let first_bound = caps[2].split('&').next()?;
                let bound = strip_generic_args(first_bound).trim().to_string();
                (!bound.is_empty()).then(|| (caps[1].to_string(), bound))
            })
            .collect();
        Self { bounds }
    }

    pub fn resolve(&self, type_name: &str) -> Option<&str> {
        self.bounds.get(type_name).map(String::as_str)
    }

    /// Keep every binding of `self` and add the ones only `other` knows.
    pub fn merge_missing(mut self, other: &Self) -> Self {
        for (param, bound) in &other.bounds {
            self.bounds
                .entry(param.clone())
                .or_insert_with(|| bound.clone());
        }
        self
    }

    /// Bindings of `inner` shadow the ones in `self`.
    pub fn shadowed_by(&self, inner: &Self) -> Self {
        inner.clone().merge_missing(self)
    }

    pub fn len(&self) -> usize {
        self.bounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }
}

/// Text between the `<` at `open` and its matching `>`.
fn angle_clause(text: &str, open: usize) -> Option<&str> {
    let mut depth = 0usize;
    for (idx, ch) in text[open..].char_indices() {
        match ch {
            '<' => depth += 1,
            '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[open + 1..open + idx]);
                }
            }
            '{' | ';' => return None,
            _ => {}
        }
    }
    None
}
