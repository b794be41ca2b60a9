//! User whitelist of methods that never make a change significant.

use crate::errors::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static METHOD_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_]*$").unwrap());

/// Whether `candidate` has method identifier syntax.
pub fn is_valid_method_name(candidate: &str) -> bool {
    METHOD_NAME.is_match(candidate)
}

/// Ordered, duplicate-free list of whitelisted method names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Whitelist {
    names: Vec<String>,
}

impl Whitelist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from configured names, dropping invalid entries and duplicates.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut whitelist = Self::new();
        for name in names {
            let name = name.into();
            if let Err(e) = whitelist.add(&name) {
                tracing::warn!("Ignoring whitelist entry: {}", e);
            }
        }
        whitelist
    }

    /// Add a method name.
    ///
    /// Returns `Ok(false)` if it was already listed and
    /// [`Error::InvalidMethodName`] if it is not an identifier.
    pub fn add(&mut self, name: &str) -> Result<bool> {
        if !is_valid_method_name(name) {
            return Err(Error::InvalidMethodName(name.to_string()));
        }
        if self.contains(name) {
            return Ok(false);
        }
        self.names.push(name.to_string());
        Ok(true)
    }

    /// Remove a method name; absent names are a no-op.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn reset(&mut self) {
        self.names.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_syntax() {
        assert!(is_valid_method_name("log"));
        assert!(is_valid_method_name("_x"));
        assert!(is_valid_method_name("$proxy"));
        assert!(is_valid_method_name("a"));
        assert!(!is_valid_method_name(""));
        assert!(!is_valid_method_name("1abc"));
        assert!(!is_valid_method_name("foo.bar"));
        assert!(!is_valid_method_name("foo()"));
        assert!(!is_valid_method_name("two words"));
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut whitelist = Whitelist::new();
        assert!(whitelist.add("log").unwrap());
        assert!(!whitelist.add("log").unwrap());
        assert_eq!(whitelist.len(), 1);
    }

    #[test]
    fn test_add_rejects_invalid_names() {
        let mut whitelist = Whitelist::new();
        let err = whitelist.add("not-valid").unwrap_err();
        assert!(matches!(err, Error::InvalidMethodName(name) if name == "not-valid"));
        assert!(whitelist.is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut whitelist = Whitelist::from_names(["a", "b"]);
        assert!(!whitelist.remove("c"));
        assert!(whitelist.remove("a"));
        assert_eq!(whitelist.iter().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_from_names_filters_and_dedups() {
        let whitelist = Whitelist::from_names(["log", "bad name", "log", "trace"]);
        assert_eq!(whitelist.into_names(), vec!["log", "trace"]);
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let whitelist = Whitelist::from_names(["log"]);
        assert_eq!(serde_json::to_string(&whitelist).unwrap(), r#"["log"]"#);
    }
}
