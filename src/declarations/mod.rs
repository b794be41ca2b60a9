//! Method declaration indexing for Java sources.
//!
//! [`HeuristicIndexer`] scans a source snapshot with line-oriented patterns and
//! returns every method declaration it recognizes, in document order. Each
//! declaration carries an occurrence index: the number of earlier declarations
//! in the same snapshot sharing its name. `name:occurrence` is what change
//! tracking uses to correlate a method across edits, because the parameter
//! list itself may be what changed.
//!
//! ```rust
//! use costlens::declarations::index_declarations;
//!
//! let decls = index_declarations("class C<T extends Number> {\n  void m(T x) {}\n}");
//! assert_eq!(decls[0].name, "m");
//! assert_eq!(decls[0].parameter_types, vec!["Number"]);
//! ```

pub mod generics;
pub mod parameters;
mod patterns;
pub mod position;

pub use generics::GenericBounds;
pub use parameters::parse_parameter_types;
pub use position::{Position, TextRange};

pub(crate) use patterns::{scan_headers, HeaderMatch, CONTROL_KEYWORDS};

use crate::significance::mask_comments;
use position::LineIndex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Identity used to correlate a method across two snapshots: its name and
/// how many same-named declarations precede it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OccurrenceKey {
    pub name: String,
    pub occurrence: usize,
}

impl OccurrenceKey {
    pub fn new(name: impl Into<String>, occurrence: usize) -> Self {
        Self {
            name: name.into(),
            occurrence,
        }
    }
}

impl fmt::Display for OccurrenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.occurrence)
    }
}

impl FromStr for OccurrenceKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, occurrence) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("missing ':' in occurrence key {s:?}"))?;
        let occurrence = occurrence
            .parse()
            .map_err(|e| format!("bad occurrence index in {s:?}: {e}"))?;
        if name.is_empty() {
            return Err(format!("empty method name in occurrence key {s:?}"));
        }
        Ok(Self::new(name, occurrence))
    }
}

impl Serialize for OccurrenceKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for OccurrenceKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A method declaration recognized in one source snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodDeclaration {
    pub name: String,
    /// Parameter types with generics resolved to their bounds where known.
    pub parameter_types: Vec<String>,
    pub declaration_range: TextRange,
    pub name_range: TextRange,
    /// Count of earlier declarations in this snapshot with the same name.
    pub occurrence: usize,
    /// Raw header text as it appears in the source.
    pub header: String,
}

impl MethodDeclaration {
    pub fn occurrence_key(&self) -> OccurrenceKey {
        OccurrenceKey::new(self.name.clone(), self.occurrence)
    }

    /// `name(T1,T2)`, the form cost reports use to identify overloads.
    pub fn signature(&self) -> String {
        format!("{}({})", self.name, self.parameter_types.join(","))
    }
}

/// Produces the ordered method declarations of a source text.
///
/// Implementations never fail; text without declarations yields an empty list.
pub trait DeclarationIndexer {
    fn index(&self, source: &str) -> Vec<MethodDeclaration>;
}

/// Regex-driven indexer; see the `patterns` module for what it recognizes.
#[derive(Debug, Clone, Default)]
pub struct HeuristicIndexer {
    bounds: Option<GenericBounds>,
}

impl HeuristicIndexer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve generics with `bounds` instead of scanning each indexed text.
    pub fn with_bounds(bounds: GenericBounds) -> Self {
        Self {
            bounds: Some(bounds),
        }
    }
}

impl DeclarationIndexer for HeuristicIndexer {
    fn index(&self, source: &str) -> Vec<MethodDeclaration> {
        // Offsets survive masking, so ranges still point into `source`.
        let code = mask_comments(source);
        let scanned;
        let bounds = match &self.bounds {
            Some(bounds) => bounds,
            None => {
                scanned = GenericBounds::scan(&code);
                &scanned
            }
        };

        let lines = LineIndex::new(source);
        let mut counter = OccurrenceCounter::default();
        scan_headers(&code)
            .iter()
            .map(|header| {
                let occurrence = counter.next(header.name);
                build_declaration(source, &lines, header, bounds, occurrence)
            })
            .collect()
    }
}

/// Index `source` with the default heuristic indexer.
pub fn index_declarations(source: &str) -> Vec<MethodDeclaration> {
    HeuristicIndexer::new().index(source)
}

/// Parameter types of a header, honoring a method-level generic clause.
pub(crate) fn header_parameter_types(header: &HeaderMatch<'_>, bounds: &GenericBounds) -> Vec<String> {
    match header.type_params {
        Some(clause) => {
            let scoped = bounds.shadowed_by(&GenericBounds::from_clause(clause));
            parse_parameter_types(header.params, &scoped)
        }
        None => parse_parameter_types(header.params, bounds),
    }
}

fn build_declaration(
    source: &str,
    lines: &LineIndex<'_>,
    header: &HeaderMatch<'_>,
    bounds: &GenericBounds,
    occurrence: usize,
) -> MethodDeclaration {
    MethodDeclaration {
        name: header.name.to_string(),
        parameter_types: header_parameter_types(header, bounds),
        declaration_range: lines.range(header.start, header.end),
        name_range: lines.range(header.name_start, header.name_end()),
        occurrence,
        header: source[header.start..header.end].to_string(),
    }
}

/// Hands out per-name occurrence indices in the order names are seen.
#[derive(Debug, Clone, Default)]
pub(crate) struct OccurrenceCounter {
    seen: HashMap<String, usize>,
}

impl OccurrenceCounter {
    pub(crate) fn next(&mut self, name: &str) -> usize {
        let count = self.seen.entry(name.to_string()).or_insert(0);
        let occurrence = *count;
        *count += 1;
        occurrence
    }
}
