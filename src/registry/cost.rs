//! Registry of method names whose measured cost makes new calls to them
//! worth re-analyzing.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Execution cost of one method as reported by the cost analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecCost {
    /// Polynomial degree; absent when the cost is unbounded.
    #[serde(default)]
    pub degree: Option<u32>,
    pub polynomial: String,
    pub big_o: String,
}

impl ExecCost {
    pub fn is_constant(&self) -> bool {
        self.degree == Some(0)
    }
}

/// One entry of a cost report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub method_name: String,
    #[serde(default)]
    pub parameters: Vec<String>,
    pub exec_cost: ExecCost,
}

impl CostRecord {
    /// Bare method name: qualifiers, return type and parameter list removed.
    ///
    /// `void com.acme.Foo.bar(int)` becomes `bar`. Constructors and static
    /// initializers (`<init>`, `<clinit>`) have no bare name.
    pub fn bare_name(&self) -> Option<&str> {
        bare_method_name(&self.method_name)
    }

    /// `name(T1,T2)` with the bare name, matching `MethodDeclaration::signature`.
    pub fn signature(&self) -> String {
        format!(
            "{}({})",
            self.bare_name().unwrap_or(&self.method_name),
            self.parameters.join(",")
        )
    }
}

pub(crate) fn bare_method_name(raw: &str) -> Option<&str> {
    let without_params = raw.split('(').next().unwrap_or(raw).trim();
    let last_word = without_params.rsplit(char::is_whitespace).next()?;
    let name = last_word.rsplit('.').next()?;
    if name.is_empty() || name.starts_with('<') {
        None
    } else {
        Some(name)
    }
}

/// Decode a JSON array of cost records.
pub fn parse_cost_records(json: &str) -> Result<Vec<CostRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Read and decode a cost record file.
pub fn load_cost_records(path: &Path) -> Result<Vec<CostRecord>> {
    let contents = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_cost_records(&contents)
}

/// Which reported methods count as cost-relevant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostRelevance {
    /// Only methods whose cost is not constant.
    #[default]
    NonConstant,
    /// Every method the analyzer reported.
    AnyReported,
}

impl CostRelevance {
    pub fn is_relevant(self, record: &CostRecord) -> bool {
        match self {
            Self::NonConstant => !record.exec_cost.is_constant(),
            Self::AnyReported => true,
        }
    }
}

/// Set of cost-relevant method names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostRegistry {
    names: BTreeSet<String>,
}

impl CostRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: &[CostRecord], rule: CostRelevance) -> Self {
        let mut registry = Self::new();
        registry.absorb(records, rule);
        registry
    }

    /// Returns true if the name was not registered before.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn reset(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Fold a fresh report into the registry.
    ///
    /// Relevant methods are added; methods the report now shows as irrelevant
    /// are dropped. Names absent from the report are left alone, since one
    /// report usually covers a single file.
    pub fn absorb(&mut self, records: &[CostRecord], rule: CostRelevance) {
        for record in records {
            let Some(name) = record.bare_name() else {
                continue;
            };
            if rule.is_relevant(record) {
                self.names.insert(name.to_string());
            } else if !self.has_relevant_overload(records, name, rule) {
                self.names.remove(name);
            }
        }
        debug!(registered = self.names.len(), "cost registry refreshed");
    }

    fn has_relevant_overload(&self, records: &[CostRecord], name: &str, rule: CostRelevance) -> bool {
        records
            .iter()
            .any(|r| r.bare_name() == Some(name) && rule.is_relevant(r))
    }
}
