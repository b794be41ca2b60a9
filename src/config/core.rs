use serde::{Deserialize, Serialize};

use crate::registry::{CostRelevance, Whitelist};

/// Root configuration structure for costlens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CostlensConfig {
    /// Methods that never make an edit significant
    #[serde(default)]
    pub method_whitelist: Vec<String>,

    /// Which reported methods count as cost-relevant
    #[serde(default)]
    pub cost_relevance: CostRelevance,

    /// How the external cost analyzer builds the project
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

impl CostlensConfig {
    /// Whitelist built from the configured names; invalid names are skipped.
    pub fn whitelist(&self) -> Whitelist {
        Whitelist::from_names(self.method_whitelist.iter().cloned())
    }

    /// Store `whitelist` back into the configuration.
    pub fn set_whitelist(&mut self, whitelist: Whitelist) {
        self.method_whitelist = whitelist.into_names();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    /// Build command handed to the cost analyzer, e.g. `mvn compile`
    #[serde(default = "default_build_command")]
    pub build_command: String,

    /// Folder with compiled classes, relative to the project root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes_folder: Option<String>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            build_command: default_build_command(),
            classes_folder: None,
        }
    }
}

fn default_build_command() -> String {
    "javac".to_string()
}
