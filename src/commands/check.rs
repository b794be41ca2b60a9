use crate::config::CostlensConfig;
use crate::diff::{line_diff, ChangedLineBlock};
use crate::io;
use crate::output::{self, OutputFormat};
use crate::registry::{load_cost_records, CostRegistry, CostRelevance};
use crate::significance::{ChangeSignificanceAnalyzer, CheckOutcome, FileId, SignificanceState};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::{debug, info};

pub struct CheckConfig {
    pub old: PathBuf,
    pub new: PathBuf,
    pub costs: Option<PathBuf>,
    pub diff: Option<PathBuf>,
    pub file_id: Option<String>,
    pub state: Option<PathBuf>,
    pub relevance: Option<CostRelevance>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

impl CheckConfig {
    fn file_id(&self) -> FileId {
        match &self.file_id {
            Some(id) => FileId::new(id.clone()),
            None => FileId::from(self.new.as_path()),
        }
    }
}

/// Run one significance check and persist the reconciled state.
pub fn check_files(check: &CheckConfig, settings: &CostlensConfig) -> Result<CheckOutcome> {
    let old_text = io::read_file(&check.old).context("Failed to read old version")?;
    let new_text = io::read_file(&check.new).context("Failed to read new version")?;

    let relevance = check.relevance.unwrap_or(settings.cost_relevance);
    let registry = match &check.costs {
        Some(path) => {
            let records = load_cost_records(path)
                .with_context(|| format!("Failed to load cost report {}", path.display()))?;
            CostRegistry::from_records(&records, relevance)
        }
        None => CostRegistry::new(),
    };
    debug!(relevant = registry.len(), "Cost registry loaded");

    let diff: Vec<ChangedLineBlock> = match &check.diff {
        Some(path) => {
            let json = io::read_file(path)?;
            serde_json::from_str(&json)
                .with_context(|| format!("Failed to decode diff {}", path.display()))?
        }
        None => line_diff(&old_text, &new_text),
    };

    let prior = match &check.state {
        Some(path) => io::load_state(path)
            .with_context(|| format!("Failed to load state {}", path.display()))?,
        None => SignificanceState::default(),
    };

    let whitelist = settings.whitelist();
    let file = check.file_id();
    let outcome = ChangeSignificanceAnalyzer::new(&registry, &whitelist).check(
        &file,
        Some(old_text.as_str()),
        &new_text,
        &diff,
        &prior,
    );

    if let Some(path) = &check.state {
        if outcome.state_changed {
            io::save_state(path, &outcome.state)?;
            info!("Updated state in {}", path.display());
        }
    }
    Ok(outcome)
}

/// Returns whether the change was significant.
pub fn run_check(check: CheckConfig, settings: &CostlensConfig) -> Result<bool> {
    let outcome = check_files(&check, settings)?;
    let rendered = output::render_report(&outcome.report, &outcome.delta, check.format)?;
    output::emit(&rendered, check.output.as_deref())?;
    Ok(outcome.is_significant())
}
