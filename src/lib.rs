//! Method-level cost tracking for Java sources.
//!
//! Two pieces do the work: a heuristic [`declarations`] indexer that finds
//! method declarations with plain text scanning, and the [`significance`]
//! analyzer that looks at a line diff and decides whether an edit could have
//! changed the measured cost of a method. Both are best-effort and never fail
//! on odd input.

pub mod cli;
pub mod commands;
pub mod config;
pub mod declarations;
pub mod diff;
pub mod errors;
pub mod history;
pub mod io;
pub mod output;
pub mod registry;
pub mod session;
pub mod significance;

pub use crate::config::CostlensConfig;
pub use crate::declarations::{
    index_declarations, DeclarationIndexer, GenericBounds, HeuristicIndexer, MethodDeclaration,
    OccurrenceKey, Position, TextRange,
};
pub use crate::diff::{line_diff, BlockKind, ChangedLineBlock};
pub use crate::errors::{Error, Result};
pub use crate::history::{CostHistory, HistoryEntry};
pub use crate::registry::{CostRecord, CostRegistry, CostRelevance, ExecCost, Whitelist};
pub use crate::session::CostSession;
pub use crate::significance::{
    Cause, CauseKind, ChangeSignificanceAnalyzer, CheckOutcome, FileId, FlaggedMethod,
    SignificanceReport, SignificanceState, StateDelta,
};
