use crate::output::OutputFormat;
use crate::registry::CostRelevance;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "costlens")]
#[command(about = "Method cost tracking and change significance for Java sources", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to the nearest .costlens.toml)
    #[arg(long, global = true, env = "COSTLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity level (can be repeated: -v, -vv)
    /// -v: Show progress information
    /// -vv: Show debug information
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the method declarations of Java sources
    Index {
        /// File or directory to index
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Glob patterns of files to skip
        #[arg(long = "exclude", value_delimiter = ',')]
        exclude: Vec<String>,
    },

    /// Decide whether an edit could change measured method costs
    Check {
        /// Last analyzed version of the file
        #[arg(long)]
        old: PathBuf,

        /// Edited version of the file
        #[arg(long)]
        new: PathBuf,

        /// Cost report (JSON array of cost records) of the last analysis
        #[arg(long)]
        costs: Option<PathBuf>,

        /// Precomputed line diff (JSON array of blocks) to use instead of diffing
        #[arg(long)]
        diff: Option<PathBuf>,

        /// File identity used in the state (defaults to the --new path)
        #[arg(long = "file-id")]
        file_id: Option<String>,

        /// State file carried between checks; read and rewritten
        #[arg(long)]
        state: Option<PathBuf>,

        /// Which reported methods count as cost-relevant (overrides config)
        #[arg(long, value_enum)]
        relevance: Option<RelevanceArg>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Exit with status 1 when the change is significant
        #[arg(long = "fail-on-significant")]
        fail_on_significant: bool,
    },

    /// Manage the method whitelist
    Whitelist {
        #[command(subcommand)]
        action: WhitelistAction,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum WhitelistAction {
    /// Add method names
    Add {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Remove method names
    Remove {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Print the whitelist
    List,
    /// Remove every entry
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RelevanceArg {
    /// Only methods with non-constant cost
    NonConstant,
    /// Every reported method
    AnyReported,
}

impl From<RelevanceArg> for CostRelevance {
    fn from(arg: RelevanceArg) -> Self {
        match arg {
            RelevanceArg::NonConstant => CostRelevance::NonConstant,
            RelevanceArg::AnyReported => CostRelevance::AnyReported,
        }
    }
}
