use anyhow::Result;
use clap::Parser;
use costlens::cli::{Cli, Commands};
use costlens::commands::{self, CheckConfig, IndexConfig};
use tracing_subscriber::{fmt, EnvFilter};

fn init_tracing(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("costlens={default_level}")));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Index {
            path,
            format,
            output,
            exclude,
        } => commands::run_index(IndexConfig {
            path,
            format,
            output,
            exclude,
        }),
        Commands::Check {
            old,
            new,
            costs,
            diff,
            file_id,
            state,
            relevance,
            format,
            output,
            fail_on_significant,
        } => {
            let settings = commands::resolve_config(cli.config.as_deref())?;
            let significant = commands::run_check(
                CheckConfig {
                    old,
                    new,
                    costs,
                    diff,
                    file_id,
                    state,
                    relevance: relevance.map(Into::into),
                    format,
                    output,
                },
                &settings,
            )?;
            if significant && fail_on_significant {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Whitelist { action } => {
            commands::update_whitelist(cli.config.as_deref(), action)
        }
        Commands::Init { force } => {
            let cwd = std::env::current_dir()?;
            commands::init_config(&cwd, force)
        }
    }
}
