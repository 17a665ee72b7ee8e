//! earnest - Find, cache, and summarize quarterly earnings call transcripts
//!
//! Entry point for the earnest CLI application.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use earnest::cli::{Cli, Commands};
use earnest::config::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Completions { shell } => {
            earnest::cli::completions::print(shell);
        }
        Commands::Sections { file, json } => {
            earnest::cli::commands::split_sections(&file, json)?;
        }
        command => {
            // Load configuration only for commands that need it.
            let settings = Settings::load()?;

            match command {
                Commands::Summarize {
                    company,
                    quarter,
                    year,
                    refresh,
                } => {
                    earnest::cli::commands::summarize_report(
                        &settings, &company, quarter, year, refresh,
                    )
                    .await?;
                }
                Commands::Import {
                    company,
                    quarter,
                    year,
                    file,
                    force,
                } => {
                    earnest::cli::commands::import_report(
                        &settings, &company, quarter, year, &file, force,
                    )
                    .await?;
                }
                Commands::Show {
                    company,
                    quarter,
                    year,
                    transcript,
                } => {
                    earnest::cli::commands::show_report(
                        &settings, &company, quarter, year, transcript,
                    )
                    .await?;
                }
                Commands::List { limit, search } => {
                    earnest::cli::commands::list_reports(&settings, limit, search).await?;
                }
                Commands::Delete {
                    company,
                    quarter,
                    year,
                } => {
                    earnest::cli::commands::delete_report(&settings, &company, quarter, year)
                        .await?;
                }
                Commands::Config(config_cmd) => {
                    earnest::cli::commands::config_command(&settings, config_cmd)?;
                }
                Commands::Completions { .. } | Commands::Sections { .. } => unreachable!(),
            }
        }
    }

    Ok(())
}
