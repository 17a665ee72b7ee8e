//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::storage::Quarter;

/// earnest - Find, cache, and summarize quarterly earnings call transcripts
#[derive(Parser, Debug)]
#[command(name = "earnest")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch (or reuse) a transcript and produce an AI summary
    Summarize {
        /// Company name, quoted if it contains spaces
        company: String,

        /// Fiscal quarter (Q1, Q2, Q3, Q4)
        quarter: Quarter,

        /// Fiscal year (e.g. 2024)
        year: i32,

        /// Regenerate the summary even if one is cached
        #[arg(short, long)]
        refresh: bool,
    },

    /// Import a transcript into the cache from a local file
    Import {
        /// Company name
        company: String,

        /// Fiscal quarter (Q1, Q2, Q3, Q4)
        quarter: Quarter,

        /// Fiscal year (e.g. 2024)
        year: i32,

        /// Path to a plain-text transcript
        file: PathBuf,

        /// Replace a cached transcript for the same period
        #[arg(short, long)]
        force: bool,
    },

    /// Split a local transcript into sections
    Sections {
        /// Path to a plain-text transcript
        file: PathBuf,

        /// Print sections as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Show a cached report and its newest summary
    Show {
        /// Company name
        company: String,

        /// Fiscal quarter (Q1, Q2, Q3, Q4)
        quarter: Quarter,

        /// Fiscal year (e.g. 2024)
        year: i32,

        /// Print the full transcript text as well
        #[arg(short, long)]
        transcript: bool,
    },

    /// List cached reports
    List {
        /// Maximum number of reports to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Filter by company name
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Delete a cached report and its summaries
    Delete {
        /// Company name
        company: String,

        /// Fiscal quarter (Q1, Q2, Q3, Q4)
        quarter: Quarter,

        /// Fiscal year (e.g. 2024)
        year: i32,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
