// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Subcommands:
// - check:  check every URL in a spreadsheet, resuming if interrupted before
// - sample: write a small demo spreadsheet
// - forget: delete the saved progress for a spreadsheet
// =============================================================================

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use url_sentinel::config::{RunConfig, DEFAULT_CHECKPOINT_INTERVAL, DEFAULT_CONCURRENCY};

#[derive(Parser, Debug)]
#[command(
    name = "url-sentinel",
    version,
    about = "Check that every URL in a spreadsheet is reachable",
    long_about = "url-sentinel reads a CSV or Excel file with a 'URL' column, checks every URL \
                  concurrently and writes the same table back with a 'Status' column. \
                  Progress is checkpointed, so an interrupted run picks up where it stopped."
)]
pub struct Cli {
    /// Log debug details to stderr (RUST_LOG overrides this)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check every URL in a spreadsheet
    ///
    /// Example: url-sentinel check links.xlsx --concurrency 10
    Check {
        /// Input file (.csv, .xlsx, .xlsm, .xls or .ods) with a 'URL' column
        input: PathBuf,

        /// Where to write the result; .csv or .xlsx picks the format
        /// (default: URL_Status_Result.<input format>)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Number of URLs checked at the same time (1-20)
        #[arg(long, short, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Save progress every N checked URLs
        #[arg(long, default_value_t = DEFAULT_CHECKPOINT_INTERVAL)]
        checkpoint_interval: usize,

        /// Per-URL timeout in seconds
        #[arg(long, default_value_t = 5)]
        timeout: u64,

        /// Start from scratch: ignore and don't write checkpoints
        #[arg(long)]
        no_resume: bool,

        /// Directory for checkpoint files
        #[arg(long, default_value = ".")]
        checkpoint_dir: PathBuf,

        /// Print results as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a sample input file to try the tool with
    Sample {
        /// Output file; .csv or .xlsx picks the format
        #[arg(long, short, default_value = "sample_urls.xlsx")]
        output: PathBuf,
    },

    /// Delete saved progress for an input file
    Forget {
        /// The input file whose checkpoint should go
        input: PathBuf,

        /// Directory for checkpoint files
        #[arg(long, default_value = ".")]
        checkpoint_dir: PathBuf,
    },
}

/// Builds the engine configuration from `check` flags
pub fn run_config(
    concurrency: usize,
    checkpoint_interval: usize,
    timeout_secs: u64,
    no_resume: bool,
    checkpoint_dir: PathBuf,
) -> RunConfig {
    RunConfig {
        concurrency,
        checkpoint_interval,
        timeout: Duration::from_secs(timeout_secs),
        resume: !no_resume,
        checkpoint_dir,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_defaults() {
        let cli = Cli::parse_from(["url-sentinel", "check", "links.xlsx"]);
        match cli.command {
            Commands::Check {
                input,
                output,
                concurrency,
                checkpoint_interval,
                timeout,
                no_resume,
                ..
            } => {
                assert_eq!(input, PathBuf::from("links.xlsx"));
                assert_eq!(output, None);
                assert_eq!(concurrency, 20);
                assert_eq!(checkpoint_interval, 10);
                assert_eq!(timeout, 5);
                assert!(!no_resume);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_run_config_from_flags() {
        let config = run_config(4, 25, 3, true, PathBuf::from("/tmp/ckpt"));
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.checkpoint_interval, 25);
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert!(!config.resume);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
