// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. For `check`: read the table, run the engine, write the result file,
//    print the report
// 4. Exit with proper code (0 = all valid, 1 = some URLs failed, 2 = error,
//    130 = interrupted)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

use cli::{Cli, Commands};
use url_sentinel::checker::HttpProber;
use url_sentinel::checkpoint::CheckpointStore;
use url_sentinel::config::RunConfig;
use url_sentinel::engine::{check_rows, Progress, ReconcileOutcome};
use url_sentinel::logging::init_logging;
use url_sentinel::report::{print_results, Summary};
use url_sentinel::table::{output_target, sample_table, Table, TableFormat};

const DEFAULT_OUTPUT_STEM: &str = "URL_Status_Result";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // In-flight probes are not cancelled cooperatively: on Ctrl-C we simply
    // stop, and the next run resumes from the last saved checkpoint
    let exit_code = tokio::select! {
        result = run(cli) => match result {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                2
            }
        },
        _ = tokio::signal::ctrl_c() => {
            eprintln!(
                "\n⏹️  Interrupted. Progress up to the last checkpoint is kept; \
                 run the same command again to resume."
            );
            130
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check {
            input,
            output,
            concurrency,
            checkpoint_interval,
            timeout,
            no_resume,
            checkpoint_dir,
            json,
        } => {
            let config = cli::run_config(
                concurrency,
                checkpoint_interval,
                timeout,
                no_resume,
                checkpoint_dir,
            );
            handle_check(&input, output, &config, json).await
        }
        Commands::Sample { output } => handle_sample(&output),
        Commands::Forget {
            input,
            checkpoint_dir,
        } => handle_forget(&input, &checkpoint_dir),
    }
}

// Handles the 'check' subcommand
async fn handle_check(
    input: &Path,
    output: Option<PathBuf>,
    config: &RunConfig,
    json: bool,
) -> Result<i32> {
    config.validate()?;

    let (table, format) = Table::read(input)?;
    let rows = table.to_rows()?;
    // Settled before any request goes out so a bad --output fails fast
    let (output, format) = output_target(format, output, DEFAULT_OUTPUT_STEM)?;

    println!("🔍 Checking {} URL(s) from {}", rows.len(), input.display());

    let store = CheckpointStore::for_input(&config.checkpoint_dir, input);
    let prober = HttpProber::new().context("could not create HTTP client")?;

    let outcome = check_rows(rows, &prober, config, &store, print_progress).await?;

    match &outcome.reconcile {
        ReconcileOutcome::Fresh => {}
        ReconcileOutcome::Resumed { restored } => {
            println!(
                "♻️  Resumed: {} row(s) restored from {}",
                restored,
                store.path().display()
            );
        }
        ReconcileOutcome::Discarded { reason } => {
            println!("⚠️  Previous checkpoint ignored: {}", reason);
        }
    }

    // The "download": render the table to bytes and hand them to a file
    let bytes = table.with_statuses(&outcome.result.rows).render(format)?;
    fs::write(&output, bytes)
        .with_context(|| format!("could not write {}", output.display()))?;

    println!("✅ URL checking completed");
    println!("📥 Results written to {}\n", output.display());

    print_results(&outcome.result, json)?;

    if Summary::of(&outcome.result.rows).all_valid() {
        Ok(0)
    } else {
        Ok(1)
    }
}

// About twenty progress lines per run, however many URLs there are
fn print_progress(progress: Progress) {
    let step = (progress.total / 20).max(1);
    if progress.completed % step == 0 || progress.completed == progress.total {
        println!("   checked {}/{}", progress.completed, progress.total);
    }
}

// Handles the 'sample' subcommand
fn handle_sample(output: &Path) -> Result<i32> {
    let format = TableFormat::for_output(output)?;
    let bytes = sample_table().render(format)?;
    fs::write(output, bytes).with_context(|| format!("could not write {}", output.display()))?;

    println!("📄 Sample file written to {}", output.display());
    Ok(0)
}

// Handles the 'forget' subcommand
fn handle_forget(input: &Path, checkpoint_dir: &Path) -> Result<i32> {
    let store = CheckpointStore::for_input(checkpoint_dir, input);
    store.delete()?;

    println!("🗑️  Removed checkpoint {}", store.path().display());
    Ok(0)
}
