//! pending-debits main entry point

use anyhow::Context;
use clap::{Parser, Subcommand};
use pending_config::{Config, ConfigError};
use pending_core::{process, ProcessSummary, Side};
use pending_export::{render_full_workbook, render_journal_template, ArtifactNames, ArtifactStore, LocalArtifactStore};
use pending_ingest::{period_hint_warning, read_workbook};
use pending_utils::{format_amount, generate_upload_id};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "pending-debits")]
#[command(version = "0.1.0")]
#[command(about = "Turns ACH transaction exports into pending-debit journal entries", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the upload web server (default)
    Serve,
    /// Process a workbook from disk and write both output workbooks
    Process {
        /// Excel export to process
        file: PathBuf,
        /// Directory for the output workbooks (defaults to storage.output_dir)
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
    /// Print the default configuration file
    InitConfig,
}

/// Load the configuration, falling back to defaults when the file is absent
fn load_config(path: &Path) -> anyhow::Result<(Config, bool)> {
    match Config::load(path) {
        Ok(config) => Ok((config, true)),
        Err(ConfigError::FileNotFound { .. }) => Ok((Config::default(), false)),
        Err(e) => {
            let details = e.to_details();
            for suggestion in &details.suggestions {
                eprintln!("hint: {}", suggestion);
            }
            Err(e).with_context(|| format!("Failed to load configuration from {}", path.display()))
        }
    }
}

fn init_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

async fn run_process(config: &Config, file: &Path, output_dir: Option<PathBuf>) -> anyhow::Result<()> {
    let bytes = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let filename = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let sheet = read_workbook(&bytes).with_context(|| format!("Failed to read workbook {}", filename))?;
    let outcome = process(&sheet.rows)?;

    let warnings: Vec<String> = period_hint_warning(&filename, outcome.file_period).into_iter().collect();
    let summary = ProcessSummary::new(&outcome, &sheet.rows, warnings);

    println!("File period:   {}", summary.file_period);
    println!("Date filter:   {}", summary.target_period);
    println!("Transactions:  {} of {} rows ({} flagged)", summary.row_count, summary.total_rows, summary.flagged_rows);
    println!("Total debit:   {}", format_amount(outcome.result.total_debit));
    println!("Total return:  {}", format_amount(outcome.result.total_return));
    println!("Net amount:    {}", format_amount(outcome.result.net_amount));
    println!();
    for line in outcome.result.journal_entry.iter() {
        let side = match line.side {
            Side::Debit => "Dr",
            Side::Credit => "Cr",
        };
        println!("  {} {:>14}  {}", side, format_amount(line.amount), line.account);
    }
    if !summary.journal_required {
        println!("  No journal entry required (Net Amount = 0)");
    }
    for warning in &summary.warnings {
        println!("warning: {}", warning);
    }

    let names = ArtifactNames::new(&generate_upload_id(), &filename);
    let store = LocalArtifactStore::new(output_dir.unwrap_or_else(|| config.storage.output_dir.clone()));
    let full = store
        .save(&names.full, &render_full_workbook(&outcome, &sheet.rows, &config.journal)?)
        .await?;
    let journal = store
        .save(&names.journal, &render_journal_template(&outcome, &config.journal)?)
        .await?;

    println!();
    println!("Summary workbook: {}", full.display());
    println!("JE template:      {}", journal.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if let Some(Command::InitConfig) = args.command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, from_file) = load_config(&args.config)?;
    init_logging(&config.logging.level);
    if from_file {
        log::info!("Config loaded from {}", args.config.display());
    } else {
        log::warn!("Config file {} not found, using defaults", args.config.display());
    }
    config.validate().context("Invalid configuration")?;

    match args.command {
        Some(Command::Process { file, output_dir }) => run_process(&config, &file, output_dir).await,
        Some(Command::Serve) | None => {
            log::info!(
                "Output directory: {}, upload limit: {} bytes",
                config.storage.output_dir.display(),
                config.storage.max_upload_bytes
            );
            pending_api::start_server(config).await
        }
        Some(Command::InitConfig) => Ok(()),
    }
}
