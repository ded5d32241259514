//! Vaultdigest CLI entry point.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use vaultdigest::config::Config;
use vaultdigest::error::Result;
use vaultdigest::logging;
use vaultdigest::mail::Mailer;
use vaultdigest::scanner::NoteScanner;
use vaultdigest::summarize::Summarizer;
use vaultdigest::vault::Vault;
use vaultdigest::window::SearchWindow;

#[derive(Parser, Debug)]
#[command(name = "vaultdigest")]
#[command(author, version, about = "Summarize tagged vault notes by email", long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Suppress non-essential output
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    logging::init(&config.logging)?;

    info!("vault location: {}", config.vault_path.display());
    let vault = Vault::open(&config.vault_path)?;

    let window = SearchWindow::from_period(&config.search_period);
    info!("search window: {} to {}", window.start, window.end);

    let scanner = NoteScanner::new(&vault, &config.target_tag, window.clone())?;
    let notes = scanner.scan()?;

    if notes.is_empty() {
        info!("no notes matched; skipping summary and delivery");
        return Ok(());
    }

    let summary = if config.openai.skip_summary {
        info!("AI summary disabled in configuration");
        format!(
            "AI summary skipped by configuration.\n\nMatched notes: {}",
            notes.len()
        )
    } else {
        info!("summarizing {} note(s)", notes.len());
        Summarizer::new(&config.openai)
            .summarize(&notes)
            .unwrap_or_else(|e| {
                error!("summarization failed: {}", e);
                format!("Summary error: {}...", truncate(&e.to_string(), 100))
            })
    };

    Mailer::new(&config.email).send_summary(&window, &summary)?;

    info!("run complete");
    Ok(())
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
