//! Complaint Drafter - headless complaint drafting wizard
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use cdraft_app::config::{config_path, init_config_dir, load_settings, load_settings_file};

/// Complaint Drafter - draft a civil complaint from reviewed counts
#[derive(Parser, Debug)]
#[command(name = "cdraft")]
#[command(about = "Headless complaint drafting wizard (stdin commands, NDJSON events)", long_about = None)]
struct Args {
    /// Working directory holding `.cdraft/config.toml`
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Explicit settings file (overrides `<PATH>/.cdraft/config.toml`)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory for saved and exported drafts
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Simulated analysis delay in milliseconds
    #[arg(long, value_name = "MS")]
    analysis_delay_ms: Option<u64>,

    /// Simulated generation delay in milliseconds
    #[arg(long, value_name = "MS")]
    generation_delay_ms: Option<u64>,

    /// Write a commented default config into `<PATH>/.cdraft/` and exit
    #[arg(long)]
    init: bool,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let base_path = args
        .path
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));

    if args.init {
        init_config_dir(&base_path)?;
        eprintln!("Config written to {}", base_path.join(".cdraft").display());
        return Ok(());
    }

    // Logs go to a file; stdout carries NDJSON events
    cdraft_core::logging::init()?;

    let (mut settings, config_source) = match args.config {
        Some(path) => (load_settings_file(&path)?, path.display().to_string()),
        None => {
            let default_path = config_path(&base_path);
            let source = if default_path.exists() {
                default_path.display().to_string()
            } else {
                "defaults".to_string()
            };
            (load_settings(&base_path), source)
        }
    };

    if let Some(dir) = args.output {
        settings.export.directory = dir;
    }
    if let Some(ms) = args.analysis_delay_ms {
        settings.timing.analysis_delay_ms = ms;
    }
    if let Some(ms) = args.generation_delay_ms {
        settings.timing.generation_delay_ms = ms;
    }

    cdraft_core::logging::log_session(&config_source, &settings.export.directory);

    complaint_drafter::run_headless(settings).await?;
    Ok(())
}
