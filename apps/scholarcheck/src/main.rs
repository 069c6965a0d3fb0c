//! scholarcheck - publication authorship verification
//!
//! Reads a scholar's claimed publication list, cross-checks every entry
//! against Crossref and Semantic Scholar and writes a CSV report.

mod cli;
mod error;
mod input;
mod progress;

use std::path::{Path, PathBuf};

use clap::Parser;
use scholarcheck_core::normalization::file_slug;
use scholarcheck_core::{
    CsvReportSink, EngineOptions, ScholarcheckConfig, VerificationEngine,
};
use scholarcheck_sources::build_sources;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::Result;
use progress::ProgressSink;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("scholarcheck=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    run(cli).await?;
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);
    config.validate()?;

    let identity = config.identity()?;
    let publications = input::load(&cli.input)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_report_path(&identity.name));

    println!("Verifying scholar profile: {}", identity.name);
    if config.scholar.self_check {
        println!("Mode: SELF-CHECK (verification run by profile owner)");
    }
    println!("Found {} records\n", publications.len());

    let sources = build_sources(&config.sources)?;
    let engine = VerificationEngine::new(identity, sources, EngineOptions::from(&config));

    let mut sink = ProgressSink::new(CsvReportSink::create(&output)?, publications.len());
    let outcome = tokio::select! {
        summary = engine.run(&publications, &mut sink) => Some(summary),
        _ = tokio::signal::ctrl_c() => None,
    };

    match outcome {
        Some(summary) => {
            let summary = summary?;
            println!("\nSummary: {}", summary);
            println!("Report saved: {}", output.display());
        }
        None => {
            warn!(
                written = sink.written(),
                total = publications.len(),
                "interrupted; report is partial"
            );
            println!(
                "\nInterrupted after {}/{} publications",
                sink.written(),
                publications.len()
            );
            println!("Partial report saved: {}", output.display());
        }
    }

    Ok(())
}

/// Explicit path must exist; the default path is optional
fn load_config(path: Option<&Path>) -> Result<ScholarcheckConfig> {
    if let Some(path) = path {
        info!(path = %path.display(), "loading configuration");
        return Ok(ScholarcheckConfig::load(path)?);
    }

    match ScholarcheckConfig::default_path() {
        Some(path) if path.exists() => {
            info!(path = %path.display(), "loading configuration");
            Ok(ScholarcheckConfig::load(&path)?)
        }
        _ => Ok(ScholarcheckConfig::default()),
    }
}

fn default_report_path(name: &str) -> PathBuf {
    PathBuf::from(format!("verification_report_{}.csv", file_slug(name)))
}
