//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;
use scholarcheck_core::ScholarcheckConfig;

/// Cross-check a scholar's claimed publications against Crossref and
/// Semantic Scholar and write a per-publication verification report.
#[derive(Debug, Parser)]
#[command(name = "scholarcheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Publication list (.csv, .json, or one title per line)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Full name of the scholar whose profile is verified
    #[arg(short, long)]
    pub name: Option<String>,

    /// ORCID iD (bare or https://orcid.org/ form)
    #[arg(long)]
    pub orcid: Option<String>,

    /// Scopus Author ID
    #[arg(long)]
    pub scopus_id: Option<String>,

    /// ResearcherID / Publons ID
    #[arg(long)]
    pub researcher_id: Option<String>,

    /// Declare that the verification is run by the profile owner
    #[arg(long)]
    pub self_check: bool,

    /// Report path [default: verification_report_<name>.csv]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file [default: <config dir>/scholarcheck/config.toml]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Publications evaluated concurrently
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Candidates requested per source
    #[arg(long)]
    pub rows: Option<u32>,

    /// Per-source timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Skip Crossref
    #[arg(long)]
    pub no_crossref: bool,

    /// Skip Semantic Scholar
    #[arg(long)]
    pub no_semantic_scholar: bool,

    /// Contact address for the Crossref polite pool
    #[arg(long, env = "SCHOLARCHECK_MAILTO")]
    pub mailto: Option<String>,

    /// Semantic Scholar API key
    #[arg(long, env = "SEMANTIC_SCHOLAR_API_KEY", hide_env_values = true)]
    pub semantic_scholar_api_key: Option<String>,
}

impl Cli {
    /// Apply flags on top of file configuration
    pub fn apply(&self, config: &mut ScholarcheckConfig) {
        let scholar = &mut config.scholar;
        if let Some(name) = &self.name {
            scholar.name = name.clone();
        }
        if self.orcid.is_some() {
            scholar.orcid = self.orcid.clone();
        }
        if self.scopus_id.is_some() {
            scholar.scopus_id = self.scopus_id.clone();
        }
        if self.researcher_id.is_some() {
            scholar.researcher_id = self.researcher_id.clone();
        }
        scholar.self_check |= self.self_check;

        let sources = &mut config.sources;
        if self.no_crossref {
            sources.crossref = false;
        }
        if self.no_semantic_scholar {
            sources.semantic_scholar = false;
        }
        if let Some(rows) = self.rows {
            sources.rows = rows;
        }
        if let Some(timeout) = self.timeout {
            sources.timeout_secs = timeout;
        }
        if self.mailto.is_some() {
            sources.mailto = self.mailto.clone();
        }
        if self.semantic_scholar_api_key.is_some() {
            sources.semantic_scholar_api_key = self.semantic_scholar_api_key.clone();
        }

        if let Some(concurrency) = self.concurrency {
            config.engine.concurrency = concurrency;
        }
    }
}
