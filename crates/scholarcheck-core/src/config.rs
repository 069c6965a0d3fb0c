//! Configuration for scholarcheck
//!
//! Run-scoped settings: who is being verified, which sources to ask and how
//! politely, and how many publications to evaluate at once. Loaded from TOML
//! and overridden by command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::anchors::{IdentityAnchors, ScholarIdentity};
use crate::error::ConfigError;

/// Largest `rows`/`limit` a source query may ask for
pub const MAX_ROWS: u32 = 20;
/// Largest number of publications evaluated concurrently
pub const MAX_CONCURRENCY: usize = 32;

/// System-wide configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScholarcheckConfig {
    /// The profile owner and their identity anchors
    pub scholar: ScholarConfig,
    /// Bibliographic source settings
    pub sources: SourcesConfig,
    /// Engine settings
    pub engine: EngineConfig,
}

/// The scholar whose publication list is being verified
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScholarConfig {
    /// Full author name (required)
    pub name: String,
    pub orcid: Option<String>,
    pub scopus_id: Option<String>,
    pub researcher_id: Option<String>,
    /// Verification is run by the profile owner; annotates output only
    pub self_check: bool,
}

/// Bibliographic source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub crossref: bool,
    pub semantic_scholar: bool,
    /// Candidates requested per source per publication
    pub rows: u32,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Minimum gap between two requests to the same source, in milliseconds
    pub min_interval_ms: u64,
    /// Contact address for the Crossref polite pool
    pub mailto: Option<String>,
    pub semantic_scholar_api_key: Option<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            crossref: true,
            semantic_scholar: true,
            rows: 3,
            timeout_secs: 30,
            min_interval_ms: 1000,
            mailto: None,
            semantic_scholar_api_key: None,
        }
    }
}

impl SourcesConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Publications evaluated concurrently
    pub concurrency: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

impl ScholarcheckConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/scholarcheck/config.toml`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scholarcheck").join("config.toml"))
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scholar.name.trim().is_empty() {
            return Err(ConfigError::MissingField("scholar.name".to_string()));
        }

        if !self.sources.crossref && !self.sources.semantic_scholar {
            return Err(ConfigError::MissingField(
                "at least one of sources.crossref / sources.semantic_scholar".to_string(),
            ));
        }

        if self.sources.rows == 0 || self.sources.rows > MAX_ROWS {
            return Err(ConfigError::OutOfRange(format!(
                "sources.rows must be between 1 and {}",
                MAX_ROWS
            )));
        }

        if self.sources.timeout_secs == 0 {
            return Err(ConfigError::OutOfRange(
                "sources.timeout_secs must be positive".to_string(),
            ));
        }

        if self.engine.concurrency == 0 || self.engine.concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::OutOfRange(format!(
                "engine.concurrency must be between 1 and {}",
                MAX_CONCURRENCY
            )));
        }

        // Throttle waits count against the per-source timeout: a full queue of
        // concurrent calls must drain before the last one times out
        let queued_ms =
            (self.engine.concurrency as u64).saturating_mul(self.sources.min_interval_ms);
        if queued_ms >= self.sources.timeout_secs.saturating_mul(1000) {
            return Err(ConfigError::OutOfRange(format!(
                "engine.concurrency x sources.min_interval_ms ({} ms) must stay below \
                 sources.timeout_secs ({} s)",
                queued_ms, self.sources.timeout_secs
            )));
        }

        Ok(())
    }

    /// Build the scholar identity, validating anchors
    ///
    /// Malformed anchors are logged once and dropped; only a missing name fails.
    pub fn identity(&self) -> Result<ScholarIdentity, ConfigError> {
        let anchors = IdentityAnchors::validate_and_report(
            self.scholar.orcid.as_deref(),
            self.scholar.scopus_id.as_deref(),
            self.scholar.researcher_id.as_deref(),
        );
        ScholarIdentity::new(self.scholar.name.clone(), anchors)
    }
}
