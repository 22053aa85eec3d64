//! Configuration types for authsift.
//!
//! [`Config::load`] layers an optional TOML file (by default
//! `~/.config/authsift/config.toml`) over the built-in defaults.
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem (useful in tests).

use crate::catalogue::{Catalogue, CatalogueError, ExtraPattern};
use crate::reconcile::{InvalidThreshold, Reconciler, DEFAULT_ROLLOVER_THRESHOLD_DAYS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[input]
path = "data/SSH.txt"

[output]
path   = "data/datasetssh.csv"
format = "csv"

[reconcile]
rollover_threshold_days = 300

[report]
progress_interval = 500
top_events        = 10
top_sources       = 5
unknown_samples   = 5
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub reconcile: ReconcileConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub catalogue: CatalogueConfig,
}

/// `[input]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Read when no input is given on the command line.
    #[serde(default = "default_input_path")]
    pub path: PathBuf,
}

fn default_input_path() -> PathBuf { PathBuf::from("data/SSH.txt") }

impl Default for InputConfig {
    fn default() -> Self {
        Self { path: default_input_path() }
    }
}

/// Sink format for parsed events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Jsonl => write!(f, "jsonl"),
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_output_path() -> PathBuf { PathBuf::from("data/datasetssh.csv") }

impl Default for OutputConfig {
    fn default() -> Self {
        Self { path: default_output_path(), format: OutputFormat::default() }
    }
}

/// `[reconcile]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcileConfig {
    #[serde(default = "default_rollover_threshold_days")]
    pub rollover_threshold_days: i64,
}

fn default_rollover_threshold_days() -> i64 { DEFAULT_ROLLOVER_THRESHOLD_DAYS }

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self { rollover_threshold_days: default_rollover_threshold_days() }
    }
}

/// `[report]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Log progress every this many lines; 0 disables progress logging.
    #[serde(default = "default_progress_interval")]
    pub progress_interval: usize,
    #[serde(default = "default_top_events")]
    pub top_events: usize,
    #[serde(default = "default_top_sources")]
    pub top_sources: usize,
    #[serde(default = "default_unknown_samples")]
    pub unknown_samples: usize,
}

fn default_progress_interval() -> usize { 500 }
fn default_top_events() -> usize { 10 }
fn default_top_sources() -> usize { 5 }
fn default_unknown_samples() -> usize { 5 }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            progress_interval: default_progress_interval(),
            top_events: default_top_events(),
            top_sources: default_top_sources(),
            unknown_samples: default_unknown_samples(),
        }
    }
}

/// `[catalogue]` section: site-specific patterns checked after the built-ins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogueConfig {
    #[serde(default)]
    pub extra: Vec<ExtraPattern>,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load `path` layered on top of the built-in defaults.
    ///
    /// An explicit `path` must exist. Without one the default config path is
    /// tried and a missing file there is not an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (config_path(), false),
        };

        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path.as_path()).required(required))
            .build()?
            .try_deserialize()?;
        cfg.reconciler()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Compile the built-in catalogue plus any `[[catalogue.extra]]` entries.
    pub fn catalogue(&self) -> Result<Catalogue, CatalogueError> {
        Catalogue::with_extra(&self.catalogue.extra)
    }

    /// A clock-anchored reconciler using the configured threshold.
    pub fn reconciler(&self) -> Result<Reconciler, InvalidThreshold> {
        Reconciler::from_clock().with_rollover_threshold_days(self.reconcile.rollover_threshold_days)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("authsift")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
