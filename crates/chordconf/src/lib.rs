//! Layered configuration for the chordscope tools.
//!
//! Kept free of analysis types so any consumer can depend on it. Values that
//! name analysis concepts (the scale mode) stay strings here and are
//! validated by the consumer.
//!
//! # Usage
//!
//! ```rust,no_run
//! use chordconf::ChordConfig;
//!
//! let config = ChordConfig::load().expect("Failed to load config");
//! println!("scale mode: {}", config.analysis.scale_mode);
//! println!("frets: {}", config.fretboard.frets);
//! ```
//!
//! # Config File Locations
//!
//! Files are loaded in order (later wins):
//! 1. `/etc/chordscope/config.toml` (system)
//! 2. `~/.config/chordscope/config.toml` (user)
//! 3. `./chordscope.toml` (local override, replaced by `--config`)
//! 4. Environment variables (`CHORDSCOPE_*`, `RUST_LOG`, `NO_COLOR`)
//!
//! # Example Config
//!
//! ```toml
//! [analysis]
//! scale_mode = "diatonic"
//!
//! [output]
//! format = "text"
//! color = true
//!
//! [fretboard]
//! enabled = true
//! frets = 12
//! tuning = ["E", "B", "G", "D", "A", "E"]
//!
//! [telemetry]
//! log_level = "warn"
//! ```

pub mod loader;
pub mod sections;

pub use loader::{discover_config_files_with_override, ConfigSources};
pub use sections::{AnalysisConfig, FretboardConfig, OutputConfig, OutputFormat, TelemetryConfig};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Complete chordscope configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChordConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub fretboard: FretboardConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl ChordConfig {
    /// Load configuration from all sources.
    ///
    /// Load order (later wins):
    /// 1. Compiled defaults
    /// 2. `/etc/chordscope/config.toml`
    /// 3. `~/.config/chordscope/config.toml`
    /// 4. `./chordscope.toml`
    /// 5. Environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(None)?;
        Ok(config)
    }

    /// Load configuration with `config_path` in place of `./chordscope.toml`.
    ///
    /// System and user configs still load first. A path that does not exist
    /// is an error, unlike the discovered locations which are optional.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let (config, _sources) = Self::load_with_sources_from(config_path)?;
        Ok(config)
    }

    /// Load configuration and report where values came from.
    pub fn load_with_sources_from(
        config_path: Option<&Path>,
    ) -> Result<(Self, ConfigSources), ConfigError> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::FileRead {
                    path: path.to_path_buf(),
                    source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
                });
            }
        }

        let mut sources = ConfigSources::default();
        let mut config = ChordConfig::default();

        for path in loader::discover_config_files_with_override(config_path) {
            let file_config = loader::load_from_file(&path)?;
            config = loader::merge_configs(config, file_config);
            sources.files.push(path);
        }

        loader::apply_env_overrides(&mut config, &mut sources);
        config.validate()?;

        Ok((config, sources))
    }

    /// Reject values no consumer can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let frets = self.fretboard.frets;
        if frets == 0 || frets > FretboardConfig::MAX_FRETS {
            return Err(ConfigError::Invalid {
                key: "fretboard.frets",
                message: format!("{frets} is outside 1..={}", FretboardConfig::MAX_FRETS),
            });
        }
        if self.fretboard.tuning.is_empty() {
            return Err(ConfigError::Invalid {
                key: "fretboard.tuning",
                message: "at least one string is required".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize config to TOML string.
    pub fn to_toml(&self) -> String {
        // Built by hand to keep section order and the header comment
        let mut output = String::new();

        output.push_str("# chordscope configuration\n\n");

        output.push_str("[analysis]\n");
        output.push_str(&format!("scale_mode = \"{}\"\n", self.analysis.scale_mode));

        output.push_str("\n[output]\n");
        output.push_str(&format!("format = \"{}\"\n", self.output.format));
        output.push_str(&format!("color = {}\n", self.output.color));

        output.push_str("\n[fretboard]\n");
        output.push_str(&format!("enabled = {}\n", self.fretboard.enabled));
        output.push_str(&format!("frets = {}\n", self.fretboard.frets));
        let tuning: Vec<String> = self
            .fretboard
            .tuning
            .iter()
            .map(|s| format!("\"{s}\""))
            .collect();
        output.push_str(&format!("tuning = [{}]\n", tuning.join(", ")));

        output.push_str("\n[telemetry]\n");
        output.push_str(&format!("log_level = \"{}\"\n", self.telemetry.log_level));

        output
    }
}
