//! Configuration sections. Every field has a serde default so partial files parse.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Analysis defaults applied when the command line does not say otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// "diatonic" or "chromatic".
    /// Default: diatonic
    #[serde(default = "AnalysisConfig::default_scale_mode")]
    pub scale_mode: String,
}

impl AnalysisConfig {
    fn default_scale_mode() -> String {
        "diatonic".to_string()
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scale_mode: Self::default_scale_mode(),
        }
    }
}

/// How the CLI renders an analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default: text
    #[serde(default)]
    pub format: OutputFormat,

    /// ANSI colors in text output. `NO_COLOR` forces this off.
    /// Default: true
    #[serde(default = "OutputConfig::default_color")]
    pub color: bool,
}

impl OutputConfig {
    fn default_color() -> bool {
        true
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: Self::default_color(),
        }
    }
}

/// Guitar fretboard diagram in the text report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FretboardConfig {
    /// Default: true
    #[serde(default = "FretboardConfig::default_enabled")]
    pub enabled: bool,

    /// Highest fret drawn; fret 0 is the open string.
    /// Default: 15
    #[serde(default = "FretboardConfig::default_frets")]
    pub frets: u8,

    /// Open-string note names, highest-pitched string first.
    /// Default: standard tuning E B G D A E
    #[serde(default = "FretboardConfig::default_tuning")]
    pub tuning: Vec<String>,
}

impl FretboardConfig {
    pub const MAX_FRETS: u8 = 24;

    fn default_enabled() -> bool {
        true
    }

    fn default_frets() -> u8 {
        15
    }

    fn default_tuning() -> Vec<String> {
        ["E", "B", "G", "D", "A", "E"]
            .into_iter()
            .map(String::from)
            .collect()
    }
}

impl Default for FretboardConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            frets: Self::default_frets(),
            tuning: Self::default_tuning(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset
    /// (trace, debug, info, warn, error, or a full EnvFilter string).
    /// Default: warn
    #[serde(default = "TelemetryConfig::default_log_level")]
    pub log_level: String,
}

impl TelemetryConfig {
    fn default_log_level() -> String {
        "warn".to_string()
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
        }
    }
}
