//! Config file discovery, loading, and environment variable overlay.

use crate::{
    AnalysisConfig, ChordConfig, ConfigError, FretboardConfig, OutputConfig, TelemetryConfig,
};
use std::env;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "chordscope";
const LOCAL_FILE: &str = "chordscope.toml";

/// Information about where config values came from.
#[derive(Debug, Clone, Default)]
pub struct ConfigSources {
    /// Config files that were loaded (in order)
    pub files: Vec<PathBuf>,
    /// Environment variables that overrode config values
    pub env_overrides: Vec<String>,
}

/// Discover config files in standard locations.
///
/// Returns paths in load order (system, user, local or `cli_path`).
/// Only returns files that exist. If `cli_path` is provided and exists,
/// it replaces the local override.
pub fn discover_config_files_with_override(cli_path: Option<&Path>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    let system = PathBuf::from("/etc").join(APP_DIR).join("config.toml");
    if system.exists() {
        files.push(system);
    }

    // XDG_CONFIG_HOME or platform equivalent
    if let Some(config_dir) = directories::BaseDirs::new().map(|d| d.config_dir().to_path_buf()) {
        let user = config_dir.join(APP_DIR).join("config.toml");
        if user.exists() {
            files.push(user);
        }
    }

    if let Some(path) = cli_path {
        if path.exists() {
            files.push(path.to_path_buf());
            return files;
        }
    }

    let local = PathBuf::from(LOCAL_FILE);
    if local.exists() {
        files.push(local);
    }

    files
}

/// Load config from a TOML file.
pub fn load_from_file(path: &Path) -> Result<ChordConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_toml(&contents, path)
}

/// Parse config from a TOML string. Missing keys take their defaults.
fn parse_toml(contents: &str, path: &Path) -> Result<ChordConfig, ConfigError> {
    toml::from_str(contents).map_err(|e: toml::de::Error| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Take `overlay` unless it still holds the compiled default.
fn layer<T: PartialEq>(base: T, overlay: T, default: T) -> T {
    if overlay != default {
        overlay
    } else {
        base
    }
}

/// Merge two configs field by field, with `overlay` taking precedence.
///
/// A file cannot reset a value back to its default once an earlier file
/// changed it; it can only change it to something else.
pub fn merge_configs(base: ChordConfig, overlay: ChordConfig) -> ChordConfig {
    let analysis = AnalysisConfig::default();
    let output = OutputConfig::default();
    let fretboard = FretboardConfig::default();
    let telemetry = TelemetryConfig::default();

    ChordConfig {
        analysis: AnalysisConfig {
            scale_mode: layer(
                base.analysis.scale_mode,
                overlay.analysis.scale_mode,
                analysis.scale_mode,
            ),
        },
        output: OutputConfig {
            format: layer(base.output.format, overlay.output.format, output.format),
            color: layer(base.output.color, overlay.output.color, output.color),
        },
        fretboard: FretboardConfig {
            enabled: layer(
                base.fretboard.enabled,
                overlay.fretboard.enabled,
                fretboard.enabled,
            ),
            frets: layer(base.fretboard.frets, overlay.fretboard.frets, fretboard.frets),
            tuning: layer(
                base.fretboard.tuning,
                overlay.fretboard.tuning,
                fretboard.tuning,
            ),
        },
        telemetry: TelemetryConfig {
            log_level: layer(
                base.telemetry.log_level,
                overlay.telemetry.log_level,
                telemetry.log_level,
            ),
        },
    }
}

/// Apply environment variable overrides to config.
pub fn apply_env_overrides(config: &mut ChordConfig, sources: &mut ConfigSources) {
    apply_overrides_from(config, sources, |name| env::var(name).ok());
}

/// Apply overrides from any variable lookup. Unparseable values are skipped.
pub fn apply_overrides_from<F>(config: &mut ChordConfig, sources: &mut ConfigSources, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("CHORDSCOPE_SCALE_MODE") {
        config.analysis.scale_mode = v;
        sources.env_overrides.push("CHORDSCOPE_SCALE_MODE".to_string());
    }

    if let Some(v) = lookup("CHORDSCOPE_FORMAT") {
        if let Ok(format) = v.parse() {
            config.output.format = format;
            sources.env_overrides.push("CHORDSCOPE_FORMAT".to_string());
        }
    }

    if let Some(v) = lookup("CHORDSCOPE_FRETS") {
        if let Ok(frets) = v.trim().parse() {
            config.fretboard.frets = frets;
            sources.env_overrides.push("CHORDSCOPE_FRETS".to_string());
        }
    }

    if let Some(v) = lookup("CHORDSCOPE_LOG_LEVEL") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("CHORDSCOPE_LOG_LEVEL".to_string());
    }
    // RUST_LOG wins over CHORDSCOPE_LOG_LEVEL
    if let Some(v) = lookup("RUST_LOG") {
        config.telemetry.log_level = v;
        sources.env_overrides.push("RUST_LOG".to_string());
    }

    // https://no-color.org: any non-empty value disables color
    if let Some(v) = lookup("NO_COLOR") {
        if !v.is_empty() {
            config.output.color = false;
            sources.env_overrides.push("NO_COLOR".to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OutputFormat;
    use std::collections::HashMap;

    fn apply(vars: &[(&str, &str)]) -> (ChordConfig, ConfigSources) {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut config = ChordConfig::default();
        let mut sources = ConfigSources::default();
        apply_overrides_from(&mut config, &mut sources, |name| vars.get(name).cloned());
        (config, sources)
    }

    #[test]
    fn test_parse_minimal_toml() {
        let toml = r#"
[fretboard]
frets = 12
"#;
        let config = parse_toml(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.fretboard.frets, 12);
        // Other values should be defaults
        assert_eq!(config.fretboard.tuning.len(), 6);
        assert_eq!(config.analysis.scale_mode, "diatonic");
    }

    #[test]
    fn test_parse_full_toml() {
        let toml = r#"
[analysis]
scale_mode = "chromatic"

[output]
format = "json"
color = false

[fretboard]
enabled = false
frets = 22
tuning = ["D", "A", "F#", "D", "A", "D"]

[telemetry]
log_level = "debug"
"#;
        let config = parse_toml(toml, Path::new("test.toml")).unwrap();

        assert_eq!(config.analysis.scale_mode, "chromatic");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
        assert!(!config.fretboard.enabled);
        assert_eq!(config.fretboard.frets, 22);
        assert_eq!(config.fretboard.tuning[2], "F#");
        assert_eq!(config.telemetry.log_level, "debug");
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = parse_toml("[output]\nformat = \"yaml\"\n", Path::new("bad.toml")).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, PathBuf::from("bad.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_merge_keeps_base_where_overlay_is_default() {
        let mut base = ChordConfig::default();
        base.fretboard.frets = 12;
        base.analysis.scale_mode = "chromatic".to_string();

        let mut overlay = ChordConfig::default();
        overlay.output.color = false;

        let merged = merge_configs(base, overlay);
        assert_eq!(merged.fretboard.frets, 12);
        assert_eq!(merged.analysis.scale_mode, "chromatic");
        assert!(!merged.output.color);
    }

    #[test]
    fn test_merge_overlay_wins() {
        let mut base = ChordConfig::default();
        base.fretboard.frets = 12;
        let mut overlay = ChordConfig::default();
        overlay.fretboard.frets = 20;

        assert_eq!(merge_configs(base, overlay).fretboard.frets, 20);
    }

    #[test]
    fn test_env_overrides() {
        let (config, sources) = apply(&[
            ("CHORDSCOPE_SCALE_MODE", "chromatic"),
            ("CHORDSCOPE_FORMAT", "json"),
            ("CHORDSCOPE_FRETS", "12"),
        ]);
        assert_eq!(config.analysis.scale_mode, "chromatic");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.fretboard.frets, 12);
        assert_eq!(
            sources.env_overrides,
            vec!["CHORDSCOPE_SCALE_MODE", "CHORDSCOPE_FORMAT", "CHORDSCOPE_FRETS"]
        );
    }

    #[test]
    fn test_unparseable_env_values_are_skipped() {
        let (config, sources) = apply(&[("CHORDSCOPE_FRETS", "lots"), ("CHORDSCOPE_FORMAT", "xml")]);
        assert_eq!(config, ChordConfig::default());
        assert!(sources.env_overrides.is_empty());
    }

    #[test]
    fn test_rust_log_wins_over_log_level() {
        let (config, _) = apply(&[
            ("CHORDSCOPE_LOG_LEVEL", "info"),
            ("RUST_LOG", "chord_analysis=debug"),
        ]);
        assert_eq!(config.telemetry.log_level, "chord_analysis=debug");
    }

    #[test]
    fn test_no_color() {
        let (config, _) = apply(&[("NO_COLOR", "1")]);
        assert!(!config.output.color);

        let (config, sources) = apply(&[("NO_COLOR", "")]);
        assert!(config.output.color);
        assert!(sources.env_overrides.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chordscope.toml");
        std::fs::write(&path, "[analysis]\nscale_mode = \"chromatic\"\n").unwrap();

        let config = load_from_file(&path).unwrap();
        assert_eq!(config.analysis.scale_mode, "chromatic");
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = load_from_file(Path::new("/no/such/chordscope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileRead { .. }));
    }

    #[test]
    fn test_cli_path_is_discovered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "").unwrap();

        let files = discover_config_files_with_override(Some(&path));
        assert_eq!(files.last(), Some(&path));
    }
}
