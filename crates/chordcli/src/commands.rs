use anyhow::{bail, Context, Result};
use chord_analysis::{ProgressionAnalyzer, ScaleMode};
use chordconf::{ChordConfig, ConfigSources, OutputFormat};
use tracing::debug;

use crate::fretboard::Fretboard;
use crate::input::split_arguments;
use crate::report::{render_json, TextReport};

/// Command-line overrides; `None` / `false` defers to the configuration.
#[derive(Debug, Default)]
pub struct AnalyzeOptions {
    pub scale: Option<ScaleMode>,
    pub format: Option<OutputFormat>,
    pub no_fretboard: bool,
    pub no_color: bool,
}

pub fn analyze(config: &ChordConfig, args: &[String], options: &AnalyzeOptions) -> Result<String> {
    let chords = split_arguments(args);
    if chords.is_empty() {
        bail!("no chord symbols given (expected a comma-separated list such as \"Em, Am, D7, G\")");
    }

    let scale_mode = match options.scale {
        Some(mode) => mode,
        None => config
            .analysis
            .scale_mode
            .parse()
            .context("Invalid analysis.scale_mode in configuration")?,
    };
    let format = options.format.unwrap_or(config.output.format);
    debug!(?chords, %scale_mode, %format, "running analysis");

    let result = ProgressionAnalyzer::new()
        .analyze(&chords, scale_mode)
        .context("Analysis failed")?;

    match format {
        OutputFormat::Json => {
            let mut json = render_json(&result)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Text => {
            let board = if config.fretboard.enabled && !options.no_fretboard {
                Some(Fretboard::new(&config.fretboard.tuning, config.fretboard.frets)?)
            } else {
                None
            };
            TextReport {
                color: config.output.color && !options.no_color,
                fretboard: board.as_ref(),
            }
            .render(&result)
        }
    }
}

pub fn show_config(config: &ChordConfig, sources: &ConfigSources) -> String {
    let mut out = config.to_toml();

    out.push_str("\n# Sources\n");
    if sources.files.is_empty() {
        out.push_str("# files: (none, compiled defaults)\n");
    } else {
        for file in &sources.files {
            out.push_str(&format!("# file: {}\n", file.display()));
        }
    }
    for var in &sources.env_overrides {
        out.push_str(&format!("# env: {var}\n"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn analyze_text_with_defaults() {
        let config = ChordConfig::default();
        let options = AnalyzeOptions {
            no_color: true,
            ..Default::default()
        };
        let out = analyze(&config, &args(&["Em, Am, D7, G"]), &options).unwrap();
        assert!(out.contains("(GM)"));
        assert!(out.contains("frets 0-15"));
    }

    #[test]
    fn flags_override_config() {
        let mut config = ChordConfig::default();
        config.output.format = OutputFormat::Json;

        let options = AnalyzeOptions {
            format: Some(OutputFormat::Text),
            no_fretboard: true,
            no_color: true,
            ..Default::default()
        };
        let out = analyze(&config, &args(&["C, F, G"]), &options).unwrap();
        assert!(out.starts_with("Analysis Results"));
        assert!(!out.contains("fretboard"));
    }

    #[test]
    fn json_format_from_config() {
        let mut config = ChordConfig::default();
        config.output.format = OutputFormat::Json;
        config.analysis.scale_mode = "chromatic".to_string();

        let out = analyze(&config, &args(&["C"]), &AnalyzeOptions::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["suggested_scale"]["kind"], "chromatic");
    }

    #[test]
    fn bad_config_scale_mode_is_reported() {
        let mut config = ChordConfig::default();
        config.analysis.scale_mode = "lydian".to_string();
        let err = analyze(&config, &args(&["C"]), &AnalyzeOptions::default()).unwrap_err();
        assert!(format!("{err:#}").contains("lydian"));
    }

    #[test]
    fn only_commas_is_an_error() {
        let config = ChordConfig::default();
        assert!(analyze(&config, &args(&[" , ,"]), &AnalyzeOptions::default()).is_err());
    }

    #[test]
    fn config_listing_names_sources() {
        let sources = ConfigSources {
            files: vec![PathBuf::from("/tmp/chordscope.toml")],
            env_overrides: vec!["NO_COLOR".to_string()],
        };
        let out = show_config(&ChordConfig::default(), &sources);
        assert!(out.contains("[fretboard]"));
        assert!(out.contains("# file: /tmp/chordscope.toml"));
        assert!(out.contains("# env: NO_COLOR"));
    }
}
