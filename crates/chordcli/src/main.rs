//! chordcli - chord progression analysis from the command line
//!
//! Subcommands:
//! - `chordcli analyze "<chords>"` - Detect key, functions, intervals and scale
//! - `chordcli config` - Show the effective configuration and its sources

use std::path::PathBuf;

use anyhow::{Context, Result};
use chord_analysis::ScaleMode;
use chordconf::{ChordConfig, OutputFormat};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod fretboard;
mod input;
mod report;

#[derive(Parser)]
#[command(name = "chordcli")]
#[command(about = "Analyze chord progressions: key, harmonic function, intervals and scale")]
#[command(version)]
struct Cli {
    /// Config file to use instead of ./chordscope.toml
    #[arg(long, global = true, env = "CHORDSCOPE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a chord progression
    Analyze {
        /// Chord symbols, comma-separated (e.g. "Em, C#m7, G#m7b5")
        #[arg(required = true, num_args = 1..)]
        chords: Vec<String>,

        /// Scale to suggest: diatonic or chromatic
        #[arg(short, long)]
        scale: Option<ScaleMode>,

        /// Output format: text or json
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Skip the guitar fretboard diagram
        #[arg(long)]
        no_fretboard: bool,

        /// Disable ANSI colors
        #[arg(long)]
        no_color: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, sources) = ChordConfig::load_with_sources_from(cli.config.as_deref())
        .context("Failed to load configuration")?;

    init_tracing(&config.telemetry.log_level);
    tracing::debug!(files = ?sources.files, env = ?sources.env_overrides, "configuration loaded");

    match cli.command {
        Commands::Analyze {
            chords,
            scale,
            format,
            no_fretboard,
            no_color,
        } => {
            let options = commands::AnalyzeOptions {
                scale,
                format,
                no_fretboard,
                no_color,
            };
            let output = commands::analyze(&config, &chords, &options)?;
            print!("{output}");
        }
        Commands::Config => {
            print!("{}", commands::show_config(&config, &sources));
        }
    }

    Ok(())
}

/// Logs go to stderr so JSON on stdout stays parseable.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
