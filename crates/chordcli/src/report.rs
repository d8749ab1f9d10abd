//! Rendering an `AnalysisResult` for the terminal.

use anyhow::{Context, Result};
use chord_analysis::{AnalysisResult, FeedbackLevel, ScaleKind, Spelling};
use owo_colors::OwoColorize;
use prettytable::{format, Cell, Row, Table};

use crate::fretboard::Fretboard;

pub struct TextReport<'a> {
    pub color: bool,
    pub fretboard: Option<&'a Fretboard>,
}

impl TextReport<'_> {
    pub fn render(&self, result: &AnalysisResult) -> Result<String> {
        let mut out = String::new();
        let spelling = Spelling::for_key_root(result.key_root);

        out.push_str(&self.heading("Analysis Results"));
        out.push_str(&format!("Chords: {}\n", result.chords.join(", ")));
        out.push_str(&format!(
            "Detected key: {} {} ({})\n",
            result.key_root.spelled(spelling),
            result.key_mode,
            result.key
        ));
        out.push_str(&format!("Confidence: {:.2}%\n", result.confidence));

        out.push('\n');
        out.push_str(&self.heading("Key explanation"));
        for line in &result.key_explanation {
            out.push_str(&format!("  - {line}\n"));
        }

        out.push('\n');
        out.push_str(&self.heading("Chord functions and intervals"));
        out.push_str(&self.chord_table(result)?);

        out.push('\n');
        let scale_label = match result.suggested_scale.kind {
            ScaleKind::Chromatic => "chromatic",
            _ => "diatonic",
        };
        out.push_str(&self.heading(&format!("Suggested scale ({scale_label})")));
        out.push_str(&format!(
            "  {}\n",
            result.suggested_scale.spelled_names().join(" ")
        ));

        if !result.warnings.is_empty() {
            out.push('\n');
            out.push_str(&self.heading("Notes"));
            for entry in &result.warnings {
                let marker = match entry.level {
                    FeedbackLevel::Warning => "warning",
                    FeedbackLevel::Info => "note",
                };
                let marker = if self.color && entry.level == FeedbackLevel::Warning {
                    marker.yellow().to_string()
                } else {
                    marker.to_string()
                };
                out.push_str(&format!(
                    "  {marker}: chord {} ({}): {}\n",
                    entry.chord_index + 1,
                    entry.symbol,
                    entry.message
                ));
            }
        }

        if let Some(board) = self.fretboard {
            out.push('\n');
            out.push_str(&self.heading(&format!(
                "Suggested scale on guitar fretboard (frets 0-{})",
                board.frets()
            )));
            out.push_str(&Fretboard::legend(self.color));
            out.push('\n');
            out.push_str(&board.render(result, self.color));
        }

        Ok(out)
    }

    fn heading(&self, title: &str) -> String {
        if self.color {
            format!("{}\n", title.bold())
        } else {
            format!("{title}\n")
        }
    }

    fn chord_table(&self, result: &AnalysisResult) -> Result<String> {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);
        table.set_titles(Row::new(vec![
            Cell::new("Chord"),
            Cell::new("Function"),
            Cell::new("Intervals"),
        ]));

        for ((chord, function), intervals) in result
            .chords
            .iter()
            .zip(&result.functions)
            .zip(&result.intervals)
        {
            table.add_row(Row::new(vec![
                Cell::new(chord),
                Cell::new(function),
                Cell::new(&intervals.join(", ")),
            ]));
        }

        let mut output = Vec::new();
        table.print(&mut output)?;
        String::from_utf8(output).context("Failed to convert table to string")
    }
}

pub fn render_json(result: &AnalysisResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("Failed to format JSON")
}
