//! Analysis feedback (warnings and notes about individual chords).
//!
//! Malformed symbols never abort an analysis. They are scored as
//! non-diatonic and leave a feedback entry here instead.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub level: FeedbackLevel,
    /// Position of the chord in the input progression
    pub chord_index: usize,
    pub symbol: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackLevel {
    /// The chord could not be interpreted and was treated as non-diatonic
    Warning,
    /// Part of the symbol was ignored
    Info,
}

#[derive(Debug, Default)]
pub struct FeedbackCollector {
    feedback: Vec<Feedback>,
}

impl FeedbackCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warning(&mut self, chord_index: usize, symbol: &str, message: impl Into<String>) {
        self.push(FeedbackLevel::Warning, chord_index, symbol, message.into());
    }

    pub fn info(&mut self, chord_index: usize, symbol: &str, message: impl Into<String>) {
        self.push(FeedbackLevel::Info, chord_index, symbol, message.into());
    }

    fn push(&mut self, level: FeedbackLevel, chord_index: usize, symbol: &str, message: String) {
        self.feedback.push(Feedback {
            level,
            chord_index,
            symbol: symbol.to_string(),
            message,
        });
    }

    pub fn into_vec(self) -> Vec<Feedback> {
        self.feedback
    }
}
