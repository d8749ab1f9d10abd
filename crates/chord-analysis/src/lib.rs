pub mod error;
pub mod feedback;
pub mod function;
pub mod hooks;
pub mod intervals;
pub mod key;
pub mod note;
pub mod parser;
pub mod scale;
pub mod types;

pub use error::AnalysisError;
pub use feedback::{Feedback, FeedbackLevel};
pub use function::{function_of, function_of_pitch, NON_DIATONIC};
pub use hooks::{DiatonicOnly, ScoringHooks};
pub use key::{KeyCandidate, KeyDetection, KeyScore};
pub use note::{normalize_note_name, PitchClass, Spelling};
pub use parser::parse_chord;
pub use scale::{Scale, ScaleDegrees, ScaleKind};
pub use types::{
    AnalysisResult, ChordExtension, ChordQuality, Key, KeyMode, ParsedChord, ScaleMode,
};

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::feedback::FeedbackCollector;

/// Chord progression analysis engine.
///
/// Parses each chord symbol, scores the progression against all 24
/// major/minor keys, and assembles key, confidence, per-chord functions and
/// intervals, and a suggested scale into a single `AnalysisResult`.
///
/// The candidate keys are built once at construction; an analyzer holds no
/// other state and can be shared freely between threads.
pub struct ProgressionAnalyzer {
    candidates: Vec<KeyCandidate>,
    hooks: Arc<dyn ScoringHooks>,
}

impl Default for ProgressionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressionAnalyzer {
    /// Create with diatonic-only scoring.
    pub fn new() -> Self {
        Self::with_hooks(Arc::new(DiatonicOnly))
    }

    /// Create with custom scoring hooks for non-diatonic chords.
    pub fn with_hooks(hooks: Arc<dyn ScoringHooks>) -> Self {
        Self {
            candidates: key::generate_candidates(),
            hooks,
        }
    }

    pub fn candidates(&self) -> &[KeyCandidate] {
        &self.candidates
    }

    /// Analyze a progression of chord symbols, in playing order.
    ///
    /// Symbols are expected to be already split and trimmed. Malformed ones
    /// are tolerated and reported in `AnalysisResult::warnings`; only an
    /// empty progression is an error.
    pub fn analyze<S: AsRef<str>>(
        &self,
        chord_symbols: &[S],
        scale_mode: ScaleMode,
    ) -> Result<AnalysisResult, AnalysisError> {
        let symbols: Vec<String> = chord_symbols
            .iter()
            .map(|s| s.as_ref().to_string())
            .collect();

        if symbols.is_empty() {
            return Err(AnalysisError::EmptyProgression);
        }

        debug!(chords = ?symbols, %scale_mode, "analyzing progression");

        let mut feedback = FeedbackCollector::new();
        let parsed: Vec<ParsedChord> = symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| {
                let chord = parse_chord(symbol);
                check_chord(i, &chord, &mut feedback);
                chord
            })
            .collect();

        // 1. Key, confidence, explanation
        let detection = key::detect_key(&parsed, &self.candidates, self.hooks.as_ref())?;
        info!(
            key = %detection.key,
            confidence = detection.confidence,
            "key detected"
        );

        // 2. Suggested scale
        let suggested_scale = match scale_mode {
            ScaleMode::Diatonic => scale::build_scale(detection.key.root, detection.key.mode),
            ScaleMode::Chromatic => scale::chromatic_scale(),
        };

        // 3. Per-chord intervals and functions
        let intervals = parsed.iter().map(intervals::resolve_intervals).collect();
        let functions = parsed
            .iter()
            .map(|chord| function_of_pitch(chord.root, detection.key).to_string())
            .collect();

        Ok(AnalysisResult {
            chords: symbols,
            key: detection.key.to_string(),
            key_root: detection.key.root,
            key_mode: detection.key.mode,
            confidence: detection.confidence,
            key_explanation: detection.explanation,
            functions,
            intervals,
            suggested_scale,
            warnings: feedback.into_vec(),
        })
    }
}

/// Analyze a progression with the default analyzer.
pub fn analyze_progression<S: AsRef<str>>(
    chord_symbols: &[S],
    scale_mode: ScaleMode,
) -> Result<AnalysisResult, AnalysisError> {
    ProgressionAnalyzer::new().analyze(chord_symbols, scale_mode)
}

fn check_chord(index: usize, chord: &ParsedChord, feedback: &mut FeedbackCollector) {
    if chord.root.is_none() {
        warn!(symbol = %chord.symbol, "chord symbol has no recognizable root");
        feedback.warning(
            index,
            &chord.symbol,
            "no recognizable root (expected A-G with optional # or b); treated as non-diatonic",
        );
        return;
    }

    if chord.extension.is_none() {
        if let Some(number) = parser::first_number(&chord.symbol) {
            debug!(symbol = %chord.symbol, number, "ignoring unsupported extension");
            feedback.info(
                index,
                &chord.symbol,
                format!("extension {number} is not one of 7, 9, 11, 13 and was ignored"),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysBorrowed;

    impl ScoringHooks for AlwaysBorrowed {
        fn is_borrowed_chord(&self, _: &ParsedChord, _: &KeyCandidate) -> bool {
            true
        }
    }

    #[test]
    fn analyzer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProgressionAnalyzer>();
    }

    #[test]
    fn default_analyzer_has_24_candidates() {
        assert_eq!(ProgressionAnalyzer::default().candidates().len(), 24);
    }

    #[test]
    fn custom_hooks_change_scores() {
        let analyzer = ProgressionAnalyzer::with_hooks(Arc::new(AlwaysBorrowed));
        let result = analyzer.analyze(&["C", "F#"], ScaleMode::Diatonic).unwrap();
        assert_eq!(result.key, "CM");
        assert_eq!(result.key_explanation[1], "F# is a borrowed chord in CM");
        assert!((result.confidence - 3.5 / 6.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn malformed_symbol_warns() {
        let result = analyze_progression(&["C", "Q7"], ScaleMode::Diatonic).unwrap();
        assert_eq!(result.functions[1], NON_DIATONIC);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].level, FeedbackLevel::Warning);
        assert_eq!(result.warnings[0].chord_index, 1);
    }

    #[test]
    fn ignored_extension_is_noted() {
        let result = analyze_progression(&["C6"], ScaleMode::Diatonic).unwrap();
        assert_eq!(result.intervals[0], vec!["1", "3", "5"]);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].level, FeedbackLevel::Info);
    }

    #[test]
    fn half_diminished_token_is_not_flagged() {
        let result = analyze_progression(&["G#m7b5"], ScaleMode::Diatonic).unwrap();
        assert!(result.warnings.is_empty());
    }
}
