use crate::key::KeyCandidate;
use crate::types::ParsedChord;

/// Extra scoring rules for chords that are not diatonic to a candidate key.
///
/// The key detector consults these only after a chord failed to match any
/// of the candidate's seven diatonic chords. Secondary dominants are checked
/// first; a chord that is neither scores nothing.
///
/// Default: `DiatonicOnly`, which recognizes neither.
/// Future: real V/x and modal-mixture detection.
pub trait ScoringHooks: Send + Sync {
    fn is_secondary_dominant(&self, _chord: &ParsedChord, _key: &KeyCandidate) -> bool {
        false
    }

    fn is_borrowed_chord(&self, _chord: &ParsedChord, _key: &KeyCandidate) -> bool {
        false
    }

    fn secondary_dominant_bonus(&self) -> f64 {
        1.0
    }

    fn borrowed_chord_bonus(&self) -> f64 {
        0.5
    }
}

/// Scores diatonic matches only.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiatonicOnly;

impl ScoringHooks for DiatonicOnly {}
