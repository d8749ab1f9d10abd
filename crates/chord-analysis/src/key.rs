use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AnalysisError;
use crate::hooks::ScoringHooks;
use crate::note::PitchClass;
use crate::scale::build_scale;
use crate::types::{ChordQuality, Key, KeyMode, ParsedChord};

/// Triad quality on each degree of the major scale (I ii iii IV V vi vii°).
const MAJOR_DEGREE_QUALITIES: [ChordQuality; 7] = [
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Diminished,
];

/// Natural minor: i ii° III iv v VI VII.
const MINOR_DEGREE_QUALITIES: [ChordQuality; 7] = [
    ChordQuality::Minor,
    ChordQuality::Diminished,
    ChordQuality::Major,
    ChordQuality::Minor,
    ChordQuality::Minor,
    ChordQuality::Major,
    ChordQuality::Major,
];

const TONIC_WEIGHT: f64 = 3.0;
const SUBDOMINANT_WEIGHT: f64 = 2.0;
const DOMINANT_WEIGHT: f64 = 2.0;
const DIATONIC_WEIGHT: f64 = 1.0;

/// Best possible score for a single chord; the confidence denominator.
pub const MAX_CHORD_SCORE: f64 = TONIC_WEIGHT;

/// One of the seven chords built on a key's scale degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiatonicChord {
    pub root: PitchClass,
    pub quality: ChordQuality,
}

/// A key under consideration together with its diatonic chords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyCandidate {
    pub key: Key,
    pub diatonic_chords: [DiatonicChord; 7],
}

impl KeyCandidate {
    pub fn new(key: Key) -> Self {
        let scale = build_scale(key.root, key.mode);
        let qualities = match key.mode {
            KeyMode::Major => &MAJOR_DEGREE_QUALITIES,
            KeyMode::Minor => &MINOR_DEGREE_QUALITIES,
        };

        let diatonic_chords = std::array::from_fn(|i| DiatonicChord {
            root: scale.notes[i],
            quality: qualities[i],
        });

        Self {
            key,
            diatonic_chords,
        }
    }

    pub fn name(&self) -> String {
        self.key.to_string()
    }

    /// Scale degree (0–6) whose chord matches `chord`'s root and triad.
    pub fn degree_of(&self, chord: &ParsedChord) -> Option<usize> {
        let root = chord.root?;
        let quality = chord.quality.triad();
        self.diatonic_chords
            .iter()
            .position(|dc| dc.root == root && dc.quality == quality)
    }
}

/// All 24 candidates, roots in chromatic order, major before minor.
pub fn generate_candidates() -> Vec<KeyCandidate> {
    Key::all().map(KeyCandidate::new).collect()
}

/// A candidate's score for one progression, with one explanation line per chord.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyScore {
    pub key: Key,
    pub score: f64,
    pub explanation: Vec<String>,
}

pub fn score_candidate(
    candidate: &KeyCandidate,
    chords: &[ParsedChord],
    hooks: &dyn ScoringHooks,
) -> KeyScore {
    let name = candidate.name();
    let mut score = 0.0;
    let mut explanation = Vec::with_capacity(chords.len());

    for chord in chords {
        let symbol = &chord.symbol;
        let line = match candidate.degree_of(chord) {
            Some(0) => {
                score += TONIC_WEIGHT;
                format!("{symbol} functions as Tonic in {name}")
            }
            Some(3) => {
                score += SUBDOMINANT_WEIGHT;
                format!("{symbol} functions as Subdominant in {name}")
            }
            Some(4) => {
                score += DOMINANT_WEIGHT;
                format!("{symbol} functions as Dominant in {name}")
            }
            Some(_) => {
                score += DIATONIC_WEIGHT;
                format!("{symbol} is diatonic in {name}")
            }
            None if hooks.is_secondary_dominant(chord, candidate) => {
                score += hooks.secondary_dominant_bonus();
                format!("{symbol} is a secondary dominant in {name}")
            }
            None if hooks.is_borrowed_chord(chord, candidate) => {
                score += hooks.borrowed_chord_bonus();
                format!("{symbol} is a borrowed chord in {name}")
            }
            None => format!("{symbol} is non-diatonic in {name}"),
        };
        explanation.push(line);
    }

    KeyScore {
        key: candidate.key,
        score,
        explanation,
    }
}

/// Outcome of key detection for one progression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDetection {
    pub key: Key,
    pub score: f64,
    /// Percentage of the maximum achievable score
    pub confidence: f64,
    pub explanation: Vec<String>,
    /// Every candidate, best first
    pub ranking: Vec<KeyScore>,
}

/// Score every candidate and pick the best key.
///
/// Ties are broken deterministically: major before minor, then the lowest
/// root (C=0). Confidence is `best / (chords × 3) × 100` and is not clamped.
pub fn detect_key(
    chords: &[ParsedChord],
    candidates: &[KeyCandidate],
    hooks: &dyn ScoringHooks,
) -> Result<KeyDetection, AnalysisError> {
    if chords.is_empty() {
        return Err(AnalysisError::EmptyProgression);
    }

    let mut ranking: Vec<KeyScore> = candidates
        .iter()
        .map(|candidate| score_candidate(candidate, chords, hooks))
        .collect();

    ranking.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then(a.key.mode.cmp(&b.key.mode))
            .then(a.key.root.cmp(&b.key.root))
    });

    let best = ranking.first().ok_or(AnalysisError::EmptyProgression)?;
    let (key, score, explanation) = (best.key, best.score, best.explanation.clone());
    let max_possible = chords.len() as f64 * MAX_CHORD_SCORE;
    let confidence = score / max_possible * 100.0;

    debug!(
        key = %key,
        score,
        runner_up = ?ranking.get(1).map(|s| (s.key.to_string(), s.score)),
        "key candidates ranked"
    );

    Ok(KeyDetection {
        key,
        score,
        confidence,
        explanation,
        ranking,
    })
}
