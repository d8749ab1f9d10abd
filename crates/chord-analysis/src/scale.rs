//! Scale construction and scale-degree labelling.

use serde::{Deserialize, Serialize};

use crate::note::{PitchClass, Spelling};
use crate::types::{Key, KeyMode};

/// Whole/half step pattern of the major scale: W W H W W W H.
const MAJOR_STEPS: [u8; 7] = [2, 2, 1, 2, 2, 2, 1];

/// Natural minor: W H W W H W W.
const MINOR_STEPS: [u8; 7] = [2, 1, 2, 2, 1, 2, 2];

const MAJOR_DEGREE_LABELS: [&str; 7] = [
    "Tonic (I)",
    "Supertonic (ii)",
    "Mediant (iii)",
    "Subdominant (IV)",
    "Dominant (V)",
    "Submediant (vi)",
    "Leading Tone (vii°)",
];

const MINOR_DEGREE_LABELS: [&str; 7] = [
    "Tonic (i)",
    "Supertonic (ii°)",
    "Mediant (III)",
    "Subdominant (iv)",
    "Dominant (v)",
    "Submediant (VI)",
    "Subtonic (VII)",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleKind {
    Major,
    NaturalMinor,
    Chromatic,
}

impl From<KeyMode> for ScaleKind {
    fn from(mode: KeyMode) -> Self {
        match mode {
            KeyMode::Major => ScaleKind::Major,
            KeyMode::Minor => ScaleKind::NaturalMinor,
        }
    }
}

/// An ordered set of pitch classes, octave-reduced and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub kind: ScaleKind,
    pub root: PitchClass,
    pub notes: Vec<PitchClass>,
}

impl Scale {
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        self.notes.contains(&pc)
    }

    /// Note names in the conventional alphabet for this scale's root
    /// (flats for F, Bb, Eb ... sharps otherwise). The chromatic scale is
    /// always spelled with sharps.
    pub fn spelled_names(&self) -> Vec<&'static str> {
        let spelling = match self.kind {
            ScaleKind::Chromatic => Spelling::Sharps,
            _ => Spelling::for_key_root(self.root),
        };
        self.notes.iter().map(|pc| pc.spelled(spelling)).collect()
    }
}

/// Build the 7-note major or natural-minor scale on `root`.
pub fn build_scale(root: PitchClass, mode: KeyMode) -> Scale {
    let steps = match mode {
        KeyMode::Major => &MAJOR_STEPS,
        KeyMode::Minor => &MINOR_STEPS,
    };

    let mut notes = Vec::with_capacity(7);
    let mut current = root;
    // The last step returns to the octave, which is dropped.
    for &step in &steps[..6] {
        notes.push(current);
        current = current.transpose(step);
    }
    notes.push(current);

    Scale {
        kind: mode.into(),
        root,
        notes,
    }
}

/// All 12 pitch classes from C, regardless of key.
pub fn chromatic_scale() -> Scale {
    Scale {
        kind: ScaleKind::Chromatic,
        root: PitchClass::C,
        notes: PitchClass::all().collect(),
    }
}

/// The scale of a key paired with its degree-function names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleDegrees {
    pub key: Key,
    entries: [(PitchClass, &'static str); 7],
}

impl ScaleDegrees {
    /// Zero-based scale degree of `pc`, if it belongs to the key.
    pub fn degree_of(&self, pc: PitchClass) -> Option<usize> {
        self.entries.iter().position(|(note, _)| *note == pc)
    }

    pub fn label_of(&self, pc: PitchClass) -> Option<&'static str> {
        self.degree_of(pc).map(|i| self.entries[i].1)
    }

    /// Pitch class at a zero-based degree (0 = tonic, 6 = seventh).
    pub fn note_at(&self, degree: usize) -> PitchClass {
        self.entries[degree % 7].0
    }
}

pub fn scale_degrees(key: Key) -> ScaleDegrees {
    let scale = build_scale(key.root, key.mode);
    let labels = match key.mode {
        KeyMode::Major => &MAJOR_DEGREE_LABELS,
        KeyMode::Minor => &MINOR_DEGREE_LABELS,
    };

    let entries = std::array::from_fn(|i| (scale.notes[i], labels[i]));

    ScaleDegrees { key, entries }
}
