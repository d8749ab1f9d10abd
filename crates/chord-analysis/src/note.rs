//! Pitch classes and enharmonic normalization.
//!
//! Every note name that enters the engine is folded onto the sharp-based
//! alphabet before it is compared or stored, so `Db` and `C#` land on the
//! same [`PitchClass`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

const NOTE_NAMES_SHARP: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
const NOTE_NAMES_FLAT: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Key roots conventionally spelled with sharps: C G D A E B F# C#.
const SHARP_KEY_ROOTS: [u8; 8] = [0, 7, 2, 9, 4, 11, 6, 1];

/// Map a note spelling onto the canonical sharp alphabet.
///
/// Flats and the `E#`/`B#` edge spellings are rewritten; canonical names and
/// anything unrecognized pass through untouched.
pub fn normalize_note_name(note: &str) -> &str {
    match note {
        "Bb" => "A#",
        "Cb" => "B",
        "Db" => "C#",
        "Eb" => "D#",
        "Fb" => "E",
        "Gb" => "F#",
        "Ab" => "G#",
        "E#" => "F",
        "B#" => "C",
        _ => note,
    }
}

/// One of the 12 octave-independent notes (C=0, C#=1, ... B=11).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const D: PitchClass = PitchClass(2);
    pub const E: PitchClass = PitchClass(4);
    pub const F: PitchClass = PitchClass(5);
    pub const G: PitchClass = PitchClass(7);
    pub const A: PitchClass = PitchClass(9);
    pub const B: PitchClass = PitchClass(11);

    /// Wraps any index onto the 12-tone circle.
    pub const fn new(index: u8) -> Self {
        Self(index % 12)
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// All 12 pitch classes in chromatic order starting at C.
    pub fn all() -> impl Iterator<Item = PitchClass> {
        (0..12u8).map(PitchClass)
    }

    /// Resolve a note name (any supported spelling) to its pitch class.
    pub fn from_name(name: &str) -> Option<Self> {
        let canonical = normalize_note_name(name);
        NOTE_NAMES_SHARP
            .iter()
            .position(|&n| n == canonical)
            .map(|i| Self(i as u8))
    }

    /// Canonical (sharp) name.
    pub fn name(self) -> &'static str {
        NOTE_NAMES_SHARP[self.0 as usize]
    }

    pub fn spelled(self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharps => NOTE_NAMES_SHARP[self.0 as usize],
            Spelling::Flats => NOTE_NAMES_FLAT[self.0 as usize],
        }
    }

    pub fn transpose(self, semitones: u8) -> Self {
        Self((self.0 + semitones % 12) % 12)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| AnalysisError::UnknownNote(s.to_string()))
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.name().to_string()
    }
}

impl TryFrom<String> for PitchClass {
    type Error = AnalysisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Alphabet used when displaying the notes of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    Sharps,
    Flats,
}

impl Spelling {
    /// Sharp-side keys (C G D A E B F# C#) use sharps, everything else flats.
    pub fn for_key_root(root: PitchClass) -> Self {
        if SHARP_KEY_ROOTS.contains(&root.index()) {
            Spelling::Sharps
        } else {
            Spelling::Flats
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPPORTED: [&str; 21] = [
        "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B", "Bb", "Cb", "Db", "Eb",
        "Fb", "Gb", "Ab", "E#", "B#",
    ];

    #[test]
    fn flats_fold_to_sharps() {
        assert_eq!(normalize_note_name("Db"), "C#");
        assert_eq!(normalize_note_name("Bb"), "A#");
        assert_eq!(normalize_note_name("Cb"), "B");
        assert_eq!(normalize_note_name("Fb"), "E");
        assert_eq!(normalize_note_name("E#"), "F");
        assert_eq!(normalize_note_name("B#"), "C");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(normalize_note_name("H"), "H");
        assert_eq!(normalize_note_name(""), "");
        assert_eq!(normalize_note_name("Dbb"), "Dbb");
    }

    #[test]
    fn normalization_is_idempotent() {
        for name in SUPPORTED {
            let once = normalize_note_name(name);
            assert_eq!(normalize_note_name(once), once, "{name}");
        }
    }

    #[test]
    fn every_supported_spelling_resolves() {
        for name in SUPPORTED {
            assert!(PitchClass::from_name(name).is_some(), "{name} should resolve");
        }
        assert_eq!(PitchClass::from_name("Gb"), PitchClass::from_name("F#"));
        assert_eq!(PitchClass::from_name("X"), None);
    }

    #[test]
    fn flat_spelling_for_flat_side_keys() {
        assert_eq!(Spelling::for_key_root(PitchClass::F), Spelling::Flats);
        assert_eq!(Spelling::for_key_root(PitchClass::new(10)), Spelling::Flats);
        assert_eq!(Spelling::for_key_root(PitchClass::new(6)), Spelling::Sharps);
        assert_eq!(PitchClass::new(10).spelled(Spelling::Flats), "Bb");
        assert_eq!(PitchClass::new(10).spelled(Spelling::Sharps), "A#");
    }

    #[test]
    fn transpose_wraps() {
        assert_eq!(PitchClass::B.transpose(1), PitchClass::C);
        assert_eq!(PitchClass::A.transpose(14), PitchClass::B);
    }

    #[test]
    fn serializes_as_canonical_name() {
        let json = serde_json::to_string(&PitchClass::new(1)).unwrap();
        assert_eq!(json, "\"C#\"");
        let back: PitchClass = serde_json::from_str("\"Db\"").unwrap();
        assert_eq!(back, PitchClass::new(1));
    }
}
