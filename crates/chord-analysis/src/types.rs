use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::feedback::Feedback;
use crate::note::PitchClass;
use crate::scale::Scale;

/// Complete analysis of one chord progression.
///
/// `functions` and `intervals` are parallel to `chords`. Built once per call
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Chord symbols exactly as given
    pub chords: Vec<String>,
    /// Detected key in display form: "GM", "C#m"
    pub key: String,
    pub key_root: PitchClass,
    pub key_mode: KeyMode,
    /// Best score as a percentage of the maximum possible score
    pub confidence: f64,
    /// One line per chord, explaining its contribution to the detected key
    pub key_explanation: Vec<String>,
    pub functions: Vec<String>,
    pub intervals: Vec<Vec<String>>,
    pub suggested_scale: Scale,
    #[serde(default)]
    pub warnings: Vec<Feedback>,
}

impl AnalysisResult {
    pub fn detected_key(&self) -> Key {
        Key::new(self.key_root, self.key_mode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMode {
    Major,
    Minor,
}

impl KeyMode {
    /// Suffix used in key names: "M" for major, "m" for minor.
    pub fn marker(&self) -> char {
        match self {
            KeyMode::Major => 'M',
            KeyMode::Minor => 'm',
        }
    }

    pub fn from_marker(marker: char) -> Option<Self> {
        match marker {
            'M' => Some(KeyMode::Major),
            'm' => Some(KeyMode::Minor),
            _ => None,
        }
    }
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyMode::Major => write!(f, "major"),
            KeyMode::Minor => write!(f, "minor"),
        }
    }
}

/// A tonal center: root plus mode.
///
/// Displays and parses as root followed by the mode marker ("GM", "C#m").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    pub root: PitchClass,
    pub mode: KeyMode,
}

impl Key {
    pub const fn new(root: PitchClass, mode: KeyMode) -> Self {
        Self { root, mode }
    }

    /// All 24 keys, roots in chromatic order, major before minor.
    pub fn all() -> impl Iterator<Item = Key> {
        PitchClass::all().flat_map(|root| {
            [KeyMode::Major, KeyMode::Minor]
                .into_iter()
                .map(move |mode| Key::new(root, mode))
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.mode.marker())
    }
}

impl FromStr for Key {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AnalysisError::InvalidKey(s.to_string());
        let marker = s.chars().last().ok_or_else(invalid)?;
        let mode = KeyMode::from_marker(marker).ok_or_else(invalid)?;
        let root_name = &s[..s.len() - marker.len_utf8()];
        let root = PitchClass::from_name(root_name).ok_or_else(invalid)?;
        Ok(Key::new(root, mode))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChordQuality {
    Major,
    Minor,
    Dominant,
    Diminished,
    HalfDiminished,
    Augmented,
}

impl ChordQuality {
    /// The triad this quality is built on, used when matching against a
    /// key's diatonic chords. Sevenths are extensions there, so a dominant
    /// chord counts as major and a half-diminished one as diminished.
    pub fn triad(self) -> ChordQuality {
        match self {
            ChordQuality::Dominant => ChordQuality::Major,
            ChordQuality::HalfDiminished => ChordQuality::Diminished,
            other => other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChordQuality::Major => "major",
            ChordQuality::Minor => "minor",
            ChordQuality::Dominant => "dominant",
            ChordQuality::Diminished => "diminished",
            ChordQuality::HalfDiminished => "half-diminished",
            ChordQuality::Augmented => "augmented",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric chord extension recognized for interval purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ChordExtension {
    Seventh,
    Ninth,
    Eleventh,
    Thirteenth,
}

impl ChordExtension {
    pub fn from_degree(degree: u32) -> Option<Self> {
        match degree {
            7 => Some(ChordExtension::Seventh),
            9 => Some(ChordExtension::Ninth),
            11 => Some(ChordExtension::Eleventh),
            13 => Some(ChordExtension::Thirteenth),
            _ => None,
        }
    }

    pub fn degree(self) -> u8 {
        match self {
            ChordExtension::Seventh => 7,
            ChordExtension::Ninth => 9,
            ChordExtension::Eleventh => 11,
            ChordExtension::Thirteenth => 13,
        }
    }
}

impl From<ChordExtension> for u8 {
    fn from(ext: ChordExtension) -> Self {
        ext.degree()
    }
}

impl TryFrom<u8> for ChordExtension {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ChordExtension::from_degree(value as u32)
            .ok_or_else(|| format!("unsupported chord extension {value}"))
    }
}

/// A chord symbol broken into root, quality and extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedChord {
    pub symbol: String,
    /// `None` when the symbol has no valid leading note letter
    pub root: Option<PitchClass>,
    pub quality: ChordQuality,
    pub extension: Option<ChordExtension>,
}

/// Which scale to suggest alongside the detected key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// The 7-note scale of the detected key
    #[default]
    Diatonic,
    /// All 12 pitch classes, independent of key
    Chromatic,
}

impl fmt::Display for ScaleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScaleMode::Diatonic => write!(f, "diatonic"),
            ScaleMode::Chromatic => write!(f, "chromatic"),
        }
    }
}

impl FromStr for ScaleMode {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "diatonic" => Ok(ScaleMode::Diatonic),
            "chromatic" => Ok(ScaleMode::Chromatic),
            _ => Err(AnalysisError::InvalidScaleMode(s.to_string())),
        }
    }
}
