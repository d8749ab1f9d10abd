//! ASCII guitar fretboard showing where the suggested scale lies.
//!
//! Every cell whose pitch class belongs to the suggested scale shows its note
//! name, colored by the role the note plays in the detected key.

use anyhow::{bail, Result};
use chord_analysis::scale::{scale_degrees, ScaleDegrees};
use chord_analysis::{AnalysisResult, PitchClass, Spelling};
use owo_colors::OwoColorize;

const CELL_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteRole {
    Root,
    Second,
    Third,
    Seventh,
    /// A scale note that some chord in the progression extends to (9, 11, 13)
    Extension,
    Plain,
}

impl NoteRole {
    fn paint(self, text: &str) -> String {
        match self {
            NoteRole::Root => text.red().to_string(),
            NoteRole::Third => text.blue().to_string(),
            NoteRole::Seventh => text.green().to_string(),
            NoteRole::Second => text.yellow().to_string(),
            NoteRole::Extension => text.magenta().to_string(),
            NoteRole::Plain => text.to_string(),
        }
    }
}

/// Role assignment for one analysis: the detected key's degrees plus the
/// extension intervals found anywhere in the progression.
pub struct Roles {
    degrees: ScaleDegrees,
    has_ninth: bool,
    has_eleventh: bool,
    has_thirteenth: bool,
}

impl Roles {
    pub fn for_result(result: &AnalysisResult) -> Self {
        let contains = |label: &str| {
            result
                .intervals
                .iter()
                .any(|chord| chord.iter().any(|interval| interval == label))
        };

        Self {
            degrees: scale_degrees(result.detected_key()),
            has_ninth: contains("9"),
            has_eleventh: contains("11"),
            has_thirteenth: contains("13"),
        }
    }

    pub fn role_of(&self, pc: PitchClass) -> NoteRole {
        let Some(degree) = self.degrees.degree_of(pc) else {
            return NoteRole::Plain;
        };

        let extended = (self.has_ninth && degree == 1)
            || (self.has_eleventh && degree == 3)
            || (self.has_thirteenth && degree == 5);
        if extended {
            return NoteRole::Extension;
        }

        match degree {
            0 => NoteRole::Root,
            1 => NoteRole::Second,
            2 => NoteRole::Third,
            6 => NoteRole::Seventh,
            _ => NoteRole::Plain,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Fretboard {
    /// Open strings, highest-pitched first
    strings: Vec<PitchClass>,
    frets: u8,
}

impl Fretboard {
    pub fn new(tuning: &[String], frets: u8) -> Result<Self> {
        let mut strings = Vec::with_capacity(tuning.len());
        for name in tuning {
            match PitchClass::from_name(name.trim()) {
                Some(pc) => strings.push(pc),
                None => bail!("unknown note '{name}' in fretboard tuning"),
            }
        }
        if strings.is_empty() {
            bail!("fretboard tuning has no strings");
        }
        Ok(Self { strings, frets })
    }

    pub fn strings(&self) -> &[PitchClass] {
        &self.strings
    }

    pub fn frets(&self) -> u8 {
        self.frets
    }

    pub fn note_at(&self, string: usize, fret: u8) -> PitchClass {
        self.strings[string].transpose(fret % 12)
    }

    /// Render the board for `result`, one line per string plus a fret ruler.
    pub fn render(&self, result: &AnalysisResult, color: bool) -> String {
        let roles = Roles::for_result(result);
        let spelling = Spelling::for_key_root(result.key_root);
        let label_width = self
            .strings
            .iter()
            .map(|pc| pc.spelled(spelling).len())
            .max()
            .unwrap_or(1);

        let mut out = String::new();
        for (i, open) in self.strings.iter().enumerate() {
            out.push_str(&format!("{:<label_width$} |", open.spelled(spelling)));
            for fret in 0..=self.frets {
                let pc = self.note_at(i, fret);
                let cell = if result.suggested_scale.contains(pc) {
                    let text = format!("{:^CELL_WIDTH$}", pc.spelled(spelling));
                    if color {
                        roles.role_of(pc).paint(&text)
                    } else {
                        text
                    }
                } else {
                    "-".repeat(CELL_WIDTH)
                };
                out.push_str(&cell);
                out.push('|');
            }
            out.push('\n');
        }

        out.push_str(&" ".repeat(label_width + 2));
        for fret in 0..=self.frets {
            out.push_str(&format!("{fret:^CELL_WIDTH$}"));
            out.push(' ');
        }
        out.push('\n');

        out
    }

    pub fn legend(color: bool) -> String {
        let entries = [
            (NoteRole::Root, "root"),
            (NoteRole::Third, "3rd"),
            (NoteRole::Seventh, "7th"),
            (NoteRole::Second, "2nd"),
            (NoteRole::Extension, "extension"),
        ];
        let parts: Vec<String> = entries
            .iter()
            .map(|(role, name)| if color { role.paint(name) } else { name.to_string() })
            .collect();
        format!("Note colors: {}", parts.join(", "))
    }
}
