use crate::types::{ChordExtension, ChordQuality, ParsedChord};

/// Interval labels of each quality's base chord, relative to the root.
pub fn base_intervals(quality: ChordQuality) -> &'static [&'static str] {
    match quality {
        ChordQuality::Diminished => &["1", "b3", "b5"],
        ChordQuality::HalfDiminished => &["1", "b3", "b5", "b7"],
        ChordQuality::Minor => &["1", "b3", "5"],
        ChordQuality::Major => &["1", "3", "5"],
        ChordQuality::Augmented => &["1", "3", "#5"],
        ChordQuality::Dominant => &["1", "3", "5", "b7"],
    }
}

/// Append the interval implied by an extension.
///
/// A seventh is major only on a major chord. Nothing is deduplicated: a
/// dominant chord with a 7 extension ends up with `b7` twice.
pub fn apply_extension(
    base: &[&str],
    quality: ChordQuality,
    extension: Option<ChordExtension>,
) -> Vec<String> {
    let mut intervals: Vec<String> = base.iter().map(|s| s.to_string()).collect();

    match extension {
        Some(ChordExtension::Seventh) if quality == ChordQuality::Major => {
            intervals.push("7".into())
        }
        Some(ChordExtension::Seventh) => intervals.push("b7".into()),
        Some(ext) => intervals.push(ext.degree().to_string()),
        None => {}
    }

    intervals
}

pub fn resolve_intervals(chord: &ParsedChord) -> Vec<String> {
    apply_extension(base_intervals(chord.quality), chord.quality, chord.extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_chord;
    use pretty_assertions::assert_eq;

    fn intervals_of(symbol: &str) -> Vec<String> {
        resolve_intervals(&parse_chord(symbol))
    }

    #[test]
    fn triads() {
        assert_eq!(intervals_of("C"), vec!["1", "3", "5"]);
        assert_eq!(intervals_of("Em"), vec!["1", "b3", "5"]);
        assert_eq!(intervals_of("Bdim"), vec!["1", "b3", "b5"]);
        assert_eq!(intervals_of("Caug"), vec!["1", "3", "#5"]);
    }

    #[test]
    fn major_seventh() {
        assert_eq!(intervals_of("Cmaj7"), vec!["1", "3", "5", "7"]);
    }

    #[test]
    fn uppercase_m_seventh_is_dominant() {
        assert_eq!(intervals_of("CM7"), vec!["1", "3", "5", "b7", "b7"]);
    }

    #[test]
    fn minor_seventh() {
        assert_eq!(intervals_of("C#m7"), vec!["1", "b3", "5", "b7"]);
    }

    #[test]
    fn half_diminished() {
        assert_eq!(intervals_of("G#m7b5"), vec!["1", "b3", "b5", "b7"]);
    }

    #[test]
    fn upper_extensions_append_bare_numbers() {
        assert_eq!(intervals_of("Dm9"), vec!["1", "b3", "5", "9"]);
        assert_eq!(intervals_of("F11"), vec!["1", "3", "5", "11"]);
        assert_eq!(intervals_of("Am13"), vec!["1", "b3", "5", "13"]);
    }

    #[test]
    fn dominant_seventh_duplicates_b7() {
        // The base table already has b7 and the 7 extension appends another.
        assert_eq!(intervals_of("D7"), vec!["1", "3", "5", "b7", "b7"]);
        assert_eq!(
            apply_extension(
                base_intervals(ChordQuality::Dominant),
                ChordQuality::Dominant,
                Some(ChordExtension::Seventh)
            ),
            vec!["1", "3", "5", "b7", "b7"]
        );
    }

    #[test]
    fn no_extension_is_noop() {
        assert_eq!(
            apply_extension(base_intervals(ChordQuality::Minor), ChordQuality::Minor, None),
            vec!["1", "b3", "5"]
        );
    }

    #[test]
    fn malformed_symbol_defaults_to_major_triad() {
        assert_eq!(intervals_of("xyz"), vec!["1", "3", "5"]);
    }
}
