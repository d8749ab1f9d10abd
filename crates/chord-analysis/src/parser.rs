//! Chord symbol parsing.
//!
//! This is a generous parser: it never rejects a symbol. Anything it cannot
//! make sense of falls back to a major quality and no extension, and a
//! missing root is reported as `None` so callers can degrade gracefully.

use winnow::combinator::opt;
use winnow::prelude::*;
use winnow::token::one_of;

use crate::note::PitchClass;
use crate::types::{ChordExtension, ChordQuality, ParsedChord};

type PResult<T> = winnow::ModalResult<T>;

/// Half-diminished marker that carries its own seventh.
const HALF_DIMINISHED_TOKEN: &str = "m7b5";

/// Recognize the root spelling at the head of a chord symbol: a letter
/// A–G plus an optional `#` or `b`.
fn root_token<'s>(input: &mut &'s str) -> PResult<&'s str> {
    (one_of('A'..='G'), opt(one_of(['#', 'b'])))
        .take()
        .parse_next(input)
}

/// Split a symbol into its root spelling and the remaining suffix.
fn split_root(symbol: &str) -> Option<(&str, &str)> {
    let mut input = symbol;
    let root = root_token(&mut input).ok()?;
    Some((root, input))
}

/// Root pitch class of a chord symbol, normalized to the sharp alphabet.
pub fn parse_root(symbol: &str) -> Option<PitchClass> {
    let (root, _) = split_root(symbol)?;
    PitchClass::from_name(root)
}

/// Chord quality from the symbol suffix.
///
/// Markers are tested in a fixed priority order; the first hit wins. Letter
/// markers are matched with digits removed, the markers that contain digits
/// (`m7b5`, `7`) against the digit-bearing suffix. `m` is tested before `7`
/// so `m7` stays minor.
pub fn parse_quality(symbol: &str) -> ChordQuality {
    let Some((_, suffix)) = split_root(symbol) else {
        return ChordQuality::Major;
    };

    let suffix: String = suffix.chars().filter(|c| !matches!(c, '(' | ')')).collect();
    let letters: String = suffix.chars().filter(|c| !c.is_ascii_digit()).collect();

    if letters.contains("dim") || letters.contains('°') {
        ChordQuality::Diminished
    } else if suffix.contains(HALF_DIMINISHED_TOKEN) || letters.contains('ø') {
        ChordQuality::HalfDiminished
    } else if letters.contains("maj") {
        ChordQuality::Major
    } else if letters.contains('m') {
        ChordQuality::Minor
    } else if letters.contains("aug") || letters.contains('+') {
        ChordQuality::Augmented
    } else if suffix.contains('7') {
        ChordQuality::Dominant
    } else {
        ChordQuality::Major
    }
}

/// First number in the symbol that directly follows a non-digit character.
///
/// Only that first run is consulted; later numbers are never considered.
/// The seventh inside an `m7b5` token belongs to the quality and is skipped.
pub fn first_number(symbol: &str) -> Option<u32> {
    let symbol = symbol.replacen(HALF_DIMINISHED_TOKEN, "ø", 1);
    let mut prev: Option<char> = None;

    for (i, c) in symbol.char_indices() {
        if c.is_ascii_digit() && prev.is_some_and(|p| !p.is_ascii_digit()) {
            let run: String = symbol[i..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            // Absurdly long runs overflow and are treated as "no extension".
            return run.parse().ok();
        }
        prev = Some(c);
    }

    None
}

/// Extension degree of a chord symbol, restricted to 7, 9, 11 and 13.
pub fn parse_extension(symbol: &str) -> Option<ChordExtension> {
    first_number(symbol).and_then(ChordExtension::from_degree)
}

pub fn parse_chord(symbol: &str) -> ParsedChord {
    ParsedChord {
        symbol: symbol.to_string(),
        root: parse_root(symbol),
        quality: parse_quality(symbol),
        extension: parse_extension(symbol),
    }
}
