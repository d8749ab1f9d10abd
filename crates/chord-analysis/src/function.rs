use crate::note::PitchClass;
use crate::scale::scale_degrees;
use crate::types::Key;

/// Label for notes outside the key's scale.
pub const NON_DIATONIC: &str = "Non-diatonic";

/// Scale-degree function of a pitch class in `key`.
pub fn function_of_pitch(note: Option<PitchClass>, key: Key) -> &'static str {
    note.and_then(|pc| scale_degrees(key).label_of(pc))
        .unwrap_or(NON_DIATONIC)
}

/// String form used at the display boundary: `function_of("D", "GM")`.
///
/// Unparseable notes or keys are reported as non-diatonic rather than failing.
pub fn function_of(note: &str, key: &str) -> String {
    let Ok(key) = key.parse::<Key>() else {
        return NON_DIATONIC.to_string();
    };
    function_of_pitch(PitchClass::from_name(note), key).to_string()
}
