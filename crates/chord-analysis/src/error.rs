use thiserror::Error;

/// Errors surfaced by the analysis engine.
///
/// Malformed chord symbols are never errors; they degrade into
/// non-diatonic results plus a feedback warning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("chord progression is empty; no key can be determined")]
    EmptyProgression,

    #[error("invalid scale mode '{0}' (expected 'diatonic' or 'chromatic')")]
    InvalidScaleMode(String),

    #[error("unknown note name '{0}'")]
    UnknownNote(String),

    #[error("invalid key '{0}' (expected a root followed by 'M' or 'm', e.g. 'GM' or 'C#m')")]
    InvalidKey(String),
}
