//! Error types for fretboard construction and drawing.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// A configuration that cannot produce a valid fretboard layout.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `string_names` was empty.
    #[error("fretboard needs at least one string")]
    NoStrings,
    /// `end_fret` is below `start_fret`.
    #[error("empty fret range: start fret {start} is after end fret {end}")]
    EmptyFretRange { start: i32, end: i32 },
    /// The fret range is wider than one board can draw.
    #[error("fret range shows {count} frets, more than the limit of {max}")]
    TooManyFrets { count: usize, max: usize },
    /// Width or height is zero, negative, or not finite.
    #[error("invalid dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: f64, height: f64 },
    /// A dot references a string index the board does not have.
    #[error("dot {index}: string {string} is out of range (board has {num_strings} strings)")]
    DotStringOutOfRange { index: usize, string: usize, num_strings: usize },
    /// A dot references a fret outside the shown range.
    #[error("dot {index}: fret {fret} is outside the shown range {start}..={end}")]
    DotFretOutOfRange { index: usize, fret: i32, start: i32, end: i32 },
    /// A tuning was supplied whose length differs from the string count.
    #[error("tuning has {actual} strings but the board has {expected}")]
    TuningLength { expected: usize, actual: usize },
    /// The JSON options could not be decoded.
    #[error("failed to parse fretboard options: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A quiz action that the game's current state does not allow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("unknown game status {0:?}")]
    UnknownStatus(String),
    #[error("cannot {action} while the game is {status}")]
    WrongStatus { action: &'static str, status: crate::quiz::Status },
    #[error("player {0} is not in this game")]
    NotAPlayer(crate::quiz::PlayerId),
    #[error("all {0} rounds have been played")]
    RoundsExhausted(u32),
}

/// A drawing backend rejected an operation.
#[derive(Debug, thiserror::Error)]
#[error("surface error: {0}")]
pub struct SurfaceError(pub String);

/// Any failure while constructing a [`crate::view::FretboardView`].
#[derive(Debug, thiserror::Error)]
pub enum FretboardError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
