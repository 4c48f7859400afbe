//! Fretboard configuration: display options, dot markers, and validation.
//!
//! [`FretboardConfig`] is plain data. It deserializes from a partial JSON
//! object with every missing key taking its default, so a host can pass only
//! the options it cares about. [`FretboardConfig::validate`] is the single
//! gate between user input and the layout math; anything it accepts produces
//! a well-formed [`crate::layout::Layout`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_DOT_COLOR, DEFAULT_END_FRET, DEFAULT_HEIGHT, DEFAULT_START_FRET, DEFAULT_STRING_NAMES, DEFAULT_WIDTH,
    MAX_FRETS,
};
use crate::error::ConfigError;
use crate::theory::Note;

/// A resolved position on the board: a string index and an absolute fret number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardCoordinate {
    /// Zero-based string index, left to right as drawn.
    pub string: usize,
    /// Absolute fret number (not relative to `start_fret`).
    pub fret: i32,
}

impl BoardCoordinate {
    #[must_use]
    pub fn new(string: usize, fret: i32) -> Self {
        Self { string, fret }
    }
}

/// A static finger-position marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub string: usize,
    pub fret: i32,
    /// Overrides [`FretboardConfig::dot_color`] for this dot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Dot {
    #[must_use]
    pub fn new(string: usize, fret: i32) -> Self {
        Self { string, fret, color: None }
    }

    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[must_use]
    pub fn coord(&self) -> BoardCoordinate {
        BoardCoordinate::new(self.string, self.fret)
    }
}

/// Options for a single fretboard diagram.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FretboardConfig {
    pub width: f64,
    pub height: f64,
    pub start_fret: i32,
    /// Last fret shown, inclusive.
    pub end_fret: i32,
    pub string_names: Vec<String>,
    pub dots: Vec<Dot>,
    pub dot_color: String,
    pub hover_dot_color: String,
    pub show_fret_nums: bool,
    pub show_string_names: bool,
    pub draw_dot_on_hover: bool,
    /// Open-string pitches, one per entry in `string_names`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tuning: Option<Vec<Note>>,
}

impl Default for FretboardConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            start_fret: DEFAULT_START_FRET,
            end_fret: DEFAULT_END_FRET,
            string_names: DEFAULT_STRING_NAMES.iter().map(|s| (*s).to_owned()).collect(),
            dots: Vec::new(),
            dot_color: DEFAULT_DOT_COLOR.to_owned(),
            hover_dot_color: DEFAULT_DOT_COLOR.to_owned(),
            show_fret_nums: true,
            show_string_names: false,
            draw_dot_on_hover: false,
            tuning: None,
        }
    }
}

impl FretboardConfig {
    /// Decode options from a JSON object, filling in defaults for missing keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the input is not a valid options object.
    /// The result is not validated; call [`Self::validate`] or hand it to a view.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of strings on the board.
    #[must_use]
    pub fn num_strings(&self) -> usize {
        self.string_names.len()
    }

    /// Number of frets shown. Zero when the range is empty.
    #[must_use]
    pub fn num_frets(&self) -> usize {
        let span = i64::from(self.end_fret) - i64::from(self.start_fret) + 1;
        if span <= 0 {
            return 0;
        }
        usize::try_from(span).unwrap_or(usize::MAX)
    }

    /// Whether `fret` lies in the shown range.
    #[must_use]
    pub fn shows_fret(&self, fret: i32) -> bool {
        (self.start_fret..=self.end_fret).contains(&fret)
    }

    /// Whether `coord` names a cell on this board.
    #[must_use]
    pub fn contains(&self, coord: BoardCoordinate) -> bool {
        coord.string < self.num_strings() && self.shows_fret(coord.fret)
    }

    /// Check every invariant the layout depends on.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant, checked in this order:
    /// dimensions, strings, fret range, fret count, dots (in order), tuning length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_dim = |v: f64| v.is_finite() && v > 0.0;
        if !valid_dim(self.width) || !valid_dim(self.height) {
            return Err(ConfigError::InvalidDimensions { width: self.width, height: self.height });
        }
        if self.string_names.is_empty() {
            return Err(ConfigError::NoStrings);
        }
        if self.num_frets() == 0 {
            return Err(ConfigError::EmptyFretRange { start: self.start_fret, end: self.end_fret });
        }
        if self.num_frets() > MAX_FRETS {
            return Err(ConfigError::TooManyFrets { count: self.num_frets(), max: MAX_FRETS });
        }

        let num_strings = self.num_strings();
        for (index, dot) in self.dots.iter().enumerate() {
            if dot.string >= num_strings {
                return Err(ConfigError::DotStringOutOfRange { index, string: dot.string, num_strings });
            }
            if !self.shows_fret(dot.fret) {
                return Err(ConfigError::DotFretOutOfRange {
                    index,
                    fret: dot.fret,
                    start: self.start_fret,
                    end: self.end_fret,
                });
            }
        }

        if let Some(tuning) = &self.tuning {
            if tuning.len() != num_strings {
                return Err(ConfigError::TuningLength { expected: num_strings, actual: tuning.len() });
            }
        }
        Ok(())
    }

    /// Fill colour for `dot`, falling back to the board-wide dot colour.
    #[must_use]
    pub fn dot_fill<'a>(&'a self, dot: &'a Dot) -> &'a str {
        dot.color.as_deref().unwrap_or(&self.dot_color)
    }
}
