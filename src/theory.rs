//! Pitch spelling and string tunings.
//!
//! A [`Note`] keeps its spelling (letter + accidental) alongside its octave,
//! so `C#4` and `Db4` display differently while comparing equal by
//! [`Note::midi`]. A [`Tuning`] maps a [`BoardCoordinate`] to the note
//! sounded there.

#[cfg(test)]
#[path = "theory_test.rs"]
mod theory_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::{BoardCoordinate, FretboardConfig};
use crate::consts::{DEFAULT_STRING_NAMES, MAX_OCTAVE, MIN_OCTAVE};

/// Natural note letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Letter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Letter {
    /// Semitones above C within the same octave.
    #[must_use]
    pub fn semitones_from_c(self) -> i32 {
        match self {
            Self::C => 0,
            Self::D => 2,
            Self::E => 4,
            Self::F => 5,
            Self::G => 7,
            Self::A => 9,
            Self::B => 11,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            _ => None,
        }
    }

    fn as_char(self) -> char {
        match self {
            Self::C => 'C',
            Self::D => 'D',
            Self::E => 'E',
            Self::F => 'F',
            Self::G => 'G',
            Self::A => 'A',
            Self::B => 'B',
        }
    }
}

/// Chromatic alteration applied to a [`Letter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    DoubleFlat,
    Flat,
    #[default]
    Natural,
    Sharp,
    DoubleSharp,
}

impl Accidental {
    /// Semitone offset from the natural letter.
    #[must_use]
    pub fn offset(self) -> i32 {
        match self {
            Self::DoubleFlat => -2,
            Self::Flat => -1,
            Self::Natural => 0,
            Self::Sharp => 1,
            Self::DoubleSharp => 2,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Self::DoubleFlat => "bb",
            Self::Flat => "b",
            Self::Natural => "",
            Self::Sharp => "#",
            Self::DoubleSharp => "##",
        }
    }
}

/// Why a note name failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NoteParseError {
    #[error("note name is empty")]
    Empty,
    #[error("invalid note letter {0:?}")]
    InvalidLetter(char),
    #[error("invalid accidental in {0:?}")]
    InvalidAccidental(String),
    #[error("invalid octave in {0:?}")]
    InvalidOctave(String),
    #[error("octave {0} is outside {min}..={max}", min = MIN_OCTAVE, max = MAX_OCTAVE)]
    OctaveOutOfRange(i32),
}

/// A spelled pitch, e.g. `C#4`. Octave numbering follows scientific pitch (`C4` = MIDI 60).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note {
    pub letter: Letter,
    pub accidental: Accidental,
    pub octave: i32,
}

/// Pitch-class spellings used by [`Note::from_midi`].
const SHARP_SPELLINGS: [(Letter, Accidental); 12] = [
    (Letter::C, Accidental::Natural),
    (Letter::C, Accidental::Sharp),
    (Letter::D, Accidental::Natural),
    (Letter::D, Accidental::Sharp),
    (Letter::E, Accidental::Natural),
    (Letter::F, Accidental::Natural),
    (Letter::F, Accidental::Sharp),
    (Letter::G, Accidental::Natural),
    (Letter::G, Accidental::Sharp),
    (Letter::A, Accidental::Natural),
    (Letter::A, Accidental::Sharp),
    (Letter::B, Accidental::Natural),
];

impl Note {
    #[must_use]
    pub fn new(letter: Letter, accidental: Accidental, octave: i32) -> Self {
        Self { letter, accidental, octave }
    }

    /// MIDI note number. Saturates for octaves far outside the parseable range.
    #[must_use]
    pub fn midi(&self) -> i32 {
        self.octave
            .saturating_add(1)
            .saturating_mul(12)
            .saturating_add(self.letter.semitones_from_c() + self.accidental.offset())
    }

    /// Spell a MIDI number using sharps.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn from_midi(midi: i32) -> Self {
        let (letter, accidental) = SHARP_SPELLINGS[midi.rem_euclid(12) as usize];
        Self { letter, accidental, octave: midi.div_euclid(12) - 1 }
    }

    /// Same sounding pitch, regardless of spelling.
    #[must_use]
    pub fn is_enharmonic(&self, other: &Self) -> bool {
        self.midi() == other.midi()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.letter.as_char(), self.accidental.symbol(), self.octave)
    }
}

impl FromStr for Note {
    type Err = NoteParseError;

    /// Parse `<letter><accidental?><octave>`, e.g. `E2`, `C#4`, `Bbb3`, `C-1`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let first = chars.next().ok_or(NoteParseError::Empty)?;
        let letter = Letter::from_char(first).ok_or(NoteParseError::InvalidLetter(first))?;

        let rest = chars.as_str();
        let octave_at = rest
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .ok_or_else(|| NoteParseError::InvalidOctave(s.to_owned()))?;
        let (acc, octave) = rest.split_at(octave_at);

        let accidental = match acc {
            "" => Accidental::Natural,
            "#" => Accidental::Sharp,
            "##" => Accidental::DoubleSharp,
            "b" => Accidental::Flat,
            "bb" => Accidental::DoubleFlat,
            _ => return Err(NoteParseError::InvalidAccidental(s.to_owned())),
        };
        let octave = octave.parse::<i32>().map_err(|_| NoteParseError::InvalidOctave(s.to_owned()))?;
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
            return Err(NoteParseError::OctaveOutOfRange(octave));
        }

        Ok(Self { letter, accidental, octave })
    }
}

impl TryFrom<String> for Note {
    type Error = NoteParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.to_string()
    }
}

/// Open-string pitches indexed like the board's strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tuning {
    open: Vec<Note>,
}

impl Tuning {
    #[must_use]
    pub fn new(open: Vec<Note>) -> Self {
        Self { open }
    }

    /// Standard guitar tuning in the default string order (`E4 B3 G3 D3 A2 E2`).
    #[must_use]
    pub fn standard() -> Self {
        use Accidental::Natural;
        Self::new(vec![
            Note::new(Letter::E, Natural, 4),
            Note::new(Letter::B, Natural, 3),
            Note::new(Letter::G, Natural, 3),
            Note::new(Letter::D, Natural, 3),
            Note::new(Letter::A, Natural, 2),
            Note::new(Letter::E, Natural, 2),
        ])
    }

    /// The tuning a config implies: its explicit tuning, else standard tuning
    /// when the board keeps the default string names, else nothing.
    #[must_use]
    pub fn for_config(config: &FretboardConfig) -> Option<Self> {
        match &config.tuning {
            Some(open) => Some(Self::new(open.clone())),
            None if config.string_names.iter().map(String::as_str).eq(DEFAULT_STRING_NAMES) => Some(Self::standard()),
            None => None,
        }
    }

    #[must_use]
    pub fn num_strings(&self) -> usize {
        self.open.len()
    }

    #[must_use]
    pub fn open_note(&self, string: usize) -> Option<Note> {
        self.open.get(string).copied()
    }

    /// The note sounded at `coord`, or `None` for a string this tuning lacks
    /// or a fret too high to name.
    #[must_use]
    pub fn note_at(&self, coord: BoardCoordinate) -> Option<Note> {
        let open = self.open_note(coord.string)?;
        open.midi().checked_add(coord.fret).map(Note::from_midi)
    }

    /// Every coordinate within `start_fret..=end_fret` that sounds `note`.
    #[must_use]
    pub fn positions_of(&self, note: &Note, start_fret: i32, end_fret: i32) -> Vec<BoardCoordinate> {
        self.open
            .iter()
            .enumerate()
            .filter_map(|(string, open)| {
                let fret = note.midi().checked_sub(open.midi())?;
                (start_fret..=end_fret).contains(&fret).then_some(BoardCoordinate::new(string, fret))
            })
            .collect()
    }
}
