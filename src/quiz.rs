//! Note-finding quiz: each round names a note and players click where it sits
//! on the fretboard.
//!
//! [`Game`] owns the players, settings and rounds, and moves through
//! [`Status`] as rounds start and get solved. It holds no I/O; the host
//! decides how players join and how guesses arrive.

#[cfg(test)]
#[path = "quiz_test.rs"]
mod quiz_test;

use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{BoardCoordinate, FretboardConfig};
use crate::error::QuizError;
use crate::theory::{Note, Tuning};

/// MIDI range notes to guess are drawn from by default (E2 to G#4).
pub const DEFAULT_NOTE_RANGE: RangeInclusive<i32> = 40..=68;

/// Rounds per game unless the host changes it.
pub const DEFAULT_NUM_ROUNDS: u32 = 4;

/// Lowest fret in play by default: open strings count.
pub const DEFAULT_QUIZ_START_FRET: i32 = 0;

/// Highest fret in play by default.
pub const DEFAULT_QUIZ_END_FRET: i32 = 4;

pub type PlayerId = i64;

/// Per-game options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuizSettings {
    pub num_rounds: u32,
    pub start_fret: i32,
    pub end_fret: i32,
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self { num_rounds: DEFAULT_NUM_ROUNDS, start_fret: DEFAULT_QUIZ_START_FRET, end_fret: DEFAULT_QUIZ_END_FRET }
    }
}

impl QuizSettings {
    /// A board config showing the quiz's fret range, with hover markers on.
    #[must_use]
    pub fn board_config(&self) -> FretboardConfig {
        FretboardConfig {
            start_fret: self.start_fret,
            end_fret: self.end_fret,
            draw_dot_on_hover: true,
            ..FretboardConfig::default()
        }
    }

    /// MIDI numbers reachable within the fret range under `tuning`.
    #[must_use]
    pub fn reachable_range(&self, tuning: &Tuning) -> Option<RangeInclusive<i32>> {
        let opens = (0..tuning.num_strings()).filter_map(|s| tuning.open_note(s)).map(|n| n.midi());
        let lowest = opens.clone().min()?;
        let highest = opens.max()?;
        Some(lowest.checked_add(self.start_fret)?..=highest.checked_add(self.end_fret)?)
    }
}

/// One click and whether it found the round's note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub player: Option<PlayerId>,
    pub coord: BoardCoordinate,
    pub is_correct: bool,
}

/// A single round: one note to find and the guesses made so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    note_to_guess: Note,
    guesses: Vec<Guess>,
}

impl Round {
    #[must_use]
    pub fn new(note_to_guess: Note) -> Self {
        Self { note_to_guess, guesses: Vec::new() }
    }

    /// Start a round with a note drawn uniformly from `range` (MIDI numbers).
    /// An empty range falls back to its start.
    pub fn random<R: Rng>(rng: &mut R, range: RangeInclusive<i32>) -> Self {
        let midi = if range.is_empty() { *range.start() } else { rng.random_range(range) };
        Self::new(Note::from_midi(midi))
    }

    #[must_use]
    pub fn note_to_guess(&self) -> Note {
        self.note_to_guess
    }

    #[must_use]
    pub fn guesses(&self) -> &[Guess] {
        &self.guesses
    }

    /// Record an anonymous guess at `coord`.
    pub fn guess(&mut self, coord: BoardCoordinate, tuning: &Tuning) -> Guess {
        self.record(None, coord, tuning)
    }

    /// Record a guess by `player` at `coord`.
    pub fn guess_by(&mut self, player: PlayerId, coord: BoardCoordinate, tuning: &Tuning) -> Guess {
        self.record(Some(player), coord, tuning)
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.guesses.iter().any(|g| g.is_correct)
    }

    /// Every cell in `start_fret..=end_fret` that would be a correct guess.
    #[must_use]
    pub fn answers(&self, tuning: &Tuning, start_fret: i32, end_fret: i32) -> Vec<BoardCoordinate> {
        tuning.positions_of(&self.note_to_guess, start_fret, end_fret)
    }

    // Correct when the note at `coord` sounds the target pitch, whatever its spelling.
    fn record(&mut self, player: Option<PlayerId>, coord: BoardCoordinate, tuning: &Tuning) -> Guess {
        let is_correct = tuning.note_at(coord).is_some_and(|n| n.is_enharmonic(&self.note_to_guess));
        let guess = Guess { player, coord, is_correct };
        self.guesses.push(guess);
        tracing::debug!(
            target_note = %self.note_to_guess,
            ?player,
            string = coord.string,
            fret = coord.fret,
            is_correct,
            "guess recorded"
        );
        guess
    }
}

/// Where a [`Game`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Created, no round started yet.
    Init,
    /// A round is open for guesses.
    Playing,
    /// The last round was solved and another one can start.
    RoundOver,
    /// Every round has been solved.
    GameOver,
    /// Everyone left before the game finished.
    NoPlayers,
}

impl Status {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Init => "Init",
            Self::Playing => "Playing",
            Self::RoundOver => "RoundOver",
            Self::GameOver => "GameOver",
            Self::NoPlayers => "NoPlayers",
        }
    }

    /// No further rounds or guesses are possible.
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::GameOver | Self::NoPlayers)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = QuizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Init" => Ok(Self::Init),
            "Playing" => Ok(Self::Playing),
            "RoundOver" => Ok(Self::RoundOver),
            "GameOver" => Ok(Self::GameOver),
            "NoPlayers" => Ok(Self::NoPlayers),
            _ => Err(QuizError::UnknownStatus(s.to_owned())),
        }
    }
}

/// A quiz game: a host, the players, the settings and every round so far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    host_id: Option<PlayerId>,
    player_ids: Vec<PlayerId>,
    status: Status,
    settings: QuizSettings,
    tuning: Tuning,
    rounds: Vec<Round>,
}

impl Game {
    /// A new game in [`Status::Init`] with the host as its only player, in
    /// standard tuning.
    #[must_use]
    pub fn new(host_id: PlayerId, settings: QuizSettings) -> Self {
        Self {
            host_id: Some(host_id),
            player_ids: vec![host_id],
            status: Status::Init,
            settings,
            tuning: Tuning::standard(),
            rounds: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    // --- Accessors ---

    /// The host, or `None` once everyone has left.
    #[must_use]
    pub fn host_id(&self) -> Option<PlayerId> {
        self.host_id
    }

    #[must_use]
    pub fn players(&self) -> &[PlayerId] {
        &self.player_ids
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    #[must_use]
    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// The round most recently started.
    #[must_use]
    pub fn curr_round(&self) -> Option<&Round> {
        self.rounds.last()
    }

    /// MIDI range the next round's note is drawn from: every pitch playable
    /// in the settings' fret range, or [`DEFAULT_NOTE_RANGE`] for an empty tuning.
    #[must_use]
    pub fn note_range(&self) -> RangeInclusive<i32> {
        self.settings.reachable_range(&self.tuning).unwrap_or(DEFAULT_NOTE_RANGE)
    }

    // --- Players ---

    /// Add `player`. Joining twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::WrongStatus`] once the game is finished.
    pub fn join(&mut self, player: PlayerId) -> Result<(), QuizError> {
        if self.status.is_finished() {
            return Err(QuizError::WrongStatus { action: "join", status: self.status });
        }
        if !self.player_ids.contains(&player) {
            self.player_ids.push(player);
            tracing::debug!(player, players = self.player_ids.len(), "player joined");
        }
        Ok(())
    }

    /// Remove `player`. A departing host hands over to the longest-present
    /// player. When the last player leaves an unfinished game it ends in
    /// [`Status::NoPlayers`].
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::NotAPlayer`] if `player` is not in the game.
    pub fn leave(&mut self, player: PlayerId) -> Result<(), QuizError> {
        let Some(pos) = self.player_ids.iter().position(|p| *p == player) else {
            return Err(QuizError::NotAPlayer(player));
        };
        self.player_ids.remove(pos);
        if self.host_id == Some(player) {
            self.host_id = self.player_ids.first().copied();
        }
        if self.player_ids.is_empty() && !self.status.is_finished() {
            self.status = Status::NoPlayers;
        }
        tracing::debug!(player, host = ?self.host_id, status = %self.status, "player left");
        Ok(())
    }

    // --- Rounds ---

    /// Open the next round with a random note from [`Self::note_range`] and
    /// return that note.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::WrongStatus`] unless the game is in
    /// [`Status::Init`] or [`Status::RoundOver`], and
    /// [`QuizError::RoundsExhausted`] when every round has been played.
    pub fn start_round<R: Rng>(&mut self, rng: &mut R) -> Result<Note, QuizError> {
        if !matches!(self.status, Status::Init | Status::RoundOver) {
            return Err(QuizError::WrongStatus { action: "start a round", status: self.status });
        }
        if self.rounds_remaining() == 0 {
            return Err(QuizError::RoundsExhausted(self.settings.num_rounds));
        }

        let round = Round::random(rng, self.note_range());
        let note = round.note_to_guess();
        self.rounds.push(round);
        self.status = Status::Playing;
        tracing::debug!(round = self.rounds.len(), %note, "round started");
        Ok(note)
    }

    /// Record `player`'s guess on the open round. A correct guess closes the
    /// round, and closes the game after the last one.
    ///
    /// # Errors
    ///
    /// Returns [`QuizError::WrongStatus`] unless a round is open, and
    /// [`QuizError::NotAPlayer`] for someone who has not joined.
    pub fn guess(&mut self, player: PlayerId, coord: BoardCoordinate) -> Result<Guess, QuizError> {
        if !self.player_ids.contains(&player) {
            return Err(QuizError::NotAPlayer(player));
        }
        let wrong_status = QuizError::WrongStatus { action: "guess", status: self.status };
        if self.status != Status::Playing {
            return Err(wrong_status);
        }
        let Some(round) = self.rounds.last_mut() else {
            return Err(wrong_status);
        };

        let guess = round.guess_by(player, coord, &self.tuning);
        if guess.is_correct {
            self.status = if self.rounds_remaining() == 0 { Status::GameOver } else { Status::RoundOver };
            tracing::debug!(player, status = %self.status, "round solved");
        }
        Ok(guess)
    }

    fn rounds_remaining(&self) -> usize {
        usize::try_from(self.settings.num_rounds).unwrap_or(usize::MAX).saturating_sub(self.rounds.len())
    }
}
