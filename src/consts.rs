//! Shared numeric and display defaults for the fretboard crate.

// ── Config defaults ─────────────────────────────────────────────

/// Default drawing-surface width in pixels.
pub const DEFAULT_WIDTH: f64 = 200.0;

/// Default drawing-surface height in pixels.
pub const DEFAULT_HEIGHT: f64 = 300.0;

/// First fret shown by default.
pub const DEFAULT_START_FRET: i32 = 1;

/// Last fret shown by default (inclusive).
pub const DEFAULT_END_FRET: i32 = 4;

/// Default string labels, left to right, for a six-string guitar.
pub const DEFAULT_STRING_NAMES: [&str; 6] = ["E", "B", "G", "D", "A", "E"];

/// Default fill for static and hover dots.
pub const DEFAULT_DOT_COLOR: &str = "white";

/// Most frets a single board may show.
pub const MAX_FRETS: usize = 48;

// ── Layout ──────────────────────────────────────────────────────

/// The vertical margin is `height / Y_MARGIN_DIVISOR` on each side.
pub const Y_MARGIN_DIVISOR: f64 = 8.0;

/// Horizontal margin for a single-string board is `width / SINGLE_STRING_MARGIN_DIVISOR`.
pub const SINGLE_STRING_MARGIN_DIVISOR: f64 = 4.0;

/// Dot radius is `fret_height / DOT_RADIUS_DIVISOR`.
pub const DOT_RADIUS_DIVISOR: f64 = 6.0;

/// Tolerance for pointer positions that land on the neck's outer edges.
pub const HIT_SLOP_PX: f64 = 1e-6;

// ── Drawing ─────────────────────────────────────────────────────

/// Stroke colour for strings, frets and dot outlines.
pub const STROKE_COLOR: &str = "black";

/// Upper bound for label font size in pixels.
pub const LABEL_FONT_SIZE: f64 = 16.0;

// ── Theory ──────────────────────────────────────────────────────

/// Lowest octave a note name may carry (`C-1` is MIDI 0).
pub const MIN_OCTAVE: i32 = -1;

/// Highest octave a note name may carry.
pub const MAX_OCTAVE: i32 = 9;
