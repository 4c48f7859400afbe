//! Interactive guitar fretboard diagrams.
//!
//! This crate is compiled to WebAssembly for the browser and also builds as
//! a plain library. It computes the geometry of a stringed-instrument neck
//! from a small configuration, builds a scene of strings, frets, labels and
//! dots, draws that scene onto a [`surface::Surface`], and resolves pointer
//! input to board coordinates. The host page only wires DOM events and reacts
//! to clicks.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`view`] | [`view::FretboardView`]: construction, hover, click, removal |
//! | [`config`] | Options, dot markers, validation |
//! | [`layout`] | Derived neck geometry and point-to-cell resolution |
//! | [`scene`] | Drawable primitives built from config + layout |
//! | [`surface`] | The drawing-backend trait |
//! | [`svg`] | In-memory SVG surface for headless rendering and tests |
//! | [`web`] | DOM surface and the `WebFretboard` wasm export |
//! | [`input`] | Pointer events and the actions they produce |
//! | [`theory`] | Note spelling, MIDI numbers, tunings |
//! | [`quiz`] | Note-finding games, rounds and guesses |
//! | [`geom`] | `Point` and `Rect` |
//! | [`error`] | Error types |
//! | [`consts`] | Shared defaults |

pub mod config;
pub mod consts;
pub mod error;
pub mod geom;
pub mod input;
pub mod layout;
pub mod quiz;
pub mod scene;
pub mod surface;
pub mod svg;
pub mod theory;
pub mod view;
pub mod web;

pub use config::{BoardCoordinate, Dot, FretboardConfig};
pub use error::{ConfigError, FretboardError, QuizError, SurfaceError};
pub use view::{ClickHandler, FretboardView};
