//! Pointer input delivered to a view, and the actions it reports back.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::config::BoardCoordinate;
use crate::geom::Point;

/// A pointer event, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// The pointer moved to this position.
    Move(Point),
    /// The pointer left the surface.
    Leave,
    /// Primary click or tap at this position.
    Click(Point),
}

impl PointerEvent {
    /// Position carried by the event, if any.
    #[must_use]
    pub fn point(&self) -> Option<Point> {
        match self {
            Self::Move(pt) | Self::Click(pt) => Some(*pt),
            Self::Leave => None,
        }
    }
}

/// Result of handling a [`PointerEvent`], for the host to act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nothing changed.
    None,
    /// The hover marker moved to a new cell, or was removed (`None`).
    HoverChanged(Option<BoardCoordinate>),
    /// A cell was clicked; the click handler (if any) has been invoked.
    Clicked(BoardCoordinate),
}
