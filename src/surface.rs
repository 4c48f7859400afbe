//! The drawing-surface seam between the fretboard and a rendering backend.
//!
//! A [`Surface`] owns whatever it draws into (an SVG element in the browser,
//! an in-memory document in tests). The view only ever adds nodes, removes a
//! node it added, or clears everything.

use std::fmt::Debug;

use crate::error::SurfaceError;
use crate::scene::{Circle, Label, Line, Shape};

pub trait Surface {
    /// Handle for a node this surface created.
    type NodeId: Copy + Eq + Debug;

    /// Draw a stroked line segment.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend rejects the node.
    fn add_line(&mut self, line: &Line) -> Result<Self::NodeId, SurfaceError>;

    /// Draw a filled circle.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend rejects the node.
    fn add_circle(&mut self, circle: &Circle) -> Result<Self::NodeId, SurfaceError>;

    /// Draw a centred text label.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend rejects the node.
    fn add_text(&mut self, label: &Label) -> Result<Self::NodeId, SurfaceError>;

    /// Remove one node. Removing an unknown id is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend fails to detach the node.
    fn remove_node(&mut self, id: Self::NodeId) -> Result<(), SurfaceError>;

    /// Remove every node.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the backend fails to detach its nodes.
    fn clear(&mut self) -> Result<(), SurfaceError>;

    /// Draw any [`Shape`].
    ///
    /// # Errors
    ///
    /// Propagates the error of the underlying `add_*` call.
    fn add(&mut self, shape: &Shape) -> Result<Self::NodeId, SurfaceError> {
        match shape {
            Shape::Line(line) => self.add_line(line),
            Shape::Circle(circle) => self.add_circle(circle),
            Shape::Label(label) => self.add_text(label),
        }
    }
}

impl<S: Surface + ?Sized> Surface for &mut S {
    type NodeId = S::NodeId;

    fn add_line(&mut self, line: &Line) -> Result<Self::NodeId, SurfaceError> {
        (**self).add_line(line)
    }

    fn add_circle(&mut self, circle: &Circle) -> Result<Self::NodeId, SurfaceError> {
        (**self).add_circle(circle)
    }

    fn add_text(&mut self, label: &Label) -> Result<Self::NodeId, SurfaceError> {
        (**self).add_text(label)
    }

    fn remove_node(&mut self, id: Self::NodeId) -> Result<(), SurfaceError> {
        (**self).remove_node(id)
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        (**self).clear()
    }
}
