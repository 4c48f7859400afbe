//! The fretboard view: draws a validated config onto a surface and turns
//! pointer events into hover markers and click callbacks.
//!
//! A view is immutable once built. To show different frets or dots, remove it
//! and build a new one.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use crate::config::{BoardCoordinate, FretboardConfig};
use crate::error::{FretboardError, SurfaceError};
use crate::geom::Point;
use crate::input::{Action, PointerEvent};
use crate::layout::Layout;
use crate::scene::{self, Node};
use crate::surface::Surface;
use crate::theory::{Note, Tuning};

/// Called with the resolved cell when the user clicks the neck.
pub type ClickHandler = Box<dyn FnMut(BoardCoordinate)>;

#[derive(Debug, Clone, Copy)]
struct Hover<Id> {
    coord: BoardCoordinate,
    node: Id,
}

pub struct FretboardView<S: Surface> {
    config: FretboardConfig,
    layout: Layout,
    tuning: Option<Tuning>,
    surface: S,
    scene: Vec<S::NodeId>,
    hover: Option<Hover<S::NodeId>>,
    on_click: Option<ClickHandler>,
    removed: bool,
}

impl<S: Surface> FretboardView<S> {
    /// Validate `config`, lay out the board, and draw it onto `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`FretboardError::Config`] when the config is invalid; the
    /// surface is left untouched. Returns [`FretboardError::Surface`] when
    /// the surface rejects a node; anything already drawn is cleared.
    pub fn new(mut surface: S, config: FretboardConfig, on_click: Option<ClickHandler>) -> Result<Self, FretboardError> {
        let layout = Layout::new(&config)?;
        let nodes = scene::build(&config, &layout);
        let scene = draw_all(&mut surface, &nodes)?;

        tracing::debug!(
            num_strings = layout.num_strings,
            num_frets = layout.num_frets,
            nodes = scene.len(),
            "fretboard drawn"
        );

        let tuning = Tuning::for_config(&config);
        Ok(Self { config, layout, tuning, surface, scene, hover: None, on_click, removed: false })
    }

    // --- Queries ---

    #[must_use]
    pub fn num_strings(&self) -> usize {
        self.layout.num_strings
    }

    #[must_use]
    pub fn num_frets(&self) -> usize {
        self.layout.num_frets
    }

    #[must_use]
    pub fn config(&self) -> &FretboardConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Cell currently under the hover marker.
    #[must_use]
    pub fn hovered(&self) -> Option<BoardCoordinate> {
        self.hover.map(|h| h.coord)
    }

    /// Nodes this view currently has on its surface, hover marker included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.scene.len() + usize::from(self.hover.is_some())
    }

    #[must_use]
    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// Note sounded at `coord`, when the board has a known tuning.
    #[must_use]
    pub fn note_at(&self, coord: BoardCoordinate) -> Option<Note> {
        if !self.config.contains(coord) {
            return None;
        }
        self.tuning.as_ref()?.note_at(coord)
    }

    /// Resolve a surface point to the cell under it.
    #[must_use]
    pub fn resolve(&self, pt: Point) -> Option<BoardCoordinate> {
        self.layout.resolve(pt)
    }

    // --- Input ---

    /// Dispatch a pointer event. Events after [`Self::remove`] are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the hover marker could not be redrawn.
    pub fn handle(&mut self, event: PointerEvent) -> Result<Action, SurfaceError> {
        match event {
            PointerEvent::Move(pt) => self.on_pointer_move(pt),
            PointerEvent::Leave => self.on_pointer_leave(),
            PointerEvent::Click(pt) => Ok(self.on_click(pt)),
        }
    }

    /// Move the hover marker to the cell under `pt`, if hover drawing is on.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the old marker could not be removed or the
    /// new one drawn. [`Self::hovered`] always reflects what is on the surface.
    pub fn on_pointer_move(&mut self, pt: Point) -> Result<Action, SurfaceError> {
        if self.removed || !self.config.draw_dot_on_hover {
            return Ok(Action::None);
        }
        let target = self.layout.resolve(pt);
        self.set_hover(target)
    }

    /// Remove the hover marker.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the marker could not be removed.
    pub fn on_pointer_leave(&mut self) -> Result<Action, SurfaceError> {
        if self.removed {
            return Ok(Action::None);
        }
        self.set_hover(None)
    }

    /// Resolve a click and invoke the click handler once for a cell hit.
    pub fn on_click(&mut self, pt: Point) -> Action {
        if self.removed {
            return Action::None;
        }
        let Some(coord) = self.layout.resolve(pt) else {
            tracing::trace!(x = pt.x, y = pt.y, "click outside neck");
            return Action::None;
        };
        tracing::debug!(string = coord.string, fret = coord.fret, "fretboard clicked");
        if let Some(handler) = self.on_click.as_mut() {
            handler(coord);
        }
        Action::Clicked(coord)
    }

    // --- Lifecycle ---

    /// Clear the scene from the surface and drop the click handler.
    /// Calling this again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError`] if the surface could not be cleared; the view
    /// stays live so the call can be retried.
    pub fn remove(&mut self) -> Result<(), SurfaceError> {
        if self.removed {
            return Ok(());
        }
        self.surface.clear()?;
        self.scene.clear();
        self.hover = None;
        self.on_click = None;
        self.removed = true;
        tracing::debug!("fretboard removed");
        Ok(())
    }

    /// Give the surface back, e.g. to serialise it.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn set_hover(&mut self, target: Option<BoardCoordinate>) -> Result<Action, SurfaceError> {
        if self.hover.map(|h| h.coord) == target {
            return Ok(Action::None);
        }

        if let Some(prev) = self.hover {
            self.surface.remove_node(prev.node)?;
            self.hover = None;
        }

        let marker = target
            .and_then(|coord| scene::hover_marker(&self.config, &self.layout, coord).map(|node| (coord, node)));
        let next = match marker {
            Some((coord, node)) => Some(Hover { coord, node: self.surface.add(&node.shape)? }),
            None => None,
        };

        self.hover = next;
        tracing::trace!(hovered = ?target, "hover changed");
        Ok(Action::HoverChanged(target))
    }
}

fn draw_all<S: Surface>(surface: &mut S, nodes: &[Node]) -> Result<Vec<S::NodeId>, SurfaceError> {
    let mut ids = Vec::with_capacity(nodes.len());
    for node in nodes {
        match surface.add(&node.shape) {
            Ok(id) => ids.push(id),
            Err(err) => {
                if let Err(clear_err) = surface.clear() {
                    tracing::warn!(error = %clear_err, "failed to clear partial fretboard");
                }
                return Err(err);
            }
        }
    }
    Ok(ids)
}
