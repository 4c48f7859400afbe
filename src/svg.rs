//! In-memory SVG surface.
//!
//! [`SvgSurface`] records shapes in insertion order and serialises them to a
//! standalone `<svg>` document. It backs headless rendering and every unit
//! test that needs a surface.

#[cfg(test)]
#[path = "svg_test.rs"]
mod svg_test;

use std::fmt::Write;

use crate::error::SurfaceError;
use crate::scene::{Circle, Label, Line, Shape};
use crate::surface::Surface;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Node handle issued by an [`SvgSurface`]. Ids are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SvgNodeId(u64);

#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    next_id: u64,
    nodes: Vec<(SvgNodeId, Shape)>,
}

impl SvgSurface {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, next_id: 0, nodes: Vec::new() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Shapes currently on the surface, in draw order.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.nodes.iter().map(|(_, shape)| shape)
    }

    #[must_use]
    pub fn get(&self, id: SvgNodeId) -> Option<&Shape> {
        self.nodes.iter().find(|(node_id, _)| *node_id == id).map(|(_, shape)| shape)
    }

    #[must_use]
    pub fn lines(&self) -> Vec<&Line> {
        self.shapes()
            .filter_map(|s| match s {
                Shape::Line(line) => Some(line),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn circles(&self) -> Vec<&Circle> {
        self.shapes()
            .filter_map(|s| match s {
                Shape::Circle(circle) => Some(circle),
                _ => None,
            })
            .collect()
    }

    #[must_use]
    pub fn labels(&self) -> Vec<&Label> {
        self.shapes()
            .filter_map(|s| match s {
                Shape::Label(label) => Some(label),
                _ => None,
            })
            .collect()
    }

    /// Serialise the surface as a standalone SVG document.
    #[must_use]
    pub fn to_svg_string(&self) -> String {
        let (w, h) = (self.width, self.height);
        let mut out = format!(r#"<svg xmlns="{SVG_NS}" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#);
        for shape in self.shapes() {
            write_shape(&mut out, shape);
        }
        out.push_str("</svg>");
        out
    }

    fn push(&mut self, shape: Shape) -> SvgNodeId {
        let id = SvgNodeId(self.next_id);
        self.next_id += 1;
        self.nodes.push((id, shape));
        id
    }
}

impl Surface for SvgSurface {
    type NodeId = SvgNodeId;

    fn add_line(&mut self, line: &Line) -> Result<SvgNodeId, SurfaceError> {
        Ok(self.push(Shape::Line(line.clone())))
    }

    fn add_circle(&mut self, circle: &Circle) -> Result<SvgNodeId, SurfaceError> {
        Ok(self.push(Shape::Circle(circle.clone())))
    }

    fn add_text(&mut self, label: &Label) -> Result<SvgNodeId, SurfaceError> {
        Ok(self.push(Shape::Label(label.clone())))
    }

    fn remove_node(&mut self, id: SvgNodeId) -> Result<(), SurfaceError> {
        self.nodes.retain(|(node_id, _)| *node_id != id);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SurfaceError> {
        self.nodes.clear();
        Ok(())
    }
}

// `write!` into a String is infallible.
fn write_shape(out: &mut String, shape: &Shape) {
    let written = match shape {
        Shape::Line(l) => write!(
            out,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
            l.from.x,
            l.from.y,
            l.to.x,
            l.to.y,
            escape(&l.stroke)
        ),
        Shape::Circle(c) => write!(
            out,
            r#"<circle cx="{}" cy="{}" r="{}" stroke="{}" fill="{}"/>"#,
            c.center.x,
            c.center.y,
            c.radius,
            escape(&c.stroke),
            escape(&c.fill)
        ),
        Shape::Label(t) => write!(
            out,
            r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" font-size="{}">{}</text>"#,
            t.at.x,
            t.at.y,
            t.font_size,
            escape(&t.text)
        ),
    };
    debug_assert!(written.is_ok());
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
