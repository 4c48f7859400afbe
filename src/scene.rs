//! Scene graph: the drawable primitives a fretboard is made of.
//!
//! The scene is a flat list of [`Node`]s built in draw order (strings, frets,
//! labels, then dots). Nothing here touches a drawing backend; a
//! [`crate::surface::Surface`] turns nodes into pixels or markup.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::config::{BoardCoordinate, FretboardConfig};
use crate::consts::{LABEL_FONT_SIZE, STROKE_COLOR};
use crate::geom::Point;
use crate::layout::Layout;

/// A straight stroked segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
    pub stroke: String,
}

/// A filled, outlined circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub fill: String,
    pub stroke: String,
}

/// Text horizontally and vertically centred on `at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub at: Point,
    pub text: String,
    pub font_size: f64,
}

/// One drawable primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line(Line),
    Circle(Circle),
    Label(Label),
}

/// What a node represents on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Vertical string line, by string index.
    String(usize),
    /// Horizontal fret line, by line index (`0` is the top edge of the neck).
    Fret(usize),
    /// Fret number beside its cell.
    FretNumber(i32),
    /// String name above its string.
    StringName(usize),
    /// Static marker from the config.
    Dot(BoardCoordinate),
    /// Transient marker under the pointer.
    HoverDot(BoardCoordinate),
}

/// A scene node: a shape tagged with its role.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub role: NodeRole,
    pub shape: Shape,
}

/// Font size for labels, shrunk to fit short fret cells.
#[must_use]
pub fn label_font_size(layout: &Layout) -> f64 {
    LABEL_FONT_SIZE.min(layout.fret_height / 2.0)
}

/// Build the static scene for a validated config and its layout.
#[must_use]
pub fn build(config: &FretboardConfig, layout: &Layout) -> Vec<Node> {
    let mut nodes = Vec::with_capacity(layout.num_strings * 2 + layout.num_frets * 2 + 1 + config.dots.len());

    let top = layout.y_margin;
    let bottom = layout.y_margin + layout.neck_height;
    for i in 0..layout.num_strings {
        let x = layout.string_x(i);
        nodes.push(Node {
            role: NodeRole::String(i),
            shape: Shape::Line(line(Point::new(x, top), Point::new(x, bottom))),
        });
    }

    let left = layout.x_margin;
    let right = layout.width - layout.x_margin;
    for i in 0..=layout.num_frets {
        let y = layout.fret_line_y(i);
        nodes.push(Node {
            role: NodeRole::Fret(i),
            shape: Shape::Line(line(Point::new(left, y), Point::new(right, y))),
        });
    }

    let font_size = label_font_size(layout);

    if config.show_fret_nums {
        let x = layout.width - layout.x_margin / 2.0;
        for fret in config.start_fret..=config.end_fret {
            if let Some(y) = layout.fret_center_y(fret) {
                nodes.push(Node {
                    role: NodeRole::FretNumber(fret),
                    shape: Shape::Label(Label { at: Point::new(x, y), text: fret.to_string(), font_size }),
                });
            }
        }
    }

    if config.show_string_names {
        let y = layout.y_margin / 2.0;
        for (i, name) in config.string_names.iter().enumerate() {
            nodes.push(Node {
                role: NodeRole::StringName(i),
                shape: Shape::Label(Label { at: Point::new(layout.string_x(i), y), text: name.clone(), font_size }),
            });
        }
    }

    for dot in &config.dots {
        if let Some(node) = dot_node(layout, dot.coord(), config.dot_fill(dot), false) {
            nodes.push(node);
        }
    }

    nodes
}

/// The transient hover marker for `coord`, or `None` if the cell is off the board.
#[must_use]
pub fn hover_marker(config: &FretboardConfig, layout: &Layout, coord: BoardCoordinate) -> Option<Node> {
    dot_node(layout, coord, &config.hover_dot_color, true)
}

fn dot_node(layout: &Layout, coord: BoardCoordinate, fill: &str, hover: bool) -> Option<Node> {
    let center = layout.cell_center(coord)?;
    let role = if hover { NodeRole::HoverDot(coord) } else { NodeRole::Dot(coord) };
    Some(Node {
        role,
        shape: Shape::Circle(Circle {
            center,
            radius: layout.dot_radius(),
            fill: fill.to_owned(),
            stroke: STROKE_COLOR.to_owned(),
        }),
    })
}

fn line(from: Point, to: Point) -> Line {
    Line { from, to, stroke: STROKE_COLOR.to_owned() }
}
