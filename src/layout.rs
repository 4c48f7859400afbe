//! Derived fretboard geometry.
//!
//! All values are computed once from a validated [`FretboardConfig`] and never
//! change. Strings run vertically and are evenly spaced across the neck;
//! frets run horizontally with `num_frets + 1` lines bounding `num_frets`
//! cells.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::config::{BoardCoordinate, FretboardConfig};
use crate::consts::{DOT_RADIUS_DIVISOR, HIT_SLOP_PX, SINGLE_STRING_MARGIN_DIVISOR, Y_MARGIN_DIVISOR};
use crate::error::ConfigError;
use crate::geom::{Point, Rect};

/// Neck geometry for one fretboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f64,
    pub height: f64,
    pub start_fret: i32,
    pub num_strings: usize,
    pub num_frets: usize,
    pub x_margin: f64,
    pub y_margin: f64,
    pub neck_width: f64,
    pub neck_height: f64,
    pub fret_height: f64,
    /// Horizontal distance between adjacent strings. Zero for a single string.
    pub string_margin: f64,
}

impl Layout {
    /// Compute the layout for `config`.
    ///
    /// A single-string board has no inter-string spacing; its neck is the
    /// middle half of the width and the string sits at the horizontal centre.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] from [`FretboardConfig::validate`].
    #[allow(clippy::cast_precision_loss)]
    pub fn new(config: &FretboardConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let num_strings = config.num_strings();
        let num_frets = config.num_frets();
        let width = config.width;
        let height = config.height;

        let x_margin = if num_strings == 1 {
            width / SINGLE_STRING_MARGIN_DIVISOR
        } else {
            width / num_strings as f64
        };
        let y_margin = height / Y_MARGIN_DIVISOR;
        let neck_width = width - x_margin * 2.0;
        let neck_height = height - y_margin * 2.0;
        let fret_height = neck_height / num_frets as f64;
        let string_margin = if num_strings == 1 { 0.0 } else { neck_width / (num_strings - 1) as f64 };

        Ok(Self {
            width,
            height,
            start_fret: config.start_fret,
            num_strings,
            num_frets,
            x_margin,
            y_margin,
            neck_width,
            neck_height,
            fret_height,
            string_margin,
        })
    }

    /// Last fret shown, inclusive.
    #[must_use]
    pub fn end_fret(&self) -> i32 {
        let span = i64::try_from(self.num_frets).unwrap_or(i64::MAX);
        let end = i64::from(self.start_fret).saturating_add(span - 1);
        i32::try_from(end).unwrap_or(i32::MAX)
    }

    /// The playable area: strings and frets are drawn on its edges and inside it.
    #[must_use]
    pub fn neck(&self) -> Rect {
        Rect::new(self.x_margin, self.y_margin, self.neck_width, self.neck_height)
    }

    /// X position of string `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn string_x(&self, index: usize) -> f64 {
        if self.num_strings == 1 {
            return self.x_margin + self.neck_width / 2.0;
        }
        index as f64 * self.string_margin + self.x_margin
    }

    /// Y position of fret line `index`, where `0` is the top edge of the neck
    /// and `num_frets` is the bottom edge.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fret_line_y(&self, index: usize) -> f64 {
        index as f64 * self.fret_height + self.y_margin
    }

    /// Y position of the centre of the cell for `fret`, or `None` if the fret is not shown.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fret_center_y(&self, fret: i32) -> Option<f64> {
        let Ok(index) = usize::try_from(i64::from(fret) - i64::from(self.start_fret)) else {
            return None;
        };
        if index >= self.num_frets {
            return None;
        }
        Some((index as f64 + 0.5) * self.fret_height + self.y_margin)
    }

    /// Centre of the cell at `coord`, or `None` if it is off the board.
    #[must_use]
    pub fn cell_center(&self, coord: BoardCoordinate) -> Option<Point> {
        if coord.string >= self.num_strings {
            return None;
        }
        let y = self.fret_center_y(coord.fret)?;
        Some(Point::new(self.string_x(coord.string), y))
    }

    /// Radius for dot markers.
    #[must_use]
    pub fn dot_radius(&self) -> f64 {
        self.fret_height / DOT_RADIUS_DIVISOR
    }

    /// Resolve a surface point to the cell under it.
    ///
    /// The string is the nearest one by x distance and the fret is the cell
    /// whose band contains y. Points outside [`Self::neck`] resolve to `None`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    pub fn resolve(&self, pt: Point) -> Option<BoardCoordinate> {
        if !self.neck().inflate(HIT_SLOP_PX).contains(pt) {
            return None;
        }

        let string = if self.num_strings == 1 {
            0
        } else {
            let nearest = ((pt.x - self.x_margin) / self.string_margin).round().max(0.0) as usize;
            nearest.min(self.num_strings - 1)
        };

        let band = ((pt.y - self.y_margin) / self.fret_height).floor().max(0.0) as usize;
        let fret_index = band.min(self.num_frets - 1);

        Some(BoardCoordinate::new(string, self.start_fret + fret_index as i32))
    }
}
