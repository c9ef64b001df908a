// Pixel layout of the grid, used by pointer-driven adapters to snap
// continuous coordinates onto discrete slots.

use crate::config::GridConfig;
use crate::grid::cell::{CellRect, Position};
use serde::{Deserialize, Serialize};

/// CSS-style root font size used to turn rem spacing into pixels
pub const DEFAULT_REM_PX: f32 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub fn distance(&self, other: &Point) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridGeometry {
    rows: usize,
    cols: usize,
    gap: f32,
    padding: f32,
    slot_width: f32,
    slot_height: f32,
}

impl GridGeometry {
    pub fn new(config: &GridConfig, width: f32, height: f32) -> Self {
        Self::with_rem_px(config, width, height, DEFAULT_REM_PX)
    }

    pub fn with_rem_px(config: &GridConfig, width: f32, height: f32, rem_px: f32) -> Self {
        let gap = config.gap * rem_px;
        let padding = config.padding * rem_px;
        let rows = config.rows.max(1);
        let cols = config.cols.max(1);

        let slot_width = (width - 2.0 * padding - gap * (cols - 1) as f32) / cols as f32;
        let slot_height = (height - 2.0 * padding - gap * (rows - 1) as f32) / rows as f32;

        Self {
            rows,
            cols,
            gap,
            padding,
            slot_width: slot_width.max(0.0),
            slot_height: slot_height.max(0.0),
        }
    }

    pub fn slot_size(&self) -> (f32, f32) {
        (self.slot_width, self.slot_height)
    }

    pub fn slot_rect(&self, pos: Position) -> PixelRect {
        PixelRect {
            x: self.padding + pos.col as f32 * (self.slot_width + self.gap),
            y: self.padding + pos.row as f32 * (self.slot_height + self.gap),
            width: self.slot_width,
            height: self.slot_height,
        }
    }

    /// Area spanned by a multi-slot cell, gaps included
    pub fn cell_rect(&self, rect: &CellRect) -> PixelRect {
        let top_left = self.slot_rect(rect.top_left());
        let bottom_right = self.slot_rect(rect.bottom_right());
        PixelRect {
            x: top_left.x,
            y: top_left.y,
            width: bottom_right.right() - top_left.x,
            height: bottom_right.bottom() - top_left.y,
        }
    }

    /// Slot directly under a point; `None` over padding or gaps
    pub fn slot_at(&self, point: Point) -> Option<Position> {
        if point.x < self.padding || point.y < self.padding {
            return None;
        }
        let col = ((point.x - self.padding) / (self.slot_width + self.gap)) as usize;
        let row = ((point.y - self.padding) / (self.slot_height + self.gap)) as usize;
        if row >= self.rows || col >= self.cols {
            return None;
        }
        let pos = Position::new(row, col);
        self.slot_rect(pos).contains(point).then_some(pos)
    }

    /// Among `candidates`, the slot whose centre is nearest to `point`,
    /// provided it is no further than `max_distance`
    pub fn closest_slot<I>(&self, point: Point, max_distance: f32, candidates: I) -> Option<Position>
    where
        I: IntoIterator<Item = Position>,
    {
        candidates
            .into_iter()
            .map(|pos| (pos, self.slot_rect(pos).center().distance(&point)))
            .filter(|(_, distance)| *distance <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(pos, _)| pos)
    }
}
