//! Track bounds and wall segments

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::geometry::{in_bounds, segments_intersect};

/// One indivisible wall between two grid points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub start: IVec2,
    pub end: IVec2,
}

impl Segment {
    pub fn new(start: IVec2, end: IVec2) -> Self {
        Self { start, end }
    }

    /// Check whether the movement path `from`-`to` crosses or touches this wall
    #[inline]
    pub fn blocks(&self, from: IVec2, to: IVec2) -> bool {
        segments_intersect(from, to, self.start, self.end)
    }
}

/// Rectangular play area plus its walls
///
/// Bounds are fixed at construction; walls are append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    width: i32,
    height: i32,
    walls: Vec<Segment>,
}

impl Track {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            walls: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn walls(&self) -> &[Segment] {
        &self.walls
    }

    /// Append a wall. Zero-length and duplicate walls are accepted as given.
    pub fn add_wall(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.walls
            .push(Segment::new(IVec2::new(x1, y1), IVec2::new(x2, y2)));
    }

    /// Check whether `p` is a legal cell on this track
    #[inline]
    pub fn contains(&self, p: IVec2) -> bool {
        in_bounds(p, self.width, self.height)
    }

    /// Check whether moving from `start` to `end` collides
    ///
    /// A destination outside the bounds always collides. Otherwise the whole
    /// path is tested against every wall, so a car cannot jump over a wall
    /// onto a legal cell on the far side.
    pub fn is_collision(&self, start: IVec2, end: IVec2) -> bool {
        if !self.contains(end) {
            return true;
        }
        self.walls.iter().any(|wall| wall.blocks(start, end))
    }
}
