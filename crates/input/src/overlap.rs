//! Overlap resolution - which neighbour, if any, a released tile swaps with.

use crate::drag::DragOffset;
use crate::types::{Direction, GridPos, DEFAULT_OVERLAP_RATIO};

pub trait SwapResolver {
    /// Neighbour of `origin` to swap with, or None to snap back
    fn resolve(&self, origin: GridPos, offset: DragOffset, rows: usize, columns: usize) -> Option<GridPos>;
}

impl<R: SwapResolver + ?Sized> SwapResolver for &R {
    fn resolve(&self, origin: GridPos, offset: DragOffset, rows: usize, columns: usize) -> Option<GridPos> {
        (**self).resolve(origin, offset, rows, columns)
    }
}

/// Commits a swap once the tile has travelled strictly more than `ratio` of a
/// tile-step towards a neighbour.
///
/// Directions are checked up, right, down, left; the first direction with any
/// travel decides, whether or not it passes the threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapResolver {
    ratio: f32,
}

impl OverlapResolver {
    pub fn new(ratio: f32) -> Self {
        Self { ratio }
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    /// Direction of travel and the fraction of a step covered
    pub fn travel(offset: DragOffset) -> Option<(Direction, f32)> {
        if offset.y < 0.0 {
            Some((Direction::Up, -offset.y))
        } else if offset.x > 0.0 {
            Some((Direction::Right, offset.x))
        } else if offset.y > 0.0 {
            Some((Direction::Down, offset.y))
        } else if offset.x < 0.0 {
            Some((Direction::Left, -offset.x))
        } else {
            None
        }
    }
}

impl Default for OverlapResolver {
    fn default() -> Self {
        Self::new(DEFAULT_OVERLAP_RATIO)
    }
}

impl SwapResolver for OverlapResolver {
    fn resolve(&self, origin: GridPos, offset: DragOffset, rows: usize, columns: usize) -> Option<GridPos> {
        let (direction, covered) = Self::travel(offset)?;
        if covered > self.ratio {
            origin.neighbor(direction, rows, columns)
        } else {
            None
        }
    }
}
