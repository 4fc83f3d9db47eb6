//! Drag tracking for a single tile.
//!
//! Offsets are measured in tile-steps relative to the tile's rest position,
//! with `x` positive to the right and `y` positive downwards (towards higher
//! row indices). A tile moves along one axis at a time and never further than
//! one step, or not at all towards a board edge.

use crate::types::{GridPos, CLOSE_TO_CENTRE_RATIO};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragOffset {
    pub x: f32,
    pub y: f32,
}

impl DragOffset {
    pub const ZERO: DragOffset = DragOffset { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A finished gesture, ready for the overlap resolver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragRelease {
    pub origin: GridPos,
    pub offset: DragOffset,
}

/// How far the tile may travel from rest in each direction
#[derive(Debug, Clone, Copy, PartialEq)]
struct Limits {
    left: f32,
    right: f32,
    up: f32,
    down: f32,
}

impl Limits {
    fn for_cell(origin: GridPos, rows: usize, columns: usize) -> Self {
        let step = |open: bool| if open { 1.0 } else { 0.0 };
        Self {
            left: step(origin.column > 0),
            right: step(origin.column + 1 < columns),
            up: step(origin.row > 0),
            down: step(origin.row + 1 < rows),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct ActiveDrag {
    origin: GridPos,
    limits: Limits,
    /// Tile position relative to rest
    offset: DragOffset,
    /// Pointer position relative to where the drag started
    pointer: DragOffset,
    axis: Option<Axis>,
}

/// Tracks the tile currently held by the pointer
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    active: Option<ActiveDrag>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pick up the tile at `origin`. Any drag already in progress is dropped.
    pub fn begin(&mut self, origin: GridPos, rows: usize, columns: usize) {
        debug_assert!(origin.row < rows && origin.column < columns);
        self.active = Some(ActiveDrag {
            origin,
            limits: Limits::for_cell(origin, rows, columns),
            offset: DragOffset::ZERO,
            pointer: DragOffset::ZERO,
            axis: None,
        });
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn origin(&self) -> Option<GridPos> {
        self.active.as_ref().map(|d| d.origin)
    }

    pub fn offset(&self) -> DragOffset {
        self.active.as_ref().map_or(DragOffset::ZERO, |d| d.offset)
    }

    pub fn axis(&self) -> Option<Axis> {
        self.active.as_ref().and_then(|d| d.axis)
    }

    /// Apply a pointer movement and return the tile's new offset.
    ///
    /// Near the rest position the dominant direction of `delta` picks the
    /// axis; further out the axis already travelled wins. The off axis is
    /// reset to zero.
    pub fn moved(&mut self, delta: DragOffset) -> DragOffset {
        let Some(drag) = self.active.as_mut() else {
            return DragOffset::ZERO;
        };
        if delta == DragOffset::ZERO {
            return drag.offset;
        }

        drag.pointer.x += delta.x;
        drag.pointer.y += delta.y;

        let axis = if drag.offset.length() < CLOSE_TO_CENTRE_RATIO {
            if delta.x.abs() >= delta.y.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            }
        } else if drag.offset.x.abs() >= drag.offset.y.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        drag.axis = Some(axis);

        let limits = drag.limits;
        match axis {
            Axis::Horizontal => {
                drag.offset.x = follow(
                    drag.offset.x + delta.x,
                    drag.pointer.x,
                    -limits.left,
                    limits.right,
                );
                drag.offset.y = 0.0;
            }
            Axis::Vertical => {
                drag.offset.y = follow(
                    drag.offset.y + delta.y,
                    drag.pointer.y,
                    -limits.up,
                    limits.down,
                );
                drag.offset.x = 0.0;
            }
        }

        drag.offset
    }

    /// Let go of the tile
    pub fn release(&mut self) -> Option<DragRelease> {
        self.active.take().map(|d| DragRelease {
            origin: d.origin,
            offset: d.offset,
        })
    }

    pub fn cancel(&mut self) {
        self.active = None;
    }
}

/// Clamp `proposed` to `[min, max]`, pinning to the bound once the pointer is
/// half a tile past it so a fast pointer cannot leave the tile short.
fn follow(proposed: f32, pointer: f32, min: f32, max: f32) -> f32 {
    if pointer < min - 0.5 {
        min
    } else if pointer > max + 0.5 {
        max
    } else {
        proposed.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominant_axis_near_centre() {
        let mut drag = DragTracker::new();
        drag.begin(GridPos::new(1, 1), 3, 3);

        let offset = drag.moved(DragOffset::new(0.3, 0.05));
        assert_eq!(drag.axis(), Some(Axis::Horizontal));
        assert_eq!(offset, DragOffset::new(0.3, 0.0));
    }

    #[test]
    fn test_axis_locks_after_leaving_centre() {
        let mut drag = DragTracker::new();
        drag.begin(GridPos::new(1, 1), 3, 3);
        drag.moved(DragOffset::new(0.4, 0.0));

        // Mostly vertical pointer motion, but the tile is already well to the right
        let offset = drag.moved(DragOffset::new(0.1, 0.3));
        assert_eq!(drag.axis(), Some(Axis::Horizontal));
        assert!((offset.x - 0.5).abs() < 1e-6);
        assert_eq!(offset.y, 0.0);
    }

    #[test]
    fn test_clamped_to_one_step() {
        let mut drag = DragTracker::new();
        drag.begin(GridPos::new(1, 1), 3, 3);
        let offset = drag.moved(DragOffset::new(0.0, 3.0));
        assert_eq!(offset, DragOffset::new(0.0, 1.0));
    }

    #[test]
    fn test_no_travel_towards_edge() {
        let mut drag = DragTracker::new();
        drag.begin(GridPos::new(0, 0), 3, 3);
        assert_eq!(drag.moved(DragOffset::new(-0.8, 0.0)), DragOffset::ZERO);
        assert_eq!(drag.moved(DragOffset::new(0.0, -0.8)), DragOffset::ZERO);
    }

    #[test]
    fn test_release_ends_drag() {
        let mut drag = DragTracker::new();
        drag.begin(GridPos::new(2, 0), 3, 3);
        drag.moved(DragOffset::new(0.9, 0.0));

        let release = drag.release().unwrap();
        assert_eq!(release.origin, GridPos::new(2, 0));
        assert!((release.offset.x - 0.9).abs() < 1e-6);
        assert!(!drag.is_dragging());
        assert!(drag.release().is_none());
    }

    #[test]
    fn test_moves_without_drag_are_ignored() {
        let mut drag = DragTracker::new();
        assert_eq!(drag.moved(DragOffset::new(1.0, 0.0)), DragOffset::ZERO);
    }
}
