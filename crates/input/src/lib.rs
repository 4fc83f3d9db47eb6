//! Pointer input for tile swapping (engine-facing).
//!
//! This crate is independent of any UI framework. Callers feed pointer
//! movement in tile-step units into a [`DragTracker`] and hand the released
//! offset to a [`SwapResolver`] to find the neighbour to swap with.

pub mod drag;
pub mod overlap;

pub use word_slide_types as types;

pub use drag::{Axis, DragOffset, DragRelease, DragTracker};
pub use overlap::{OverlapResolver, SwapResolver};
