//! Outstanding animation bookkeeping
//!
//! A tile can be waited on more than once in a single phase (swapped and then
//! destroyed, for example), and completion signals carry only the tile id, so
//! each tile keeps a count rather than a flag. The phase may advance once the
//! map is empty.

use std::collections::HashMap;

use crate::types::TileId;

#[derive(Debug, Clone, Default)]
pub struct OutstandingAnimations {
    counts: HashMap<TileId, u32>,
}

impl OutstandingAnimations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect(&mut self, id: TileId) {
        *self.counts.entry(id).or_insert(0) += 1;
    }

    /// Record one completion for `id`. Returns false if nothing was expected
    /// from that tile.
    pub fn complete(&mut self, id: TileId) -> bool {
        let Some(count) = self.counts.get_mut(&id) else {
            return false;
        };
        *count -= 1;
        if *count == 0 {
            self.counts.remove(&id);
        }
        true
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct tiles still animating
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Completion signals still expected
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.counts.contains_key(&id)
    }

    pub fn tiles(&self) -> Vec<TileId> {
        let mut ids: Vec<TileId> = self.counts.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Drop every expectation, returning the tiles that never reported back
    pub fn force_clear(&mut self) -> Vec<TileId> {
        let ids = self.tiles();
        self.counts.clear();
        ids
    }
}
