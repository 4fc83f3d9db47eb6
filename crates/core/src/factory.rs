//! Tile factory - the boundary where tile visuals are created and released
//!
//! The grid never allocates or frees tile visuals itself; it asks a factory for
//! an identity and hands identities back when a tile is destroyed.

use std::collections::HashSet;

use crate::types::{GridPos, TileId};

pub trait TileFactory {
    fn create_tile(&mut self, character: char, pos: GridPos) -> TileId;

    fn release_tile(&mut self, id: TileId);
}

impl<F: TileFactory + ?Sized> TileFactory for &mut F {
    fn create_tile(&mut self, character: char, pos: GridPos) -> TileId {
        (**self).create_tile(character, pos)
    }

    fn release_tile(&mut self, id: TileId) {
        (**self).release_tile(id)
    }
}

/// Sequential ids with live/released bookkeeping, for running without a scene
#[derive(Debug, Clone, Default)]
pub struct HeadlessTileFactory {
    next_id: u32,
    live: HashSet<TileId>,
    released: usize,
}

impl HeadlessTileFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn is_live(&self, id: TileId) -> bool {
        self.live.contains(&id)
    }

    /// Tiles released over the factory's lifetime
    pub fn released_count(&self) -> usize {
        self.released
    }

    pub fn created_count(&self) -> u32 {
        self.next_id
    }
}

impl TileFactory for HeadlessTileFactory {
    fn create_tile(&mut self, _character: char, _pos: GridPos) -> TileId {
        let id = TileId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.live.insert(id);
        id
    }

    fn release_tile(&mut self, id: TileId) {
        let was_live = self.live.remove(&id);
        debug_assert!(was_live, "tile {id} released twice or never created");
        if was_live {
            self.released += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_factory_tracks_lifecycle() {
        let mut factory = HeadlessTileFactory::new();
        let a = factory.create_tile('a', GridPos::new(0, 0));
        let b = factory.create_tile('b', GridPos::new(0, 1));
        assert_ne!(a, b);
        assert_eq!(factory.live_count(), 2);

        factory.release_tile(a);
        assert!(!factory.is_live(a));
        assert!(factory.is_live(b));
        assert_eq!(factory.released_count(), 1);
        assert_eq!(factory.created_count(), 2);
    }

    #[test]
    fn test_bookkeeping_only_tracks_live_tiles() {
        let mut factory = HeadlessTileFactory::new();
        for round in 0..1000 {
            let id = factory.create_tile('a', GridPos::new(0, 0));
            factory.release_tile(id);
            assert_eq!(factory.released_count(), round + 1);
        }
        assert_eq!(factory.live_count(), 0);
        assert_eq!(factory.created_count(), 1000);
    }
}
