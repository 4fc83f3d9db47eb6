//! Tile sequences and word matches
//!
//! A [`TileSequence`] is a read-only snapshot of one row or column. Its string
//! projection is what the word finder searches; the tile list maps each
//! character index back to the tile it came from.

use std::ops::Range;

use crate::types::{Line, Tile, TileId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSequence {
    line: Line,
    tiles: Vec<Tile>,
}

impl TileSequence {
    pub fn new(line: Line, tiles: Vec<Tile>) -> Self {
        Self { line, tiles }
    }

    pub fn line(&self) -> Line {
        self.line
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn chars(&self) -> Vec<char> {
        self.tiles.iter().map(|t| t.character).collect()
    }

    /// Concatenated tile characters
    pub fn text(&self) -> String {
        self.tiles.iter().map(|t| t.character).collect()
    }
}

/// A dictionary word found at `[start, start + len)` of a sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordMatch {
    pub line: Line,
    pub start: usize,
    pub word: String,
    pub tiles: Vec<Tile>,
}

impl WordMatch {
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.tiles.len()
    }

    pub fn tile_ids(&self) -> impl Iterator<Item = TileId> + '_ {
        self.tiles.iter().map(|t| t.id)
    }
}
