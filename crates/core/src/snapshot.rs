use serde::{Deserialize, Serialize};

/// Serializable picture of a grid: one string per row plus the tile ids
/// behind each cell. Empty cells render as [`GridSnapshot::EMPTY`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub rows: usize,
    pub columns: usize,
    pub letters: Vec<String>,
    pub tile_ids: Vec<Vec<Option<u32>>>,
}

impl GridSnapshot {
    pub const EMPTY: char = '.';

    pub fn letter_at(&self, row: usize, column: usize) -> Option<char> {
        self.letters
            .get(row)
            .and_then(|line| line.chars().nth(column))
            .filter(|&c| c != Self::EMPTY)
    }

    pub fn empty_count(&self) -> usize {
        self.tile_ids
            .iter()
            .flatten()
            .filter(|id| id.is_none())
            .count()
    }

    /// Rows joined by newlines
    pub fn render(&self) -> String {
        self.letters.join("\n")
    }
}
