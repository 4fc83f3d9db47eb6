//! Affected region - rows and columns touched by the latest mutation

use std::collections::BTreeSet;

use crate::types::{GridPos, Line};

/// Row and column indices to re-search. Ordered sets keep the search order
/// (rows ascending, then columns ascending) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AffectedRegion {
    rows: BTreeSet<usize>,
    columns: BTreeSet<usize>,
}

impl AffectedRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = GridPos>,
    {
        let mut region = Self::new();
        region.extend(positions);
        region
    }

    pub fn insert(&mut self, pos: GridPos) {
        self.rows.insert(pos.row);
        self.columns.insert(pos.column);
    }

    pub fn insert_row(&mut self, row: usize) {
        self.rows.insert(row);
    }

    pub fn insert_column(&mut self, column: usize) {
        self.columns.insert(column);
    }

    pub fn merge(&mut self, other: &AffectedRegion) {
        self.rows.extend(other.rows.iter().copied());
        self.columns.extend(other.columns.iter().copied());
    }

    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().copied()
    }

    pub fn columns(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().copied()
    }

    pub fn contains_row(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn contains_column(&self, column: usize) -> bool {
        self.columns.contains(&column)
    }

    /// Rows first, then columns
    pub fn lines(&self) -> Vec<Line> {
        self.rows
            .iter()
            .map(|&r| Line::Row(r))
            .chain(self.columns.iter().map(|&c| Line::Column(c)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.columns.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
        self.columns.clear();
    }

    /// Hand the region to a consumer and leave this one empty
    pub fn take(&mut self) -> AffectedRegion {
        std::mem::take(self)
    }
}

impl Extend<GridPos> for AffectedRegion {
    fn extend<T: IntoIterator<Item = GridPos>>(&mut self, iter: T) {
        for pos in iter {
            self.insert(pos);
        }
    }
}
