//! Board grid - the rows x columns matrix of tiles
//!
//! Uses a flat row-major array. Coordinates are `(row, column)` with row 0 at
//! the top, so "down" means increasing row index and gravity pulls tiles
//! towards `rows - 1`.
//!
//! Each occupied cell holds a [`Tile`] whose own `pos` equals the cell indices.
//! Every mutation in this module keeps both sides of that bookkeeping in sync.

use arrayvec::ArrayVec;

use crate::factory::TileFactory;
use crate::region::AffectedRegion;
use crate::sequence::TileSequence;
use crate::snapshot::GridSnapshot;
use crate::types::{Direction, GridPos, Line, Tile, TileId};

/// A tile that slid down during compaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileMove {
    pub id: TileId,
    pub from: GridPos,
    pub to: GridPos,
}

/// Result of [`BoardGrid::remove_and_compact`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compaction {
    /// Tiles taken off the board, still owned by the factory until released
    pub removed: Vec<Tile>,
    pub moved: Vec<TileMove>,
    /// Empty cells left at the top of each touched column
    pub vacated: Vec<GridPos>,
    pub affected: AffectedRegion,
}

impl Compaction {
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardGrid {
    rows: usize,
    columns: usize,
    cells: Vec<Option<Tile>>,
}

impl BoardGrid {
    /// Create an empty grid
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
        }
    }

    #[inline(always)]
    fn index(&self, row: usize, column: usize) -> Option<usize> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(row * self.columns + column)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        pos.row < self.rows && pos.column < self.columns
    }

    /// Get the tile at `(row, column)`.
    /// Returns None for empty or out-of-bounds cells.
    pub fn get(&self, row: usize, column: usize) -> Option<&Tile> {
        self.index(row, column)
            .and_then(|idx| self.cells[idx].as_ref())
    }

    pub fn get_pos(&self, pos: GridPos) -> Option<&Tile> {
        self.get(pos.row, pos.column)
    }

    /// Set the cell at `(row, column)`, rewriting the tile's position to match.
    /// Returns false if out of bounds.
    pub fn set(&mut self, row: usize, column: usize, tile: Option<Tile>) -> bool {
        debug_assert!(row < self.rows && column < self.columns, "set out of bounds ({row}, {column})");
        match self.index(row, column) {
            Some(idx) => {
                self.cells[idx] = tile.map(|mut t| {
                    t.pos = GridPos::new(row, column);
                    t
                });
                true
            }
            None => false,
        }
    }

    fn take(&mut self, pos: GridPos) -> Option<Tile> {
        self.index(pos.row, pos.column)
            .and_then(|idx| self.cells[idx].take())
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn empty_cells(&self) -> Vec<GridPos> {
        self.positions()
            .filter(|pos| self.get_pos(*pos).is_none())
            .collect()
    }

    /// All positions, row-major
    pub fn positions(&self) -> impl Iterator<Item = GridPos> + '_ {
        (0..self.rows).flat_map(move |r| (0..self.columns).map(move |c| GridPos::new(r, c)))
    }

    /// Occupied cells, row-major
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.cells.iter().flatten()
    }

    pub fn find(&self, id: TileId) -> Option<&Tile> {
        self.tiles().find(|t| t.id == id)
    }

    /// In-bounds orthogonal neighbours in up, right, down, left order
    pub fn neighbors(&self, pos: GridPos) -> ArrayVec<GridPos, 4> {
        Direction::ALL
            .iter()
            .filter_map(|&dir| pos.neighbor(dir, self.rows, self.columns))
            .collect()
    }

    /// Reassign a tile's character in place, keeping its identity.
    /// Returns false if the cell is empty or out of bounds.
    pub fn set_character(&mut self, pos: GridPos, character: char) -> bool {
        debug_assert!(self.contains(pos), "set_character out of bounds {pos}");
        match self
            .index(pos.row, pos.column)
            .and_then(|idx| self.cells[idx].as_mut())
        {
            Some(tile) => {
                tile.character = character;
                true
            }
            None => false,
        }
    }

    /// Row `i` as a search view, left to right.
    /// Returns None if the row is out of range or has an empty cell.
    pub fn row(&self, i: usize) -> Option<TileSequence> {
        if i >= self.rows {
            return None;
        }
        let tiles = (0..self.columns)
            .map(|c| self.get(i, c).copied())
            .collect::<Option<Vec<_>>>()?;
        Some(TileSequence::new(Line::Row(i), tiles))
    }

    /// Column `j` as a search view, top to bottom.
    /// Returns None if the column is out of range or has an empty cell.
    pub fn column(&self, j: usize) -> Option<TileSequence> {
        if j >= self.columns {
            return None;
        }
        let tiles = (0..self.rows)
            .map(|r| self.get(r, j).copied())
            .collect::<Option<Vec<_>>>()?;
        Some(TileSequence::new(Line::Column(j), tiles))
    }

    pub fn line(&self, line: Line) -> Option<TileSequence> {
        match line {
            Line::Row(i) => self.row(i),
            Line::Column(j) => self.column(j),
        }
    }

    /// Every row then every column
    pub fn all_lines(&self) -> Vec<Line> {
        (0..self.rows)
            .map(Line::Row)
            .chain((0..self.columns).map(Line::Column))
            .collect()
    }

    /// Search views for the region's lines. Lines that are out of range or
    /// not fully occupied are skipped.
    pub fn sequences_in(&self, region: &AffectedRegion) -> Vec<TileSequence> {
        region
            .lines()
            .into_iter()
            .filter_map(|line| self.line(line))
            .collect()
    }

    pub fn all_sequences(&self) -> Vec<TileSequence> {
        self.all_lines()
            .into_iter()
            .filter_map(|line| self.line(line))
            .collect()
    }

    /// Exchange the contents of two cells. Adjacency is not checked here.
    /// Returns false if either position is out of bounds.
    pub fn swap(&mut self, a: GridPos, b: GridPos) -> bool {
        debug_assert!(self.contains(a) && self.contains(b), "swap out of bounds {a} {b}");
        let (Some(ia), Some(ib)) = (self.index(a.row, a.column), self.index(b.row, b.column))
        else {
            return false;
        };
        self.cells.swap(ia, ib);
        if let Some(tile) = self.cells[ia].as_mut() {
            tile.pos = a;
        }
        if let Some(tile) = self.cells[ib].as_mut() {
            tile.pos = b;
        }
        true
    }

    /// Clear `cells`, then let every touched column fall.
    ///
    /// Uses a two-pointer pass from the bottom of each column, so surviving
    /// tiles keep their relative order and empty cells end up at the top.
    /// Positions that are already empty are ignored.
    pub fn remove_and_compact<I>(&mut self, cells: I) -> Compaction
    where
        I: IntoIterator<Item = GridPos>,
    {
        let mut out = Compaction::default();
        let mut columns = std::collections::BTreeSet::new();

        for pos in cells {
            debug_assert!(self.contains(pos), "remove out of bounds {pos}");
            if let Some(tile) = self.take(pos) {
                columns.insert(pos.column);
                out.removed.push(tile);
            }
        }

        for column in columns {
            let mut write_row = self.rows;

            for read_row in (0..self.rows).rev() {
                let Some(idx) = self.index(read_row, column) else {
                    continue;
                };
                let Some(mut tile) = self.cells[idx].take() else {
                    continue;
                };

                write_row -= 1;
                let from = GridPos::new(read_row, column);
                let to = GridPos::new(write_row, column);
                if from != to {
                    out.moved.push(TileMove { id: tile.id, from, to });
                    out.affected.insert(to);
                }
                tile.pos = to;
                self.cells[write_row * self.columns + column] = Some(tile);
            }

            for row in 0..write_row {
                let pos = GridPos::new(row, column);
                out.vacated.push(pos);
                out.affected.insert(pos);
            }
        }

        log::trace!(
            "Compacted: {} removed, {} moved, {} vacated",
            out.removed.len(),
            out.moved.len(),
            out.vacated.len()
        );
        out
    }

    /// Create a tile through `factory` and install it in an empty cell.
    /// Returns None if the cell is occupied or out of bounds.
    pub fn spawn_replacement<F>(&mut self, pos: GridPos, character: char, factory: &mut F) -> Option<Tile>
    where
        F: TileFactory + ?Sized,
    {
        debug_assert!(self.contains(pos), "spawn out of bounds {pos}");
        let idx = self.index(pos.row, pos.column)?;
        if self.cells[idx].is_some() {
            return None;
        }
        let id = factory.create_tile(character, pos);
        let tile = Tile::new(id, character, pos);
        self.cells[idx] = Some(tile);
        Some(tile)
    }

    /// Empty the grid, handing every tile back to `factory`
    pub fn release_all<F>(&mut self, factory: &mut F)
    where
        F: TileFactory + ?Sized,
    {
        for cell in &mut self.cells {
            if let Some(tile) = cell.take() {
                factory.release_tile(tile.id);
            }
        }
    }

    /// Check that every tile's position matches its cell and no identity
    /// appears twice. Returns the first offending position.
    pub fn check_consistency(&self) -> Result<(), GridPos> {
        let mut seen = std::collections::HashSet::with_capacity(self.cells.len());
        for pos in self.positions() {
            if let Some(tile) = self.get_pos(pos) {
                if tile.pos != pos || !seen.insert(tile.id) {
                    return Err(pos);
                }
            }
        }
        Ok(())
    }

    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            rows: self.rows,
            columns: self.columns,
            letters: (0..self.rows)
                .map(|r| {
                    (0..self.columns)
                        .map(|c| self.get(r, c).map_or(GridSnapshot::EMPTY, |t| t.character))
                        .collect()
                })
                .collect(),
            tile_ids: (0..self.rows)
                .map(|r| {
                    (0..self.columns)
                        .map(|c| self.get(r, c).map(|t| t.id.0))
                        .collect()
                })
                .collect(),
        }
    }

    /// Build a fully occupied grid from equal-length row strings, creating
    /// tiles through `factory`
    pub fn from_rows<F, S>(rows: &[S], factory: &mut F) -> Self
    where
        F: TileFactory + ?Sized,
        S: AsRef<str>,
    {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().chars().count());
        let mut grid = Self::new(height, width);
        for (r, text) in rows.iter().enumerate() {
            for (c, ch) in text.as_ref().chars().take(width).enumerate() {
                grid.spawn_replacement(GridPos::new(r, c), ch, factory);
            }
        }
        grid
    }
}
