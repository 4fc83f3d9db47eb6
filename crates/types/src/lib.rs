//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (grid logic, match engine, input interpretation).
//!
//! # Coordinates
//!
//! Grid positions are `(row, column)` with row 0 at the top of the board and
//! column 0 on the left. Words read left-to-right along a row and top-to-bottom
//! along a column. Gravity pulls tiles toward higher row indices.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_ROWS` | 8 | Board height in tiles |
//! | `DEFAULT_COLUMNS` | 8 | Board width in tiles |
//! | `DEFAULT_MIN_WORD_LENGTH` | 3 | Shortest word that counts as a match |
//! | `DEFAULT_OVERLAP_RATIO` | 0.7 | Fraction of a tile-step a drag must pass to swap |
//! | `DEFAULT_GENERATION_ITERATION_CAP` | 10000 | Max substitution passes during board generation |
//! | `EVENT_OUTBOX_CAPACITY` | 1024 | Undrained events kept for polling consumers |
//!
//! # Examples
//!
//! ```
//! use word_slide_types::{BoardPhase, Direction, GridPos, SwapMode};
//!
//! let pos = GridPos::new(2, 3);
//! assert_eq!(pos.neighbor(Direction::Up, 8, 8), Some(GridPos::new(1, 3)));
//! assert_eq!(GridPos::new(0, 0).neighbor(Direction::Up, 8, 8), None);
//!
//! assert!(BoardPhase::Idle.accepts_input());
//! assert!(!BoardPhase::AwaitingAnimations.accepts_input());
//!
//! assert_eq!(SwapMode::from_str("classic"), Some(SwapMode::Classic));
//! ```

use std::fmt;

/// Default board height (8 rows)
pub const DEFAULT_ROWS: usize = 8;

/// Default board width (8 columns)
pub const DEFAULT_COLUMNS: usize = 8;

/// Default minimum word length
pub const DEFAULT_MIN_WORD_LENGTH: usize = 3;

/// Default fraction of one tile-step a dragged tile must cross before it swaps
pub const DEFAULT_OVERLAP_RATIO: f32 = 0.7;

/// Default cap on substitution passes while generating a word-free board
pub const DEFAULT_GENERATION_ITERATION_CAP: u32 = 10_000;

/// Events kept for `take_events` between drains; older ones are discarded
pub const EVENT_OUTBOX_CAPACITY: usize = 1024;

/// Drag distance (in tile-steps) under which the drag axis follows pointer intent
pub const CLOSE_TO_CENTRE_RATIO: f32 = 0.1;

/// Opaque tile identity handed out by a tile factory.
///
/// Identity survives character reassignment and movement; only the factory
/// that issued it knows what it refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A cell address on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPos {
    pub row: usize,
    pub column: usize,
}

impl GridPos {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// True when `other` shares an edge with this cell
    ///
    /// ```
    /// use word_slide_types::GridPos;
    ///
    /// assert!(GridPos::new(1, 1).is_adjacent(GridPos::new(1, 2)));
    /// assert!(!GridPos::new(1, 1).is_adjacent(GridPos::new(2, 2)));
    /// assert!(!GridPos::new(1, 1).is_adjacent(GridPos::new(1, 1)));
    /// ```
    pub fn is_adjacent(&self, other: GridPos) -> bool {
        self.row.abs_diff(other.row) + self.column.abs_diff(other.column) == 1
    }

    /// The neighbouring cell in `direction`, if it lies on a `rows x columns` board
    pub fn neighbor(&self, direction: Direction, rows: usize, columns: usize) -> Option<GridPos> {
        let (dr, dc) = direction.offset();
        let row = self.row.checked_add_signed(dr)?;
        let column = self.column.checked_add_signed(dc)?;
        if row < rows && column < columns {
            Some(GridPos { row, column })
        } else {
            None
        }
    }
}

impl fmt::Display for GridPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// A letter tile: identity, character, and the cell it rests in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub id: TileId,
    pub character: char,
    pub pos: GridPos,
}

impl Tile {
    pub fn new(id: TileId, character: char, pos: GridPos) -> Self {
        Self { id, character, pos }
    }
}

/// The four swap directions
///
/// The order of [`Direction::ALL`] is the order in which a released drag is
/// tested against its neighbours: up, right, down, left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// `(row, column)` delta of one step in this direction
    pub fn offset(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

/// One searchable line of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Line {
    Row(usize),
    Column(usize),
}

impl Line {
    pub fn index(&self) -> usize {
        match self {
            Line::Row(i) | Line::Column(i) => *i,
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Line::Row(i) => write!(f, "row {i}"),
            Line::Column(j) => write!(f, "column {j}"),
        }
    }
}

/// Board lifecycle phase
///
/// Exactly one phase is active at a time. Only [`BoardPhase::Idle`] accepts
/// player input.
///
/// - **Idle**: waiting for the player
/// - **ValidatingSwap**: a released drag is being checked and applied
/// - **ResolvingMatches**: affected rows/columns are being searched
/// - **AwaitingAnimations**: matched tiles are playing their destroy animation
/// - **Compacting**: surviving tiles fall and replacements settle
/// - **BoardGeneration**: building a board that contains no words
/// - **SnappingBack**: a released tile returns to its own cell
/// - **SwappingBack**: a word-less swap is being undone (classic mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardPhase {
    Idle,
    ValidatingSwap,
    ResolvingMatches,
    AwaitingAnimations,
    Compacting,
    BoardGeneration,
    SnappingBack,
    SwappingBack,
}

impl BoardPhase {
    pub fn accepts_input(&self) -> bool {
        matches!(self, BoardPhase::Idle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BoardPhase::Idle => "idle",
            BoardPhase::ValidatingSwap => "validatingSwap",
            BoardPhase::ResolvingMatches => "resolvingMatches",
            BoardPhase::AwaitingAnimations => "awaitingAnimations",
            BoardPhase::Compacting => "compacting",
            BoardPhase::BoardGeneration => "boardGeneration",
            BoardPhase::SnappingBack => "snappingBack",
            BoardPhase::SwappingBack => "swappingBack",
        }
    }
}

/// What happens to a player swap that forms no word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwapMode {
    /// The swap stays; the board simply returns to idle
    #[default]
    Free,
    /// The two tiles are swapped back before input reopens
    Classic,
}

impl SwapMode {
    /// Parse from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "free" => Some(SwapMode::Free),
            "classic" => Some(SwapMode::Classic),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SwapMode::Free => "free",
            SwapMode::Classic => "classic",
        }
    }
}
