//! Core board logic - pure, deterministic, and testable
//!
//! Everything needed to hold a board of letter tiles and find words in it.
//! Nothing here renders, animates, or waits; the engine crate drives these
//! pieces through a turn.
//!
//! # Module Structure
//!
//! - [`dictionary`]: word set membership and weighted random letters
//! - [`alphabet`]: frequency-weighted letter population
//! - [`provider`]: async loading of word lists and character sets
//! - [`finder`]: greedy longest-first word search over letter sequences
//! - [`grid`]: the rows x columns tile matrix with swap and compaction
//! - [`region`]: rows and columns touched by the latest mutation
//! - [`factory`]: boundary for creating and releasing tile visuals
//!
//! # Example
//!
//! ```
//! use word_slide_core::{find_words, BoardGrid, Dictionary, HeadlessTileFactory};
//!
//! let dict = Dictionary::from_words(["ant", "example"]);
//! let mut factory = HeadlessTileFactory::new();
//! let grid = BoardGrid::from_rows(&["antexample"], &mut factory);
//!
//! let words = find_words(&dict, &grid.all_sequences(), 3).unwrap();
//! let found: Vec<&str> = words.iter().map(|w| w.word.as_str()).collect();
//! assert_eq!(found, ["example", "ant"]);
//! ```

pub mod alphabet;
pub mod dictionary;
pub mod error;
pub mod factory;
pub mod finder;
pub mod grid;
pub mod provider;
pub mod region;
pub mod sequence;
pub mod snapshot;

pub use word_slide_types as types;

pub use alphabet::WeightedAlphabet;
pub use dictionary::{Dictionary, WordLookup};
pub use error::{CoreError, CoreResult};
pub use factory::{HeadlessTileFactory, TileFactory};
pub use finder::{find_word_spans, find_words, find_words_in_sequence, WordSpan};
pub use grid::{BoardGrid, Compaction, TileMove};
pub use provider::{DictionaryProvider, FileDictionaryProvider, StaticDictionaryProvider};
pub use region::AffectedRegion;
pub use sequence::{TileSequence, WordMatch};
pub use snapshot::GridSnapshot;
