//! Match engine - turn lifecycle and cascade control
//!
//! Drives a [`BoardGrid`](crate::core::BoardGrid) through swaps, word
//! destruction, compaction and refills, gating player input while a cascade
//! is in flight. Rendering stays outside: the engine announces what changed
//! through [`EngineEvent`]s and waits for the renderer to report each tile's
//! animation as complete.
//!
//! # Module Structure
//!
//! - [`config`]: serde-loadable engine settings
//! - [`engine`]: the [`MatchEngine`] state machine
//! - [`events`]: events, listeners and turn reports
//! - [`outstanding`]: per-tile animation counters
//! - [`session`]: async startup (load dictionary, generate board)
//!
//! # Example
//!
//! ```
//! use word_slide_engine::core::{Dictionary, HeadlessTileFactory, WeightedAlphabet};
//! use word_slide_engine::types::{BoardPhase, GridPos};
//! use word_slide_engine::{EngineConfig, MatchEngine, SwapOutcome};
//!
//! let dict = Dictionary::from_words(["cat"])
//!     .with_alphabet(WeightedAlphabet::from_weights([('x', 1)]).unwrap());
//! let config = EngineConfig::default().with_size(3, 3).with_seed(1);
//! let mut engine = MatchEngine::new(config, dict, HeadlessTileFactory::new()).unwrap();
//! engine.load_board(&["act", "xyz", "uvw"]).unwrap();
//!
//! let outcome = engine.request_swap(GridPos::new(0, 0), GridPos::new(0, 1)).unwrap();
//! assert_eq!(outcome, SwapOutcome::Swapped);
//! assert_eq!(engine.phase(), BoardPhase::AwaitingAnimations);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod outstanding;
pub mod session;

pub use word_slide_core as core;
pub use word_slide_input as input;
pub use word_slide_types as types;

pub use config::EngineConfig;
pub use engine::{EngineSnapshot, GenerationReport, MatchEngine, SwapOutcome};
pub use error::{EngineError, EngineResult};
pub use events::{CascadeStep, EngineEvent, ListenerId, Observers, TurnReport};
pub use outstanding::OutstandingAnimations;
