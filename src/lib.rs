//! Word Slide (workspace facade crate).
//!
//! Re-exports the `word_slide::{core,engine,input,types}` public API while the
//! implementation lives in dedicated crates under `crates/`.

pub use word_slide_core as core;
pub use word_slide_engine as engine;
pub use word_slide_input as input;
pub use word_slide_types as types;
