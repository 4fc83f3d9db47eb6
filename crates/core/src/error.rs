//! Error types for the core crate

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by dictionary loading and lookup.
///
/// The `*NotLoaded` variants indicate a broken startup sequence and must be
/// propagated, never swallowed.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("dictionary not loaded: load a word list before checking words")]
    DictionaryNotLoaded,

    #[error("character set not loaded: load a character set before drawing letters")]
    CharacterSetNotLoaded,

    #[error("character set line {line}: expected `<char> <count>`, got {content:?}")]
    MalformedCharacterSet { line: usize, content: String },

    #[error("character set has no letters with a positive weight")]
    EmptyCharacterSet,

    #[error("no word list or character set for language {0:?}")]
    UnknownLanguage(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type CoreResult<T> = Result<T, CoreError>;
