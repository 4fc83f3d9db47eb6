use thiserror::Error;

use crate::core::CoreError;
use crate::types::BoardPhase;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("board generation still had words after {iterations} passes")]
    GenerationDidNotConverge { iterations: u32 },

    #[error("cannot replace the board while {0:?} is in progress")]
    Busy(BoardPhase),
}

pub type EngineResult<T> = Result<T, EngineError>;
