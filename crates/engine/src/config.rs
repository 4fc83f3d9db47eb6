//! Engine configuration
//!
//! Every field has a default, so a partial JSON document is enough:
//!
//! ```
//! use word_slide_engine::EngineConfig;
//!
//! let config = EngineConfig::from_json_str(r#"{ "rows": 10, "swap_mode": "classic" }"#).unwrap();
//! assert_eq!(config.rows, 10);
//! assert_eq!(config.columns, 8);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::types::{
    SwapMode, DEFAULT_COLUMNS, DEFAULT_GENERATION_ITERATION_CAP, DEFAULT_MIN_WORD_LENGTH,
    DEFAULT_OVERLAP_RATIO, DEFAULT_ROWS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub rows: usize,
    pub columns: usize,
    /// Shortest word the finder accepts (a whole-line word is always accepted)
    pub min_word_length: usize,
    /// Fraction of a tile-step a dragged tile must pass to commit a swap
    pub overlap_ratio: f32,
    #[serde(with = "swap_mode_serde")]
    pub swap_mode: SwapMode,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    /// Full-board scans allowed before generation gives up
    pub generation_iteration_cap: u32,
    /// Force-complete animations that have not reported back within this
    /// many milliseconds. Off when absent.
    pub animation_timeout_ms: Option<u32>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            min_word_length: DEFAULT_MIN_WORD_LENGTH,
            overlap_ratio: DEFAULT_OVERLAP_RATIO,
            swap_mode: SwapMode::default(),
            seed: None,
            generation_iteration_cap: DEFAULT_GENERATION_ITERATION_CAP,
            animation_timeout_ms: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(text: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::InvalidConfig(e.to_string()))
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "board must have at least one cell, got {}x{}",
                self.rows, self.columns
            )));
        }
        if self.min_word_length == 0 {
            return Err(EngineError::InvalidConfig(
                "min_word_length must be at least 1".to_string(),
            ));
        }
        if !(self.overlap_ratio > 0.0 && self.overlap_ratio <= 1.0) {
            return Err(EngineError::InvalidConfig(format!(
                "overlap_ratio must be in (0, 1], got {}",
                self.overlap_ratio
            )));
        }
        if self.generation_iteration_cap == 0 {
            return Err(EngineError::InvalidConfig(
                "generation_iteration_cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_size(mut self, rows: usize, columns: usize) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    pub fn with_swap_mode(mut self, swap_mode: SwapMode) -> Self {
        self.swap_mode = swap_mode;
        self
    }
}

mod swap_mode_serde {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use crate::types::SwapMode;

    pub fn serialize<S: Serializer>(mode: &SwapMode, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(mode.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SwapMode, D::Error> {
        let s = String::deserialize(deserializer)?;
        SwapMode::from_str(&s).ok_or_else(|| D::Error::custom(format!("unknown swap mode: {s}")))
    }
}
