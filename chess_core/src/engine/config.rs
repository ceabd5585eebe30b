use crate::logic::eval_constants::{
    KING_CAPTURE_BONUS, VAL_BISHOP, VAL_KING, VAL_KNIGHT, VAL_PAWN, VAL_QUEEN, VAL_ROOK,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SEARCH_DEPTH: u8 = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub val_pawn: i32,
    pub val_knight: i32,
    pub val_bishop: i32,
    pub val_rook: i32,
    pub val_queen: i32,
    pub val_king: i32,
    pub king_capture_bonus: i32,

    // Search Parameters
    pub search_depth: u8,
    /// When false the engine runs plain minimax with a full window at every node.
    pub alpha_beta_pruning: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_pawn: VAL_PAWN,
            val_knight: VAL_KNIGHT,
            val_bishop: VAL_BISHOP,
            val_rook: VAL_ROOK,
            val_queen: VAL_QUEEN,
            val_king: VAL_KING,
            king_capture_bonus: KING_CAPTURE_BONUS,

            search_depth: DEFAULT_SEARCH_DEPTH,
            alpha_beta_pruning: true,
        }
    }
}

impl EngineConfig {
    /// Reads a partial config; fields missing from the JSON keep their defaults.
    /// Parses a config, keeping defaults for missing fields. A zero
    /// `search_depth` is rejected since the engine could never pick a move.
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json_str)?;
        if config.search_depth == 0 {
            return Err(serde::de::Error::custom("search_depth must be at least 1"));
        }
        Ok(config)
    }
}
