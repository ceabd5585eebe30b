use crate::logic::board::{Board, Square};
use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod config;
pub mod eval;
pub mod search;

/// Bound used for the initial alpha-beta window.
pub const SCORE_INFINITY: i32 = i32::MAX;

/// Largest magnitude an evaluation may return, strictly inside the root window.
pub const SCORE_LIMIT: i32 = SCORE_INFINITY - 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    #[must_use]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// Parses long algebraic notation such as `e2e4` or `e2 e4`.
    #[must_use]
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.len() != 4 || !compact.is_ascii() {
            return None;
        }
        let (from, to) = compact.split_at(2);
        Some(Self::new(
            Square::from_algebraic(from)?,
            Square::from_algebraic(to)?,
        ))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// Outcome of one search node. `best_move` is only filled in by nodes that
/// actually compared moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub score: i32,
    pub best_move: Option<Move>,
}

impl SearchResult {
    #[must_use]
    pub const fn leaf(score: i32) -> Self {
        Self {
            score,
            best_move: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u32,
    pub time_ms: u64,
    pub score: i32,
}

pub trait Evaluator {
    /// Scores from dark's point of view, within `-SCORE_LIMIT..=SCORE_LIMIT`.
    fn evaluate(&self, board: &Board) -> i32;
}

pub trait Searcher {
    fn search(&mut self, game_state: &GameState) -> Option<(Move, SearchStats)>;
}
