use crate::engine::config::EngineConfig;
use crate::engine::eval::MaterialEvaluator;
use crate::engine::{Evaluator, Move, SearchResult, SearchStats, Searcher, SCORE_INFINITY};
use crate::logic::board::{Board, Color};
use crate::logic::game::GameState;
use crate::logic::generator::MoveGenerator;
use std::sync::Arc;

/// Fixed-depth minimax over board snapshots. Dark is the maximizing side.
pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: MaterialEvaluator,
    generator: MoveGenerator,
    nodes_searched: u32,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: MaterialEvaluator::new(config.clone()),
            generator: MoveGenerator::new(),
            config,
            nodes_searched: 0,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        self.evaluator = MaterialEvaluator::new(config.clone());
        self.config = config;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Nodes visited by the most recent call, counting the root.
    pub const fn nodes_searched(&self) -> u32 {
        self.nodes_searched
    }

    fn now() -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            if let Some(window) = web_sys::window() {
                return window.performance().map(|p| p.now()).unwrap_or(0.0);
            }
            let global = js_sys::global();
            if let Ok(worker) = global.dyn_into::<web_sys::WorkerGlobalScope>() {
                return worker.performance().map(|p| p.now()).unwrap_or(0.0);
            }
            0.0
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            use std::time::{SystemTime, UNIX_EPOCH};
            let since_the_epoch = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default();
            #[allow(clippy::cast_precision_loss)]
            let time_ms = (since_the_epoch.as_secs() as f64).mul_add(
                1000.0,
                f64::from(since_the_epoch.subsec_nanos()) / 1_000_000.0,
            );
            time_ms
        }
    }

    /// Searches `depth` plies below `board`.
    ///
    /// The maximizing side moves the dark pieces. At depth zero the position
    /// is scored by the evaluator; a side with nothing to move scores 0.
    /// Ties keep the first move in generation order, so the result is fully
    /// determined by the inputs. The node counter is not reset here.
    pub fn alpha_beta(
        &mut self,
        board: &Board,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> SearchResult {
        self.nodes_searched = self.nodes_searched.saturating_add(1);

        if depth == 0 {
            return SearchResult::leaf(self.evaluator.evaluate(board));
        }

        let side = if maximizing { Color::Dark } else { Color::Light };
        let moves = self.generator.moves_for_side(board, side);
        if moves.is_empty() {
            return SearchResult::leaf(0);
        }

        let prune = self.config.alpha_beta_pruning;
        let mut best = SearchResult {
            score: if maximizing {
                -SCORE_INFINITY
            } else {
                SCORE_INFINITY
            },
            best_move: None,
        };

        for mv in moves {
            let child = board.apply_move(mv);
            let (child_alpha, child_beta) = if prune {
                (alpha, beta)
            } else {
                (-SCORE_INFINITY, SCORE_INFINITY)
            };
            let score = self
                .alpha_beta(&child, depth - 1, !maximizing, child_alpha, child_beta)
                .score;

            if maximizing {
                if best.best_move.is_none() || score > best.score {
                    best = SearchResult {
                        score,
                        best_move: Some(mv),
                    };
                }
                alpha = alpha.max(score);
            } else {
                if best.best_move.is_none() || score < best.score {
                    best = SearchResult {
                        score,
                        best_move: Some(mv),
                    };
                }
                beta = beta.min(score);
            }

            if prune && beta <= alpha {
                break;
            }
        }

        best
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(&mut self, game_state: &GameState) -> Option<(Move, SearchStats)> {
        self.nodes_searched = 0;
        let start_time = Self::now();

        let depth = self.config.search_depth;
        let maximizing = game_state.turn == Color::Dark;
        let result = self.alpha_beta(
            &game_state.board,
            depth,
            maximizing,
            -SCORE_INFINITY,
            SCORE_INFINITY,
        );

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let time_ms = (Self::now() - start_time).max(0.0) as u64;
        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            time_ms,
            score: result.score,
        };

        match result.best_move {
            Some(mv) => {
                log::debug!(
                    "Search depth {} picked {} (score {}, {} nodes, {} ms)",
                    depth,
                    mv,
                    stats.score,
                    stats.nodes,
                    stats.time_ms
                );
                Some((mv, stats))
            }
            None => {
                log::warn!("Search found no move for {} at depth {}", game_state.turn, depth);
                None
            }
        }
    }
}
