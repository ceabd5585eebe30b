use crate::engine::config::EngineConfig;
use crate::engine::search::AlphaBetaEngine;
use crate::engine::{Move, SearchStats, Searcher};
use crate::logic::game::GameState;
use gloo_worker::{HandlerId, Worker, WorkerScope};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize)]
pub enum Input {
    ComputeMove(GameState, EngineConfig),
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Output {
    MoveFound(Move, SearchStats),
    /// The side to move has no pieces that can move, or the game is over.
    NoMove,
}

/// Runs engine turns off the interactive thread. The engine is kept between
/// requests and only its config is swapped.
#[derive(Default)]
pub struct EngineWorker {
    engine: Option<AlphaBetaEngine>,
}

impl EngineWorker {
    pub fn compute(&mut self, msg: Input) -> Output {
        match msg {
            Input::ComputeMove(game_state, config) => {
                if game_state.is_over() {
                    return Output::NoMove;
                }

                let config = Arc::new(config);
                let engine = match self.engine.take() {
                    Some(mut engine) => {
                        engine.update_config(config);
                        engine
                    }
                    None => AlphaBetaEngine::new(config),
                };
                let engine = self.engine.insert(engine);

                engine
                    .search(&game_state)
                    .map_or(Output::NoMove, |(mv, stats)| Output::MoveFound(mv, stats))
            }
        }
    }
}

impl Worker for EngineWorker {
    type Input = Input;
    type Message = ();
    type Output = Output;

    fn create(_scope: &WorkerScope<Self>) -> Self {
        Self::default()
    }

    fn update(&mut self, _scope: &WorkerScope<Self>, _msg: Self::Message) {}

    fn received(&mut self, scope: &WorkerScope<Self>, msg: Self::Input, id: HandlerId) {
        let output = self.compute(msg);
        if output == Output::NoMove {
            log::warn!("Worker has no move to report");
        }
        scope.respond(id, output);
    }
}
