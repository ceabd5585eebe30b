use anyhow::{anyhow, bail, Context, Result};
use chess_core::engine::config::EngineConfig;
use chess_core::engine::search::AlphaBetaEngine;
use chess_core::engine::Move;
use chess_core::logic::board::{Color, Square};
use chess_core::logic::game::GameState;
use std::io::{BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const HELP: &str = "\
Commands:
  e2e4 | e2 e4   move a piece (you play the uppercase pieces)
  moves e2       list where the piece on e2 can go
  undo           take back your last move and the reply
  new            start a new game
  board          show the board
  help           show this text
  quit           leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play(Move),
    Targets(Square),
    Undo,
    New,
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            bail!("empty command");
        };

        let command = match first.to_ascii_lowercase().as_str() {
            "moves" => {
                let square = words.next().context("usage: moves <square>")?;
                Self::Targets(
                    Square::from_algebraic(square)
                        .with_context(|| format!("'{square}' is not a square"))?,
                )
            }
            "undo" => Self::Undo,
            "new" => Self::New,
            "board" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => {
                return Move::from_algebraic(line)
                    .map(Self::Play)
                    .with_context(|| format!("unknown command '{}', try 'help'", line.trim()));
            }
        };

        if words.next().is_some() {
            bail!("unexpected text after '{first}'");
        }
        Ok(command)
    }
}

/// A human (light) against the engine (dark) over one authoritative game.
pub struct Duel {
    game: GameState,
    engine: AlphaBetaEngine,
    pace: Duration,
}

impl Duel {
    pub fn new(game: GameState, config: EngineConfig, pace: Duration) -> Self {
        Self {
            game,
            engine: AlphaBetaEngine::new(Arc::new(config)),
            pace,
        }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        writeln!(
            out,
            "Capture the king to win. The engine looks {} plies ahead. Type 'help' for commands.",
            self.engine.config().search_depth
        )?;
        self.show(out)?;
        if self.engine_to_move() {
            self.engine_turn(out)?;
        }

        for line in input.lines() {
            let line = line.context("failed to read input")?;
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => self.handle(command, out)?,
                Err(err) => writeln!(out, "{err}")?,
            }
        }

        log::info!("Session ended after {} plies", self.game.history.len());
        Ok(())
    }

    fn handle<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Play(mv) => match self.game.make_move(mv.from, mv.to) {
                Ok(()) => {
                    writeln!(out, "You play {mv}")?;
                    self.show(out)?;
                    if self.engine_to_move() {
                        self.engine_turn(out)?;
                    }
                }
                Err(err) => writeln!(out, "Illegal move {mv}: {err}")?,
            },
            Command::Targets(from) => {
                let targets = self.game.legal_targets(from);
                if targets.is_empty() {
                    writeln!(out, "No moves from {from}")?;
                } else {
                    let list: Vec<String> = targets.iter().map(ToString::to_string).collect();
                    writeln!(out, "{from}: {}", list.join(" "))?;
                }
            }
            Command::Undo => {
                if self.take_back() {
                    self.show(out)?;
                } else {
                    writeln!(out, "Nothing to undo")?;
                }
            }
            Command::New => {
                self.game.reset();
                writeln!(out, "New game")?;
                self.show(out)?;
            }
            Command::Show => self.show(out)?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => {}
        }
        Ok(())
    }

    fn engine_to_move(&self) -> bool {
        !self.game.is_over() && self.game.turn == Color::Dark
    }

    /// Searches on a scoped worker thread while this thread keeps the
    /// terminal alive.
    fn engine_turn<W: Write>(&mut self, out: &mut W) -> Result<()> {
        write!(out, "Engine is thinking")?;
        out.flush()?;

        let pace = self.pace;
        let game = &mut self.game;
        let engine = &mut self.engine;
        let reply = thread::scope(|s| {
            let worker = s.spawn(move || {
                thread::sleep(pace);
                game.engine_move(engine)
            });
            while !worker.is_finished() {
                thread::sleep(Duration::from_millis(100));
                write!(out, ".")?;
                out.flush()?;
            }
            worker.join().map_err(|_| anyhow!("engine thread panicked"))
        })?;
        writeln!(out)?;

        match reply {
            Some((mv, stats)) => {
                writeln!(
                    out,
                    "Engine plays {mv} (score {}, {} nodes, {} ms)",
                    stats.score, stats.nodes, stats.time_ms
                )?;
                self.show(out)?;
            }
            None => writeln!(out, "Engine has no move")?,
        }
        Ok(())
    }

    /// Undoes back to the last position where light was to move.
    fn take_back(&mut self) -> bool {
        if !self.game.undo_move() {
            return false;
        }
        if self.game.turn == Color::Dark {
            self.game.undo_move();
        }
        true
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "{}", self.game.board)?;
        if let Some(mv) = self.game.last_move {
            writeln!(out, "Last move: {mv}")?;
        }
        match self.game.status.winner() {
            None => writeln!(out, "{} to move", self.game.turn)?,
            Some(Color::Light) => writeln!(out, "You captured the king. You win!")?,
            Some(Color::Dark) => writeln!(out, "The engine captured your king.")?,
        }
        Ok(())
    }
}
