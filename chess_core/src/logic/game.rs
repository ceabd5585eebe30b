use crate::engine::{Move, SearchStats, Searcher};
use crate::logic::board::{Board, Color, Piece, Square};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{is_valid_move, MoveError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    LightWins,
    DarkWins,
}

impl GameStatus {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Self::Playing => None,
            Self::LightWins => Some(Color::Light),
            Self::DarkWins => Some(Color::Dark),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub mv: Move,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub color: Color,
}

/// The authoritative game: board, side to move and result. Light is the
/// human side and moves first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub status: GameStatus,
    pub last_move: Option<Move>,
    pub history: Vec<MoveRecord>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Color::Light,
            status: GameStatus::Playing,
            last_move: None,
            history: Vec::new(),
        }
    }

    /// Starts a session from a FEN placement, e.g. a saved or composed position.
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        let (board, turn) = Board::from_fen(fen)?;
        let mut state = Self {
            board,
            turn,
            status: GameStatus::Playing,
            last_move: None,
            history: Vec::new(),
        };
        state.update_status();
        Ok(state)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    /// Destinations the side to move may pick for the piece on `from`.
    /// Empty when the square is empty, holds an opponent, or the game is over.
    pub fn legal_targets(&self, from: Square) -> Vec<Square> {
        if self.is_over() || self.board.occupant_at(from).map(|p| p.color) != Some(self.turn) {
            return Vec::new();
        }
        MoveGenerator::new().moves_for_piece(&self.board, from)
    }

    pub fn make_move(&mut self, from: Square, to: Square) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }

        is_valid_move(&self.board, from, to, self.turn)?;

        self.commit(Move::new(from, to))
    }

    /// Asks `searcher` for the side to move and plays its answer.
    pub fn engine_move<S: Searcher>(&mut self, searcher: &mut S) -> Option<(Move, SearchStats)> {
        if self.is_over() {
            return None;
        }

        let (mv, stats) = searcher.search(self)?;
        self.commit(mv).ok()?;
        Some((mv, stats))
    }

    fn commit(&mut self, mv: Move) -> Result<(), MoveError> {
        let piece = self
            .board
            .occupant_at(mv.from)
            .ok_or(MoveError::NoPieceAtSource)?;
        let captured = self.board.occupant_at(mv.to);

        self.board = self.board.apply_move(mv);
        self.history.push(MoveRecord {
            mv,
            piece,
            captured,
            color: self.turn,
        });

        self.turn = self.turn.opposite();
        self.last_move = Some(mv);

        self.update_status();

        Ok(())
    }

    fn update_status(&mut self) {
        let status = if !self.board.king_exists(Color::Dark) {
            GameStatus::LightWins
        } else if !self.board.king_exists(Color::Light) {
            GameStatus::DarkWins
        } else {
            GameStatus::Playing
        };

        if status != self.status {
            log::debug!("Game status {:?} -> {:?}", self.status, status);
            self.status = status;
        }
    }

    /// Takes back the most recent move, including one that ended the game.
    pub fn undo_move(&mut self) -> bool {
        if let Some(record) = self.history.pop() {
            self.board.set_piece(record.mv.from, Some(record.piece));
            self.board.set_piece(record.mv.to, record.captured);
            self.turn = record.color;
            self.last_move = self.history.last().map(|prev| prev.mv);
            self.update_status();
            true
        } else {
            false
        }
    }
}
