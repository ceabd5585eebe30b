use crate::logic::board::{Board, Color, Square};
use crate::logic::generator::MoveGenerator;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("there is no piece on the source square")]
    NoPieceAtSource,
    #[error("that piece belongs to the other side")]
    NotYourTurn,
    #[error("the target square holds one of your own pieces")]
    TargetOccupiedByFriendly,
    #[error("that piece cannot move there")]
    InvalidMovePattern,
}

/// Checks a requested move for `turn` against the pseudo-legal move set.
/// There is no check detection: leaving a king capturable is allowed.
pub fn is_valid_move(board: &Board, from: Square, to: Square, turn: Color) -> Result<(), MoveError> {
    let piece = board.occupant_at(from).ok_or(MoveError::NoPieceAtSource)?;
    if piece.color != turn {
        return Err(MoveError::NotYourTurn);
    }

    if board.occupant_at(to).is_some_and(|p| p.color == turn) {
        return Err(MoveError::TargetOccupiedByFriendly);
    }

    if !MoveGenerator::new().moves_for_piece(board, from).contains(&to) {
        return Err(MoveError::InvalidMovePattern);
    }

    Ok(())
}
