use crate::engine::config::EngineConfig;
use crate::engine::{Evaluator, SCORE_LIMIT};
use crate::logic::board::{Board, Color, PieceType};
use std::sync::Arc;

/// Material count from dark's point of view, with a large swing for a
/// missing king. Sums run in `i64`; the total is clamped to `SCORE_LIMIT`.
pub struct MaterialEvaluator {
    config: Arc<EngineConfig>,
}

impl MaterialEvaluator {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    fn piece_value(&self, pt: PieceType) -> i32 {
        match pt {
            PieceType::Pawn => self.config.val_pawn,
            PieceType::Knight => self.config.val_knight,
            PieceType::Bishop => self.config.val_bishop,
            PieceType::Rook => self.config.val_rook,
            PieceType::Queen => self.config.val_queen,
            PieceType::King => self.config.val_king,
        }
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let mut score: i64 = 0;
        let mut light_king = false;
        let mut dark_king = false;

        for (_, piece) in board.pieces() {
            let value = i64::from(self.piece_value(piece.piece_type));
            match piece.color {
                Color::Dark => {
                    score += value;
                    dark_king |= piece.piece_type == PieceType::King;
                }
                Color::Light => {
                    score -= value;
                    light_king |= piece.piece_type == PieceType::King;
                }
            }
        }

        // Both adjustments apply independently; with both kings gone they cancel.
        let bonus = i64::from(self.config.king_capture_bonus);
        if !light_king {
            score += bonus;
        }
        if !dark_king {
            score -= bonus;
        }

        let limit = i64::from(SCORE_LIMIT);
        i32::try_from(score.clamp(-limit, limit)).unwrap_or(SCORE_LIMIT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Piece, Square};

    fn evaluator() -> MaterialEvaluator {
        MaterialEvaluator::new(Arc::new(EngineConfig::default()))
    }

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    #[test]
    fn test_starting_position_is_even() {
        assert_eq!(evaluator().evaluate(&Board::new()), 0);
    }

    #[test]
    fn test_material_sign() {
        let board = Board::new();
        let mut up_a_queen = board;
        up_a_queen.set_piece(sq(7, 3), None);
        assert_eq!(evaluator().evaluate(&up_a_queen), 9);

        let mut down_a_knight = board;
        down_a_knight.set_piece(sq(0, 1), None);
        assert_eq!(evaluator().evaluate(&down_a_knight), -3);
    }

    #[test]
    fn test_missing_king_swings_score() {
        let kings = Board::empty()
            .with_piece(sq(7, 4), Piece::new(PieceType::King, Color::Light))
            .with_piece(sq(0, 4), Piece::new(PieceType::King, Color::Dark))
            .with_piece(sq(3, 3), Piece::new(PieceType::Rook, Color::Light));
        let base = evaluator().evaluate(&kings);
        assert_eq!(base, -5);

        let mut no_light_king = kings;
        no_light_king.set_piece(sq(7, 4), None);
        // King material leaves with the king, on top of the bonus.
        assert_eq!(evaluator().evaluate(&no_light_king), base + 100 + 10_000);

        let mut no_dark_king = kings;
        no_dark_king.set_piece(sq(0, 4), None);
        assert_eq!(evaluator().evaluate(&no_dark_king), base - 100 - 10_000);
    }

    #[test]
    fn test_both_kings_missing_cancel() {
        let board = Board::empty().with_piece(sq(4, 4), Piece::new(PieceType::Queen, Color::Dark));
        assert_eq!(evaluator().evaluate(&board), 9);
        assert_eq!(evaluator().evaluate(&Board::empty()), 0);
    }

    #[test]
    fn test_custom_values() {
        let config = EngineConfig {
            val_queen: 20,
            king_capture_bonus: 1_000,
            ..EngineConfig::default()
        };
        let evaluator = MaterialEvaluator::new(Arc::new(config));
        let board = Board::empty()
            .with_piece(sq(0, 4), Piece::new(PieceType::King, Color::Dark))
            .with_piece(sq(4, 4), Piece::new(PieceType::Queen, Color::Dark));
        assert_eq!(evaluator.evaluate(&board), 100 + 20 + 1_000);
    }

    #[test]
    fn test_oversized_values_are_clamped() {
        let config = EngineConfig {
            val_king: 2_000_000_000,
            val_queen: 200_000_000,
            ..EngineConfig::default()
        };
        let evaluator = MaterialEvaluator::new(Arc::new(config));
        let board = Board::empty()
            .with_piece(sq(0, 4), Piece::new(PieceType::King, Color::Dark))
            .with_piece(sq(0, 3), Piece::new(PieceType::Queen, Color::Dark));
        assert_eq!(evaluator.evaluate(&board), SCORE_LIMIT);

        let mirrored = Board::empty()
            .with_piece(sq(7, 4), Piece::new(PieceType::King, Color::Light))
            .with_piece(sq(7, 3), Piece::new(PieceType::Queen, Color::Light));
        assert_eq!(evaluator.evaluate(&mirrored), -SCORE_LIMIT);

        // Full armies still cancel exactly.
        assert_eq!(evaluator.evaluate(&Board::new()), 0);
    }

    #[test]
    fn test_bonus_at_integer_limit_is_clamped() {
        let config = EngineConfig {
            king_capture_bonus: i32::MAX,
            ..EngineConfig::default()
        };
        let evaluator = MaterialEvaluator::new(Arc::new(config));
        let only_dark = Board::empty().with_piece(sq(0, 4), Piece::new(PieceType::King, Color::Dark));
        assert_eq!(evaluator.evaluate(&only_dark), SCORE_LIMIT);

        let only_light = Board::empty().with_piece(sq(7, 4), Piece::new(PieceType::King, Color::Light));
        assert_eq!(evaluator.evaluate(&only_light), -SCORE_LIMIT);
    }
}
