use chess_core::engine::config::EngineConfig;
use chess_core::engine::eval::MaterialEvaluator;
use chess_core::engine::search::AlphaBetaEngine;
use chess_core::engine::{Evaluator, SCORE_INFINITY};
use chess_core::logic::board::{Board, Color, Piece, PieceType, Square};
use chess_core::logic::generator::MoveGenerator;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

const PIECE_TYPES: [PieceType; 5] = [
    PieceType::Pawn,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Rook,
    PieceType::Queen,
];

/// A scattered position with up to `extra` non-king pieces and, usually,
/// both kings. Pawns never land on the far ranks.
fn random_board(rng: &mut StdRng, extra: usize) -> Board {
    let mut board = Board::empty();

    for color in [Color::Light, Color::Dark] {
        if rng.gen_bool(0.9) {
            let sq = Square::from_index(rng.gen_range(0..64)).unwrap();
            board.set_piece(sq, Some(Piece::new(PieceType::King, color)));
        }
    }

    for _ in 0..extra {
        let sq = Square::from_index(rng.gen_range(0..64)).unwrap();
        if board.occupant_at(sq).is_some() {
            continue;
        }
        let piece_type = PIECE_TYPES[rng.gen_range(0..PIECE_TYPES.len())];
        if piece_type == PieceType::Pawn && (sq.row == 0 || sq.row == 7) {
            continue;
        }
        let color = if rng.gen_bool(0.5) { Color::Light } else { Color::Dark };
        board.set_piece(sq, Some(Piece::new(piece_type, color)));
    }

    board
}

fn engine(pruning: bool) -> AlphaBetaEngine {
    AlphaBetaEngine::new(Arc::new(EngineConfig {
        alpha_beta_pruning: pruning,
        ..EngineConfig::default()
    }))
}

#[test]
fn test_pruning_never_changes_the_result() {
    let mut rng = StdRng::seed_from_u64(0x00C0_FFEE);
    let mut pruned = engine(true);
    let mut full = engine(false);

    for case in 0..40 {
        let board = random_board(&mut rng, 10);
        let maximizing = case % 2 == 0;
        for depth in 1..=3 {
            let a = pruned.alpha_beta(&board, depth, maximizing, -SCORE_INFINITY, SCORE_INFINITY);
            let b = full.alpha_beta(&board, depth, maximizing, -SCORE_INFINITY, SCORE_INFINITY);
            assert_eq!(a, b, "case {case} depth {depth}:\n{board}");
        }
    }
}

#[test]
fn test_search_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let board = random_board(&mut rng, 12);
        let first = engine(true).alpha_beta(&board, 3, true, -SCORE_INFINITY, SCORE_INFINITY);
        let second = engine(true).alpha_beta(&board, 3, true, -SCORE_INFINITY, SCORE_INFINITY);
        assert_eq!(first, second);
    }
}

#[test]
fn test_depth_zero_equals_evaluation() {
    let mut rng = StdRng::seed_from_u64(42);
    let evaluator = MaterialEvaluator::new(Arc::new(EngineConfig::default()));
    let mut engine = engine(true);

    for _ in 0..100 {
        let board = random_board(&mut rng, 20);
        for maximizing in [true, false] {
            let result = engine.alpha_beta(&board, 0, maximizing, -SCORE_INFINITY, SCORE_INFINITY);
            assert_eq!(result.score, evaluator.evaluate(&board));
            assert_eq!(result.best_move, None);
        }
    }
}

#[test]
fn test_apply_move_leaves_source_untouched() {
    let mut rng = StdRng::seed_from_u64(99);
    let generator = MoveGenerator::new();

    for _ in 0..50 {
        let board = random_board(&mut rng, 16);
        let snapshot = board;
        for color in [Color::Light, Color::Dark] {
            for mv in generator.moves_for_side(&board, color) {
                let next = board.apply_move(mv);
                assert_eq!(board, snapshot);
                assert_eq!(next.occupant_at(mv.to), board.occupant_at(mv.from));
                assert!(next.occupant_at(mv.from).is_none());
            }
        }
    }
}

#[test]
fn test_generated_targets_respect_occupancy_and_rays() {
    let mut rng = StdRng::seed_from_u64(2024);
    let generator = MoveGenerator::new();

    for _ in 0..50 {
        let board = random_board(&mut rng, 20);
        for (from, piece) in board.pieces() {
            for to in generator.moves_for_piece(&board, from) {
                assert!(board.occupant_at(to).is_none_or(|p| p.color != piece.color));

                let sliding = matches!(
                    piece.piece_type,
                    PieceType::Rook | PieceType::Bishop | PieceType::Queen
                );
                if !sliding {
                    continue;
                }
                let dr = i8::try_from((i16::from(to.row) - i16::from(from.row)).signum()).unwrap();
                let dc = i8::try_from((i16::from(to.col) - i16::from(from.col)).signum()).unwrap();
                let mut step = from;
                loop {
                    step = step.offset(dr, dc).unwrap();
                    if step == to {
                        break;
                    }
                    assert!(board.occupant_at(step).is_none(), "{piece:?} jumped over {step}");
                }
            }
        }
    }
}

#[test]
fn test_missing_king_swing() {
    let mut rng = StdRng::seed_from_u64(5);
    let config = EngineConfig::default();
    let evaluator = MaterialEvaluator::new(Arc::new(config.clone()));
    let swing = config.king_capture_bonus + config.val_king;

    for _ in 0..50 {
        let mut board = random_board(&mut rng, 14);
        let (Some(light_king), Some(dark_king)) = (find_king(&board, Color::Light), find_king(&board, Color::Dark)) else {
            continue;
        };
        let both = evaluator.evaluate(&board);

        let mut without_light = board;
        without_light.set_piece(light_king, None);
        assert_eq!(evaluator.evaluate(&without_light), both + swing);

        board.set_piece(dark_king, None);
        assert_eq!(evaluator.evaluate(&board), both - swing);
    }
}

fn find_king(board: &Board, color: Color) -> Option<Square> {
    board
        .pieces()
        .find(|(_, p)| p.piece_type == PieceType::King && p.color == color)
        .map(|(sq, _)| sq)
}
