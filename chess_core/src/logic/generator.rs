use crate::engine::Move;
use crate::logic::board::{Board, Color, PieceType, Square};
use crate::logic::lookup::{LeaperTables, BISHOP_DIRECTIONS, QUEEN_DIRECTIONS, ROOK_DIRECTIONS};

/// Pseudo-legal move generation. A destination is offered when it is on the
/// board and does not hold a piece of the mover's own color; kings may be
/// left en prise.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub const fn new() -> Self {
        Self
    }

    /// Destinations for the piece on `from`. An empty square yields no moves.
    pub fn moves_for_piece(&self, board: &Board, from: Square) -> Vec<Square> {
        let mut targets = Vec::with_capacity(28);
        if let Some(piece) = board.occupant_at(from) {
            let turn = piece.color;
            match piece.piece_type {
                PieceType::Pawn => self.generate_pawn_moves(board, from, turn, &mut targets),
                PieceType::Knight => {
                    let tables = LeaperTables::get();
                    self.generate_leaper_moves(board, tables.knight_targets(from), turn, &mut targets);
                }
                PieceType::King => {
                    let tables = LeaperTables::get();
                    self.generate_leaper_moves(board, tables.king_targets(from), turn, &mut targets);
                }
                PieceType::Rook => {
                    self.generate_slider_moves(board, from, turn, &ROOK_DIRECTIONS, &mut targets);
                }
                PieceType::Bishop => {
                    self.generate_slider_moves(board, from, turn, &BISHOP_DIRECTIONS, &mut targets);
                }
                PieceType::Queen => {
                    self.generate_slider_moves(board, from, turn, &QUEEN_DIRECTIONS, &mut targets);
                }
            }
        }
        targets
    }

    /// All moves for `turn`, scanning squares row-major. Search relies on this
    /// order to break ties between equally scored moves.
    pub fn moves_for_side(&self, board: &Board, turn: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);

        for (from, piece) in board.pieces() {
            if piece.color != turn {
                continue;
            }
            moves.extend(
                self.moves_for_piece(board, from)
                    .into_iter()
                    .map(|to| Move::new(from, to)),
            );
        }

        moves
    }

    fn generate_pawn_moves(&self, board: &Board, from: Square, turn: Color, targets: &mut Vec<Square>) {
        let forward = turn.forward();

        if let Some(one) = from.offset(forward, 0) {
            if board.occupant_at(one).is_none() {
                targets.push(one);

                // The double step needs both squares clear; `one` was just checked.
                if usize::from(from.row) == turn.pawn_start_row() {
                    if let Some(two) = from.offset(2 * forward, 0) {
                        if board.occupant_at(two).is_none() {
                            targets.push(two);
                        }
                    }
                }
            }
        }

        for dc in [-1, 1] {
            if let Some(to) = from.offset(forward, dc) {
                if board.occupant_at(to).is_some_and(|p| p.color != turn) {
                    targets.push(to);
                }
            }
        }
    }

    fn generate_leaper_moves(
        &self,
        board: &Board,
        candidates: &[Square],
        turn: Color,
        targets: &mut Vec<Square>,
    ) {
        targets.extend(
            candidates
                .iter()
                .copied()
                .filter(|&to| board.occupant_at(to).is_none_or(|p| p.color != turn)),
        );
    }

    fn generate_slider_moves(
        &self,
        board: &Board,
        from: Square,
        turn: Color,
        directions: &[(i8, i8)],
        targets: &mut Vec<Square>,
    ) {
        for &(dr, dc) in directions {
            let mut current = from;
            while let Some(to) = current.offset(dr, dc) {
                match board.occupant_at(to) {
                    None => targets.push(to),
                    Some(p) => {
                        if p.color != turn {
                            targets.push(to);
                        }
                        break;
                    }
                }
                current = to;
            }
        }
    }
}
