use crate::logic::board::Square;
use std::sync::OnceLock;

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const QUEEN_DIRECTIONS: [(i8, i8); 8] = KING_OFFSETS;

/// On-board targets of the fixed-offset pieces, per source square. Each list
/// keeps the offset order of its table.
pub struct LeaperTables {
    pub knight_moves: Vec<Vec<Square>>,
    pub king_moves: Vec<Vec<Square>>,
}

impl LeaperTables {
    fn new() -> Self {
        Self {
            knight_moves: compute_targets(&KNIGHT_OFFSETS),
            king_moves: compute_targets(&KING_OFFSETS),
        }
    }

    pub fn get() -> &'static Self {
        static INSTANCE: OnceLock<LeaperTables> = OnceLock::new();
        INSTANCE.get_or_init(LeaperTables::new)
    }

    pub fn knight_targets(&self, from: Square) -> &[Square] {
        self.knight_moves
            .get(from.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn king_targets(&self, from: Square) -> &[Square] {
        self.king_moves
            .get(from.index())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

fn compute_targets(offsets: &[(i8, i8)]) -> Vec<Vec<Square>> {
    (0..64)
        .map(|sq| {
            Square::from_index(sq).map_or_else(Vec::new, |from| {
                offsets
                    .iter()
                    .filter_map(|&(dr, dc)| from.offset(dr, dc))
                    .collect()
            })
        })
        .collect()
}
