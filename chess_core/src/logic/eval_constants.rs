// Piece Values
pub const VAL_PAWN: i32 = 1;
pub const VAL_KNIGHT: i32 = 3;
pub const VAL_BISHOP: i32 = 3;
pub const VAL_ROOK: i32 = 5;
pub const VAL_QUEEN: i32 = 9;
pub const VAL_KING: i32 = 100;

/// Swing applied when a king is missing from the board.
pub const KING_CAPTURE_BONUS: i32 = 10_000;
