use crate::engine::Move;
use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;

pub const BOARD_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Row delta of a pawn step. Light advances towards row 0.
    pub const fn forward(self) -> i8 {
        match self {
            Self::Light => -1,
            Self::Dark => 1,
        }
    }

    pub const fn pawn_start_row(self) -> usize {
        match self {
            Self::Light => 6,
            Self::Dark => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    const fn letter(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    const fn from_letter(c: char) -> Option<Self> {
        match c {
            'p' => Some(Self::Pawn),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'r' => Some(Self::Rook),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    #[must_use]
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }

    /// FEN letter: uppercase for light, lowercase for dark.
    #[must_use]
    pub const fn to_char(self) -> char {
        let c = self.piece_type.letter();
        match self.color {
            Color::Light => c.to_ascii_uppercase(),
            Color::Dark => c,
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            Color::Light
        } else {
            Color::Dark
        };
        match PieceType::from_letter(c.to_ascii_lowercase()) {
            Some(piece_type) => Some(Self { piece_type, color }),
            None => None,
        }
    }
}

/// A square on the 8x8 board. Row 0 is dark's back rank, row 7 is light's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Steps by a signed delta, returning `None` once off the board.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub const fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let r = self.row as i8 + dr;
        let c = self.col as i8 + dc;
        if r < 0 || c < 0 {
            return None;
        }
        Self::new(r as usize, c as usize)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    #[must_use]
    pub const fn from_index(sq: usize) -> Option<Self> {
        Self::new(sq / BOARD_SIZE, sq % BOARD_SIZE)
    }

    /// Parses `a8`..`h1`. File `a` is column 0, rank 8 is row 0.
    #[must_use]
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let file = chars.next()?.to_ascii_lowercase();
        let rank = usize::try_from(chars.next()?.to_digit(10)?).ok()?;
        if chars.next().is_some() || !(1..=8).contains(&rank) {
            return None;
        }
        let col = "abcdefgh".find(file)?;
        Self::new(BOARD_SIZE - rank, col)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.col);
        write!(f, "{}{}", file, BOARD_SIZE - usize::from(self.row))
    }
}

/// A complete position. Boards are plain values: every update hands back a
/// new board and leaves the source board untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(with = "BigArray")]
    grid: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard starting arrangement.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_pieces(Color::Dark, 0, 1);
        board.setup_pieces(Color::Light, 7, 6);
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self { grid: [None; 64] }
    }

    fn setup_pieces(&mut self, color: Color, back_row: usize, pawn_row: usize) {
        let pieces = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (col, &pt) in pieces.iter().enumerate() {
            if let Some(sq) = Square::new(back_row, col) {
                self.set_piece(sq, Some(Piece::new(pt, color)));
            }
            if let Some(sq) = Square::new(pawn_row, col) {
                self.set_piece(sq, Some(Piece::new(PieceType::Pawn, color)));
            }
        }
    }

    #[must_use]
    pub const fn occupant_at(&self, sq: Square) -> Option<Piece> {
        self.grid[sq.index()]
    }

    pub fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        self.grid[sq.index()] = piece;
    }

    /// Builder-style variant of [`Board::set_piece`] for assembling positions.
    #[must_use]
    pub fn with_piece(mut self, sq: Square, piece: Piece) -> Self {
        self.grid[sq.index()] = Some(piece);
        self
    }

    /// Relocates the occupant of `mv.from` onto `mv.to`, overwriting any
    /// piece there. No legality check is made.
    #[must_use]
    pub fn apply_move(&self, mv: Move) -> Self {
        let mut next = *self;
        next.grid[mv.to.index()] = self.grid[mv.from.index()];
        next.grid[mv.from.index()] = None;
        next
    }

    #[must_use]
    pub fn king_exists(&self, color: Color) -> bool {
        self.grid
            .iter()
            .flatten()
            .any(|p| p.piece_type == PieceType::King && p.color == color)
    }

    /// Occupied squares in row-major order, low row and column first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.grid
            .iter()
            .enumerate()
            .filter_map(|(i, p)| Some((Square::from_index(i)?, (*p)?)))
    }

    /// Piece placement in FEN style, row 0 first.
    #[must_use]
    pub fn to_fen_string(&self, turn: Color) -> String {
        let mut fen = String::new();
        for (r, row) in self.grid.chunks_exact(BOARD_SIZE).enumerate() {
            let mut empty_count = 0;
            for square in row {
                if let Some(piece) = square {
                    if empty_count > 0 {
                        fen.push_str(&empty_count.to_string());
                        empty_count = 0;
                    }
                    fen.push(piece.to_char());
                } else {
                    empty_count += 1;
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if r + 1 < BOARD_SIZE {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if turn == Color::Light { 'w' } else { 'b' });

        fen
    }

    /// Reads a FEN placement field with an optional side-to-move field.
    /// Trailing FEN fields (castling, clocks) are ignored. Side defaults to light.
    pub fn from_fen(fen: &str) -> Result<(Self, Color), String> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or_else(|| String::from("Expected FEN to contain a piece placement field"))?;

        let rows: Vec<&str> = placement.split('/').collect();
        if rows.len() != BOARD_SIZE {
            return Err(format!(
                "Expected FEN to have 8 rows but it had {}",
                rows.len()
            ));
        }

        let mut board = Self::empty();
        for (r, row) in rows.iter().enumerate() {
            let mut col = 0;
            for c in row.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += usize::try_from(skip).map_err(|e| e.to_string())?;
                    continue;
                }
                let piece = Piece::from_char(c).ok_or_else(|| {
                    format!("Encountered unexpected character {c} while processing piece placement")
                })?;
                let sq = Square::new(r, col)
                    .ok_or_else(|| format!("Row {r} of FEN placement is longer than 8 squares"))?;
                board.set_piece(sq, Some(piece));
                col += 1;
            }
            if col != BOARD_SIZE {
                return Err(format!("Row {r} of FEN placement covers {col} squares, expected 8"));
            }
        }

        let turn = match fields.next() {
            None | Some("w") => Color::Light,
            Some("b") => Color::Dark,
            Some(other) => {
                return Err(format!("Encountered unexpected Side to move value '{other}'"));
            }
        };

        Ok((board, turn))
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.grid.chunks_exact(BOARD_SIZE).enumerate() {
            write!(f, "{} ", BOARD_SIZE - r)?;
            for square in row {
                write!(f, " {}", square.map_or('.', Piece::to_char))?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
