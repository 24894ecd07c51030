//! Primitive chess value types shared by every layer of the engine.
//!
//! Squares are plain `u8` indices (`a1 = 0`, `h1 = 7`, `a8 = 56`, `h8 = 63`),
//! bitboards are plain `u64` sets over the same indices, and pieces pack their
//! kind and color into a single byte so a 64-entry board array stays compact.

use std::fmt;

/// Board square index (`0..=63`).
pub type Square = u8;

/// Castling rights bitmask; see the `CASTLE_*` constants.
pub type CastlingRights = u8;

pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0x0F;

pub const A1: Square = 0;
pub const B1: Square = 1;
pub const C1: Square = 2;
pub const D1: Square = 3;
pub const E1: Square = 4;
pub const F1: Square = 5;
pub const G1: Square = 6;
pub const H1: Square = 7;
pub const A8: Square = 56;
pub const B8: Square = 57;
pub const C8: Square = 58;
pub const D8: Square = 59;
pub const E8: Square = 60;
pub const F8: Square = 61;
pub const G8: Square = 62;
pub const H8: Square = 63;

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square >> 3
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square & 7
}

#[inline]
pub const fn make_square(rank: u8, file: u8) -> Square {
    (rank << 3) + file
}

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::White, Color::Black];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank index as seen from this side (`e2` is rank 1 for White, rank 6 for Black).
    #[inline]
    pub const fn relative_rank(self, square: Square) -> u8 {
        match self {
            Color::White => rank_of(square),
            Color::Black => 7 - rank_of(square),
        }
    }

    /// Offset of a single pawn push for this side.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => 8,
            Color::Black => -8,
        }
    }

    #[inline]
    pub const fn kingside_right(self) -> CastlingRights {
        match self {
            Color::White => CASTLE_WHITE_KINGSIDE,
            Color::Black => CASTLE_BLACK_KINGSIDE,
        }
    }

    #[inline]
    pub const fn queenside_right(self) -> CastlingRights {
        match self {
            Color::White => CASTLE_WHITE_QUEENSIDE,
            Color::Black => CASTLE_BLACK_QUEENSIDE,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => f.write_str("white"),
            Color::Black => f.write_str("black"),
        }
    }
}

/// Piece kind (color is carried separately by [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices in the order the generator emits them.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<PieceKind> {
        match index {
            0 => Some(PieceKind::Pawn),
            1 => Some(PieceKind::Knight),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Queen),
            5 => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Upper-case letter used by placement strings and piece-prefixed moves.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<PieceKind> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A colored piece packed into one byte; `Piece::NONE` (zero) is an empty square.
///
/// Layout: `(kind index + 1) << 1 | color index`, so white pieces are even and
/// every occupied value lies in `2..=13`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Piece(u8);

impl Piece {
    pub const NONE: Piece = Piece(0);

    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece((((kind.index() as u8) + 1) << 1) | color.index() as u8)
    }

    #[inline]
    pub const fn from_code(code: u8) -> Self {
        if code < 2 || code > 13 {
            Piece::NONE
        } else {
            Piece(code)
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_some(self) -> bool {
        self.0 != 0
    }

    #[inline]
    pub const fn color(self) -> Color {
        if self.0 & 1 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }

    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        if self.0 < 2 {
            None
        } else {
            PieceKind::from_index((self.0 >> 1) as usize - 1)
        }
    }

    #[inline]
    pub const fn is_kind(self, kind: PieceKind) -> bool {
        self.0 >> 1 == kind.index() as u8 + 1
    }

    #[inline]
    pub const fn is_pawn(self) -> bool {
        self.is_kind(PieceKind::Pawn)
    }

    #[inline]
    pub const fn is_king(self) -> bool {
        self.is_kind(PieceKind::King)
    }

    /// Placement-string character (`P`/`p`, `N`/`n`, ...), or `None` for an empty square.
    pub fn fen_char(self) -> Option<char> {
        let kind = self.kind()?;
        let letter = kind.letter();
        Some(match self.color() {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        })
    }

    pub fn from_fen_char(ch: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(ch)?;
        let color = if ch.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(color, kind))
    }

    /// Unicode chess glyph used by the "fancy" board renderer.
    pub fn glyph(self) -> Option<char> {
        let kind = self.kind()?;
        let glyphs = match self.color() {
            Color::White => ['♙', '♘', '♗', '♖', '♕', '♔'],
            Color::Black => ['♟', '♞', '♝', '♜', '♛', '♚'],
        };
        Some(glyphs[kind.index()])
    }
}
