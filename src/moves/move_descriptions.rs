//! Compact move encoding.
//!
//! A move packs origin, destination and a 4-bit kind into a `u16`. Moves carry
//! no piece information; they are only meaningful against the position that
//! generated them.

use std::fmt;

use crate::game_state::chess_types::{PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

const FROM_SHIFT: u16 = 0;
const TO_SHIFT: u16 = 6;
const KIND_SHIFT: u16 = 12;
const SQUARE_MASK: u16 = 0x3F;

pub const FLAG_QUIET: u16 = 0;
pub const FLAG_DOUBLE_PAWN_PUSH: u16 = 1;
pub const FLAG_CASTLING: u16 = 2;
pub const FLAG_EN_PASSANT: u16 = 3;
pub const FLAG_PROMOTE_KNIGHT: u16 = 4;
pub const FLAG_PROMOTE_BISHOP: u16 = 5;
pub const FLAG_PROMOTE_ROOK: u16 = 6;
pub const FLAG_PROMOTE_QUEEN: u16 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u16);

impl Move {
    /// Placeholder for "no move"; a1a1 is never generated.
    pub const NULL: Move = Move(0);

    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self::with_flag(from, to, FLAG_QUIET)
    }

    #[inline]
    pub const fn with_flag(from: Square, to: Square, flag: u16) -> Self {
        Move(
            ((from as u16) << FROM_SHIFT) | ((to as u16) << TO_SHIFT) | (flag << KIND_SHIFT),
        )
    }

    #[inline]
    pub const fn promotion(from: Square, to: Square, kind: PieceKind) -> Self {
        let flag = match kind {
            PieceKind::Knight => FLAG_PROMOTE_KNIGHT,
            PieceKind::Bishop => FLAG_PROMOTE_BISHOP,
            PieceKind::Rook => FLAG_PROMOTE_ROOK,
            _ => FLAG_PROMOTE_QUEEN,
        };
        Self::with_flag(from, to, flag)
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn flag(self) -> u16 {
        self.0 >> KIND_SHIFT
    }

    #[inline]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        self.flag() == FLAG_CASTLING
    }

    #[inline]
    pub const fn is_en_passant(self) -> bool {
        self.flag() == FLAG_EN_PASSANT
    }

    #[inline]
    pub const fn is_double_push(self) -> bool {
        self.flag() == FLAG_DOUBLE_PAWN_PUSH
    }

    #[inline]
    pub const fn promotion_piece(self) -> Option<PieceKind> {
        match self.flag() {
            FLAG_PROMOTE_KNIGHT => Some(PieceKind::Knight),
            FLAG_PROMOTE_BISHOP => Some(PieceKind::Bishop),
            FLAG_PROMOTE_ROOK => Some(PieceKind::Rook),
            FLAG_PROMOTE_QUEEN => Some(PieceKind::Queen),
            _ => None,
        }
    }
}

/// Coordinate form (`e2e4`, `e7e8q`), as spoken by UCI.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            return f.write_str("0000");
        }
        f.write_str(&square_to_algebraic(self.from()))?;
        f.write_str(&square_to_algebraic(self.to()))?;
        if let Some(kind) = self.promotion_piece() {
            write!(f, "{}", kind.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
