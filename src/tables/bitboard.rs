//! Bitboard primitives.
//!
//! Bitboards stay plain `u64` values; these helpers name the handful of bit
//! tricks the generator leans on (pop-lsb iteration, msb lookup, and the
//! rank/file masks) so call sites read as board operations.

use crate::game_state::chess_types::Square;

pub type Bitboard = u64;

pub const EMPTY: Bitboard = 0;
pub const FULL: Bitboard = !0;

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_H: Bitboard = FILE_A << 7;
pub const RANK_1: Bitboard = 0xFF;
pub const RANK_8: Bitboard = RANK_1 << 56;

/// Dark squares (`a1`, `c1`, ...).
pub const DARK_SQUARES: Bitboard = 0xAA55_AA55_AA55_AA55;

pub const RANK_MASKS: [Bitboard; 8] = [
    RANK_1,
    RANK_1 << 8,
    RANK_1 << 16,
    RANK_1 << 24,
    RANK_1 << 32,
    RANK_1 << 40,
    RANK_1 << 48,
    RANK_1 << 56,
];

pub const FILE_MASKS: [Bitboard; 8] = [
    FILE_A,
    FILE_A << 1,
    FILE_A << 2,
    FILE_A << 3,
    FILE_A << 4,
    FILE_A << 5,
    FILE_A << 6,
    FILE_A << 7,
];

#[inline]
pub const fn bit(square: Square) -> Bitboard {
    1u64 << square
}

#[inline]
pub const fn is_set(bitboard: Bitboard, square: Square) -> bool {
    bitboard & bit(square) != 0
}

#[inline]
pub const fn count(bitboard: Bitboard) -> u32 {
    bitboard.count_ones()
}

/// Least significant set square. The bitboard must be non-empty.
#[inline]
pub const fn lsb(bitboard: Bitboard) -> Square {
    debug_assert!(bitboard != 0);
    bitboard.trailing_zeros() as Square
}

/// Most significant set square. The bitboard must be non-empty.
#[inline]
pub const fn msb(bitboard: Bitboard) -> Square {
    debug_assert!(bitboard != 0);
    (63 - bitboard.leading_zeros()) as Square
}

/// Returns the least significant set square and clears it.
#[inline]
pub fn pop_lsb(bitboard: &mut Bitboard) -> Square {
    let square = lsb(*bitboard);
    *bitboard &= *bitboard - 1;
    square
}

/// Shifts every square one rank toward the opponent of `color`'s pawns.
#[inline]
pub const fn pushed(bitboard: Bitboard, color: crate::game_state::chess_types::Color) -> Bitboard {
    match color {
        crate::game_state::chess_types::Color::White => bitboard << 8,
        crate::game_state::chess_types::Color::Black => bitboard >> 8,
    }
}

/// Iterator over the set squares of a bitboard, lowest first.
#[derive(Debug, Clone, Copy)]
pub struct Squares(pub Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(pop_lsb(&mut self.0))
        }
    }
}

/// Renders a bitboard as an 8x8 grid, rank 8 on top.
pub fn render_bitboard(bitboard: Bitboard) -> String {
    let mut out = format!("  a b c d e f g h  0x{bitboard:016X}\n");
    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        for file in 0..8u8 {
            out.push(' ');
            out.push(if is_set(bitboard, rank * 8 + file) {
                '•'
            } else {
                '⋅'
            });
        }
        out.push('\n');
    }
    out
}
