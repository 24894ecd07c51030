//! Pawn capture and advance masks, per color.
//!
//! Advance masks hold the single-step square plus, from the starting rank, the
//! double-step square; blockers are applied by the generator.

use crate::game_state::chess_types::{Color, Square};
use crate::moves::knight_moves::leaper_table;
use crate::tables::bitboard::Bitboard;

pub const PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&[(1, -1), (1, 1)]),
    leaper_table(&[(-1, -1), (-1, 1)]),
];

pub const PAWN_ADVANCES: [[Bitboard; 64]; 2] = [
    generate_advances(Color::White),
    generate_advances(Color::Black),
];

/// Squares a pawn of `color` on `square` captures on.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> Bitboard {
    PAWN_ATTACKS[color.index()][square as usize]
}

/// Empty-board push targets of a pawn of `color` on `square`.
#[inline]
pub const fn pawn_advances(color: Color, square: Square) -> Bitboard {
    PAWN_ADVANCES[color.index()][square as usize]
}

const fn generate_advances(color: Color) -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    // Pawns never stand on the back ranks, so those squares stay empty.
    let mut sq = 8usize;

    while sq < 56 {
        let mut targets = match color {
            Color::White => 1u64 << (sq + 8),
            Color::Black => 1u64 << (sq - 8),
        };
        match color {
            Color::White if sq / 8 == 1 => targets |= 1u64 << (sq + 16),
            Color::Black if sq / 8 == 6 => targets |= 1u64 << (sq - 16),
            _ => {}
        }
        table[sq] = targets;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_pawns_attack_one_square() {
        assert_eq!(pawn_attacks(Color::White, 8), 1 << 17);
        assert_eq!(pawn_attacks(Color::Black, 55), 1 << 46);
        assert_eq!(pawn_attacks(Color::White, 12).count_ones(), 2);
    }

    #[test]
    fn starting_rank_pawns_may_double_step() {
        assert_eq!(pawn_advances(Color::White, 12), (1 << 20) | (1 << 28));
        assert_eq!(pawn_advances(Color::Black, 52), (1 << 44) | (1 << 36));
        assert_eq!(pawn_advances(Color::White, 20), 1 << 28);
        assert_eq!(pawn_advances(Color::White, 60), 0);
    }
}
