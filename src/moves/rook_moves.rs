//! Rook attacks, served from the rook magic table.

use crate::game_state::chess_types::Square;
use crate::tables::attack_tables;
use crate::tables::bitboard::{Bitboard, FILE_MASKS, RANK_MASKS};

/// Empty-board rank and file from each square.
pub const ROOK_RAYS: [Bitboard; 64] = generate_rook_rays();

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    attack_tables::rook_attacks(square, occupancy)
}

const fn generate_rook_rays() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = (RANK_MASKS[sq / 8] | FILE_MASKS[sq % 8]) & !(1u64 << sq);
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rook_rays_have_fourteen_squares() {
        assert!(ROOK_RAYS.iter().all(|ray| ray.count_ones() == 14));
        assert_eq!(rook_attacks(0, 0), ROOK_RAYS[0]);
    }

    #[test]
    fn rook_stops_on_blockers() {
        // Rook a1 with blockers on a2 and b1.
        assert_eq!(rook_attacks(0, (1 << 8) | (1 << 1)), (1 << 8) | (1 << 1));
    }
}
