//! Bishop attacks, served from the bishop magic table.

use crate::game_state::chess_types::Square;
use crate::tables::attack_tables;
use crate::tables::bitboard::Bitboard;

/// Empty-board diagonals from each square.
pub const BISHOP_RAYS: [Bitboard; 64] = generate_bishop_rays();

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    attack_tables::bishop_attacks(square, occupancy)
}

const fn generate_bishop_rays() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let rank = (sq / 8) as i32;
        let file = (sq % 8) as i32;
        let mut other = 0usize;
        while other < 64 {
            let dr = (other / 8) as i32 - rank;
            let df = (other % 8) as i32 - file;
            if dr != 0 && (dr == df || dr == -df) {
                table[sq] |= 1u64 << other;
            }
            other += 1;
        }
        sq += 1;
    }

    table
}
