use crate::game_state::chess_types::Square;
use crate::moves::bishop_moves::{bishop_attacks, BISHOP_RAYS};
use crate::moves::rook_moves::{rook_attacks, ROOK_RAYS};
use crate::tables::bitboard::Bitboard;

#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

#[inline]
pub const fn queen_rays(square: Square) -> Bitboard {
    BISHOP_RAYS[square as usize] | ROOK_RAYS[square as usize]
}
