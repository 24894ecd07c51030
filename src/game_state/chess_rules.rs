//! Canonical chess-rule constants.
//!
//! Start position, search-wide score sentinels, and the per-square castling
//! masks used to strip rights when a king or rook leaves (or is captured on)
//! its home square.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Score of being checkmated at the root; mates further away score closer to zero.
pub const CHECKMATE: i32 = 32_000;

/// Deepest ply the search tree may reach (also sizes the move-list arena).
pub const MAX_PLY: usize = 64;

/// Deepest nominal iteration the iterative-deepening driver will start.
pub const MAX_DEPTH: u8 = 32;

/// Halfmove clock value at which the fifty-move rule ends the game.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Castling rights that survive a move touching `square` (as origin or destination).
pub const CASTLE_RIGHTS_KEPT: [CastlingRights; 64] = build_castle_rights_kept();

const fn build_castle_rights_kept() -> [CastlingRights; 64] {
    let mut table = [CASTLE_ALL; 64];
    table[A1 as usize] = CASTLE_ALL & !CASTLE_WHITE_QUEENSIDE;
    table[E1 as usize] = CASTLE_ALL & !(CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE);
    table[H1 as usize] = CASTLE_ALL & !CASTLE_WHITE_KINGSIDE;
    table[A8 as usize] = CASTLE_ALL & !CASTLE_BLACK_QUEENSIDE;
    table[E8 as usize] = CASTLE_ALL & !(CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
    table[H8 as usize] = CASTLE_ALL & !CASTLE_BLACK_KINGSIDE;
    table
}

/// Home squares of the king and the rook for each castling right, in
/// `CASTLE_*` bit order: (king home, rook home, king destination, rook destination).
pub const CASTLE_SQUARES: [(Square, Square, Square, Square); 4] = [
    (E1, H1, G1, F1),
    (E1, A1, C1, D1),
    (E8, H8, G8, F8),
    (E8, A8, C8, D8),
];

/// Returns true when `score` encodes a forced mate for either side.
#[inline]
pub const fn is_mate_score(score: i32) -> bool {
    score.abs() > CHECKMATE - MAX_PLY as i32
}
