//! Polyglot-style hash keys.
//!
//! Keys come from a fixed-seed generator so hashes are identical across runs.
//! Layout follows polyglot: one key per (piece, square), four castling keys
//! combined per rights mask, one key per en-passant file, and a side key
//! mixed in when White is to move.

use std::sync::OnceLock;

use rand::{RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::game_state::chess_types::*;

const SEED: u64 = 0x4B49_4E47_5349_4445;

#[derive(Debug)]
struct ZobristKeys {
    // Indexed by `Piece::code()`; rows 0 and 1 stay zero.
    piece_square: [[u64; 64]; 14],
    castle: [u64; 16],
    en_passant_file: [u64; 8],
    white_to_move: u64,
}

static KEYS: OnceLock<ZobristKeys> = OnceLock::new();

#[inline]
fn keys() -> &'static ZobristKeys {
    KEYS.get_or_init(build_keys)
}

fn build_keys() -> ZobristKeys {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(SEED);

    let mut piece_square = [[0u64; 64]; 14];
    for row in piece_square.iter_mut().skip(2) {
        for key in row.iter_mut() {
            *key = rng.next_u64();
        }
    }

    let rights: [u64; 4] = std::array::from_fn(|_| rng.next_u64());
    let castle = std::array::from_fn(|mask| {
        (0..4)
            .filter(|bit| mask & (1 << bit) != 0)
            .fold(0, |acc, bit| acc ^ rights[bit])
    });

    let en_passant_file = std::array::from_fn(|_| rng.next_u64());
    let white_to_move = rng.next_u64();

    ZobristKeys {
        piece_square,
        castle,
        en_passant_file,
        white_to_move,
    }
}

#[inline]
pub fn piece_square_key(piece: Piece, square: Square) -> u64 {
    keys().piece_square[piece.code() as usize][square as usize]
}

#[inline]
pub fn castle_key(rights: CastlingRights) -> u64 {
    keys().castle[(rights & CASTLE_ALL) as usize]
}

#[inline]
pub fn en_passant_key(square: Square) -> u64 {
    keys().en_passant_file[file_of(square) as usize]
}

#[inline]
pub fn white_to_move_key() -> u64 {
    keys().white_to_move
}
