//! Process-wide attack tables, built once and read-only afterwards.
//!
//! Leaper tables (knight, king, pawn) are `const` arrays in `moves::*`; this
//! module owns the tables that need heap storage: the rook and bishop magic
//! tables and the pairwise geometry.

use std::sync::OnceLock;

use log::debug;

use crate::game_state::chess_types::{Color, Square};
use crate::tables::bitboard::Bitboard;
use crate::tables::geometry::Geometry;
use crate::tables::magic::{build_slider_table, MagicEntry, Slider, BISHOP_SHIFT, ROOK_SHIFT};
use crate::tables::magic::{BISHOP_TABLE_SIZE, ROOK_TABLE_SIZE};

pub struct AttackTables {
    rook_entries: [MagicEntry; 64],
    rook_attacks: Box<[Bitboard]>,
    bishop_entries: [MagicEntry; 64],
    bishop_attacks: Box<[Bitboard]>,
    geometry: Geometry,
}

static TABLES: OnceLock<AttackTables> = OnceLock::new();

#[inline]
fn tables() -> &'static AttackTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> AttackTables {
    let started = std::time::Instant::now();
    let (rook_entries, rook_attacks) = build_slider_table(Slider::Rook);
    let (bishop_entries, bishop_attacks) = build_slider_table(Slider::Bishop);
    let geometry = Geometry::build();
    debug!(
        "attack tables built in {} ms",
        started.elapsed().as_millis()
    );
    AttackTables {
        rook_entries,
        rook_attacks,
        bishop_entries,
        bishop_attacks,
        geometry,
    }
}

/// Forces table construction so the first search does not pay for it.
pub fn init_attack_tables() {
    let _ = tables();
}

#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    let tables = tables();
    let entry = &tables.rook_entries[square as usize];
    tables.rook_attacks[square as usize * ROOK_TABLE_SIZE + entry.index(occupancy, ROOK_SHIFT)]
}

#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    let tables = tables();
    let entry = &tables.bishop_entries[square as usize];
    tables.bishop_attacks
        [square as usize * BISHOP_TABLE_SIZE + entry.index(occupancy, BISHOP_SHIFT)]
}

/// Squares strictly between `a` and `b` when they share a line.
#[inline]
pub fn block_mask(a: Square, b: Square) -> Bitboard {
    tables().geometry.block[a as usize][b as usize]
}

/// Squares a king on `king` may still use while checked by a slider on `checker`.
#[inline]
pub fn evade_mask(king: Square, checker: Square) -> Bitboard {
    tables().geometry.evade[king as usize][checker as usize]
}

#[inline]
pub fn straight_mask(a: Square, b: Square) -> Bitboard {
    tables().geometry.straight[a as usize][b as usize]
}

#[inline]
pub fn diagonal_mask(a: Square, b: Square) -> Bitboard {
    tables().geometry.diagonal[a as usize][b as usize]
}

/// Full line (rank, file or diagonal) through both squares, or empty.
#[inline]
pub fn line_mask(a: Square, b: Square) -> Bitboard {
    straight_mask(a, b) | diagonal_mask(a, b)
}

#[inline]
pub fn distance(a: Square, b: Square) -> u8 {
    tables().geometry.distance[a as usize][b as usize]
}

#[inline]
pub fn in_front_mask(color: Color, square: Square) -> Bitboard {
    tables().geometry.in_front[color.index()][square as usize]
}

#[inline]
pub fn passed_mask(color: Color, square: Square) -> Bitboard {
    tables().geometry.passed[color.index()][square as usize]
}
