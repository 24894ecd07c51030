//! Square-pair geometry: between-squares, evasion masks, shared lines and
//! distance, plus the per-color pawn-structure masks.

use crate::game_state::chess_types::{file_of, rank_of, Color, Square};
use crate::tables::bitboard::{bit, Bitboard, FILE_MASKS, FULL};

const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub type PairTable<T> = Box<[[T; 64]; 64]>;

/// Frozen pairwise and pawn-structure tables.
pub struct Geometry {
    /// Squares strictly between two squares sharing a line, else empty.
    pub block: PairTable<Bitboard>,
    /// King retreat filter against a slider on `[king][checker]`: everything
    /// except the square behind the king on the checking ray.
    pub evade: PairTable<Bitboard>,
    /// Whole rank or file through both squares, else empty.
    pub straight: PairTable<Bitboard>,
    /// Whole diagonal through both squares, else empty.
    pub diagonal: PairTable<Bitboard>,
    /// Chebyshev (king-step) distance.
    pub distance: PairTable<u8>,
    /// Squares ahead of a pawn on its own file, per color.
    pub in_front: [[Bitboard; 64]; 2],
    /// Squares ahead on the own and both neighbouring files, per color.
    pub passed: [[Bitboard; 64]; 2],
}

fn pair_table<T: Copy>(fill: T) -> PairTable<T> {
    Box::new([[fill; 64]; 64])
}

#[inline]
fn on_board(rank: i8, file: i8) -> bool {
    (0..8).contains(&rank) && (0..8).contains(&file)
}

/// Every square along `(dr, df)` from `square`, excluding `square` itself.
fn walk(square: Square, dr: i8, df: i8) -> Vec<Square> {
    let mut squares = Vec::with_capacity(7);
    let (mut r, mut f) = (rank_of(square) as i8 + dr, file_of(square) as i8 + df);
    while on_board(r, f) {
        squares.push((r * 8 + f) as Square);
        r += dr;
        f += df;
    }
    squares
}

impl Geometry {
    pub fn build() -> Self {
        let mut block = pair_table(0);
        let mut evade = pair_table(FULL);
        let mut straight = pair_table(0);
        let mut diagonal = pair_table(0);
        let mut distance = pair_table(0u8);

        for from in 0..64u8 {
            for to in 0..64u8 {
                let dr = (rank_of(from) as i8 - rank_of(to) as i8).unsigned_abs();
                let df = (file_of(from) as i8 - file_of(to) as i8).unsigned_abs();
                distance[from as usize][to as usize] = dr.max(df);
            }

            for (index, &(dr, df)) in ALL_DIRECTIONS.iter().enumerate() {
                let ray = walk(from, dr, df);
                let line = ray
                    .iter()
                    .chain(walk(from, -dr, -df).iter())
                    .fold(bit(from), |acc, &sq| acc | bit(sq));
                let behind = walk(from, -dr, -df).first().copied();

                let mut between = 0;
                for &to in &ray {
                    block[from as usize][to as usize] = between;
                    between |= bit(to);

                    if index < 4 {
                        straight[from as usize][to as usize] = line;
                    } else {
                        diagonal[from as usize][to as usize] = line;
                    }

                    // `from` is the king, `to` the checker: the ray runs from
                    // the checker through the king and on to `behind`.
                    if let Some(behind) = behind {
                        evade[from as usize][to as usize] = !bit(behind);
                    }
                }
            }
        }

        let mut in_front = [[0; 64]; 2];
        let mut passed = [[0; 64]; 2];
        for color in Color::BOTH {
            for square in 0..64u8 {
                let dr = match color {
                    Color::White => 1,
                    Color::Black => -1,
                };
                let ahead = walk(square, dr, 0)
                    .into_iter()
                    .fold(0, |acc, sq| acc | bit(sq));
                let file = file_of(square) as usize;
                let mut files = FILE_MASKS[file];
                if file > 0 {
                    files |= FILE_MASKS[file - 1];
                }
                if file < 7 {
                    files |= FILE_MASKS[file + 1];
                }
                let ranks_ahead = ahead_ranks(color, square);

                in_front[color.index()][square as usize] = ahead;
                passed[color.index()][square as usize] = files & ranks_ahead;
            }
        }

        Geometry {
            block,
            evade,
            straight,
            diagonal,
            distance,
            in_front,
            passed,
        }
    }
}

/// All squares on ranks strictly ahead of `square` from `color`'s side.
fn ahead_ranks(color: Color, square: Square) -> Bitboard {
    let rank = rank_of(square) as u32;
    match color {
        Color::White if rank == 7 => 0,
        Color::White => FULL << ((rank + 1) * 8),
        Color::Black => !(FULL << (rank * 8)),
    }
}
