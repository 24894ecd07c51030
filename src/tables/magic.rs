//! Perfect-hash ("magic") lookup for rook and bishop attacks.
//!
//! Each square's relevant occupancy (its rays minus the final edge square) is
//! multiplied by a fixed constant and shifted down to index a per-square
//! attack table. Shifts are fixed per family, so every rook square owns 4096
//! slots and every bishop square owns 512.

use crate::game_state::chess_types::Square;
use crate::tables::bitboard::{bit, Bitboard};

pub const ROOK_SHIFT: u32 = 52;
pub const BISHOP_SHIFT: u32 = 55;
pub const ROOK_TABLE_SIZE: usize = 1 << (64 - ROOK_SHIFT);
pub const BISHOP_TABLE_SIZE: usize = 1 << (64 - BISHOP_SHIFT);

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

#[rustfmt::skip]
pub const ROOK_MAGICS: [u64; 64] = [
    0x0080002018804000, 0xA040004010002000, 0x0100200040081100, 0x4100100021000408,
    0x1100100800040300, 0x1100082100440082, 0x6580230000800200, 0x0100010008812052,
    0x0018800428400088, 0x0042004102002088, 0xA208801000200084, 0x0425000A21001000,
    0x0402000408102200, 0x0002000402001008, 0x4E46000102002804, 0x0062000208941049,
    0x2000848008400020, 0x3100404000201000, 0x0440808020001000, 0x0014120008402200,
    0x2002020004100820, 0x0216808002008400, 0x4484040001080290, 0x8400020000804401,
    0x4920208180014002, 0x0A00500040002000, 0xC800110100200840, 0x2000084200120020,
    0x0008000404002040, 0x4914020080040080, 0x0400010400081002, 0x009100010025C982,
    0x5709604005800081, 0x0410002000400048, 0x0000200080801000, 0x2200801000800802,
    0x0001001005000800, 0x0044008004800200, 0x1840512804004210, 0x4C0220449200010C,
    0x1000824015608000, 0x0500804001130020, 0x0020080010004040, 0x0224100009010020,
    0x0082000804220011, 0x0406000804010100, 0x2200018802040030, 0x80C100008861000A,
    0x0001008040220200, 0x0001008040220200, 0x8040200010008080, 0x4000800800100080,
    0xA000080080040080, 0x0080040002008080, 0x00C1080110020400, 0x0200010844028600,
    0x0281002080004019, 0x0100104004248101, 0x0500204200081082, 0x0802080520100101,
    0x104300440A980011, 0x084B000400080201, 0x07000C88102A0904, 0x0800004408802102,
];

#[rustfmt::skip]
pub const BISHOP_MAGICS: [u64; 64] = [
    0x01200440A0890200, 0x02040122021A0407, 0x4008880108210401, 0x0211040080020000,
    0xA8A2121004000005, 0xA8A2121004000005, 0x4008880108210401, 0x8000804822012000,
    0x888008085094004C, 0x888008085094004C, 0x8000080214002010, 0x2204880A02200001,
    0x00C1840420000200, 0x0000408220601223, 0x00004424042C0CA0, 0x00004424042C0CA0,
    0x02408410900200D8, 0x1004001010220048, 0x0088088400240010, 0x2832400401020008,
    0x80A4000494201400, 0x0002400808021080, 0x8000A00202112000, 0x0002044300822100,
    0x002050A405845800, 0x200824C0083000A9, 0x0500440208080014, 0x08144800008200C0,
    0x1421010001104001, 0x0430008403004500, 0x0A84042231010102, 0x0A84042231010102,
    0x0002202000501301, 0x0004144200041000, 0x8002002E03100080, 0x0340600800010810,
    0x6020020020040408, 0x065004A120020205, 0x8081040080043200, 0x8081040080043200,
    0x8001042120200420, 0x8001042120200420, 0x00010C0402002C00, 0x0004202024200801,
    0x4029101200921200, 0x4002224045004600, 0xC0900128010010A8, 0x4002224045004600,
    0x2082280104111100, 0x0028440421080044, 0x0280004404040101, 0x0002100084110008,
    0x0802001222020C80, 0x0000400204010A12, 0x0008204102020000, 0x0020040440404001,
    0x0130A08404202A51, 0x0000428400888400, 0x0004312022111000, 0x810008040A841100,
    0x4410010810020880, 0x0862042002020208, 0x0862042002020208, 0x0082100116240041,
];

/// Occupancy mask and multiplier for one square of one slider family.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagicEntry {
    pub mask: Bitboard,
    pub magic: u64,
}

impl MagicEntry {
    #[inline]
    pub const fn index(&self, occupancy: Bitboard, shift: u32) -> usize {
        ((occupancy & self.mask).wrapping_mul(self.magic) >> shift) as usize
    }
}

/// Slider family served by a magic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slider {
    Rook,
    Bishop,
}

impl Slider {
    pub const fn directions(self) -> &'static [(i8, i8); 4] {
        match self {
            Slider::Rook => &ROOK_DIRECTIONS,
            Slider::Bishop => &BISHOP_DIRECTIONS,
        }
    }

    pub const fn shift(self) -> u32 {
        match self {
            Slider::Rook => ROOK_SHIFT,
            Slider::Bishop => BISHOP_SHIFT,
        }
    }

    pub const fn table_size(self) -> usize {
        match self {
            Slider::Rook => ROOK_TABLE_SIZE,
            Slider::Bishop => BISHOP_TABLE_SIZE,
        }
    }

    pub const fn magic(self, square: Square) -> u64 {
        match self {
            Slider::Rook => ROOK_MAGICS[square as usize],
            Slider::Bishop => BISHOP_MAGICS[square as usize],
        }
    }
}

/// Squares reached from `square` along `directions`, stopping at (and
/// including) the first occupied square on each ray.
pub fn ray_attacks(square: Square, directions: &[(i8, i8)], occupancy: Bitboard) -> Bitboard {
    let mut attacks = 0;
    let rank = (square / 8) as i8;
    let file = (square % 8) as i8;
    for &(dr, df) in directions {
        let (mut r, mut f) = (rank + dr, file + df);
        while (0..8).contains(&r) && (0..8).contains(&f) {
            let target = bit((r * 8 + f) as Square);
            attacks |= target;
            if occupancy & target != 0 {
                break;
            }
            r += dr;
            f += df;
        }
    }
    attacks
}

/// Ray squares whose occupancy can change the attack set: every ray square
/// except the last one before the board edge.
pub fn relevant_mask(square: Square, directions: &[(i8, i8)]) -> Bitboard {
    let mut mask = 0;
    let rank = (square / 8) as i8;
    let file = (square % 8) as i8;
    for &(dr, df) in directions {
        let (mut r, mut f) = (rank + dr, file + df);
        while (0..8).contains(&(r + dr)) && (0..8).contains(&(f + df)) {
            mask |= bit((r * 8 + f) as Square);
            r += dr;
            f += df;
        }
    }
    mask
}

/// Every subset of `mask`, starting with the empty set (carry-rippler walk).
pub fn occupancy_subsets(mask: Bitboard) -> impl Iterator<Item = Bitboard> {
    let mut next = Some(0u64);
    std::iter::from_fn(move || {
        let current = next?;
        let following = current.wrapping_sub(mask) & mask;
        next = (following != 0).then_some(following);
        Some(current)
    })
}

/// Builds the magic entries and the flat attack table (`64 * table_size`
/// slots) for one slider family.
pub fn build_slider_table(slider: Slider) -> ([MagicEntry; 64], Box<[Bitboard]>) {
    let size = slider.table_size();
    let mut entries = [MagicEntry::default(); 64];
    let mut attacks = vec![0u64; 64 * size].into_boxed_slice();

    for square in 0..64u8 {
        let entry = MagicEntry {
            mask: relevant_mask(square, slider.directions()),
            magic: slider.magic(square),
        };
        let base = square as usize * size;
        for subset in occupancy_subsets(entry.mask) {
            let index = entry.index(subset, slider.shift());
            attacks[base + index] = ray_attacks(square, slider.directions(), subset);
        }
        entries[square as usize] = entry;
    }

    (entries, attacks)
}
