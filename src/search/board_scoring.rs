//! Pluggable board evaluation.
//!
//! Search delegates static scoring to `BoardScorer`, so a different heuristic
//! can be dropped in without touching the search code. Every scorer is a pure
//! read of the position and reports from the side to move's point of view.

use crate::game_state::{chess_types::*, position::Position};
use crate::tables::attack_tables::{in_front_mask, passed_mask};
use crate::tables::bitboard::{count, Squares};

pub trait BoardScorer: Send + Sync {
    /// Score from the perspective of the side to move.
    fn score(&self, position: &Position) -> i32;
}

/// Bonus for a passed pawn, indexed by its rank counted from its own side.
const PASSED_PAWN_BONUS: [i32; 8] = [0, 5, 10, 20, 35, 60, 100, 0];

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 400,
            PieceKind::Bishop => 400,
            PieceKind::Rook => 600,
            PieceKind::Queen => 1200,
            PieceKind::King => 0,
        }
    }

    fn material(position: &Position, color: Color) -> i32 {
        PieceKind::ALL
            .iter()
            .map(|&kind| count(position.bitboard(color, kind)) as i32 * Self::piece_value(kind))
            .sum()
    }

    /// Passed pawns of `color`: no enemy pawn ahead on its own or an adjacent
    /// file. Of doubled passers only the front one scores.
    fn passed_pawns(position: &Position, color: Color) -> i32 {
        let own_pawns = position.bitboard(color, PieceKind::Pawn);
        let enemy_pawns = position.bitboard(color.opposite(), PieceKind::Pawn);
        Squares(own_pawns)
            .filter(|&square| passed_mask(color, square) & enemy_pawns == 0)
            .filter(|&square| in_front_mask(color, square) & own_pawns == 0)
            .map(|square| PASSED_PAWN_BONUS[color.relative_rank(square) as usize])
            .sum()
    }

    fn side_total(position: &Position, color: Color) -> i32 {
        Self::material(position, color) + Self::passed_pawns(position, color)
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, position: &Position) -> i32 {
        let mover = position.side_to_move;
        Self::side_total(position, mover) - Self::side_total(position, mover.opposite())
    }
}
