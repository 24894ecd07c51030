//! Pawn move expansion.

use crate::game_state::{chess_types::*, position::Position};
use crate::move_generation::legal_move_checks::{promotion_rank, targets};
use crate::move_generation::move_list::MoveList;
use crate::moves::move_descriptions::{Move, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};
use crate::moves::pawn_moves::pawn_attacks;
use crate::tables::bitboard::{bit, Bitboard, Squares};

/// Adds the pawn move `from -> to`, tagging double pushes and en-passant
/// captures and expanding promotions into queen, rook, bishop and knight.
pub fn push_pawn_move(position: &Position, list: &mut MoveList, from: Square, to: Square) {
    let color = position.side_to_move;
    if bit(to) & promotion_rank(color) != 0 {
        for kind in PieceKind::PROMOTIONS {
            list.push(Move::promotion(from, to, kind));
        }
    } else if from.abs_diff(to) == 16 {
        list.push(Move::with_flag(from, to, FLAG_DOUBLE_PAWN_PUSH));
    } else if Some(to) == position.en_passant_square && file_of(from) != file_of(to) {
        list.push(Move::with_flag(from, to, FLAG_EN_PASSANT));
    } else {
        list.push(Move::new(from, to));
    }
}

/// Every pseudo-legal pawn move whose destination lies in `mask`.
pub fn generate_pawn_moves(position: &Position, list: &mut MoveList, mask: Bitboard) {
    let pawns = position.bitboard(position.side_to_move, PieceKind::Pawn);
    for from in Squares(pawns) {
        for to in Squares(targets(position, from) & mask) {
            push_pawn_move(position, list, from, to);
        }
    }
}

/// Pawn captures (en passant included) and pushes onto the last rank.
pub fn generate_pawn_captures(position: &Position, list: &mut MoveList) {
    let color = position.side_to_move;
    let mut enemy = position.occupancy_by_color[color.opposite().index()];
    if let Some(ep) = position.en_passant_square {
        enemy |= bit(ep);
    }
    let pawns = position.bitboard(color, PieceKind::Pawn);
    for from in Squares(pawns) {
        let wanted = (pawn_attacks(color, from) & enemy) | promotion_rank(color);
        for to in Squares(targets(position, from) & wanted) {
            push_pawn_move(position, list, from, to);
        }
    }
}
