use crate::game_state::chess_rules::CASTLE_SQUARES;
use crate::game_state::position::Position;
use crate::move_generation::legal_move_checks::{can_castle, targets};
use crate::move_generation::move_list::MoveList;
use crate::moves::move_descriptions::{Move, FLAG_CASTLING};
use crate::tables::bitboard::{Bitboard, Squares};

/// King steps into `mask` plus any castling the position allows.
pub fn generate_king_moves(position: &Position, list: &mut MoveList, mask: Bitboard) {
    let color = position.side_to_move;
    let from = position.king(color);
    for to in Squares(targets(position, from) & mask) {
        list.push(Move::new(from, to));
    }

    let rights = [color.kingside_right(), color.queenside_right()];
    for (index, &(king_home, _, king_to, _)) in CASTLE_SQUARES.iter().enumerate() {
        if rights.contains(&(1 << index)) && can_castle(position, index) {
            list.push(Move::with_flag(king_home, king_to, FLAG_CASTLING));
        }
    }
}
