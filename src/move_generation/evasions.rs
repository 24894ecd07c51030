//! Move generation for a side in check.
//!
//! King retreats come first. Under double check nothing else can help, so
//! generation stops there; otherwise the checker may be captured (by pawns,
//! en passant included) or the line between checker and king blocked.

use crate::game_state::{chess_types::*, position::Position};
use crate::move_generation::legal_move_checks::{all_attacks_with_occupancy, checkers, targets};
use crate::move_generation::legal_moves_pawn::push_pawn_move;
use crate::move_generation::move_list::MoveList;
use crate::moves::move_descriptions::{Move, FLAG_EN_PASSANT};
use crate::moves::pawn_moves::pawn_attacks;
use crate::tables::attack_tables::{block_mask, evade_mask};
use crate::tables::bitboard::{bit, count, lsb, pushed, Squares, RANK_MASKS};

pub fn generate_evasions(position: &Position, list: &mut MoveList) {
    let color = position.side_to_move;
    let enemy = color.opposite();
    let king = position.king(color);
    let checkers = checkers(position);

    // Retreats: own-free squares the opponent does not reach once the king
    // has left its square, and never the square behind the king on a slider ray.
    let lifted = position.occupancy_all ^ bit(king);
    let mut retreats = targets(position, king) & !all_attacks_with_occupancy(position, enemy, lifted);
    for checker in Squares(checkers) {
        if !position.piece_at(checker).is_pawn() {
            retreats &= evade_mask(king, checker);
        }
    }
    for to in Squares(retreats) {
        list.push(Move::new(king, to));
    }

    if checkers == 0 || count(checkers) > 1 {
        return;
    }

    let checker = lsb(checkers);
    let block = block_mask(king, checker) | bit(checker);
    let own_pawns = position.bitboard(color, PieceKind::Pawn);

    // Pawn captures of the checking piece.
    for from in Squares(pawn_attacks(enemy, checker) & own_pawns) {
        push_pawn_move(position, list, from, checker);
    }

    // En passant either removes the pawn that just gave check or lands on
    // the blocking square.
    if let Some(ep) = position.en_passant_square {
        let removes_checker = position.piece_at(checker).is_pawn()
            && checker as i8 + color.forward() == ep as i8;
        if removes_checker || block & bit(ep) != 0 {
            for from in Squares(pawn_attacks(enemy, ep) & own_pawns) {
                list.push(Move::with_flag(from, ep, FLAG_EN_PASSANT));
            }
        }
    }

    // Pawn pushes onto the blocking squares.
    let empty = !position.occupancy_all;
    let single = pushed(own_pawns, color) & empty;
    let third_rank = match color {
        Color::White => RANK_MASKS[2],
        Color::Black => RANK_MASKS[5],
    };
    let double = pushed(single & third_rank, color) & empty;
    let step = color.forward();
    for to in Squares(single & block) {
        push_pawn_move(position, list, (to as i8 - step) as Square, to);
    }
    for to in Squares(double & block) {
        push_pawn_move(position, list, (to as i8 - 2 * step) as Square, to);
    }

    // Knights and sliders capture or interpose.
    let pieces = position.occupancy_by_color[color.index()] & !own_pawns & !bit(king);
    for from in Squares(pieces) {
        for to in Squares(targets(position, from) & block) {
            list.push(Move::new(from, to));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::legal_moves;

    fn evasions(fen: &str) -> Vec<Move> {
        let position = Position::from_fen(fen).expect("valid fen");
        legal_moves(&position)
    }

    #[test]
    fn slider_check_never_retreats_behind_king() {
        // Rook e8 checks the king on e4: e3 lies on the ray behind it.
        let moves = evasions("4r1k1/8/8/8/4K3/8/8/8 w - - 0 1");
        assert!(moves.iter().all(|m| m.to() != 20));
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.from() == 28));
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        // Knight f3 and bishop b4 both check the king on e1; the rook on a3
        // could capture either checker but may not.
        let position =
            Position::from_fen("4k3/8/8/8/1b6/R4n2/8/4K3 w - - 0 1").expect("valid fen");
        assert_eq!(count(checkers(&position)), 2);
        let moves = legal_moves(&position);
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|m| m.from() == position.king(Color::White)));
    }

    #[test]
    fn block_and_capture_the_checker() {
        // Bishop b4 checks e1 through d2; the rook on a4 can take it.
        let moves = evasions("4k3/8/8/8/Rb6/8/8/4K2N w - - 0 1");
        let strings: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        assert!(strings.contains(&"a4b4".to_owned()));
        assert!(strings.contains(&"e1e2".to_owned()));
        assert!(!strings.contains(&"e1d2".to_owned()));
    }

    #[test]
    fn pawn_capture_of_checker_on_last_rank_promotes() {
        // Rook b8 checks the king on h8 along the rank; the a7 pawn takes with promotion.
        let moves = evasions("1r5K/P7/8/8/8/8/8/k7 w - - 0 1");
        let promotions = moves
            .iter()
            .filter(|m| m.from() == 48 && m.to() == 57)
            .count();
        assert_eq!(promotions, 4);
    }

    #[test]
    fn en_passant_removes_checking_pawn() {
        // ...d7-d5 gives check to the king on e4; c5xd6 and e5xd6 both answer it.
        let position =
            Position::from_fen("4k3/8/8/2PpP3/4K3/8/8/8 w - d6 0 2").expect("valid fen");
        let moves = legal_moves(&position);
        let ep: Vec<&Move> = moves.iter().filter(|m| m.is_en_passant()).collect();
        assert_eq!(ep.len(), 2);
    }
}
