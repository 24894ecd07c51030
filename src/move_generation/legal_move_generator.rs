//! Full legal move generation pipeline.
//!
//! Pseudo-legal moves come from the normal generator or, when the side to
//! move is in check, from the evasion generator. A single filtering pass over
//! the list then removes moves that would leave the king attacked.

use crate::game_state::{chess_types::*, position::Position};
use crate::move_generation::evasions::generate_evasions;
use crate::move_generation::legal_move_checks::{checkers, is_legal, pinned_mask, targets};
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pawn::{generate_pawn_captures, generate_pawn_moves};
use crate::move_generation::move_list::MoveList;
use crate::moves::move_descriptions::Move;
use crate::tables::bitboard::{Bitboard, Squares, FULL};

/// Source of legal moves for perft and search.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, position: &Position, list: &mut MoveList);
}

/// The bitboard generator used throughout the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, position: &Position, list: &mut MoveList) {
        generate_legal_moves(position, list);
    }
}

/// Knight, bishop, rook and queen moves landing in `mask`.
pub fn generate_piece_moves(position: &Position, list: &mut MoveList, mask: Bitboard) {
    let color = position.side_to_move;
    for kind in [PieceKind::Knight, PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
        for from in Squares(position.bitboard(color, kind)) {
            for to in Squares(targets(position, from) & mask) {
                list.push(Move::new(from, to));
            }
        }
    }
}

/// Pseudo-legal moves for a side that is not in check.
pub fn generate_moves(position: &Position, list: &mut MoveList) {
    generate_pawn_moves(position, list, FULL);
    generate_piece_moves(position, list, FULL);
    generate_king_moves(position, list, FULL);
}

/// Captures and promotions for the quiescence search.
pub fn generate_captures(position: &Position, list: &mut MoveList) {
    let color = position.side_to_move;
    let enemy = position.occupancy_by_color[color.opposite().index()];
    generate_pawn_captures(position, list);
    generate_piece_moves(position, list, enemy);

    let king = position.king(color);
    for to in Squares(targets(position, king) & enemy) {
        list.push(Move::new(king, to));
    }
}

/// Drops every move that leaves the mover's king attacked and rewinds the
/// cursor.
pub fn filter_legal(position: &Position, list: &mut MoveList) {
    let pins = pinned_mask(position, position.side_to_move);
    list.reset();
    while let Some(mv) = list.next_move() {
        if !is_legal(position, mv, pins) {
            list.remove_current();
        }
    }
    list.reset();
}

/// Fills `list` with exactly the legal moves of `position`.
pub fn generate_legal_moves(position: &Position, list: &mut MoveList) {
    list.clear();
    if checkers(position) != 0 {
        generate_evasions(position, list);
    } else {
        generate_moves(position, list);
    }
    filter_legal(position, list);
}

/// Legal captures and promotions, or every legal evasion when in check.
pub fn generate_legal_captures(position: &Position, list: &mut MoveList) {
    list.clear();
    if checkers(position) != 0 {
        generate_evasions(position, list);
    } else {
        generate_captures(position, list);
    }
    filter_legal(position, list);
}

pub fn has_legal_move(position: &Position) -> bool {
    let mut list = MoveList::new();
    generate_legal_moves(position, &mut list);
    !list.is_empty()
}

/// Convenience wrapper returning an owned vector.
pub fn legal_moves(position: &Position) -> Vec<Move> {
    let mut list = MoveList::new();
    generate_legal_moves(position, &mut list);
    list.as_slice().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_checks::is_in_check;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("valid fen")
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let moves = legal_moves(&Position::new_game());
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn kiwipete_has_forty_eight_moves() {
        let p = position("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        assert_eq!(legal_moves(&p).len(), 48);
    }

    #[test]
    fn crowded_position_fits_in_one_list() {
        let p = position("R6R/3Q4/1Q4Q1/4Q3/2Q4Q/Q4Q2/pp1Q4/kBNN1KB1 w - - 0 1");
        assert_eq!(legal_moves(&p).len(), 218);
    }

    #[test]
    fn no_generated_move_leaves_king_in_check() {
        let p = position("r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1");
        let color = p.side_to_move;
        for mv in legal_moves(&p) {
            assert!(!is_in_check(&p.make_move(mv), color), "{mv} leaves king in check");
        }
    }

    #[test]
    fn checkmate_and_stalemate_have_no_moves() {
        // Fool's mate.
        let mate = position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(!has_legal_move(&mate));
        let stalemate = position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!has_legal_move(&stalemate));
    }

    #[test]
    fn captures_only_contains_captures_and_promotions() {
        let p = position("4k3/1P6/8/3p4/4P3/8/8/4K3 w - - 0 1");
        let mut list = MoveList::new();
        generate_legal_captures(&p, &mut list);
        let strings: Vec<String> = list.as_slice().iter().map(|m| m.to_string()).collect();
        assert!(strings.contains(&"e4d5".to_owned()));
        assert!(strings.contains(&"b7b8q".to_owned()));
        assert!(!strings.contains(&"e4e5".to_owned()));
        assert_eq!(strings.len(), 5);
    }
}
