//! Attack queries, pins and move legality.
//!
//! Everything here is a pure read of a `Position`. Legality uses the pin mask
//! for ordinary pieces, re-probes the destination with the king lifted off the
//! board for king moves, and plays en-passant captures out in full since they
//! can uncover a rank attack on the king.

use crate::game_state::chess_rules::CASTLE_SQUARES;
use crate::game_state::{chess_types::*, position::Position};
use crate::moves::bishop_moves::{bishop_attacks, BISHOP_RAYS};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::{pawn_advances, pawn_attacks};
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::{rook_attacks, ROOK_RAYS};
use crate::tables::attack_tables::{block_mask, line_mask};
use crate::tables::bitboard::{bit, count, pushed, Bitboard, Squares, FILE_A, FILE_H, RANK_MASKS};

/// Squares attacked by `piece` standing on `square` under `occupancy`.
/// Pawns contribute their capture squares only.
#[inline]
pub fn attacks_for(piece: Piece, square: Square, occupancy: Bitboard) -> Bitboard {
    match piece.kind() {
        Some(PieceKind::Pawn) => pawn_attacks(piece.color(), square),
        Some(PieceKind::Knight) => knight_attacks(square),
        Some(PieceKind::Bishop) => bishop_attacks(square, occupancy),
        Some(PieceKind::Rook) => rook_attacks(square, occupancy),
        Some(PieceKind::Queen) => queen_attacks(square, occupancy),
        Some(PieceKind::King) => king_attacks(square),
        None => 0,
    }
}

/// Squares attacked by whatever stands on `square`.
#[inline]
pub fn attacks(position: &Position, square: Square) -> Bitboard {
    attacks_for(position.piece_at(square), square, position.occupancy_all)
}

/// Pseudo-legal destinations for `piece` as if it stood on `square`:
/// attacked squares not held by its own side. Pawns get pushes onto empty
/// squares plus captures of enemy pieces or the en-passant target.
pub fn targets_for(position: &Position, square: Square, piece: Piece) -> Bitboard {
    let color = piece.color();
    let own = position.occupancy_by_color[color.index()];

    if piece.is_pawn() {
        let enemy = position.occupancy_by_color[color.opposite().index()];
        let capturable = match position.en_passant_square {
            Some(ep) => enemy | bit(ep),
            None => enemy,
        };
        let empty = !position.occupancy_all;
        let single = pushed(bit(square), color) & empty;
        // A double step needs the single step square free as well.
        let double = pushed(single, color) & empty & pawn_advances(color, square);
        return (pawn_attacks(color, square) & capturable) | single | double;
    }

    attacks_for(piece, square, position.occupancy_all) & !own
}

/// Pseudo-legal destinations for the piece on `square`.
#[inline]
pub fn targets(position: &Position, square: Square) -> Bitboard {
    targets_for(position, square, position.piece_at(square))
}

/// Pieces of `by` attacking `square` when the board holds `occupancy`.
pub fn attackers_with_occupancy(
    position: &Position,
    square: Square,
    by: Color,
    occupancy: Bitboard,
) -> Bitboard {
    let rooks = position.bitboard(by, PieceKind::Rook) | position.bitboard(by, PieceKind::Queen);
    let bishops =
        position.bitboard(by, PieceKind::Bishop) | position.bitboard(by, PieceKind::Queen);

    (pawn_attacks(by.opposite(), square) & position.bitboard(by, PieceKind::Pawn))
        | (knight_attacks(square) & position.bitboard(by, PieceKind::Knight))
        | (king_attacks(square) & position.bitboard(by, PieceKind::King))
        | (rook_attacks(square, occupancy) & rooks)
        | (bishop_attacks(square, occupancy) & bishops)
}

#[inline]
pub fn attackers(position: &Position, square: Square, by: Color) -> Bitboard {
    attackers_with_occupancy(position, square, by, position.occupancy_all)
}

#[inline]
pub fn is_square_attacked(position: &Position, square: Square, by: Color) -> bool {
    attackers(position, square, by) != 0
}

/// Every square attacked by `color` with the board holding `occupancy`.
pub fn all_attacks_with_occupancy(position: &Position, color: Color, occupancy: Bitboard) -> Bitboard {
    let pawns = position.bitboard(color, PieceKind::Pawn);
    let mut out = pushed(pawns & !FILE_A, color) >> 1 | pushed(pawns & !FILE_H, color) << 1;

    let others = position.occupancy_by_color[color.index()] & !pawns;
    for square in Squares(others) {
        out |= attacks_for(position.piece_at(square), square, occupancy);
    }
    out
}

#[inline]
pub fn all_attacks(position: &Position, color: Color) -> Bitboard {
    all_attacks_with_occupancy(position, color, position.occupancy_all)
}

#[inline]
pub fn is_in_check(position: &Position, color: Color) -> bool {
    is_square_attacked(position, position.king(color), color.opposite())
}

/// Enemy pieces giving check to the side to move.
#[inline]
pub fn checkers(position: &Position) -> Bitboard {
    let color = position.side_to_move;
    attackers(position, position.king(color), color.opposite())
}

/// Pieces of `color` pinned against their own king by an enemy slider.
pub fn pinned_mask(position: &Position, color: Color) -> Bitboard {
    let king = position.king(color);
    let enemy = color.opposite();
    let own = position.occupancy_by_color[color.index()];

    let rooks =
        position.bitboard(enemy, PieceKind::Rook) | position.bitboard(enemy, PieceKind::Queen);
    let bishops =
        position.bitboard(enemy, PieceKind::Bishop) | position.bitboard(enemy, PieceKind::Queen);
    let snipers = (ROOK_RAYS[king as usize] & rooks) | (BISHOP_RAYS[king as usize] & bishops);

    let mut pinned = 0;
    for sniper in Squares(snipers) {
        let between = block_mask(king, sniper) & position.occupancy_all;
        if count(between) == 1 && between & own != 0 {
            pinned |= between;
        }
    }
    pinned
}

/// Castling for the right at `index` (`CASTLE_SQUARES` order): the right is
/// held, the squares between king and rook are empty, and the king neither
/// starts in, passes through, nor lands on an attacked square.
pub fn can_castle(position: &Position, index: usize) -> bool {
    let (king_home, rook_home, king_to, _) = CASTLE_SQUARES[index];
    let color = if index < 2 { Color::White } else { Color::Black };
    if position.castling_rights & (1 << index) == 0 || position.king(color) != king_home {
        return false;
    }
    if block_mask(king_home, rook_home) & position.occupancy_all != 0 {
        return false;
    }

    let walk = block_mask(king_home, king_to) | bit(king_home) | bit(king_to);
    Squares(walk).all(|square| !is_square_attacked(position, square, color.opposite()))
}

/// True when `mv` does not leave the mover's king attacked. `pins` must be
/// `pinned_mask` for the side to move.
pub fn is_legal(position: &Position, mv: Move, pins: Bitboard) -> bool {
    let color = position.side_to_move;
    let king = position.king(color);
    let from = mv.from();

    if mv.is_en_passant() {
        return !is_in_check(&position.make_move(mv), color);
    }
    if from == king {
        if mv.is_castle() {
            return true;
        }
        let occupancy = position.occupancy_all ^ bit(king);
        return attackers_with_occupancy(position, mv.to(), color.opposite(), occupancy) == 0;
    }
    if pins & bit(from) != 0 {
        return line_mask(king, from) & bit(mv.to()) != 0;
    }
    true
}

/// Promotion rank mask for pawns of `color`.
#[inline]
pub fn promotion_rank(color: Color) -> Bitboard {
    match color {
        Color::White => RANK_MASKS[7],
        Color::Black => RANK_MASKS[0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("valid fen")
    }

    #[test]
    fn start_position_attack_summary() {
        let start = Position::new_game();
        assert!(!is_in_check(&start, Color::White));
        // Every third-rank square is covered by White.
        assert_eq!(all_attacks(&start, Color::White) & RANK_MASKS[2], RANK_MASKS[2]);
        assert_eq!(pinned_mask(&start, Color::White), 0);
        assert_eq!(count(targets(&start, 12)), 2);
        assert_eq!(count(targets(&start, 6)), 2);
    }

    #[test]
    fn finds_rook_pin() {
        // White knight e2 pinned by the rook on e8.
        let p = position("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert_eq!(pinned_mask(&p, Color::White), bit(12));
        assert!(!is_legal(&p, Move::new(12, 29), pinned_mask(&p, Color::White)));
    }

    #[test]
    fn pinned_slider_may_move_along_the_pin() {
        let p = position("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1");
        let pins = pinned_mask(&p, Color::White);
        assert!(is_legal(&p, Move::new(12, 60), pins));
        assert!(is_legal(&p, Move::new(12, 20), pins));
        assert!(!is_legal(&p, Move::new(12, 13), pins));
    }

    #[test]
    fn king_cannot_step_along_checking_ray() {
        // Rook on a1 checks the king on e1; f1 stays attacked through the king.
        let p = position("4k3/8/8/8/8/8/8/r3K3 w - - 0 1");
        assert!(is_in_check(&p, Color::White));
        assert_eq!(checkers(&p), bit(0));
        assert!(!is_legal(&p, Move::new(4, 5), 0));
        assert!(is_legal(&p, Move::new(4, 12), 0));
    }

    #[test]
    fn castling_requires_safe_path() {
        let p = position("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(can_castle(&p, 0));
        assert!(can_castle(&p, 1));

        // Bishop on a6 covers f1.
        let p = position("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1");
        assert!(!can_castle(&p, 0));
        assert!(can_castle(&p, 1));

        // b1 occupied blocks queenside even though the king never crosses it.
        let p = position("4k3/8/8/8/8/8/8/RN2K2R w KQ - 0 1");
        assert!(!can_castle(&p, 1));
    }

    #[test]
    fn en_passant_exposing_rank_is_illegal() {
        // After ...d7-d5 the e5 pawn may not take: king a5 and rook h5 share the rank.
        let p = position("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1");
        let ep = Move::with_flag(36, 43, crate::moves::move_descriptions::FLAG_EN_PASSANT);
        assert!(!is_legal(&p, ep, pinned_mask(&p, Color::White)));
    }
}
