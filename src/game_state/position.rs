//! Board model and the make-move transition.
//!
//! `Position` is a plain `Copy` value. Making a move produces the successor
//! position and never mutates the original, which is what lets the position
//! tree undo a move by simply dropping the newest frame.

use std::fmt;

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::{CASTLE_RIGHTS_KEPT, CASTLE_SQUARES, STARTING_POSITION_FEN};
use crate::game_state::chess_types::*;
use crate::game_state::zobrist::{castle_key, en_passant_key, piece_square_key, white_to_move_key};
use crate::moves::move_descriptions::Move;
use crate::moves::pawn_moves::pawn_attacks;
use crate::tables::bitboard::{bit, Bitboard, Squares};
use crate::utils::{dcf, fen_generator, fen_parser};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    // [color][piece_kind]
    pub pieces: [[Bitboard; 6]; 2],
    pub occupancy_by_color: [Bitboard; 2],
    pub occupancy_all: Bitboard,

    // Piece-by-square mirror of the bitboards.
    pub squares: [Piece; 64],
    pub king_square: [Square; 2],

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    /// False right after a pawn move or a capture.
    pub reversible: bool,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    pub zobrist_key: u64,
    pub pawn_zobrist_key: u64,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            squares: [Piece::NONE; 64],
            king_square: [E1, E8],
            side_to_move: Color::White,
            castling_rights: 0,
            en_passant_square: None,
            reversible: true,
            halfmove_clock: 0,
            fullmove_number: 1,
            zobrist_key: 0,
            pawn_zobrist_key: 0,
        }
    }
}

impl Position {
    pub fn new_game() -> Self {
        // The literal start position is well-formed; fall back to an empty board
        // only to keep this constructor infallible.
        Self::from_fen(STARTING_POSITION_FEN).unwrap_or_default()
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        fen_parser::parse_fen(fen)
    }

    /// Builds a position from the `"<white tokens> : <black tokens>"` piece lists.
    #[inline]
    pub fn from_dcf(white: &str, black: &str) -> ChessResult<Self> {
        dcf::parse_dcf(white, black)
    }

    #[inline]
    pub fn to_fen(&self) -> String {
        fen_generator::generate_fen(self)
    }

    #[inline]
    pub fn to_dcf(&self) -> String {
        dcf::generate_dcf(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Piece {
        self.squares[square as usize]
    }

    #[inline]
    pub fn bitboard(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn king(&self, color: Color) -> Square {
        self.king_square[color.index()]
    }

    /// Places `piece` on an empty square, keeping bitboards and hashes in sync.
    pub fn add_piece(&mut self, square: Square, piece: Piece) {
        let Some(kind) = piece.kind() else {
            return;
        };
        let color = piece.color();
        let mask = bit(square);

        self.squares[square as usize] = piece;
        self.pieces[color.index()][kind.index()] |= mask;
        self.occupancy_by_color[color.index()] |= mask;
        self.occupancy_all |= mask;
        if kind == PieceKind::King {
            self.king_square[color.index()] = square;
        }

        let key = piece_square_key(piece, square);
        self.zobrist_key ^= key;
        if kind == PieceKind::Pawn {
            self.pawn_zobrist_key ^= key;
        }
    }

    /// Lifts whatever stands on `square`, returning it.
    pub fn remove_piece(&mut self, square: Square) -> Piece {
        let piece = self.squares[square as usize];
        let Some(kind) = piece.kind() else {
            return piece;
        };
        let color = piece.color();
        let mask = !bit(square);

        self.squares[square as usize] = Piece::NONE;
        self.pieces[color.index()][kind.index()] &= mask;
        self.occupancy_by_color[color.index()] &= mask;
        self.occupancy_all &= mask;

        let key = piece_square_key(piece, square);
        self.zobrist_key ^= key;
        if kind == PieceKind::Pawn {
            self.pawn_zobrist_key ^= key;
        }
        piece
    }

    /// Drops castling rights whose king or rook is not on its home square.
    pub fn sanitize_castling_rights(&mut self) {
        for (index, &(king_home, rook_home, _, _)) in CASTLE_SQUARES.iter().enumerate() {
            let right = 1 << index;
            let color = if index < 2 { Color::White } else { Color::Black };
            let king_ok = self.piece_at(king_home) == Piece::new(color, PieceKind::King);
            let rook_ok = self.piece_at(rook_home) == Piece::new(color, PieceKind::Rook);
            if !(king_ok && rook_ok) {
                self.castling_rights &= !right;
            }
        }
    }

    /// Drops an en-passant target that no double push could have left: it
    /// must sit on the mover's sixth rank, empty, with the enemy pawn that
    /// just advanced in front of it and that pawn's start square vacated.
    pub fn sanitize_en_passant_square(&mut self) {
        let Some(target) = self.en_passant_square else {
            return;
        };
        let color = self.side_to_move;
        let pusher = color.opposite();
        let valid = color.relative_rank(target) == 5
            && self.piece_at(target).is_none()
            && self.piece_at(passed_square(target, color)) == Piece::new(pusher, PieceKind::Pawn)
            && self.piece_at((target as i8 + color.forward()) as Square).is_none();
        if !valid {
            self.en_passant_square = None;
        }
    }

    /// Recomputes both hash values from scratch.
    pub fn compute_hashes(&self) -> (u64, u64) {
        let mut hash = 0u64;
        let mut pawn_hash = 0u64;
        for square in Squares(self.occupancy_all) {
            let piece = self.piece_at(square);
            let key = piece_square_key(piece, square);
            hash ^= key;
            if piece.is_pawn() {
                pawn_hash ^= key;
            }
        }

        hash ^= castle_key(self.castling_rights);
        if let Some(square) = self.en_passant_square {
            hash ^= en_passant_key(square);
        }
        if self.side_to_move == Color::White {
            hash ^= white_to_move_key();
        }
        (hash, pawn_hash)
    }

    /// Finishes a freshly assembled position: validates castling rights and
    /// the en-passant target, then seeds both hashes.
    pub fn finish_setup(&mut self) {
        self.sanitize_castling_rights();
        self.sanitize_en_passant_square();
        self.reversible = true;
        (self.zobrist_key, self.pawn_zobrist_key) = self.compute_hashes();
    }

    /// Returns the position after playing `mv`, which must have been generated
    /// for this position.
    pub fn make_move(&self, mv: Move) -> Position {
        let mut next = *self;
        let color = self.side_to_move;
        let from = mv.from();
        let to = mv.to();
        let piece = self.piece_at(from);

        if let Some(square) = self.en_passant_square {
            next.zobrist_key ^= en_passant_key(square);
            next.en_passant_square = None;
        }

        next.reversible = true;
        next.halfmove_clock = self.halfmove_clock.saturating_add(1);

        if next.remove_piece(to).is_some() {
            next.reversible = false;
            next.halfmove_clock = 0;
        }
        if mv.is_en_passant() {
            next.remove_piece(passed_square(to, color));
        }

        next.remove_piece(from);
        let placed = match mv.promotion_piece() {
            Some(kind) => Piece::new(color, kind),
            None => piece,
        };
        next.add_piece(to, placed);

        if piece.is_pawn() {
            next.reversible = false;
            next.halfmove_clock = 0;
            if mv.is_double_push() {
                let jumped = passed_square(to, color);
                // Only record the target when an enemy pawn can take it.
                let enemy_pawns = self.bitboard(color.opposite(), PieceKind::Pawn);
                if pawn_attacks(color, jumped) & enemy_pawns != 0 {
                    next.en_passant_square = Some(jumped);
                    next.zobrist_key ^= en_passant_key(jumped);
                }
            }
        } else if mv.is_castle() {
            if let Some(&(_, rook_home, _, rook_to)) = CASTLE_SQUARES
                .iter()
                .find(|&&(king_home, _, king_to, _)| king_home == from && king_to == to)
            {
                let rook = next.remove_piece(rook_home);
                next.add_piece(rook_to, rook);
            }
        }

        let rights = self.castling_rights
            & CASTLE_RIGHTS_KEPT[from as usize]
            & CASTLE_RIGHTS_KEPT[to as usize];
        if rights != self.castling_rights {
            next.zobrist_key ^= castle_key(self.castling_rights) ^ castle_key(rights);
            next.castling_rights = rights;
        }

        next.side_to_move = color.opposite();
        next.zobrist_key ^= white_to_move_key();
        if color == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }

        next
    }
}

/// Square the moving pawn skipped over (double push) or the captured pawn
/// stands on (en-passant), given the pawn's destination.
#[inline]
fn passed_square(to: Square, color: Color) -> Square {
    (to as i8 - color.forward()) as Square
}

/// Plain board diagram, rank 8 on top.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::utils::render_game_state::render_position(self, false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::move_descriptions::{FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT};

    fn assert_consistent(position: &Position) {
        let (hash, pawn_hash) = position.compute_hashes();
        assert_eq!(position.zobrist_key, hash);
        assert_eq!(position.pawn_zobrist_key, pawn_hash);
        let union = position.occupancy_by_color[0] | position.occupancy_by_color[1];
        assert_eq!(position.occupancy_all, union);
        for square in 0..64u8 {
            let piece = position.piece_at(square);
            match piece.kind() {
                Some(kind) => assert!(position.bitboard(piece.color(), kind) & bit(square) != 0),
                None => assert!(position.occupancy_all & bit(square) == 0),
            }
        }
    }

    #[test]
    fn start_position_is_consistent() {
        let position = Position::new_game();
        assert_consistent(&position);
        assert_eq!(position.castling_rights, CASTLE_ALL);
        assert_eq!(position.king(Color::White), E1);
        assert_eq!(position.king(Color::Black), E8);
        assert_eq!(position.occupancy_all.count_ones(), 32);
    }

    #[test]
    fn double_push_without_capturer_leaves_no_en_passant() {
        let position = Position::new_game();
        let next = position.make_move(Move::with_flag(12, 28, FLAG_DOUBLE_PAWN_PUSH));
        assert_eq!(next.en_passant_square, None);
        assert!(!next.reversible);
        assert_eq!(next.side_to_move, Color::Black);
        assert_consistent(&next);
    }

    #[test]
    fn en_passant_capture_removes_passed_pawn() {
        let position =
            Position::from_fen("4k3/8/8/8/5p2/8/4P3/4K3 w - - 0 1").expect("valid fen");
        let pushed = position.make_move(Move::with_flag(12, 28, FLAG_DOUBLE_PAWN_PUSH));
        assert_eq!(pushed.en_passant_square, Some(20));
        assert_consistent(&pushed);

        let taken = pushed.make_move(Move::with_flag(29, 20, FLAG_EN_PASSANT));
        assert!(taken.piece_at(28).is_none());
        assert_eq!(taken.piece_at(20), Piece::new(Color::Black, PieceKind::Pawn));
        assert_eq!(taken.en_passant_square, None);
        assert_consistent(&taken);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid fen");
        let castled = position.make_move(Move::with_flag(E1, G1, FLAG_CASTLING));
        assert_eq!(castled.piece_at(F1), Piece::new(Color::White, PieceKind::Rook));
        assert!(castled.piece_at(H1).is_none());
        assert_eq!(castled.king(Color::White), G1);
        assert_eq!(castled.castling_rights, CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
        assert_consistent(&castled);
    }

    #[test]
    fn capturing_a_rook_strips_its_right() {
        let position =
            Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid fen");
        let next = position.make_move(Move::new(A1, A8));
        assert_eq!(next.castling_rights, CASTLE_WHITE_KINGSIDE | CASTLE_BLACK_KINGSIDE);
        assert_eq!(next.halfmove_clock, 0);
        assert_consistent(&next);
    }

    #[test]
    fn promotion_replaces_pawn() {
        let position = Position::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").expect("valid fen");
        let next = position.make_move(Move::promotion(52, 60, PieceKind::Knight));
        assert_eq!(next.piece_at(60), Piece::new(Color::White, PieceKind::Knight));
        assert_eq!(next.bitboard(Color::White, PieceKind::Pawn), 0);
        assert_consistent(&next);
    }

    #[test]
    fn castling_rights_need_pieces_at_home() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w KQkq - 0 1").expect("valid fen");
        assert_eq!(position.castling_rights, CASTLE_WHITE_KINGSIDE);
    }

    #[test]
    fn fullmove_counter_saturates() {
        let position = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 65535").expect("valid fen");
        let next = position.make_move(Move::new(60, 59));
        assert_eq!(next.fullmove_number, u16::MAX);
        assert_consistent(&next);
    }

    #[test]
    fn stray_en_passant_target_is_dropped() {
        // e5 is not a sixth-rank square and holds no pushed pawn behind it.
        let position = Position::from_fen("4k3/8/8/8/3PK3/8/8/8 w - e5 0 1").expect("lenient");
        assert_eq!(position.en_passant_square, None);
        assert_consistent(&position);

        let position = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("valid fen");
        assert_eq!(position.en_passant_square, Some(43));
    }
}
