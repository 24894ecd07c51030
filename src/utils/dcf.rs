//! Side-by-side piece-list notation: `"Ke1,Qd1,e2,e4 : M,Ke8,Nf6,d7"`.
//!
//! Each side is a comma-separated token list. `K`, `Q`, `R`, `B`, `N` (and an
//! optional `P`) followed by a square place a piece; a bare square is a pawn.
//! Pseudo pieces:
//!
//! * `M` (optionally `M<n>`) gives that side the move, at fullmove `n`.
//!   White moves by default.
//! * `C<square>` grants a castle right by naming the king's destination
//!   (`Cg1`, `Cc8`). A side without `C` tokens keeps both rights; rights the
//!   board cannot support are dropped quietly.
//! * `E<square>` marks the en-passant target.

use std::sync::OnceLock;

use regex::Regex;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, position::Position};
use crate::tables::bitboard::{count, Squares};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub const SIDE_SEPARATOR: &str = " : ";

fn piece_token() -> &'static Regex {
    static PIECE_TOKEN: OnceLock<Regex> = OnceLock::new();
    PIECE_TOKEN.get_or_init(|| Regex::new(r"^([KQRBNPCE]?)([a-h][1-8])$").expect("valid regex"))
}

fn move_token() -> &'static Regex {
    static MOVE_TOKEN: OnceLock<Regex> = OnceLock::new();
    MOVE_TOKEN.get_or_init(|| Regex::new(r"^M(\d*)$").expect("valid regex"))
}

/// Splits `"<white> : <black>"`; `None` when the string is not in this notation.
pub fn split_sides(initial: &str) -> Option<(&str, &str)> {
    initial.split_once(SIDE_SEPARATOR)
}

pub fn parse_dcf(white: &str, black: &str) -> ChessResult<Position> {
    let mut position = Position::default();
    let mut castles = [None::<CastlingRights>; 2];

    for (color, side) in [(Color::White, white), (Color::Black, black)] {
        castles[color.index()] = setup_side(&mut position, side, color)?;
    }

    for color in Color::BOTH {
        if count(position.bitboard(color, PieceKind::King)) != 1 {
            return Err(ChessError::parse(format!("{color} must have exactly one king")));
        }
        position.castling_rights |= castles[color.index()]
            .unwrap_or(color.kingside_right() | color.queenside_right());
    }

    position.finish_setup();
    Ok(position)
}

/// Applies one side's tokens; returns the explicit castle rights, if any were given.
fn setup_side(
    position: &mut Position,
    side: &str,
    color: Color,
) -> ChessResult<Option<CastlingRights>> {
    let mut castles = None;

    for token in side.split(',').map(str::trim).filter(|token| !token.is_empty()) {
        if let Some(captures) = move_token().captures(token) {
            position.side_to_move = color;
            if let Ok(number) = captures[1].parse::<u16>() {
                position.fullmove_number = number.max(1);
            }
            continue;
        }

        let captures = piece_token()
            .captures(token)
            .ok_or_else(|| ChessError::invalid_token(token, color))?;
        let square = algebraic_to_square(&captures[2])
            .ok_or_else(|| ChessError::invalid_token(token, color))?;

        let kind = match &captures[1] {
            "E" => {
                position.en_passant_square = Some(square);
                continue;
            }
            "C" => {
                let home_rank = color.relative_rank(square) == 0;
                let rights = castles.get_or_insert(0);
                match file_of(square) {
                    2 if home_rank => *rights |= color.queenside_right(),
                    6 if home_rank => *rights |= color.kingside_right(),
                    _ => {}
                }
                continue;
            }
            "K" => PieceKind::King,
            "Q" => PieceKind::Queen,
            "R" => PieceKind::Rook,
            "B" => PieceKind::Bishop,
            "N" => PieceKind::Knight,
            _ => PieceKind::Pawn,
        };
        position.remove_piece(square);
        position.add_piece(square, Piece::new(color, kind));
    }

    Ok(castles)
}

pub fn generate_dcf(position: &Position) -> String {
    let mut sides: [Vec<String>; 2] = [Vec::new(), Vec::new()];

    for color in Color::BOTH {
        let tokens = &mut sides[color.index()];
        if color == Color::Black && position.side_to_move == Color::Black {
            tokens.push("M".to_owned());
        }

        tokens.push(format!("K{}", square_to_algebraic(position.king(color))));
        for kind in [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight] {
            for square in Squares(position.bitboard(color, kind)) {
                tokens.push(format!("{}{}", kind.letter(), square_to_algebraic(square)));
            }
        }

        // Markers only when exactly one right survives; both is the default.
        let kingside = position.castling_rights & color.kingside_right() != 0;
        let queenside = position.castling_rights & color.queenside_right() != 0;
        if kingside != queenside {
            let file = if kingside { 6 } else { 2 };
            let rank = match color {
                Color::White => 0,
                Color::Black => 7,
            };
            tokens.push(format!("C{}", square_to_algebraic(make_square(rank, file))));
        }

        if let Some(square) = position.en_passant_square {
            if color == position.side_to_move {
                tokens.push(format!("E{}", square_to_algebraic(square)));
            }
        }

        for square in Squares(position.bitboard(color, PieceKind::Pawn)) {
            tokens.push(square_to_algebraic(square));
        }
    }

    format!("{}{SIDE_SEPARATOR}{}", sides[0].join(","), sides[1].join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn bare_squares_are_pawns() {
        let position = parse_dcf("Ke1,e2", "Ke8,Nf6,d7").expect("valid piece lists");
        assert_eq!(position.piece_at(12), Piece::new(Color::White, PieceKind::Pawn));
        assert_eq!(position.piece_at(45), Piece::new(Color::Black, PieceKind::Knight));
        assert_eq!(position.side_to_move, Color::White);
        assert_eq!(position.castling_rights, 0);
    }

    #[test]
    fn move_marker_sets_side_and_number() {
        let position = parse_dcf("Kg1,Rf1", "M42,Kg8").expect("valid piece lists");
        assert_eq!(position.side_to_move, Color::Black);
        assert_eq!(position.fullmove_number, 42);
    }

    #[test]
    fn castle_markers_restrict_rights() {
        let both = parse_dcf("Ke1,Ra1,Rh1", "Ke8,Ra8,Rh8").expect("valid");
        assert_eq!(both.castling_rights, CASTLE_ALL);

        let only = parse_dcf("Ke1,Ra1,Rh1,Cg1", "Ke8,Ra8,Rh8,Cc8").expect("valid");
        assert_eq!(only.castling_rights, CASTLE_WHITE_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
    }

    #[test]
    fn malformed_token_names_token_and_side() {
        let err = parse_dcf("Ke1", "Ke8,Xz9").expect_err("bad token");
        assert_eq!(
            err,
            ChessError::InvalidNotation {
                token: "Xz9".to_owned(),
                side: Some(Color::Black),
            }
        );
    }

    #[test]
    fn missing_king_is_rejected() {
        assert!(matches!(parse_dcf("Qd1", "Ke8"), Err(ChessError::Parse(_))));
    }

    #[test]
    fn start_position_encodes_and_decodes() {
        let start = Position::from_fen(STARTING_POSITION_FEN).expect("start position");
        let encoded = generate_dcf(&start);
        assert!(encoded.starts_with("Ke1,Qd1,Ra1,Rh1,Bc1,Bf1,Nb1,Ng1,a2,"));
        let (white, black) = split_sides(&encoded).expect("two sides");
        let decoded = parse_dcf(white, black).expect("round trip");
        assert_eq!(decoded.squares, start.squares);
        assert_eq!(decoded.castling_rights, start.castling_rights);
        assert_eq!(decoded.zobrist_key, start.zobrist_key);
    }

    #[test]
    fn black_to_move_and_single_right_round_trip() {
        let position = Position::from_fen("r3k3/8/8/8/8/8/8/4K2R b Kq - 0 1").expect("valid");
        let encoded = generate_dcf(&position);
        assert_eq!(encoded, "Ke1,Rh1,Cg1 : M,Ke8,Ra8,Cc8");
        let (white, black) = split_sides(&encoded).expect("two sides");
        let decoded = parse_dcf(white, black).expect("round trip");
        assert_eq!(decoded.zobrist_key, position.zobrist_key);
    }

    #[test]
    fn en_passant_marker_needs_a_pushed_pawn() {
        let position = parse_dcf("Ke1,e5", "M,Ke8,Ed6,d5").expect("valid");
        assert_eq!(position.en_passant_square, None);

        let position = parse_dcf("Ke1,Ed6,e5", "Ke8,d5").expect("valid");
        assert_eq!(position.en_passant_square, Some(43));
    }
}
