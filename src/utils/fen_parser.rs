//! FEN-to-Position parser.
//!
//! Only the first four fields are mandatory; missing clocks default to
//! `0 1`. Unknown castling letters are ignored and rights without their king
//! and rook at home are dropped, since castling is re-validated against the
//! board anyway.

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, position::Position};
use crate::tables::bitboard::count;
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> ChessResult<Position> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(ChessError::parse(format!(
            "expected at least 4 FEN fields, found {}",
            fields.len()
        )));
    }

    let mut position = Position::default();

    parse_board(fields[0], &mut position)?;
    position.side_to_move = parse_side_to_move(fields[1])?;
    position.castling_rights = parse_castling_rights(fields[2]);
    position.en_passant_square = parse_en_passant_square(fields[3])?;
    if let Some(halfmove) = fields.get(4) {
        position.halfmove_clock = halfmove
            .parse::<u16>()
            .map_err(|_| ChessError::parse(format!("invalid halfmove clock: {halfmove}")))?;
    }
    if let Some(fullmove) = fields.get(5) {
        position.fullmove_number = fullmove
            .parse::<u16>()
            .map_err(|_| ChessError::parse(format!("invalid fullmove number: {fullmove}")))?
            .max(1);
    }

    // Piece placement went through `add_piece`; hashes are reseeded from scratch.
    position.finish_setup();
    Ok(position)
}

fn parse_board(board_part: &str, position: &mut Position) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::parse("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(step) = ch.to_digit(10) {
                if !(1..=8).contains(&step) {
                    return Err(ChessError::parse(format!("invalid empty-square count '{ch}'")));
                }
                file += step as u8;
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or_else(|| {
                ChessError::parse(format!("invalid piece character '{ch}' in board layout"))
            })?;
            if file >= 8 {
                return Err(ChessError::parse(format!("rank '{rank_str}' has too many files")));
            }

            position.add_piece(make_square(board_rank, file), piece);
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::parse(format!("rank '{rank_str}' does not sum to 8 files")));
        }
    }

    for color in Color::BOTH {
        if count(position.bitboard(color, PieceKind::King)) != 1 {
            return Err(ChessError::parse(format!("{color} must have exactly one king")));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" | "W" => Ok(Color::White),
        "b" | "B" => Ok(Color::Black),
        _ => Err(ChessError::parse(format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> CastlingRights {
    castling_part.chars().fold(0, |rights, ch| match ch {
        'K' => rights | CASTLE_WHITE_KINGSIDE,
        'Q' => rights | CASTLE_WHITE_QUEENSIDE,
        'k' => rights | CASTLE_BLACK_KINGSIDE,
        'q' => rights | CASTLE_BLACK_QUEENSIDE,
        _ => rights,
    })
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part)
        .map(Some)
        .ok_or_else(|| ChessError::parse(format!("invalid en-passant square: {en_passant_part}")))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parses_starting_position() {
        let position = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");
        assert_eq!(position.side_to_move, Color::White);
        assert_eq!(position.fullmove_number, 1);
        assert_eq!(position.halfmove_clock, 0);
        assert_eq!(position.piece_at(D8), Piece::new(Color::Black, PieceKind::Queen));
        assert_eq!(position.castling_rights, CASTLE_ALL);
    }

    #[test]
    fn clocks_are_optional() {
        let position = parse_fen("4k3/8/8/8/8/8/8/4K3 b - -").expect("four fields are enough");
        assert_eq!(position.side_to_move, Color::Black);
        assert_eq!(position.fullmove_number, 1);
    }

    #[test]
    fn too_few_fields_is_a_parse_error() {
        let err = parse_fen("4k3/8/8/8/8/8/8/4K3 w -").expect_err("three fields");
        assert!(matches!(err, ChessError::Parse(_)));
    }

    #[test]
    fn bogus_castling_letters_are_dropped() {
        let position =
            parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KXq - 0 1").expect("castling is lenient");
        assert_eq!(position.castling_rights, CASTLE_WHITE_KINGSIDE | CASTLE_BLACK_QUEENSIDE);
    }

    #[test]
    fn rejects_malformed_board() {
        assert!(parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1").is_err());
        assert!(parse_fen("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
    }

    #[test]
    fn en_passant_target_must_follow_a_double_push() {
        // A target beside the white king would let d4xe5 capture the king itself.
        let position = parse_fen("4k3/8/8/8/3PK3/8/8/8 w - e5 0 1").expect("lenient");
        assert_eq!(position.en_passant_square, None);

        // Black to move needs a third-rank target with the white pawn above it.
        let position = parse_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").expect("valid");
        assert_eq!(position.en_passant_square, Some(20));
        let position = parse_fen("4k3/8/8/8/3pP3/8/4P3/4K3 b - e3 0 1").expect("lenient");
        assert_eq!(position.en_passant_square, None);
    }
}
