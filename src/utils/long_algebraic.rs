//! Long algebraic move input: `e2e4`, `Ng1f3`, `e7e8Q`, `e7e8q`.
//!
//! Strings are matched against the legal moves of the position, so the piece
//! prefix and separators are checks rather than information the move needs.

use std::sync::OnceLock;

use regex::Regex;

use crate::chess_errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, position::Position};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::algebraic_to_square;

fn move_pattern() -> &'static Regex {
    static MOVE_PATTERN: OnceLock<Regex> = OnceLock::new();
    MOVE_PATTERN.get_or_init(|| {
        Regex::new(r"^([KQRBNP])?([a-h][1-8])[-x]?([a-h][1-8])=?([QRBNqrbn])?[+#]?$")
            .expect("valid regex")
    })
}

/// Resolves `text` to one of the legal moves of `position`. A promotion
/// without a piece letter promotes to a queen.
pub fn long_algebraic_to_move(text: &str, position: &Position) -> ChessResult<Move> {
    let token = text.trim();
    let captures = move_pattern()
        .captures(token)
        .ok_or_else(|| ChessError::invalid_move(token))?;

    let piece = captures
        .get(1)
        .and_then(|m| m.as_str().chars().next())
        .and_then(PieceKind::from_letter);
    let from = algebraic_to_square(&captures[2]).ok_or_else(|| ChessError::invalid_move(token))?;
    let to = algebraic_to_square(&captures[3]).ok_or_else(|| ChessError::invalid_move(token))?;
    let promotion = captures
        .get(4)
        .and_then(|m| m.as_str().chars().next())
        .and_then(PieceKind::from_letter)
        .unwrap_or(PieceKind::Queen);

    let legal = legal_moves(position);
    legal
        .iter()
        .copied()
        .filter(|mv| mv.from() == from && mv.to() == to)
        .filter(|_| piece.map_or(true, |kind| position.piece_at(from).is_kind(kind)))
        .find(|mv| mv.promotion_piece().map_or(true, |kind| kind == promotion))
        .ok_or_else(|| ChessError::IllegalMove {
            notation: token.to_owned(),
            legal_moves: legal.iter().map(Move::to_string).collect(),
        })
}
