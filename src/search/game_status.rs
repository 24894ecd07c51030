//! Game-over detection for the front-ends.

use std::fmt;

use crate::game_state::chess_rules::FIFTY_MOVE_HALFMOVES;
use crate::game_state::{chess_types::*, position::Position, position_tree::PositionTree};
use crate::move_generation::legal_move_checks::checkers;
use crate::move_generation::legal_move_generator::has_legal_move;
use crate::tables::bitboard::{count, DARK_SQUARES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    WhiteWon,
    BlackWon,
    Stalemate,
    Insufficient,
    Repetition,
    FiftyMoves,
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameStatus::InProgress => "game in progress",
            GameStatus::WhiteWon => "checkmate, white wins",
            GameStatus::BlackWon => "checkmate, black wins",
            GameStatus::Stalemate => "draw by stalemate",
            GameStatus::Insufficient => "draw by insufficient material",
            GameStatus::Repetition => "draw by threefold repetition",
            GameStatus::FiftyMoves => "draw by the fifty-move rule",
        };
        f.write_str(text)
    }
}

pub fn game_status(tree: &PositionTree) -> GameStatus {
    let position = tree.current();
    if !has_legal_move(position) {
        if checkers(position) == 0 {
            return GameStatus::Stalemate;
        }
        return match position.side_to_move {
            Color::White => GameStatus::BlackWon,
            Color::Black => GameStatus::WhiteWon,
        };
    }
    if insufficient_material(position) {
        return GameStatus::Insufficient;
    }
    if tree.is_third_repetition() {
        return GameStatus::Repetition;
    }
    if position.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
        return GameStatus::FiftyMoves;
    }
    GameStatus::InProgress
}

/// Neither side can mate: bare kings, a single minor piece, or bishops
/// that all stand on one square color.
pub fn insufficient_material(position: &Position) -> bool {
    let mut heavy = 0;
    let mut knights = 0;
    let mut bishops = 0;
    for color in Color::BOTH {
        heavy |= position.bitboard(color, PieceKind::Pawn)
            | position.bitboard(color, PieceKind::Rook)
            | position.bitboard(color, PieceKind::Queen);
        knights |= position.bitboard(color, PieceKind::Knight);
        bishops |= position.bitboard(color, PieceKind::Bishop);
    }
    if heavy != 0 {
        return false;
    }
    if count(knights | bishops) <= 1 {
        return true;
    }
    knights == 0 && (bishops & DARK_SQUARES == 0 || bishops & !DARK_SQUARES == 0)
}
