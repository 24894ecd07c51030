//! Error taxonomy for everything that reads user input.
//!
//! Board setup, piece-list parsing and move resolution are the only fallible
//! entry points; table construction, make/undo, generation and search are
//! total over reachable positions and do not return errors.

use thiserror::Error;

use crate::game_state::chess_types::Color;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// Position description is missing required fields or has an unreadable one.
    #[error("invalid position: {0}")]
    Parse(String),

    /// Malformed piece-list token (with its side) or move string (no side).
    #[error("invalid notation '{token}'{}", for_side(.side))]
    InvalidNotation { token: String, side: Option<Color> },

    /// Well-formed move that is not legal here; carries the legal alternatives.
    #[error("{notation} is not a legal move; valid moves: {}", .legal_moves.join(", "))]
    IllegalMove {
        notation: String,
        legal_moves: Vec<String>,
    },
}

impl ChessError {
    pub fn parse(message: impl Into<String>) -> Self {
        ChessError::Parse(message.into())
    }

    pub fn invalid_token(token: impl Into<String>, side: Color) -> Self {
        ChessError::InvalidNotation {
            token: token.into(),
            side: Some(side),
        }
    }

    pub fn invalid_move(token: impl Into<String>) -> Self {
        ChessError::InvalidNotation {
            token: token.into(),
            side: None,
        }
    }
}

fn for_side(side: &Option<Color>) -> String {
    side.map(|side| format!(" for {side}")).unwrap_or_default()
}

pub type ChessResult<T> = Result<T, ChessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = ChessError::invalid_token("Zz9", Color::Black);
        assert_eq!(err.to_string(), "invalid notation 'Zz9' for black");

        let err = ChessError::invalid_move("e9e4");
        assert_eq!(err.to_string(), "invalid notation 'e9e4'");

        let err = ChessError::IllegalMove {
            notation: "e2e5".to_owned(),
            legal_moves: vec!["e2e3".to_owned(), "e2e4".to_owned()],
        };
        assert_eq!(
            err.to_string(),
            "e2e5 is not a legal move; valid moves: e2e3, e2e4"
        );
    }
}
