//! A game in progress: the position history plus move input by notation.

use crate::chess_errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::{position::Position, position_tree::PositionTree};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::move_descriptions::Move;
use crate::search::game_status::{game_status, GameStatus};
use crate::utils::dcf::split_sides;
use crate::utils::long_algebraic::long_algebraic_to_move;

#[derive(Debug, Clone)]
pub struct Game {
    tree: PositionTree,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self {
            tree: PositionTree::new(Position::new_game()),
        }
    }

    /// Starts from a placement string or from `"<white> : <black>"` piece lists.
    pub fn from_initial(initial: &str) -> ChessResult<Self> {
        let initial = initial.trim();
        let position = match split_sides(initial) {
            Some((white, black)) => Position::from_dcf(white, black)?,
            None if initial.is_empty() || initial == "startpos" => {
                Position::from_fen(STARTING_POSITION_FEN)?
            }
            None => Position::from_fen(initial)?,
        };
        Ok(Self {
            tree: PositionTree::new(position),
        })
    }

    #[inline]
    pub fn position(&self) -> &Position {
        self.tree.current()
    }

    #[inline]
    pub fn tree(&self) -> &PositionTree {
        &self.tree
    }

    pub fn reset(&mut self) {
        self.tree.reset(Position::new_game());
    }

    /// Plays a move that must come from this position's legal move list.
    pub fn play(&mut self, mv: Move) {
        self.tree.make_move(mv);
    }

    /// Parses `notation` against the legal moves and plays it.
    pub fn play_notation(&mut self, notation: &str) -> ChessResult<Move> {
        let mv = long_algebraic_to_move(notation, self.position())?;
        self.play(mv);
        Ok(mv)
    }

    pub fn undo(&mut self) -> bool {
        self.tree.undo_move()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self.position())
    }

    pub fn status(&self) -> GameStatus {
        game_status(&self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess_errors::ChessError;
    use crate::game_state::chess_types::Color;

    #[test]
    fn initial_string_selects_notation() {
        let fen = Game::from_initial("4k3/8/8/8/8/8/8/4K2R w K - 0 1").expect("fen");
        let dcf = Game::from_initial("Ke1,Rh1,Cg1 : Ke8").expect("piece lists");
        assert_eq!(fen.position().zobrist_key, dcf.position().zobrist_key);
        assert_eq!(
            Game::from_initial("startpos").expect("start").position(),
            &Position::new_game()
        );
    }

    #[test]
    fn plays_and_undoes_moves() {
        let mut game = Game::new();
        game.play_notation("e2e4").expect("legal");
        game.play_notation("e7e5").expect("legal");
        assert_eq!(game.position().side_to_move, Color::White);
        assert!(game.undo());
        assert_eq!(game.position().side_to_move, Color::Black);
        assert!(matches!(
            game.play_notation("e2e4"),
            Err(ChessError::IllegalMove { .. })
        ));
    }

    #[test]
    fn reports_checkmate() {
        let mut game = Game::new();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            game.play_notation(mv).expect("legal");
        }
        assert_eq!(game.status(), GameStatus::BlackWon);
    }
}
