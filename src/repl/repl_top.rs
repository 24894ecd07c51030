//! Interactive console front-end.
//!
//! Moves typed by the user are answered by the engine straight away; `go`
//! makes the engine play whichever side is to move. The board is printed
//! after every change and a finished game is announced.

use std::io::{self, BufRead, Write};

use chrono::TimeDelta;

use crate::chess_errors::ChessError;
use crate::engines::engine_iterative::IterativeEngine;
use crate::engines::engine_trait::{Engine, EngineConfig};
use crate::engines::game::Game;
use crate::uci::uci_top::format_score;
use crate::utils::render_game_state::render_position;

const PROMPT: &str = "kingside> ";

const HELP: &str = "The commands are:

  exit           Exit the program
  go             Take side and make a move
  help           Display this help
  moves          List the legal moves
  new            Start new game
  undo           Undo last move

To make a move use algebraic notation, for example e2e4, Ng1f3, or e7e8Q
";

pub fn run_repl(config: EngineConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut repl = Repl::new(config);

    writeln!(stdout, "kingside\nType ? for help.\n")?;
    repl.print_board(&mut stdout)?;
    write!(stdout, "{PROMPT}")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;
        if repl.handle_line(&line, &mut stdout)? {
            break;
        }
        write!(stdout, "{PROMPT}")?;
        stdout.flush()?;
    }
    Ok(())
}

pub struct Repl {
    config: EngineConfig,
    game: Game,
    engine: IterativeEngine,
}

impl Repl {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            game: Game::new(),
            engine: IterativeEngine::new(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Handles one input line; returns true when the user asks to leave.
    pub fn handle_line(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let command = line.split_whitespace().next().unwrap_or_default();
        match command {
            "" => {}
            "exit" | "quit" => return Ok(true),
            "help" | "?" => write!(out, "{HELP}")?,
            "go" => {
                if !self.announce_if_over(out)? {
                    self.think(out)?;
                }
            }
            "new" => {
                self.game.reset();
                self.engine.new_game();
                self.print_board(out)?;
            }
            "undo" => {
                if self.game.undo() {
                    self.print_board(out)?;
                }
            }
            "moves" => {
                let moves: Vec<String> = self.game.legal_moves().iter().map(|m| m.to_string()).collect();
                writeln!(out, "{}", moves.join(" "))?;
            }
            notation => self.play_user_move(notation, out)?,
        }
        Ok(false)
    }

    fn play_user_move(&mut self, notation: &str, out: &mut impl Write) -> io::Result<()> {
        if self.announce_if_over(out)? {
            return Ok(());
        }
        match self.game.play_notation(notation) {
            Ok(_) => {
                self.print_board(out)?;
                if !self.announce_if_over(out)? {
                    self.think(out)?;
                }
            }
            Err(ChessError::IllegalMove { notation, legal_moves }) => {
                writeln!(
                    out,
                    "{notation} appears to be an invalid move; valid moves are {}",
                    legal_moves.join(" ")
                )?;
            }
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(())
    }

    /// Lets the engine move for the side to move.
    fn think(&mut self, out: &mut impl Write) -> io::Result<()> {
        let options = self.config.default_options;
        let result = self.engine.choose_move(self.game.tree(), &options, &mut |report| {
            log::debug!(
                "depth {} score {} nodes {}",
                report.depth,
                format_score(report.score),
                report.nodes
            );
        });

        if let Some(mv) = result.best_move {
            self.game.play(mv);
            writeln!(
                out,
                "kingside's move: {mv} (depth {}, score {}, {})\n",
                result.reached_depth,
                format_score(result.best_score),
                format_elapsed(result.elapsed_ms)
            )?;
            self.print_board(out)?;
            self.announce_if_over(out)?;
        }
        Ok(())
    }

    fn print_board(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{}", render_position(self.game.position(), self.config.fancy))
    }

    fn announce_if_over(&self, out: &mut impl Write) -> io::Result<bool> {
        let status = self.game.status();
        if status.is_over() {
            writeln!(out, "{status}")?;
        }
        Ok(status.is_over())
    }
}

/// `MM:SS.mmm` for a search duration.
pub fn format_elapsed(elapsed_ms: u64) -> String {
    let delta = TimeDelta::milliseconds(i64::try_from(elapsed_ms).unwrap_or(i64::MAX));
    format!(
        "{:02}:{:02}.{:03}",
        delta.num_minutes(),
        delta.num_seconds() % 60,
        delta.num_milliseconds() % 1000
    )
}
