//! UCI protocol front-end and command loop.
//!
//! Parses UCI commands, keeps the current game, runs `go` on a worker thread
//! so `stop` and `isready` are answered while the engine thinks, and writes
//! protocol output through a shared writer.

use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

use crate::chess_errors::ChessResult;
use crate::engines::engine_iterative::IterativeEngine;
use crate::engines::engine_trait::{Engine, EngineConfig, Options};
use crate::engines::game::Game;
use crate::game_state::chess_rules::{is_mate_score, CHECKMATE};
use crate::game_state::chess_types::Color;
use crate::moves::move_descriptions::Move;
use crate::search::iterative_deepening::DepthReport;

pub fn run_stdio_loop(config: EngineConfig) -> io::Result<()> {
    let stdin = io::stdin();
    let mut session = UciSession::new(config, io::stdout());

    for line in stdin.lock().lines() {
        let line = line?;
        if session.handle_command(&line)? {
            return Ok(());
        }
    }

    // Input closed without `quit`.
    session.stop_search();
    Ok(())
}

pub struct UciSession<W: Write + Send + 'static> {
    config: EngineConfig,
    game: Game,
    engine: Option<Box<dyn Engine>>,
    engine_name: String,
    engine_author: String,
    stop_signal: Arc<AtomicBool>,
    search: Option<JoinHandle<Box<dyn Engine>>>,
    out: Arc<Mutex<W>>,
}

impl<W: Write + Send + 'static> UciSession<W> {
    pub fn new(config: EngineConfig, out: W) -> Self {
        let engine: Box<dyn Engine> = Box::new(IterativeEngine::new());
        Self {
            config,
            game: Game::new(),
            engine_name: engine.name().to_owned(),
            engine_author: engine.author().to_owned(),
            stop_signal: engine.stop_signal(),
            engine: Some(engine),
            search: None,
            out: Arc::new(Mutex::new(out)),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Handles one input line; returns true on `quit`.
    pub fn handle_command(&mut self, line: &str) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();
        log::debug!("uci <- {trimmed}");

        match cmd {
            "uci" => {
                let mut out = lock(&self.out);
                writeln!(out, "id name {}", self.engine_name)?;
                writeln!(out, "id author {}", self.engine_author)?;
                writeln!(out, "uciok")?;
                out.flush()?;
            }
            "isready" => {
                let mut out = lock(&self.out);
                writeln!(out, "readyok")?;
                out.flush()?;
            }
            "ucinewgame" => {
                self.wait_for_search();
                self.game.reset();
                if let Some(engine) = self.engine.as_mut() {
                    engine.new_game();
                }
            }
            "position" => {
                self.wait_for_search();
                if let Err(err) = self.handle_position(trimmed) {
                    log::warn!("rejected position command: {err}");
                    let mut out = lock(&self.out);
                    writeln!(out, "info string position error: {err}")?;
                    out.flush()?;
                }
            }
            "go" => {
                self.wait_for_search();
                let options = parse_go_options(trimmed, self.game.position().side_to_move)
                    .or_defaults(&self.config.default_options);
                self.start_search(options);
            }
            "stop" => {
                self.stop_search();
            }
            "quit" => {
                self.stop_search();
                return Ok(true);
            }
            _ => {
                log::warn!("ignoring unsupported command '{trimmed}'");
            }
        }

        Ok(false)
    }

    fn handle_position(&mut self, line: &str) -> ChessResult<()> {
        let body = line.trim_start_matches("position").trim();
        let (setup, moves) = match body.split_once("moves") {
            Some((setup, moves)) => (setup.trim(), moves),
            None => (body, ""),
        };

        let initial = match setup.strip_prefix("fen") {
            Some(fen) => fen.trim(),
            None => setup,
        };
        let mut game = Game::from_initial(initial)?;
        for notation in moves.split_whitespace() {
            game.play_notation(notation)?;
        }

        self.game = game;
        Ok(())
    }

    fn start_search(&mut self, options: Options) {
        let Some(mut engine) = self.engine.take() else {
            return;
        };
        let tree = self.game.tree().clone();
        let out = Arc::clone(&self.out);
        self.stop_signal.store(false, Ordering::Relaxed);

        self.search = Some(thread::spawn(move || {
            let result = engine.choose_move(&tree, &options, &mut |report| {
                let mut out = lock(&out);
                let _ = writeln!(out, "{}", format_info(report));
                let _ = out.flush();
            });

            let best = result
                .best_move
                .map(|mv| mv.to_string())
                .unwrap_or_else(|| Move::NULL.to_string());
            let mut out = lock(&out);
            let _ = writeln!(out, "bestmove {best}");
            let _ = out.flush();
            engine
        }));
    }

    /// Raises the stop flag and waits for `bestmove`.
    pub fn stop_search(&mut self) {
        if self.search.is_some() {
            self.stop_signal.store(true, Ordering::Relaxed);
        }
        self.wait_for_search();
    }

    /// Blocks until a running search has written its `bestmove`.
    pub fn wait_for_search(&mut self) {
        let Some(handle) = self.search.take() else {
            return;
        };
        match handle.join() {
            Ok(engine) => self.engine = Some(engine),
            Err(_) => {
                log::error!("search thread panicked; starting a fresh engine");
                let engine: Box<dyn Engine> = Box::new(IterativeEngine::new());
                self.stop_signal = engine.stop_signal();
                self.engine = Some(engine);
            }
        }
    }
}

fn lock<W>(out: &Mutex<W>) -> MutexGuard<'_, W> {
    out.lock().unwrap_or_else(PoisonError::into_inner)
}

/// `go` arguments; clock fields are taken for `side_to_move` only.
fn parse_go_options(line: &str, side_to_move: Color) -> Options {
    let mut options = Options::default();
    let tokens = line.split_whitespace().collect::<Vec<_>>();
    let value = |i: usize| tokens.get(i + 1).and_then(|x| x.parse::<u64>().ok());
    let (time_key, inc_key) = match side_to_move {
        Color::White => ("wtime", "winc"),
        Color::Black => ("btime", "binc"),
    };

    for (i, &token) in tokens.iter().enumerate() {
        match token {
            "depth" => options.max_depth = value(i).map(|d| d.min(u64::from(u8::MAX)) as u8),
            "nodes" => options.max_nodes = value(i),
            "movetime" => options.move_time_ms = value(i),
            "movestogo" => options.moves_to_go = value(i).map(|n| n.min(u64::from(u16::MAX)) as u16),
            "infinite" => options.infinite = true,
            "ponder" => options.ponder = true,
            t if t == time_key => options.time_left_ms = value(i),
            t if t == inc_key => options.time_inc_ms = value(i),
            _ => {}
        }
    }
    options
}

/// `cp N` or `mate N`, counting full moves and negative when being mated.
pub fn format_score(score: i32) -> String {
    if is_mate_score(score) {
        let moves = if score > 0 {
            (CHECKMATE - score + 1) / 2
        } else {
            -(CHECKMATE + score) / 2
        };
        format!("mate {moves}")
    } else {
        format!("cp {score}")
    }
}

pub fn format_info(report: &DepthReport) -> String {
    let pv = report
        .pv
        .iter()
        .map(|mv| mv.to_string())
        .collect::<Vec<_>>()
        .join(" ");
    format!(
        "info depth {} score {} nodes {} time {} pv {}",
        report.depth,
        format_score(report.score),
        report.nodes,
        report.elapsed.as_millis(),
        pv
    )
}
