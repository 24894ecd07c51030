//! Engine abstraction layer used by the UCI and REPL front-ends.
//!
//! Front-ends translate their input into an `Options` budget; the engine
//! turns the budget into search limits, runs the search and hands back the
//! result. Progress is streamed through a callback so each front-end can
//! print it in its own format.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::game_state::position_tree::PositionTree;
use crate::search::iterative_deepening::{DepthReport, SearchResult};

/// Search budget for one move. Clock fields are those of the side to move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub ponder: bool,
    pub infinite: bool,
    pub max_depth: Option<u8>,
    pub max_nodes: Option<u64>,
    pub move_time_ms: Option<u64>,
    pub moves_to_go: Option<u16>,
    pub time_left_ms: Option<u64>,
    pub time_inc_ms: Option<u64>,
}

impl Options {
    /// True when any field bounds the search.
    pub fn has_limits(&self) -> bool {
        self.infinite
            || self.max_depth.is_some()
            || self.max_nodes.is_some()
            || self.move_time_ms.is_some()
            || self.time_left_ms.is_some()
    }

    /// `self` when it bounds the search, otherwise `defaults`.
    pub fn or_defaults(self, defaults: &Options) -> Options {
        if self.has_limits() {
            self
        } else {
            Options {
                ponder: self.ponder,
                ..*defaults
            }
        }
    }
}

/// Configuration shared by the front-ends, built from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub default_options: Options,
    /// Unicode piece glyphs in board diagrams.
    pub fancy: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_options: Options {
                move_time_ms: Some(5_000),
                ..Options::default()
            },
            fancy: false,
        }
    }
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn author(&self) -> &str;

    fn new_game(&mut self) {}

    /// Flag that, once raised, makes the running search return.
    fn stop_signal(&self) -> Arc<AtomicBool>;

    fn choose_move(
        &mut self,
        tree: &PositionTree,
        options: &Options,
        report: &mut dyn FnMut(&DepthReport),
    ) -> SearchResult;
}
