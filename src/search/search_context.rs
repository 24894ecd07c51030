//! Per-search state owned by the caller.
//!
//! The context holds the position tree, one move list per ply, the principal
//! variation table, the node counter and the halting inputs. Nothing here is
//! global: two contexts can search independent games side by side, sharing
//! only the read-only attack tables.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::game_state::chess_rules::MAX_PLY;
use crate::game_state::position::Position;
use crate::game_state::position_tree::PositionTree;
use crate::move_generation::move_list::MoveList;
use crate::moves::move_descriptions::Move;

/// Nodes between checks of the stop flag and the clock.
const HALT_CHECK_INTERVAL: u64 = 64;

/// Limits applied to a single `iterative_deepening_search` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub max_depth: u8,
    pub max_nodes: Option<u64>,
    /// Abort the running iteration once this much time has passed.
    pub hard_time: Option<Duration>,
    /// Do not start another iteration once this much time has passed.
    pub soft_time: Option<Duration>,
}

impl SearchLimits {
    pub const fn depth(max_depth: u8) -> Self {
        Self {
            max_depth,
            max_nodes: None,
            hard_time: None,
            soft_time: None,
        }
    }
}

pub struct SearchContext {
    pub tree: PositionTree,
    pub(crate) lists: Vec<MoveList>,
    pub(crate) pv: Vec<Vec<Move>>,
    pub nodes: u64,
    halt: Arc<AtomicBool>,
    halted: bool,
    started: Instant,
    hard_deadline: Option<Instant>,
    max_nodes: Option<u64>,
}

impl SearchContext {
    pub fn new(position: Position) -> Self {
        Self::with_halt(PositionTree::new(position), Arc::new(AtomicBool::new(false)))
    }

    /// Context searching from the last frame of `tree`, whose earlier frames
    /// count for repetitions, with a stop flag shared with another thread.
    pub fn with_halt(tree: PositionTree, halt: Arc<AtomicBool>) -> Self {
        Self {
            tree,
            lists: vec![MoveList::new(); MAX_PLY + 1],
            pv: (0..=MAX_PLY).map(|_| Vec::with_capacity(MAX_PLY)).collect(),
            nodes: 0,
            halt,
            halted: false,
            started: Instant::now(),
            hard_deadline: None,
            max_nodes: None,
        }
    }

    /// Handle another thread uses to stop the search.
    pub fn halt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.halt)
    }

    pub fn request_halt(&self) {
        self.halt.store(true, Ordering::Relaxed);
    }

    /// Starts the clock and node budget for a new search from the current frame.
    pub(crate) fn begin(&mut self, limits: &SearchLimits) {
        self.tree.set_root();
        self.nodes = 0;
        self.halted = false;
        self.started = Instant::now();
        self.hard_deadline = limits.hard_time.map(|budget| self.started + budget);
        self.max_nodes = limits.max_nodes;
        for line in &mut self.pv {
            line.clear();
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Counts a node and reports whether the search must unwind. The flag
    /// and the clock are only read every `HALT_CHECK_INTERVAL` nodes; once
    /// set, the halt stays set until the next `begin`.
    pub(crate) fn visit_node(&mut self) -> bool {
        self.nodes += 1;
        if self.halted {
            return true;
        }
        if self.max_nodes.is_some_and(|limit| self.nodes >= limit) {
            self.halted = true;
        } else if self.nodes % HALT_CHECK_INTERVAL == 0 {
            self.halted = self.halt.load(Ordering::Relaxed)
                || self.hard_deadline.is_some_and(|deadline| Instant::now() >= deadline);
        }
        if self.halted {
            log::debug!("search halted after {} nodes", self.nodes);
        }
        self.halted
    }

    /// Records `mv` followed by the child's line as the variation at `ply`.
    pub(crate) fn update_pv(&mut self, ply: usize, mv: Move) {
        let (head, tail) = self.pv.split_at_mut(ply + 1);
        let line = &mut head[ply];
        line.clear();
        line.push(mv);
        if let Some(child) = tail.first() {
            line.extend_from_slice(child);
        }
    }

    pub(crate) fn clear_pv(&mut self, ply: usize) {
        if let Some(line) = self.pv.get_mut(ply) {
            line.clear();
        }
    }

    /// Best line found by the last completed root search.
    pub fn principal_variation(&self) -> &[Move] {
        &self.pv[0]
    }
}
