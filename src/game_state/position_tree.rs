//! Stack of positions from the game's first move to the current search node.
//!
//! Making a move pushes the successor frame; undoing pops it, so the previous
//! frame (hashes, castling rights, en-passant square) is restored untouched.
//! `root` marks the frame a search started from, so search ply is the distance
//! between the top frame and the root.

use crate::game_state::position::Position;
use crate::moves::move_descriptions::Move;

/// Frames preallocated up front; game history plus search depth rarely exceeds it.
pub const TREE_CAPACITY: usize = 1024;

#[derive(Debug, Clone)]
pub struct PositionTree {
    frames: Vec<Position>,
    root: usize,
}

impl PositionTree {
    pub fn new(position: Position) -> Self {
        let mut frames = Vec::with_capacity(TREE_CAPACITY);
        frames.push(position);
        Self { frames, root: 0 }
    }

    /// Drops every frame and starts over from `position`.
    pub fn reset(&mut self, position: Position) {
        self.frames.clear();
        self.frames.push(position);
        self.root = 0;
    }

    #[inline]
    pub fn current(&self) -> &Position {
        // The tree always holds at least the initial frame.
        &self.frames[self.frames.len() - 1]
    }

    #[inline]
    pub fn make_move(&mut self, mv: Move) -> &Position {
        let next = self.current().make_move(mv);
        self.frames.push(next);
        self.current()
    }

    /// Pops the newest frame. The initial frame is never popped; returns
    /// false when there was nothing to undo.
    #[inline]
    pub fn undo_move(&mut self) -> bool {
        if self.frames.len() <= 1 {
            return false;
        }
        self.frames.pop();
        if self.root >= self.frames.len() {
            self.root = self.frames.len() - 1;
        }
        true
    }

    /// Marks the current frame as the search root.
    #[inline]
    pub fn set_root(&mut self) {
        self.root = self.frames.len() - 1;
    }

    /// Distance from the search root to the current frame.
    #[inline]
    pub fn ply(&self) -> usize {
        self.frames.len() - 1 - self.root
    }

    /// Number of moves played since the initial frame.
    #[inline]
    pub fn game_length(&self) -> usize {
        self.frames.len() - 1
    }

    /// Earlier frames with the current side to move and the same hash,
    /// reachable without crossing an irreversible move.
    pub fn repetitions(&self) -> usize {
        let top = self.frames.len() - 1;
        let hash = self.current().zobrist_key;
        let mut count = 0;
        let mut index = top;
        while index > 0 {
            if !self.frames[index].reversible {
                break;
            }
            index -= 1;
            if (top - index) % 2 == 0 && self.frames[index].zobrist_key == hash {
                count += 1;
            }
        }
        count
    }

    /// Draw by repetition as used inside the search: a single earlier
    /// occurrence is enough.
    #[inline]
    pub fn is_repetition(&self) -> bool {
        self.repetitions() > 0
    }

    /// Threefold repetition for game-status reporting.
    #[inline]
    pub fn is_third_repetition(&self) -> bool {
        self.repetitions() >= 2
    }
}
