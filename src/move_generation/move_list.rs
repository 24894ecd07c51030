//! Fixed-capacity move buffer with a read cursor.
//!
//! Generation appends at `tail`; consumers walk the list with `next_move`,
//! may drop the move just returned with `remove_current`, and can `reset` the
//! cursor to rescan without regenerating.

use crate::moves::move_descriptions::Move;

/// Capacity of one list. The richest known legal position has 218 moves.
pub const MAX_MOVES: usize = 256;

#[derive(Debug, Clone)]
pub struct MoveList {
    moves: [Move; MAX_MOVES],
    head: usize,
    tail: usize,
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveList {
    pub const fn new() -> Self {
        Self {
            moves: [Move::NULL; MAX_MOVES],
            head: 0,
            tail: 0,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
    }

    #[inline]
    pub fn push(&mut self, mv: Move) {
        debug_assert!(self.tail < MAX_MOVES, "move list overflow");
        if self.tail < MAX_MOVES {
            self.moves[self.tail] = mv;
            self.tail += 1;
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tail
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tail == 0
    }

    #[inline]
    pub fn only_move(&self) -> bool {
        self.tail == 1
    }

    /// Rewinds the cursor to the first move.
    #[inline]
    pub fn reset(&mut self) {
        self.head = 0;
    }

    #[inline]
    pub fn next_move(&mut self) -> Option<Move> {
        if self.head < self.tail {
            let mv = self.moves[self.head];
            self.head += 1;
            Some(mv)
        } else {
            None
        }
    }

    /// Drops the move most recently returned by `next_move`, shifting the rest
    /// down so the following `next_move` yields the move after it.
    pub fn remove_current(&mut self) {
        if self.head == 0 {
            return;
        }
        self.moves.copy_within(self.head..self.tail, self.head - 1);
        self.head -= 1;
        self.tail -= 1;
    }

    /// Moves `mv` to the front, keeping the relative order of the others.
    pub fn move_to_front(&mut self, mv: Move) -> bool {
        match self.as_slice().iter().position(|&m| m == mv) {
            Some(index) => {
                self.moves[..=index].rotate_right(1);
                true
            }
            None => false,
        }
    }

    #[inline]
    pub fn contains(&self, mv: Move) -> bool {
        self.as_slice().contains(&mv)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.tail]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [Move] {
        &mut self.moves[..self.tail]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(moves: &[Move]) -> MoveList {
        let mut list = MoveList::new();
        for &mv in moves {
            list.push(mv);
        }
        list
    }

    #[test]
    fn remove_current_keeps_cursor_in_place() {
        let (a, b, c) = (Move::new(8, 16), Move::new(9, 17), Move::new(10, 18));
        let mut list = list_of(&[a, b, c]);

        assert_eq!(list.next_move(), Some(a));
        assert_eq!(list.next_move(), Some(b));
        list.remove_current();
        assert_eq!(list.next_move(), Some(c));
        assert_eq!(list.next_move(), None);

        list.reset();
        assert_eq!(list.as_slice(), &[a, c]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn filtering_pass_then_rescan() {
        let moves: Vec<Move> = (8..16).map(|sq| Move::new(sq, sq + 8)).collect();
        let mut list = list_of(&moves);
        while let Some(mv) = list.next_move() {
            if mv.from() % 2 == 1 {
                list.remove_current();
            }
        }
        list.reset();
        let kept: Vec<u8> = std::iter::from_fn(|| list.next_move()).map(|m| m.from()).collect();
        assert_eq!(kept, vec![8, 10, 12, 14]);
    }

    #[test]
    fn move_to_front_preserves_order() {
        let (a, b, c) = (Move::new(8, 16), Move::new(9, 17), Move::new(10, 18));
        let mut list = list_of(&[a, b, c]);
        assert!(list.move_to_front(c));
        assert_eq!(list.as_slice(), &[c, a, b]);
        assert!(!list.move_to_front(Move::new(0, 1)));
        assert!(list.contains(b));
    }
}
