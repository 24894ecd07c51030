use std::sync::Arc;
use std::thread;

use crate::game_state::position::Position;
use crate::game_state::position_tree::PositionTree;
use crate::move_generation::legal_move_checks::checkers;
use crate::move_generation::legal_move_generator::MoveGenerator;
use crate::move_generation::move_list::MoveList;
use crate::moves::move_descriptions::Move;
use crate::tables::bitboard::count;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub double_checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.double_checks += rhs.double_checks;
        self.checkmates += rhs.checkmates;
    }
}

/// Leaf counts `depth` plies below `position`, walking the tree with
/// make/undo.
pub fn perft<G: MoveGenerator>(generator: &G, position: &Position, depth: u8) -> PerftCounts {
    if depth == 0 {
        return PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        };
    }
    let mut tree = PositionTree::new(*position);
    let mut lists = vec![MoveList::new(); depth as usize];
    let mut total = PerftCounts::default();
    perft_recurse(generator, &mut tree, &mut lists, depth, &mut total);
    total
}

/// Node count only; the counterpart of `perft` used by benches.
pub fn perft_nodes<G: MoveGenerator>(generator: &G, position: &Position, depth: u8) -> u64 {
    perft(generator, position, depth).nodes
}

/// Node counts below each root move, in generation order.
pub fn divide<G: MoveGenerator>(generator: &G, position: &Position, depth: u8) -> Vec<(Move, u64)> {
    let mut root = MoveList::new();
    generator.generate_legal_moves(position, &mut root);
    root.as_slice()
        .iter()
        .map(|&mv| {
            let child = position.make_move(mv);
            (mv, perft_nodes(generator, &child, depth.saturating_sub(1)))
        })
        .collect()
}

/// Splits the root moves over one worker thread each.
pub fn perft_multi_threaded(
    generator: Arc<dyn MoveGenerator>,
    position: &Position,
    depth: u8,
) -> PerftCounts {
    if depth <= 1 {
        return perft(&DynGenerator(generator.as_ref()), position, depth);
    }

    let mut root = MoveList::new();
    generator.generate_legal_moves(position, &mut root);
    let mut handles = Vec::with_capacity(root.len());

    for &mv in root.as_slice() {
        let generator_ref = Arc::clone(&generator);
        let mut tree = PositionTree::new(*position);
        handles.push(thread::spawn(move || {
            let generator = DynGenerator(generator_ref.as_ref());
            let mut lists = vec![MoveList::new(); depth as usize];
            let mut local = PerftCounts::default();
            tree.make_move(mv);
            perft_recurse(&generator, &mut tree, &mut lists[1..], depth - 1, &mut local);
            local
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        match handle.join() {
            Ok(local) => total.merge(local),
            Err(_) => log::error!("perft worker thread panicked"),
        }
    }
    total
}

struct DynGenerator<'a>(&'a dyn MoveGenerator);

impl MoveGenerator for DynGenerator<'_> {
    fn generate_legal_moves(&self, position: &Position, list: &mut MoveList) {
        self.0.generate_legal_moves(position, list);
    }
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    tree: &mut PositionTree,
    lists: &mut [MoveList],
    depth: u8,
    counts: &mut PerftCounts,
) {
    let Some((list, rest)) = lists.split_first_mut() else {
        return;
    };
    generator.generate_legal_moves(tree.current(), list);

    if depth == 1 {
        let position = *tree.current();
        for &mv in list.as_slice() {
            counts.nodes += 1;
            if position.piece_at(mv.to()).is_some() {
                counts.captures += 1;
            }
            if mv.is_en_passant() {
                counts.captures += 1;
                counts.en_passant += 1;
            }
            if mv.is_castle() {
                counts.castles += 1;
            }
            if mv.promotion_piece().is_some() {
                counts.promotions += 1;
            }

            let child = position.make_move(mv);
            let giving = count(checkers(&child));
            if giving > 0 {
                counts.checks += 1;
                if giving > 1 {
                    counts.double_checks += 1;
                }
                let mut replies = MoveList::new();
                generator.generate_legal_moves(&child, &mut replies);
                if replies.is_empty() {
                    counts.checkmates += 1;
                }
            }
        }
        return;
    }

    for index in 0..list.len() {
        let mv = list.as_slice()[index];
        tree.make_move(mv);
        perft_recurse(generator, tree, rest, depth - 1, counts);
        tree.undo_move();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let counts = perft(&LegalMoveGenerator, &Position::new_game(), 0);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn start_position_depth_three_details() {
        let counts = perft(&LegalMoveGenerator, &Position::new_game(), 3);
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 8902,
                captures: 34,
                en_passant: 0,
                castles: 0,
                promotions: 0,
                checks: 12,
                double_checks: 0,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn kiwipete_depth_two_details() {
        let position = Position::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .expect("valid fen");
        let counts = perft(&LegalMoveGenerator, &position, 2);
        assert_eq!(counts.nodes, 2039);
        assert_eq!(counts.captures, 351);
        assert_eq!(counts.en_passant, 1);
        assert_eq!(counts.castles, 91);
        assert_eq!(counts.checks, 3);
    }

    #[test]
    fn divide_sums_to_perft() {
        let position = Position::new_game();
        let split = divide(&LegalMoveGenerator, &position, 3);
        assert_eq!(split.len(), 20);
        assert_eq!(split.iter().map(|(_, n)| n).sum::<u64>(), 8902);
    }

    #[test]
    fn threaded_perft_matches_single_thread() {
        let position = Position::new_game();
        let threaded = perft_multi_threaded(Arc::new(LegalMoveGenerator), &position, 3);
        assert_eq!(threaded, perft(&LegalMoveGenerator, &position, 3));
    }
}
