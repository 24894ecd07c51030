//! Iterative deepening search with negamax alpha-beta pruning.
//!
//! Each depth runs a full fail-hard alpha-beta search from the root with a
//! capture quiescence search at the horizon. The root move list is generated
//! once and reused by every iteration, with the previous best move searched
//! first. When the search is halted mid-iteration, the result of the last
//! completed depth stands.

use std::cmp::Reverse;
use std::time::Duration;

use crate::game_state::chess_rules::{is_mate_score, CHECKMATE, FIFTY_MOVE_HALFMOVES, MAX_DEPTH, MAX_PLY};
use crate::game_state::{chess_types::*, position::Position};
use crate::move_generation::legal_move_checks::checkers;
use crate::move_generation::legal_move_generator::{generate_legal_captures, generate_legal_moves};
use crate::move_generation::move_list::MoveList;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, MaterialScorer};
use crate::search::search_context::{SearchContext, SearchLimits};

/// Wider than any reachable score.
pub const INFINITY: i32 = CHECKMATE + 1;

/// Progress record emitted after every completed depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthReport {
    pub depth: u8,
    pub score: i32,
    pub nodes: u64,
    pub elapsed: Duration,
    pub pv: Vec<Move>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub reached_depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
    pub pv: Vec<Move>,
}

struct RootOutcome {
    best: Option<(Move, i32)>,
    complete: bool,
}

pub fn iterative_deepening_search<S: BoardScorer>(
    context: &mut SearchContext,
    scorer: &S,
    limits: SearchLimits,
    report: &mut dyn FnMut(&DepthReport),
) -> SearchResult {
    context.begin(&limits);
    let root = *context.tree.current();
    let mut result = SearchResult::default();

    let mut root_moves = MoveList::new();
    generate_legal_moves(&root, &mut root_moves);
    order_moves(&root, root_moves.as_mut_slice());
    log::debug!("searching {} root moves", root_moves.len());

    if root_moves.is_empty() {
        context.nodes = 1;
        result.best_score = terminal_score(&root, 0);
        result.nodes = 1;
        return result;
    }

    if root_moves.only_move() {
        let only = root_moves.as_slice()[0];
        log::debug!("single legal reply {only}");
        result.best_move = Some(only);
        result.best_score = scorer.score(&root.make_move(only)).saturating_neg();
        result.pv = vec![only];
        return result;
    }

    let max_depth = limits.max_depth.clamp(1, MAX_DEPTH);
    for depth in 1..=max_depth {
        if depth > 1 && limits.soft_time.is_some_and(|soft| context.elapsed() >= soft) {
            log::debug!("soft time limit reached before depth {depth}");
            break;
        }

        let outcome = search_root(context, scorer, &mut root_moves, depth);
        let Some((best_move, score)) = outcome.best.filter(|_| outcome.complete) else {
            if result.best_move.is_none() {
                // Halted inside the first iteration: take what it found.
                let (mv, score) = outcome
                    .best
                    .unwrap_or((root_moves.as_slice()[0], 0));
                result.best_move = Some(mv);
                result.best_score = score;
                result.pv = vec![mv];
            }
            break;
        };

        result.best_move = Some(best_move);
        result.best_score = score;
        result.reached_depth = depth;
        result.pv = context.principal_variation().to_vec();
        root_moves.move_to_front(best_move);

        report(&DepthReport {
            depth,
            score,
            nodes: context.nodes,
            elapsed: context.elapsed(),
            pv: result.pv.clone(),
        });

        if is_mate_score(score) && score > 0 {
            break;
        }
    }

    result.nodes = context.nodes;
    result.elapsed_ms = context.elapsed().as_millis() as u64;
    result
}

/// Fixed-depth search of `position` with the default scorer and no report.
pub fn search_position(position: &Position, depth: u8) -> SearchResult {
    let mut context = SearchContext::new(*position);
    iterative_deepening_search(&mut context, &MaterialScorer, SearchLimits::depth(depth), &mut |_| {})
}

fn search_root<S: BoardScorer>(
    context: &mut SearchContext,
    scorer: &S,
    root_moves: &mut MoveList,
    depth: u8,
) -> RootOutcome {
    let mut alpha = -INFINITY;
    let beta = INFINITY;
    let mut best = None;
    context.clear_pv(0);

    for index in 0..root_moves.len() {
        let mv = root_moves.as_slice()[index];
        context.tree.make_move(mv);
        let score = negamax(context, scorer, depth - 1, -beta, -alpha);
        context.tree.undo_move();

        let Some(score) = score else {
            return RootOutcome {
                best,
                complete: false,
            };
        };
        let score = -score;
        if score > alpha {
            alpha = score;
            best = Some((mv, score));
            context.update_pv(0, mv);
        }
    }

    RootOutcome {
        best,
        complete: true,
    }
}

/// Score of the current frame from the mover's side, or `None` once halted.
fn negamax<S: BoardScorer>(
    context: &mut SearchContext,
    scorer: &S,
    depth: u8,
    mut alpha: i32,
    beta: i32,
) -> Option<i32> {
    if context.visit_node() {
        return None;
    }
    let ply = context.tree.ply();
    context.clear_pv(ply);

    if context.tree.is_repetition() {
        return Some(0);
    }
    if depth == 0 {
        return quiescence(context, scorer, alpha, beta);
    }

    let position = *context.tree.current();
    if ply >= MAX_PLY {
        return Some(scorer.score(&position));
    }

    generate_legal_moves(&position, &mut context.lists[ply]);
    if context.lists[ply].is_empty() {
        return Some(terminal_score(&position, ply));
    }
    if position.halfmove_clock >= FIFTY_MOVE_HALFMOVES {
        return Some(0);
    }
    order_moves(&position, context.lists[ply].as_mut_slice());

    for index in 0..context.lists[ply].len() {
        let mv = context.lists[ply].as_slice()[index];
        context.tree.make_move(mv);
        let score = negamax(context, scorer, depth - 1, -beta, -alpha);
        context.tree.undo_move();

        let score = -score?;
        if score >= beta {
            return Some(beta);
        }
        if score > alpha {
            alpha = score;
            context.update_pv(ply, mv);
        }
    }

    Some(alpha)
}

/// Captures and promotions only, standing pat on the static score. In check
/// every evasion is searched and no stand-pat is allowed.
fn quiescence<S: BoardScorer>(
    context: &mut SearchContext,
    scorer: &S,
    mut alpha: i32,
    beta: i32,
) -> Option<i32> {
    if context.visit_node() {
        return None;
    }
    let ply = context.tree.ply();
    context.clear_pv(ply);

    let position = *context.tree.current();
    if ply >= MAX_PLY {
        return Some(scorer.score(&position));
    }

    let in_check = checkers(&position) != 0;
    if !in_check {
        let stand_pat = scorer.score(&position);
        if stand_pat >= beta {
            return Some(beta);
        }
        alpha = alpha.max(stand_pat);
    }

    generate_legal_captures(&position, &mut context.lists[ply]);
    if in_check && context.lists[ply].is_empty() {
        return Some(-CHECKMATE + ply as i32);
    }
    order_moves(&position, context.lists[ply].as_mut_slice());

    for index in 0..context.lists[ply].len() {
        let mv = context.lists[ply].as_slice()[index];
        context.tree.make_move(mv);
        let score = quiescence(context, scorer, -beta, -alpha);
        context.tree.undo_move();

        let score = -score?;
        if score >= beta {
            return Some(beta);
        }
        if score > alpha {
            alpha = score;
            context.update_pv(ply, mv);
        }
    }

    Some(alpha)
}

/// Checkmate (mate distance from the root) or stalemate for a node with no moves.
fn terminal_score(position: &Position, ply: usize) -> i32 {
    if checkers(position) != 0 {
        -CHECKMATE + ply as i32
    } else {
        0
    }
}

/// Most valuable victim first, cheapest attacker breaking ties; promotions
/// rank by the new piece.
pub fn order_moves(position: &Position, moves: &mut [Move]) {
    moves.sort_unstable_by_key(|&mv| Reverse(move_order_key(position, mv)));
}

fn move_order_key(position: &Position, mv: Move) -> i32 {
    let victim = if mv.is_en_passant() {
        Some(PieceKind::Pawn)
    } else {
        position.piece_at(mv.to()).kind()
    };

    let mut key = 0;
    if let Some(victim) = victim {
        let attacker = position.piece_at(mv.from()).kind().unwrap_or(PieceKind::Pawn);
        key += 8 * MaterialScorer::piece_value(victim) + 6 - attacker.index() as i32;
    }
    if let Some(promotion) = mv.promotion_piece() {
        key += MaterialScorer::piece_value(promotion);
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::has_legal_move;

    fn position(fen: &str) -> Position {
        Position::from_fen(fen).expect("valid fen")
    }

    #[test]
    fn prefers_winning_capture() {
        let result = search_position(&position("4k3/8/8/8/8/8/4q3/4KQ2 w - - 0 1"), 2);
        assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("f1e2"));
    }

    #[test]
    fn finds_mate_in_one() {
        let p = position("6k1/5Q2/6K1/8/8/8/8/8 w - - 0 1");
        let result = search_position(&p, 3);
        let best = result.best_move.expect("a move");
        assert!(!has_legal_move(&p.make_move(best)), "{best} should mate");
        assert_eq!(result.best_score, CHECKMATE - 1);
        assert_eq!(result.reached_depth, 1);
    }

    #[test]
    fn checkmated_root_scores_mate_sentinel() {
        let p = position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        let result = search_position(&p, 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.best_score, -CHECKMATE);
    }

    #[test]
    fn stalemated_root_scores_zero() {
        let result = search_position(&position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), 3);
        assert_eq!(result.best_move, None);
        assert_eq!(result.best_score, 0);
    }

    #[test]
    fn shorter_mate_scores_higher() {
        assert!(-terminal_score_at(1) > -terminal_score_at(3));
    }

    fn terminal_score_at(ply: usize) -> i32 {
        terminal_score(&position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"), ply)
    }

    #[test]
    fn single_reply_returns_without_searching() {
        // Rook h1 and bishop d4 both check the king on a1; only a2 is free.
        let p = position("7k/8/8/8/3b4/8/8/K6r w - - 0 1");
        let result = search_position(&p, 5);
        assert_eq!(result.best_move.map(|m| m.to_string()).as_deref(), Some("a1a2"));
        assert_eq!(result.reached_depth, 0);
    }

    #[test]
    fn reports_every_completed_depth() {
        let mut context = SearchContext::new(Position::new_game());
        let mut depths = Vec::new();
        let result = iterative_deepening_search(
            &mut context,
            &MaterialScorer,
            SearchLimits::depth(3),
            &mut |report| depths.push(report.depth),
        );
        assert_eq!(depths, vec![1, 2, 3]);
        assert_eq!(result.reached_depth, 3);
        assert!(!result.pv.is_empty());
    }

    #[test]
    fn node_limit_keeps_last_completed_depth() {
        let mut context = SearchContext::new(Position::new_game());
        let limits = SearchLimits {
            max_nodes: Some(2_000),
            ..SearchLimits::depth(20)
        };
        let result = iterative_deepening_search(&mut context, &MaterialScorer, limits, &mut |_| {});
        assert!(result.best_move.is_some());
        assert!(result.reached_depth < 20);
        assert!(context.is_halted());
    }

    #[test]
    fn pre_set_halt_still_yields_a_move() {
        let mut context = SearchContext::new(Position::new_game());
        context.request_halt();
        let result =
            iterative_deepening_search(&mut context, &MaterialScorer, SearchLimits::depth(6), &mut |_| {});
        assert!(result.best_move.is_some());
        assert!(result.reached_depth <= 1);
    }

    #[test]
    fn mvv_lva_puts_queen_capture_first() {
        let p = position("4k3/8/8/3q4/4P3/8/1n6/R3K3 w - - 0 1");
        let mut moves = crate::move_generation::legal_move_generator::legal_moves(&p);
        order_moves(&p, &mut moves);
        assert_eq!(moves[0].to_string(), "e4d5");
    }
}
