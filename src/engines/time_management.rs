//! Per-move time budgeting.
//!
//! Front-ends pass raw clock data; the engine decides how much of it to spend.

use std::time::Duration;

use crate::engines::engine_trait::Options;
use crate::game_state::chess_rules::MAX_DEPTH;
use crate::search::search_context::SearchLimits;

/// Moves assumed left until the next time control when none is given.
pub const DEFAULT_MOVES_TO_GO: u64 = 40;

pub fn resolve_limits(options: &Options) -> SearchLimits {
    let mut limits = SearchLimits {
        max_depth: options.max_depth.unwrap_or(MAX_DEPTH).clamp(1, MAX_DEPTH),
        max_nodes: options.max_nodes,
        hard_time: None,
        soft_time: None,
    };
    if options.infinite {
        return limits;
    }

    if let Some(move_time) = options.move_time_ms {
        let exact = Duration::from_millis(move_time.max(1));
        limits.hard_time = Some(exact);
        limits.soft_time = Some(exact);
    } else if let Some(time_left) = options.time_left_ms {
        let budget = clock_budget_ms(time_left, options.time_inc_ms, options.moves_to_go);
        limits.hard_time = Some(Duration::from_millis(budget));
        limits.soft_time = Some(Duration::from_millis(budget / 2));
    }
    limits
}

/// `time_left / moves_to_go + 3/4 increment`, never above a quarter of the
/// remaining clock.
fn clock_budget_ms(time_left_ms: u64, inc_ms: Option<u64>, moves_to_go: Option<u16>) -> u64 {
    let moves_to_go = moves_to_go.map_or(DEFAULT_MOVES_TO_GO, |n| u64::from(n.max(1)));
    let base = time_left_ms / moves_to_go;
    let inc_bonus = inc_ms.unwrap_or(0).saturating_mul(3) / 4;
    let cap = (time_left_ms / 4).max(1);
    base.saturating_add(inc_bonus).clamp(1, cap)
}
