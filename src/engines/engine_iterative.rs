use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::engines::engine_trait::{Engine, Options};
use crate::engines::time_management::resolve_limits;
use crate::game_state::position_tree::PositionTree;
use crate::search::board_scoring::MaterialScorer;
use crate::search::iterative_deepening::{iterative_deepening_search, DepthReport, SearchResult};
use crate::search::search_context::SearchContext;

pub struct IterativeEngine {
    scorer: MaterialScorer,
    stop_signal: Arc<AtomicBool>,
}

impl Default for IterativeEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl IterativeEngine {
    pub fn new() -> Self {
        Self {
            scorer: MaterialScorer,
            stop_signal: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Engine for IterativeEngine {
    fn name(&self) -> &str {
        "Kingside"
    }

    fn author(&self) -> &str {
        "the Kingside developers"
    }

    fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_signal)
    }

    fn choose_move(
        &mut self,
        tree: &PositionTree,
        options: &Options,
        report: &mut dyn FnMut(&DepthReport),
    ) -> SearchResult {
        let limits = resolve_limits(options);
        log::info!(
            "search start: depth {} nodes {:?} hard {:?} soft {:?}",
            limits.max_depth,
            limits.max_nodes,
            limits.hard_time,
            limits.soft_time
        );

        let mut context = SearchContext::with_halt(tree.clone(), Arc::clone(&self.stop_signal));
        let result = iterative_deepening_search(&mut context, &self.scorer, limits, report);
        self.stop_signal.store(false, Ordering::Relaxed);

        log::info!(
            "search done: best {} score {} depth {} nodes {} in {} ms",
            result.best_move.map(|mv| mv.to_string()).unwrap_or_else(|| "none".to_owned()),
            result.best_score,
            result.reached_depth,
            result.nodes,
            result.elapsed_ms
        );
        result
    }
}
