use crate::engine::scores::{is_better, BELOW_LOSS};
use crate::rules::board::Position;

use super::{SearchResult, SearchStats};


/// Negamax over the whole tree without pruning. Every child gets an exact
/// score, so this is the reference the pruned search is checked against.
pub struct MinimaxSearch;

impl MinimaxSearch {
    pub fn search(position: &Position) -> SearchResult {
        return Self::search_with_stats(position, &mut Default::default());
    }

    pub fn search_with_stats(position: &Position, stats: &mut SearchStats) -> SearchResult {
        stats.nodes += 1;
        let game_result = position.is_terminal();
        if game_result.decided {
            stats.terminal_nodes += 1;
            return SearchResult { score: game_result.score, best_move: None };
        }

        return position.legal_moves().into_iter().fold(
            SearchResult { score: BELOW_LOSS, best_move: None },
            |best, m| {
                let score = -Self::search_with_stats(&position.apply(m), stats).score;
                match is_better(score, best.score) {
                    true => SearchResult { score: score, best_move: Some(m) },
                    false => best,
                }
            })
    }
}
