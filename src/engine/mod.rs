use std::time::{Duration, Instant};

use crate::rules::board::Position;
use crate::util::concurrency::run_ordered;

use self::scores::Outcome;
use self::search::{alpha_beta::AlphaBetaSearch, minimax::MinimaxSearch, SearchResult, SearchStats};

pub mod scores;
pub mod search;


#[derive(Copy, Clone, Debug)]
pub struct SearchReport {
    pub result: SearchResult,
    pub outcome: Outcome,
    pub stats: SearchStats,
    pub search_time: Duration,
}


#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveAnalysis {
    pub square: u8,
    /// Exact value of the move for the side playing it.
    pub score: i8,
    pub outcome: Outcome,
}


pub struct Engine;

impl Engine {
    pub fn search(position: &Position) -> SearchResult {
        return AlphaBetaSearch::search(position);
    }

    pub fn do_search(position: &Position) -> SearchReport {
        let start = Instant::now();
        let mut stats = SearchStats::default();
        let result = AlphaBetaSearch::search_with_stats(position, &mut stats);
        let report = SearchReport {
            result: result,
            outcome: Outcome::from_relative(result.score, position.get_move_side()),
            stats: stats,
            search_time: start.elapsed(),
        };
        log::debug!(
            "Searched {} nodes ({} cutoffs) in {:?}: score {}, move {:?}",
            stats.nodes, stats.cutoffs, report.search_time, result.score, result.best_move
        );
        return report;
    }

    pub fn search_exhaustive(position: &Position) -> SearchResult {
        return MinimaxSearch::search(position);
    }

    /// Exact value of every legal move, in move order. Root moves are split
    /// across `threads` workers.
    pub fn analyze(position: &Position, threads: usize) -> Vec<MoveAnalysis> {
        let side = position.get_move_side();
        let jobs: Vec<_> = position.legal_moves().into_iter().map(|square| {
            let child = position.apply(square);
            move || {
                let score = -AlphaBetaSearch::search(&child).score;
                MoveAnalysis { square: square, score: score, outcome: Outcome::from_relative(score, side) }
            }
        }).collect();
        return run_ordered(jobs, threads);
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Side;

    #[test]
    fn report_carries_outcome_and_stats() {
        let report = Engine::do_search(&Position::new());
        assert_eq!(report.result.score, 0);
        assert_eq!(report.outcome, Outcome::Draw);
        assert!(report.stats.nodes > 0);
    }

    #[test]
    fn outcome_is_absolute() {
        // Nought to move and lost: cross wins.
        let position = Position::from_notation("XXX|OO-|---").unwrap();
        assert_eq!(Engine::do_search(&position).outcome, Outcome::CrossWins);
        let position = Position::from_notation("X-O|-O-|--X").unwrap();
        assert_eq!(Engine::do_search(&position).outcome.winner(), Some(Side::Cross));
    }

    #[test]
    fn analysis_agrees_with_search() {
        let position = Position::new().apply(4);
        let analysis = Engine::analyze(&position, 3);
        assert_eq!(analysis.iter().map(|a| a.square).collect::<Vec<u8>>(), position.legal_moves());
        let best = analysis.iter().map(|a| a.score).max().unwrap();
        let first_best = analysis.iter().find(|a| a.score == best).map(|a| a.square);
        let result = Engine::search(&position);
        assert_eq!(result.score, best);
        assert_eq!(result.best_move, first_best);
        for a in &analysis {
            let expected = match a.square { 0 | 2 | 6 | 8 => 0, _ => -1 };
            assert_eq!(a.score, expected, "square {}", a.square);
        }
    }

    #[test]
    fn analysis_of_finished_game_is_empty() {
        let position = Position::from_notation("XOX|XOO|OXX").unwrap();
        assert!(Engine::analyze(&position, 2).is_empty());
        assert_eq!(Engine::search_exhaustive(&position).best_move, None);
    }
}
