use crate::engine::scores::{is_better, BELOW_LOSS, LOSS, WIN};
use crate::rules::board::Position;

use super::{SearchResult, SearchStats};


/// Negamax with alpha-beta pruning. Scores are relative to the side to move,
/// and the first move reaching the best score is kept.
pub struct AlphaBetaSearch;

impl AlphaBetaSearch {
    pub fn search(position: &Position) -> SearchResult {
        return Self::search_window(position, LOSS, WIN, &mut Default::default());
    }

    pub fn search_with_stats(position: &Position, stats: &mut SearchStats) -> SearchResult {
        return Self::search_window(position, LOSS, WIN, stats);
    }

    pub fn search_window(position: &Position, mut lower: i8, upper: i8, stats: &mut SearchStats) -> SearchResult {
        stats.nodes += 1;
        let game_result = position.is_terminal();
        if game_result.decided {
            stats.terminal_nodes += 1;
            return SearchResult { score: game_result.score, best_move: None };
        }

        let mut best_score = BELOW_LOSS;
        let mut best_move: Option<u8> = None;
        for m in position.legal_moves() {
            let score = -Self::search_window(&position.apply(m), -upper, -lower, stats).score;
            if is_better(score, best_score) {
                best_score = score;
                best_move = Some(m);
            }
            lower = lower.max(score);
            if lower >= upper {
                stats.cutoffs += 1;
                break;
            }
        }
        return SearchResult { score: best_score, best_move: best_move };
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::search::minimax::MinimaxSearch;
    use crate::rules::board::squares::Symmetry;

    fn position(notation: &str) -> Position {
        return Position::from_notation(notation).unwrap();
    }

    fn for_each_reachable<F>(position: Position, f: &mut F) where F: FnMut(&Position) {
        f(&position);
        if position.is_terminal().decided {
            return;
        }
        for m in position.legal_moves() {
            for_each_reachable(position.apply(m), f);
        }
    }

    #[test]
    fn empty_board_is_a_draw() {
        let result = AlphaBetaSearch::search(&Position::new());
        assert_eq!(result.score, 0);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn first_of_equal_moves_is_chosen() {
        // Every opening draws, so the lowest square wins the tie.
        assert_eq!(AlphaBetaSearch::search(&Position::new()).best_move, Some(0));
    }

    #[test]
    fn tie_break_after_centre_opening() {
        // Corners draw for nought, edges lose; square 0 is the first drawing reply.
        let after_centre = Position::new().apply(4);
        let result = AlphaBetaSearch::search(&after_centre);
        assert_eq!(result, SearchResult { score: 0, best_move: Some(0) });
        let drawing: Vec<u8> = after_centre.legal_moves().into_iter()
            .filter(|m| -MinimaxSearch::search(&after_centre.apply(*m)).score == 0)
            .collect();
        assert_eq!(drawing, vec![0, 2, 6, 8]);
    }

    #[test]
    fn completes_own_line() {
        let result = AlphaBetaSearch::search(&position("XX-|OO-|---"));
        assert_eq!(result, SearchResult { score: 1, best_move: Some(2) });
    }

    #[test]
    fn blocks_opponent_line() {
        // Nought to move must take square 2 or lose.
        let result = AlphaBetaSearch::search(&position("XX-|-O-|---"));
        assert_eq!(result.best_move, Some(2));
        assert!(result.score >= 0);
    }

    #[test]
    fn terminal_position_has_no_move() {
        let won = position("XXX|OO-|---");
        assert_eq!(AlphaBetaSearch::search(&won), SearchResult { score: -1, best_move: None });
        let drawn = position("XOX|XOO|OXX");
        assert_eq!(AlphaBetaSearch::search(&drawn), SearchResult { score: 0, best_move: None });
    }

    #[test]
    fn fork_is_found() {
        // Square 6 blocks nought's diagonal and threatens both 3 and 7.
        let result = AlphaBetaSearch::search(&position("X-O|-O-|--X"));
        assert_eq!(result, SearchResult { score: 1, best_move: Some(6) });
    }

    #[test]
    fn edge_reply_avoids_fork() {
        let result = AlphaBetaSearch::search(&position("X--|-O-|--X"));
        assert_eq!(result, SearchResult { score: 0, best_move: Some(1) });
    }

    #[test]
    fn matches_unpruned_search_on_every_reachable_position() {
        let mut checked = 0u32;
        for_each_reachable(Position::new(), &mut |p| {
            let pruned = AlphaBetaSearch::search(p);
            let full = MinimaxSearch::search(p);
            assert_eq!(pruned.score, full.score, "score mismatch on {}", p.to_notation());
            assert_eq!(pruned.best_move, full.best_move, "move mismatch on {}", p.to_notation());
            if let Some(m) = pruned.best_move {
                assert_eq!(-MinimaxSearch::search(&p.apply(m)).score, pruned.score);
            }
            checked += 1;
        });
        assert_eq!(checked, 549_946);
    }

    #[test]
    fn terminal_scores_are_returned_unchanged() {
        for_each_reachable(Position::new(), &mut |p| {
            let game_result = p.is_terminal();
            if game_result.decided {
                assert_eq!(AlphaBetaSearch::search(p).score, game_result.score);
            }
        });
    }

    #[test]
    fn opening_values_are_symmetric() {
        let values: Vec<i8> = (0u8..9).map(|m| -AlphaBetaSearch::search(&Position::new().apply(m)).score).collect();
        for m in 0u8..9 {
            for symmetry in Symmetry::all() {
                let transformed = Position::new().apply(m).transformed(symmetry);
                assert_eq!(-AlphaBetaSearch::search(&transformed).score, values[m as usize]);
            }
        }
        assert!(values.iter().all(|v| *v == 0));
    }

    #[test]
    fn forced_openings_draw_under_optimal_play() {
        for opening in [0u8, 4] {
            let mut position = Position::new().apply(opening);
            while !position.is_terminal().decided {
                let result = AlphaBetaSearch::search(&position);
                position = position.apply(result.best_move.unwrap());
            }
            assert_eq!(position.winner(), None);
            assert_eq!(position.get_ply(), 9);
        }
    }

    #[test]
    fn pruning_visits_fewer_nodes() {
        let mut stats = SearchStats::default();
        AlphaBetaSearch::search_with_stats(&Position::new(), &mut stats);
        assert!(stats.nodes < 549_946);
        assert!(stats.cutoffs > 0);
        assert!(stats.terminal_nodes <= stats.nodes);
    }
}
