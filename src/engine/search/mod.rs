pub mod alpha_beta;
pub mod minimax;


/// Score of a position for the side to move and a move achieving it. `best_move`
/// is `None` when the position is already decided.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub score: i8,
    pub best_move: Option<u8>,
}


#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub terminal_nodes: u64,
    pub cutoffs: u64,
}
