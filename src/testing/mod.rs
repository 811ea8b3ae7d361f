pub mod benchmark;
pub mod perft;
