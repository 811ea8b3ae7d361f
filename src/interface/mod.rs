pub mod arguments;
pub mod cli;
pub mod shell;
