pub mod concurrency;
pub mod errors;
pub mod notation;
