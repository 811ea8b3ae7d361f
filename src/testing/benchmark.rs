use std::hint::black_box;
use std::time::{Duration, Instant};

use crate::engine::{scores::Outcome, Engine};
use crate::rules::board::Position;


pub const DEFAULT_SAMPLES: u32 = 100;


pub struct BenchmarkResult {
    pub samples: u32,
    pub outcome: Outcome,
    pub best_move: Option<u8>,
    pub total_time: Duration,
}

impl BenchmarkResult {
    pub fn average_millis(&self) -> f64 {
        if self.samples == 0 {
            return 0.0;
        }
        return self.total_time.as_secs_f64() * 1e3 / self.samples as f64;
    }
}


/// Solves `position` `samples` times over and reports the average time.
pub fn run_benchmark(position: Position, samples: u32) -> BenchmarkResult {
    let samples = samples.max(1);
    let start = Instant::now();
    let mut result = Engine::search(black_box(&position));
    for _ in 1..samples {
        result = Engine::search(black_box(&position));
    }
    let total_time = start.elapsed();
    log::info!("Benchmarked {} searches in {:?}", samples, total_time);
    return BenchmarkResult {
        samples: samples,
        outcome: Outcome::from_relative(result.score, position.get_move_side()),
        best_move: result.best_move,
        total_time: total_time,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_benchmark_reports_draw() {
        let result = run_benchmark(Position::new(), 3);
        assert_eq!(result.samples, 3);
        assert_eq!(result.outcome, Outcome::Draw);
        assert_eq!(result.best_move, Some(0));
        assert!(result.average_millis() >= 0.0);
    }

    #[test]
    fn zero_samples_still_searches_once() {
        let result = run_benchmark(Position::new(), 0);
        assert_eq!(result.samples, 1);
    }
}
