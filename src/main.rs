use std::io::Write;

use clap::Parser;

use interface::cli::Interface;
use rules::{board::{squares::label_for_square, Position}, Side};
use testing::benchmark::{run_benchmark, DEFAULT_SAMPLES};

#[macro_use]
extern crate lazy_static;

mod engine;
mod game;
mod interface;
mod rules;
mod testing;
mod util;


#[derive(Parser, Debug)]
#[command(author, version, about = "Perfect-play tic-tac-toe", long_about = None)]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Searches timed by the startup benchmark
    #[arg(short = 'n', long, default_value_t = DEFAULT_SAMPLES)]
    samples: u32,

    /// Skip the startup benchmark
    #[arg(long)]
    no_benchmark: bool,

    /// Worker threads for analysis and perft
    #[arg(short, long, default_value_t = 4)]
    threads: usize,

    /// Let the engine open the game
    #[arg(long)]
    human_second: bool,
}


fn init_logging(debug: bool) {
    let log_level = if debug { "debug" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    );
    builder
        .format(|buf, record| {
            writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
        })
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Stderr)
        .init();
}


fn print_benchmark(samples: u32) {
    let result = run_benchmark(Position::new(), samples);
    println!(
        "Guaranteed outcome with optimal play (1 = Cross, -1 = nought, 0 = draw): {}",
        result.outcome.absolute_score()
    );
    println!("Found in average time out of {} times: {:.2} ms", result.samples, result.average_millis());
    if let Some(square) = result.best_move {
        println!("Best opening move: {}", label_for_square(square));
    }
    println!();
}


fn main() {
    let args = Args::parse();
    init_logging(args.debug);
    log::debug!("Starting with {:?}", args);

    if !args.no_benchmark {
        print_benchmark(args.samples);
    }

    let human_side = match args.human_second {
        true => Side::Nought,
        false => Side::Cross,
    };
    match Interface::new(human_side, args.threads) {
        Ok(mut interface) => interface.init(),
        Err(e) => {
            log::error!("Fatal error: {e}");
            std::process::exit(1);
        }
    }
}
