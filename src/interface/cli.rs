use std::collections::HashSet;

use rand::Rng;
use tabled::{Style, Table};

use crate::engine::{scores::Outcome, Engine, MoveAnalysis};
use crate::game::{matches::{Match, Player}, Game};
use crate::interface::arguments::{ArgumentParser, ParsedArgs};
use crate::interface::shell::{InteractiveShell, ShellInput};
use crate::rules::board::{squares::{label_for_square, square_from_label}, Position, SquareLabels};
use crate::rules::Side;
use crate::testing::benchmark::{run_benchmark, DEFAULT_SAMPLES};
use crate::testing::perft::PerftRunner;
use crate::util::errors::InputError;


const MOVE_HINT: &str = "Input a move like 3 for top right (or type q to quit)";

const DEFAULT_MATCH_GAMES: u32 = 10;

const HELP: &str = "\
play                         play against the engine, squares 1-9, q to stop
match [<first>] [<second>] [--games <n>]
                             series between human/engine players, random opener
new [--human-second] [--from <position>]
                             start over, optionally from a position like 'X--|-O-|---'
move <1-9>                   play a square, the engine answers
undo                         take back the last move pair
board [--as-text]            show the board
suggest [--exhaustive]       best move for the side to move
analyze                      value of every legal move
bench [--samples <n>]        time the search from the empty board
perft [--threads <n>]        count the game tree from the current position
positions                    count distinct reachable positions
quit                         leave";


fn build_argument_parser() -> Result<ArgumentParser, InputError> {
    let mut builder = ArgumentParser::builder();
    builder.add_subcommand("play");

    builder.add_subcommand("match")
        .add_positional_arg("first", false)?
        .add_positional_arg("second", false)?
        .add_named_arg("games", &["--games", "-g"], false)?;

    builder.add_subcommand("new")
        .add_flag_arg("human_second", &["--human-second"])?
        .add_named_arg("from", &["--from"], false)?;

    builder.add_subcommand("move")
        .add_positional_arg("square", true)?;

    builder.add_subcommand("undo");

    builder.add_subcommand("board")
        .add_flag_arg("as_text", &["--as-text"])?;

    builder.add_subcommand("suggest")
        .add_flag_arg("exhaustive", &["--exhaustive"])?;
    builder.add_subcommand("analyze");

    builder.add_subcommand("bench")
        .add_named_arg("samples", &["--samples", "-n"], false)?;

    builder.add_subcommand("perft")
        .add_named_arg("threads", &["--threads", "-t"], false)?;

    builder.add_subcommand("positions");
    builder.add_subcommand("help");
    builder.add_subcommand("quit");
    builder.add_alias("q", "quit");
    builder.add_alias("exit", "quit");
    return Ok(builder.build());
}


#[derive(Debug, PartialEq, Eq)]
pub enum HumanInput {
    Square(u8),
    Quit,
    Invalid,
}

pub fn parse_human_move(line: &str) -> HumanInput {
    let line = line.trim();
    if line.eq_ignore_ascii_case("q") {
        return HumanInput::Quit;
    }
    return match square_from_label(line) {
        Ok(square) => HumanInput::Square(square),
        Err(_) => HumanInput::Invalid,
    }
}


pub fn result_message(outcome: Outcome, human_side: Side) -> &'static str {
    return match outcome.winner() {
        None => "It's a draw",
        Some(side) if side == human_side => "You won",
        Some(_) => "You lost",
    }
}


pub fn format_analysis(analysis: &[MoveAnalysis]) -> Vec<String> {
    return analysis.iter().map(|a| {
        let verdict = match a.score {
            1 => "wins",
            0 => "draws",
            _ => "loses",
        };
        format!("{} {} ({})", label_for_square(a.square), verdict, a.outcome)
    }).collect();
}


fn show_position(shell: &InteractiveShell, position: &Position) {
    shell.empty_line();
    shell.output(&position.to_string());
    shell.empty_line();
}


/// Prompts until the human enters a free square, `None` if they quit.
fn ask_for_move(shell: &mut InteractiveShell, game: &Game) -> Option<u8> {
    show_position(shell, game.get_position());
    loop {
        let line = shell.input("Your move: ")?;
        match parse_human_move(&line) {
            HumanInput::Quit => return None,
            HumanInput::Invalid => shell.output(MOVE_HINT),
            HumanInput::Square(square) if game.get_position().is_legal_move(square) => return Some(square),
            HumanInput::Square(square) => shell.output(&format!(
                "Square {} is already taken. {}", label_for_square(square), MOVE_HINT
            )),
        }
    }
}


enum PlayEnd {
    Finished,
    Quit,
}


pub struct Interface {
    shell: InteractiveShell,
    game: Game,
    confirmations: HashSet<String>,
    threads: usize,
}

impl Interface {
    pub fn new(human_side: Side, threads: usize) -> Result<Interface, InputError> {
        let prompt = "tictactoe > ";

        return Ok(Interface {
            shell: InteractiveShell::new(Some(prompt), build_argument_parser()?),
            game: Game::new(human_side),
            confirmations: HashSet::from([String::from("y"), String::from("yes")]),
            threads: threads,
        })
    }

    pub fn init(&mut self) {
        self.shell.output("Type 'help' for the list of commands.");
        loop {
            let command = match self.shell.get_command() {
                Err(e) => {
                    log::debug!("Rejected shell input: {:?}", e);
                    self.shell.output(&e.to_string());
                    continue;
                },
                Ok(ShellInput::Exit) => break,
                Ok(ShellInput::Empty) => continue,
                Ok(ShellInput::Command(c)) => c,
            };
            let result = match command.name.as_str() {
                "quit"      => break,
                "play"      => { self.do_play(); Ok(()) },
                "match"     => self.do_match(&command.args),
                "new"       => self.do_new(&command.args),
                "move"      => self.do_move(&command.args),
                "undo"      => { self.do_undo(); Ok(()) },
                "board"     => { self.do_board(&command.args); Ok(()) },
                "suggest"   => { self.do_suggest(&command.args); Ok(()) },
                "analyze"   => { self.do_analyze(); Ok(()) },
                "bench"     => self.do_bench(&command.args),
                "perft"     => self.do_perft(&command.args),
                "positions" => { self.do_positions(); Ok(()) },
                "help"      => { self.do_help(); Ok(()) },
                x => Err(InputError::UnknownCommand(String::from(x))),
            };
            if let Err(e) = result {
                self.shell.output(&e.to_string());
            }
            self.shell.empty_line();
        }
        self.shell.output("Exiting...");
        self.shell.empty_line();
    }

    fn show_board(&self) {
        show_position(&self.shell, self.game.get_position());
    }

    fn confirmed(&mut self, prompt: &str) -> bool {
        return match self.shell.input(prompt) {
            Some(answer) => self.confirmations.contains(&answer.to_lowercase()),
            None => false,
        }
    }

    fn do_play(&mut self) {
        loop {
            if let PlayEnd::Quit = self.play_game() {
                return;
            }
            if !self.confirmed("Play again? (y/n) ") {
                return;
            }
            self.game = Game::new(self.game.get_human_side());
        }
    }

    fn play_game(&mut self) -> PlayEnd {
        self.show_board();
        while !self.game.is_over() {
            if self.game.is_engine_turn() {
                self.play_engine_move();
                continue;
            }
            let line = match self.shell.input("Your move: ") {
                Some(line) => line,
                None => return PlayEnd::Quit,
            };
            match parse_human_move(&line) {
                HumanInput::Quit => return PlayEnd::Quit,
                HumanInput::Invalid => self.shell.output(MOVE_HINT),
                HumanInput::Square(square) => match self.game.make_move(square) {
                    Ok(()) => self.show_board(),
                    Err(e) => self.shell.output(&format!("{}. {}", e, MOVE_HINT)),
                },
            }
        }
        self.show_result();
        return PlayEnd::Finished;
    }

    fn play_engine_move(&mut self) {
        if let Some(report) = self.game.engine_move() {
            if let Some(square) = report.result.best_move {
                self.shell.output(&format!("My move = {}", label_for_square(square)));
            }
            self.show_board();
        }
    }

    fn show_result(&self) {
        if let Some(outcome) = self.game.outcome() {
            self.shell.output(result_message(outcome, self.game.get_human_side()));
        }
    }

    fn do_match(&mut self, args: &ParsedArgs) -> Result<(), InputError> {
        let players = [
            args.get_arg("first").map(str::parse::<Player>).transpose()?.unwrap_or(Player::Human),
            args.get_arg("second").map(str::parse::<Player>).transpose()?.unwrap_or(Player::Engine),
        ];
        let games = args.get_parsed::<u32>("games")?.unwrap_or(DEFAULT_MATCH_GAMES);
        let mut series = Match::new(players);
        let mut rng = rand::rng();
        let shell = &mut self.shell;
        shell.output(&format!("{} against {}, {} games", players[0].value(), players[1].value(), games));
        for _ in 0..games {
            let first = rng.random_range(0..2usize);
            shell.output(&format!("Player {} ({}) opens", first + 1, series.get_players()[first].value()));
            let game = match series.play_game(first, |g| ask_for_move(shell, g)) {
                Some(game) => game,
                None => break,
            };
            show_position(shell, game.get_position());
            shell.output(&format!("\t{}", series.get_tally()));
            shell.empty_line();
        }
        return Ok(());
    }

    fn do_new(&mut self, args: &ParsedArgs) -> Result<(), InputError> {
        let human_side = match args.get_flag("human_second") {
            true => Side::Nought,
            false => Side::Cross,
        };
        let position = match args.get_arg("from") {
            Some(notation) => Position::from_notation(notation)?,
            None => Position::new(),
        };
        self.game = Game::from_position(position, human_side);
        self.shell.output(&format!("New game started, you play {}.", human_side.value()));
        if self.game.is_engine_turn() {
            self.play_engine_move();
        } else {
            self.show_board();
        }
        return Ok(());
    }

    fn do_move(&mut self, args: &ParsedArgs) -> Result<(), InputError> {
        let square = square_from_label(args.get_arg("square").unwrap_or_default())?;
        match self.game.make_move(square) {
            Err(e) => self.shell.output(&e.to_string()),
            Ok(()) => {
                self.show_board();
                if self.game.is_engine_turn() {
                    self.play_engine_move();
                }
                self.show_result();
            }
        }
        return Ok(());
    }

    fn do_undo(&mut self) {
        match self.game.take_back().is_empty() {
            true => self.shell.output("Nothing to take back."),
            false => self.show_board(),
        }
    }

    fn do_board(&self, args: &ParsedArgs) {
        match args.get_flag("as_text") {
            true => self.shell.output(&self.game.get_position().to_notation()),
            false => self.show_board(),
        }
        let history = self.game.get_move_history();
        if !history.is_empty() {
            let moves: Vec<String> = history.iter().map(|m| label_for_square(*m).to_string()).collect();
            self.shell.output(&format!("Moves: {}", moves.join(" ")));
        }
    }

    fn do_suggest(&self, args: &ParsedArgs) {
        if args.get_flag("exhaustive") {
            let result = Engine::search_exhaustive(self.game.get_position());
            let outcome = Outcome::from_relative(result.score, self.game.get_current_turn());
            match result.best_move {
                None => self.shell.output(&format!("The game is over: {}", outcome)),
                Some(square) => self.shell.output(&format!(
                    "Play {}, guaranteed outcome: {} (full tree, no pruning)", label_for_square(square), outcome
                )),
            }
            return;
        }
        let report = self.game.suggest();
        match report.result.best_move {
            None => self.shell.output(&format!("The game is over: {}", report.outcome)),
            Some(square) => self.shell.output(&format!(
                "Play {}, guaranteed outcome: {} ({} nodes in {:?})",
                label_for_square(square), report.outcome, report.stats.nodes, report.search_time
            )),
        }
    }

    fn do_analyze(&self) {
        let analysis = self.game.analyze(self.threads);
        if analysis.is_empty() {
            self.shell.output("The game is over.");
        }
        for line in format_analysis(&analysis) {
            self.shell.output(&line);
        }
    }

    fn do_bench(&self, args: &ParsedArgs) -> Result<(), InputError> {
        let samples = args.get_parsed::<u32>("samples")?.unwrap_or(DEFAULT_SAMPLES);
        self.shell.output("Searching...");
        let result = run_benchmark(Position::new(), samples);
        self.shell.output(&format!(
            "Guaranteed outcome with optimal play (1 = Cross, -1 = nought, 0 = draw): {}",
            result.outcome.absolute_score()
        ));
        self.shell.output(&format!(
            "Found in average time out of {} times: {:.2} ms", result.samples, result.average_millis()
        ));
        if let Some(square) = result.best_move {
            self.shell.output(&format!("Best opening move: {}", label_for_square(square)));
        }
        return Ok(());
    }

    fn do_perft(&self, args: &ParsedArgs) -> Result<(), InputError> {
        let threads = args.get_parsed::<usize>("threads")?.unwrap_or(self.threads);
        let start = std::time::Instant::now();
        let result = PerftRunner::do_threaded_perft(*self.game.get_position(), threads);
        let table = Table::new(result.get_analysis()).with(Style::pseudo_clean());
        self.shell.output(&table.to_string());
        self.shell.output(&format!("Completed in {:?}", start.elapsed()));
        log::info!("Perft with {} threads took {:?}", threads, start.elapsed());
        return Ok(());
    }

    fn do_positions(&self) {
        let count = PerftRunner::count_positions(*self.game.get_position());
        self.shell.output(&format!("Reachable positions:     {}", count.reachable));
        self.shell.output(&format!("Up to rotation/mirror:   {}", count.canonical));
    }

    fn do_help(&self) {
        self.shell.output(HELP);
        self.shell.empty_line();
        self.shell.output(&SquareLabels.to_string());
    }
}
