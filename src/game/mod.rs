pub mod matches;

use crate::engine::{scores::Outcome, Engine, MoveAnalysis, SearchReport};
use crate::rules::{board::{squares::{label_for_square, SQUARE_COUNT}, Position}, Side};
use crate::util::errors::{MoveError, ValueError};


pub struct Game {
    start: Position,
    position: Position,
    move_history: Vec<u8>,
    human_side: Side,
}

impl Game {
    pub fn new(human_side: Side) -> Self {
        return Self::from_position(Position::new(), human_side);
    }

    pub fn from_position(position: Position, human_side: Side) -> Self {
        return Self {
            start: position,
            position: position,
            move_history: Vec::new(),
            human_side: human_side,
        }
    }

    pub fn get_position(&self) -> &Position {
        return &self.position;
    }

    pub fn get_human_side(&self) -> Side {
        return self.human_side;
    }

    pub fn get_move_history(&self) -> &[u8] {
        return &self.move_history;
    }

    pub fn get_current_turn(&self) -> Side {
        return self.position.get_move_side();
    }

    pub fn is_engine_turn(&self) -> bool {
        return !self.is_over() && self.position.get_move_side() != self.human_side;
    }

    pub fn is_over(&self) -> bool {
        return self.position.is_terminal().decided;
    }

    /// Final result once the game is decided.
    pub fn outcome(&self) -> Option<Outcome> {
        let game_result = self.position.is_terminal();
        return match game_result.decided {
            true => Some(Outcome::from_relative(game_result.score, self.position.get_move_side())),
            false => None,
        }
    }

    pub fn make_move(&mut self, square: u8) -> Result<(), MoveError> {
        if self.is_over() {
            return Err(MoveError::GameOver);
        }
        if square >= SQUARE_COUNT {
            return Err(MoveError::Label(ValueError::SquareLabel((square as u16 + 1).to_string())));
        }
        if !self.position.is_legal_move(square) {
            return Err(MoveError::Occupied(label_for_square(square)));
        }
        self.position = self.position.apply(square);
        self.move_history.push(square);
        log::debug!("{} played {}", self.position.get_move_side().swap().value(), label_for_square(square));
        return Ok(());
    }

    /// Searches the current position and plays the best move.
    pub fn engine_move(&mut self) -> Option<SearchReport> {
        if self.is_over() {
            return None;
        }
        let report = Engine::do_search(&self.position);
        let square = report.result.best_move?;
        self.position = self.position.apply(square);
        self.move_history.push(square);
        return Some(report);
    }

    pub fn suggest(&self) -> SearchReport {
        return Engine::do_search(&self.position);
    }

    pub fn analyze(&self, threads: usize) -> Vec<MoveAnalysis> {
        return Engine::analyze(&self.position, threads);
    }

    /// Takes back the last move by replaying the rest of the history.
    pub fn undo(&mut self) -> Option<u8> {
        let last = self.move_history.pop()?;
        self.position = self.move_history.iter().fold(self.start, |p, m| p.apply(*m));
        return Some(last);
    }

    /// Takes back moves until the human is to move again, newest first. The
    /// engine's opening move stays on the board if the human has not moved yet.
    pub fn take_back(&mut self) -> Vec<u8> {
        let start_ply = self.start.get_ply();
        let last_human_move = (0..self.move_history.len()).rev()
            .find(|k| Side::from_ply(start_ply + *k as u8) == self.human_side);
        let keep = match last_human_move {
            Some(k) => k,
            None => return Vec::new(),
        };
        let mut taken = Vec::new();
        while self.move_history.len() > keep {
            match self.undo() {
                Some(m) => taken.push(m),
                None => break,
            }
        }
        return taken;
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn human_and_engine_alternate() {
        let mut game = Game::new(Side::Cross);
        assert!(!game.is_engine_turn());
        game.make_move(4).unwrap();
        assert!(game.is_engine_turn());
        let report = game.engine_move().unwrap();
        assert_eq!(report.result.best_move, Some(0));
        assert_eq!(game.get_move_history(), &[4, 0]);
        assert_eq!(game.get_current_turn(), Side::Cross);
    }

    #[test]
    fn rejects_taken_square_and_finished_game() {
        let mut game = Game::new(Side::Cross);
        game.make_move(0).unwrap();
        assert_eq!(game.make_move(0), Err(MoveError::Occupied('1')));
        let mut finished = Game::from_position(Position::from_notation("XXX|OO-|---").unwrap(), Side::Nought);
        assert_eq!(finished.make_move(8), Err(MoveError::GameOver));
        assert!(finished.engine_move().is_none());
        assert_eq!(finished.outcome(), Some(Outcome::CrossWins));
    }

    #[test]
    fn engine_never_loses_from_the_start() {
        for human_side in [Side::Cross, Side::Nought] {
            let mut game = Game::new(human_side);
            while !game.is_over() {
                if game.is_engine_turn() {
                    game.engine_move();
                } else {
                    // A weak human: always the lowest free square.
                    let square = game.get_position().legal_moves()[0];
                    game.make_move(square).unwrap();
                }
            }
            assert_ne!(game.outcome().and_then(|o| o.winner()), Some(human_side));
        }
    }

    #[test]
    fn undo_restores_previous_positions() {
        let start = Position::from_notation("X--|-O-|---").unwrap();
        let mut game = Game::from_position(start, Side::Cross);
        game.make_move(8).unwrap();
        let after_one = *game.get_position();
        let reply = game.engine_move().unwrap().result.best_move;
        assert_eq!(game.undo(), reply);
        assert_eq!(*game.get_position(), after_one);
        assert_eq!(game.undo(), Some(8));
        assert_eq!(*game.get_position(), start);
        assert!(game.undo().is_none());
    }

    #[test]
    fn out_of_range_square_is_an_error() {
        let mut game = Game::new(Side::Cross);
        assert_eq!(game.make_move(9), Err(MoveError::Label(ValueError::SquareLabel(String::from("10")))));
        assert_eq!(game.make_move(255), Err(MoveError::Label(ValueError::SquareLabel(String::from("256")))));
        assert!(game.get_move_history().is_empty());
    }

    #[test]
    fn take_back_returns_to_the_humans_turn() {
        let mut game = Game::new(Side::Cross);
        game.make_move(4).unwrap();
        game.engine_move();
        assert_eq!(game.take_back(), vec![0, 4]);
        assert_eq!(*game.get_position(), Position::new());
        assert!(game.take_back().is_empty());
    }

    #[test]
    fn take_back_keeps_the_engine_opening() {
        let mut game = Game::new(Side::Nought);
        game.engine_move();
        assert!(game.take_back().is_empty());
        assert_eq!(game.get_move_history(), &[0]);
        assert!(!game.is_engine_turn());

        game.make_move(4).unwrap();
        game.engine_move();
        assert_eq!(game.take_back(), vec![1, 4]);
        assert_eq!(game.get_move_history(), &[0]);
        assert_eq!(game.get_current_turn(), Side::Nought);
    }
}
