use std::fmt;
use std::str::FromStr;

use crate::engine::scores::Outcome;
use crate::rules::Side;
use crate::util::errors::ValueError;

use super::Game;


#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    Human,
    Engine,
}

impl Player {
    pub fn value(&self) -> &str {
        return match self {
            Player::Human => "human",
            Player::Engine => "engine",
        }
    }
}

impl FromStr for Player {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        return match s.to_lowercase().as_str() {
            "human" | "h" => Ok(Player::Human),
            "engine" | "e" => Ok(Player::Engine),
            _ => Err(ValueError::Player(String::from(s))),
        }
    }
}


/// Running score of a match. A win is worth one point, a draw half a point
/// to each player.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Tally {
    scores: [f32; 2],
    games: u32,
}

impl Tally {
    pub fn get_scores(&self) -> [f32; 2] {
        return self.scores;
    }

    pub fn get_games(&self) -> u32 {
        return self.games;
    }

    pub fn record(&mut self, winner: Option<usize>) {
        match winner {
            Some(player) => self.scores[player] += 1.0,
            None => {
                self.scores[0] += 0.5;
                self.scores[1] += 0.5;
            },
        }
        self.games += 1;
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write!(f, "Score: {} - {}", self.scores[0], self.scores[1]);
    }
}


/// A series of games between two players. The player at index `first`
/// opens each game as cross.
pub struct Match {
    players: [Player; 2],
    tally: Tally,
}

impl Match {
    pub fn new(players: [Player; 2]) -> Self {
        return Self {
            players: players,
            tally: Default::default(),
        }
    }

    pub fn get_players(&self) -> [Player; 2] {
        return self.players;
    }

    pub fn get_tally(&self) -> &Tally {
        return &self.tally;
    }

    pub fn player_for_side(side: Side, first: usize) -> usize {
        return match side {
            Side::Cross => first,
            Side::Nought => 1 - first,
        }
    }

    fn human_side(&self, first: usize) -> Side {
        return [Side::Cross, Side::Nought].into_iter()
            .find(|side| self.players[Self::player_for_side(*side, first)] == Player::Human)
            .unwrap_or_default();
    }

    /// Plays one game and records it. `ask_human` supplies the human's moves
    /// and returns `None` to abandon the game, which is then not scored.
    pub fn play_game<F>(&mut self, first: usize, mut ask_human: F) -> Option<Game>
        where F: FnMut(&Game) -> Option<u8>
    {
        assert!(first < 2, "player index {} out of range", first);
        let mut game = Game::new(self.human_side(first));
        while !game.is_over() {
            let player = self.players[Self::player_for_side(game.get_current_turn(), first)];
            match player {
                Player::Engine => {
                    game.engine_move();
                },
                Player::Human => {
                    let square = ask_human(&game)?;
                    if let Err(e) = game.make_move(square) {
                        log::debug!("Rejected human move {}: {}", square, e);
                    }
                },
            }
        }
        let winner = game.outcome()
            .and_then(|o: Outcome| o.winner())
            .map(|side| Self::player_for_side(side, first));
        self.tally.record(winner);
        log::info!("Game {} finished, {}", self.tally.get_games(), self.tally);
        return Some(game);
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn players_parse() {
        assert_eq!("human".parse::<Player>(), Ok(Player::Human));
        assert_eq!("Engine".parse::<Player>(), Ok(Player::Engine));
        assert_eq!("e".parse::<Player>(), Ok(Player::Engine));
        assert_eq!("mcts".parse::<Player>(), Err(ValueError::Player(String::from("mcts"))));
    }

    #[test]
    fn tally_counts_half_points_for_draws() {
        let mut tally = Tally::default();
        tally.record(None);
        tally.record(Some(1));
        assert_eq!(tally.get_scores(), [0.5, 1.5]);
        assert_eq!(tally.get_games(), 2);
        assert_eq!(tally.to_string(), "Score: 0.5 - 1.5");
    }

    #[test]
    fn engine_against_engine_always_draws() {
        let mut engine_match = Match::new([Player::Engine, Player::Engine]);
        for first in [0, 1, 1] {
            let game = engine_match.play_game(first, |_| None).unwrap();
            assert_eq!(game.outcome(), Some(Outcome::Draw));
        }
        assert_eq!(engine_match.get_tally().get_scores(), [1.5, 1.5]);
        assert_eq!(engine_match.get_tally().get_games(), 3);
    }

    #[test]
    fn human_never_beats_the_engine() {
        let mut human_match = Match::new([Player::Human, Player::Engine]);
        for first in [0, 1] {
            // Lowest free square every turn.
            let game = human_match.play_game(first, |g| g.get_position().legal_moves().first().copied()).unwrap();
            let human_side = match first {
                0 => Side::Cross,
                _ => Side::Nought,
            };
            assert_eq!(game.get_human_side(), human_side);
            assert_ne!(game.outcome().and_then(|o| o.winner()), Some(human_side));
        }
        let [human, engine] = human_match.get_tally().get_scores();
        assert!(engine >= human);
        assert_eq!(human + engine, 2.0);
    }

    #[test]
    fn abandoned_game_is_not_scored() {
        let mut human_match = Match::new([Player::Human, Player::Engine]);
        assert!(human_match.play_game(0, |_| None).is_none());
        assert_eq!(human_match.get_tally().get_games(), 0);
        assert_eq!(*human_match.get_tally(), Tally::default());
    }

    #[test]
    fn sides_follow_the_opening_player() {
        assert_eq!(Match::player_for_side(Side::Cross, 1), 1);
        assert_eq!(Match::player_for_side(Side::Nought, 1), 0);
        assert_eq!(Match::player_for_side(Side::Cross, 0), 0);
    }
}
