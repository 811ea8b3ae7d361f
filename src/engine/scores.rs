use std::fmt;

use crate::rules::Side;


pub const WIN: i8 = 1;
pub const DRAW: i8 = 0;
pub const LOSS: i8 = -1;

/// Below every reachable score, so the first searched move always becomes the best one.
pub const BELOW_LOSS: i8 = LOSS - 1;


pub fn is_better(new: i8, old: i8) -> bool {
    return new > old
}


#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    CrossWins,
    NoughtWins,
    Draw,
}

impl Outcome {
    /// Converts a score relative to `side` into an absolute outcome.
    pub fn from_relative(score: i8, side: Side) -> Outcome {
        return match (score, side) {
            (DRAW, _) => Outcome::Draw,
            (WIN, Side::Cross) | (LOSS, Side::Nought) => Outcome::CrossWins,
            _ => Outcome::NoughtWins,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        return match self {
            Outcome::CrossWins => Some(Side::Cross),
            Outcome::NoughtWins => Some(Side::Nought),
            Outcome::Draw => None,
        }
    }

    /// 1 for cross, -1 for nought, 0 for a draw.
    pub fn absolute_score(&self) -> i8 {
        return match self {
            Outcome::CrossWins => WIN,
            Outcome::NoughtWins => LOSS,
            Outcome::Draw => DRAW,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return match self {
            Outcome::CrossWins => write!(f, "cross wins"),
            Outcome::NoughtWins => write!(f, "nought wins"),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}
