pub mod bitboards;
pub mod squares;

use std::fmt;

use crate::util::errors::ValueError;
use crate::util::notation::{notation_from_occupants, parse_notation};

use self::bitboards::{has_winning_line, set_bit_at_square, square_is_set, BitboardSquares, FULL_BOARD};
use self::squares::{label_for_square, transform_bitboard, Symmetry, BOARD_WIDTH, SQUARE_COUNT};

use super::Side;


/// Outcome check for a position, scored relative to the side to move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameResult {
    pub decided: bool,
    pub score: i8,
}


/// A tic-tac-toe position: one bitboard per side, the side to move and the
/// number of moves played.
///
/// Positions reached through `apply` never have both sides owning a line,
/// because play stops at the first completed line. Scoring relies on that and
/// does not try to make sense of a board where both sides have won.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    squares: [u16; 2],
    to_move: Side,
    ply: u8,
}

impl Default for Position {
    fn default() -> Self {
        return Self::new();
    }
}

impl Position {
    pub const fn new() -> Self {
        return Self {
            squares: [0u16; 2],
            to_move: Side::Cross,
            ply: 0,
        }
    }

    pub fn from_squares(cross: u16, nought: u16) -> Result<Self, ValueError> {
        if (cross | nought) & !FULL_BOARD != 0 {
            return Err(ValueError::OutOfRange(cross | nought));
        }
        if let Some(square) = BitboardSquares::from_board(cross & nought).next() {
            return Err(ValueError::Overlap(square));
        }
        let (cross_count, nought_count) = (cross.count_ones(), nought.count_ones());
        if cross_count != nought_count && cross_count != nought_count + 1 {
            return Err(ValueError::PieceCounts { cross: cross_count, nought: nought_count });
        }
        let ply = (cross_count + nought_count) as u8;
        return Ok(Self {
            squares: [cross, nought],
            to_move: Side::from_ply(ply),
            ply: ply,
        })
    }

    pub fn from_notation(notation: &str) -> Result<Self, ValueError> {
        let [cross, nought] = parse_notation(notation)?;
        return Self::from_squares(cross, nought);
    }

    pub fn to_notation(&self) -> String {
        return notation_from_occupants((0..SQUARE_COUNT).map(|s| self.occupant(s)));
    }

    pub fn get_move_side(&self) -> Side {
        return self.to_move;
    }

    pub fn get_ply(&self) -> u8 {
        return self.ply;
    }

    pub fn get_squares(&self, side: Side) -> u16 {
        return self.squares[side.index()];
    }

    pub fn get_occupied(&self) -> u16 {
        return self.squares[0] | self.squares[1];
    }

    pub fn occupant(&self, square: u8) -> Option<Side> {
        if square_is_set(self.squares[Side::Cross.index()], square) {
            return Some(Side::Cross);
        }
        if square_is_set(self.squares[Side::Nought.index()], square) {
            return Some(Side::Nought);
        }
        return None;
    }

    /// +1 if the side to move owns a completed line, -1 if the opponent does,
    /// 0 otherwise. The mover's lines are checked first.
    pub fn winner_relative_score(&self) -> i8 {
        if has_winning_line(self.get_squares(self.to_move)) {
            return 1;
        }
        if has_winning_line(self.get_squares(self.to_move.swap())) {
            return -1;
        }
        return 0;
    }

    pub fn is_terminal(&self) -> GameResult {
        let score = self.winner_relative_score();
        return GameResult {
            decided: score != 0 || self.ply == SQUARE_COUNT,
            score: score,
        }
    }

    /// Side owning a completed line, if any.
    pub fn winner(&self) -> Option<Side> {
        return match self.winner_relative_score() {
            1 => Some(self.to_move),
            -1 => Some(self.to_move.swap()),
            _ => None,
        }
    }

    /// Empty squares in ascending order. Search tie-breaking depends on this order.
    pub fn legal_moves(&self) -> Vec<u8> {
        return BitboardSquares::from_board(!self.get_occupied()).collect();
    }

    pub fn is_legal_move(&self, square: u8) -> bool {
        return square < SQUARE_COUNT && !square_is_set(self.get_occupied(), square);
    }

    pub fn apply(&self, square: u8) -> Position {
        assert!(self.is_legal_move(square), "square {} is not available on {}", square, self.to_notation());
        assert!(self.ply < SQUARE_COUNT, "cannot move on a full board");
        let mut squares = self.squares;
        squares[self.to_move.index()] = set_bit_at_square(squares[self.to_move.index()], square);
        return Position {
            squares: squares,
            to_move: self.to_move.swap(),
            ply: self.ply + 1,
        }
    }

    pub fn transformed(&self, symmetry: Symmetry) -> Position {
        return Position {
            squares: [
                transform_bitboard(self.squares[0], symmetry),
                transform_bitboard(self.squares[1], symmetry),
            ],
            to_move: self.to_move,
            ply: self.ply,
        }
    }

    /// Packs both bitboards into one integer, cross squares in the low bits.
    pub fn key(&self) -> u32 {
        return self.squares[0] as u32 | ((self.squares[1] as u32) << SQUARE_COUNT);
    }

    /// Smallest key over all eight symmetries of the board.
    pub fn canonical_key(&self) -> u32 {
        return Symmetry::all().iter()
            .map(|s| self.transformed(*s).key())
            .min()
            .unwrap_or_else(|| self.key());
    }
}


fn write_rows<F>(f: &mut fmt::Formatter<'_>, cell: F) -> fmt::Result where F: Fn(u8) -> char {
    for square in 0..SQUARE_COUNT {
        write!(f, "{}", cell(square))?;
        if square % BOARD_WIDTH < BOARD_WIDTH - 1 {
            write!(f, "|")?;
        } else if square < SQUARE_COUNT - 1 {
            write!(f, "\n------\n")?;
        }
    }
    return Ok(());
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write_rows(f, |square| match self.occupant(square) {
            Some(side) => side.symbol(),
            None => '-',
        });
    }
}


/// The square key in the same layout the board is printed in.
pub struct SquareLabels;

impl fmt::Display for SquareLabels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        return write_rows(f, label_for_square);
    }
}
