pub const FULL_BOARD: u16 = 0b111_111_111;

// Bit i is square i, squares numbered row-major from the top left.
pub const WINNING_LINES: [u16; 8] = [
    0b000_000_111, 0b000_111_000, 0b111_000_000,   // rows
    0b001_001_001, 0b010_010_010, 0b100_100_100,   // columns
    0b100_010_001, 0b001_010_100,                  // diagonals
];


pub fn get_bit_for_square(square: u8) -> u16 {
    return 1u16 << square
}


pub fn set_bit_at_square(board: u16, square: u8) -> u16 {
    return board | get_bit_for_square(square)
}


pub fn square_is_set(board: u16, square: u8) -> bool {
    return board & get_bit_for_square(square) != 0
}


pub fn has_winning_line(board: u16) -> bool {
    return WINNING_LINES.iter().any(|line| board & line == *line)
}


/// Iterates the set squares of a bitboard in ascending order.
pub struct BitboardSquares {
    board: u16,
}

impl BitboardSquares {
    pub fn from_board(board: u16) -> Self {
        return Self { board: board & FULL_BOARD }
    }
}

impl Iterator for BitboardSquares {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.board == 0 {
            return None;
        }
        let square = self.board.trailing_zeros() as u8;
        self.board &= self.board - 1;
        return Some(square);
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.board.count_ones() as usize;
        return (count, Some(count));
    }
}

impl ExactSizeIterator for BitboardSquares {}
