use crate::util::errors::ValueError;


pub const BOARD_WIDTH: u8 = 3;
pub const SQUARE_COUNT: u8 = 9;


#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Symmetry {
    Identity,
    Rotate90,
    Rotate180,
    Rotate270,
    FlipHorizontal,
    FlipVertical,
    Transpose,
    AntiTranspose,
}

impl Symmetry {
    pub fn all() -> [Symmetry; 8] {
        return [
            Symmetry::Identity, Symmetry::Rotate90, Symmetry::Rotate180, Symmetry::Rotate270,
            Symmetry::FlipHorizontal, Symmetry::FlipVertical, Symmetry::Transpose, Symmetry::AntiTranspose,
        ]
    }

    fn index(&self) -> usize {
        return match self {
            Symmetry::Identity       => 0,
            Symmetry::Rotate90       => 1,
            Symmetry::Rotate180      => 2,
            Symmetry::Rotate270      => 3,
            Symmetry::FlipHorizontal => 4,
            Symmetry::FlipVertical   => 5,
            Symmetry::Transpose      => 6,
            Symmetry::AntiTranspose  => 7,
        }
    }

    fn apply_to_coordinates(&self, col: u8, row: u8) -> (u8, u8) {
        let last = BOARD_WIDTH - 1;
        return match self {
            Symmetry::Identity       => (col, row),
            Symmetry::Rotate90       => (last - row, col),
            Symmetry::Rotate180      => (last - col, last - row),
            Symmetry::Rotate270      => (row, last - col),
            Symmetry::FlipHorizontal => (last - col, row),
            Symmetry::FlipVertical   => (col, last - row),
            Symmetry::Transpose      => (row, col),
            Symmetry::AntiTranspose  => (last - row, last - col),
        }
    }
}


lazy_static! {
    static ref SYMMETRY_MAPS: Vec<[u8; 9]> = Symmetry::all().iter().map(|s| prepare_symmetry_map(*s)).collect();
}


fn prepare_symmetry_map(symmetry: Symmetry) -> [u8; 9] {
    let mut map = [0u8; 9];
    for square in 0..SQUARE_COUNT {
        let [col, row] = get_col_and_row_from_square(square);
        let (new_col, new_row) = symmetry.apply_to_coordinates(col, row);
        map[square as usize] = get_square_from_col_and_row(new_col, new_row);
    }
    return map;
}


pub fn transform_square(square: u8, symmetry: Symmetry) -> u8 {
    return SYMMETRY_MAPS[symmetry.index()][square as usize]
}


pub fn transform_bitboard(board: u16, symmetry: Symmetry) -> u16 {
    return (0..SQUARE_COUNT).fold(0u16, |acc, square| {
        match board & (1u16 << square) {
            0 => acc,
            _ => acc | (1u16 << transform_square(square, symmetry)),
        }
    })
}


pub fn get_square_from_col_and_row(col: u8, row: u8) -> u8 {
    if col >= BOARD_WIDTH { panic!("Invalid column supplied") }
    if row >= BOARD_WIDTH { panic!("Invalid row supplied") }
    return col + (row * BOARD_WIDTH);
}

pub fn get_col_and_row_from_square(square: u8) -> [u8; 2] {
    if square >= SQUARE_COUNT { panic!("Invalid square supplied") }
    return [ square % BOARD_WIDTH, square / BOARD_WIDTH ]
}


/// Human-facing label of a square, '1' at the top left through '9' at the bottom right.
pub fn label_for_square(square: u8) -> char {
    if square >= SQUARE_COUNT { panic!("Invalid square supplied") }
    return (b'1' + square) as char;
}

pub fn square_from_label(label: &str) -> Result<u8, ValueError> {
    let mut chars = label.trim().chars();
    return match (chars.next(), chars.next()) {
        (Some(c @ '1'..='9'), None) => Ok(c as u8 - b'1'),
        _ => Err(ValueError::SquareLabel(String::from(label.trim()))),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_print_layout() {
        assert_eq!(label_for_square(0), '1');
        assert_eq!(label_for_square(2), '3');
        assert_eq!(label_for_square(8), '9');
        for square in 0..SQUARE_COUNT {
            let label = label_for_square(square).to_string();
            assert_eq!(square_from_label(&label).unwrap(), square);
        }
    }

    #[test]
    fn bad_labels_are_rejected() {
        assert!(square_from_label("0").is_err());
        assert!(square_from_label("10").is_err());
        assert!(square_from_label("x").is_err());
        assert!(square_from_label("").is_err());
        assert_eq!(square_from_label(" 5 ").unwrap(), 4);
    }

    #[test]
    fn symmetries_are_permutations() {
        for symmetry in Symmetry::all() {
            let mut seen = [false; 9];
            for square in 0..SQUARE_COUNT {
                seen[transform_square(square, symmetry) as usize] = true;
            }
            assert!(seen.iter().all(|s| *s));
            assert_eq!(transform_square(4, symmetry), 4);
        }
    }

    #[test]
    fn rotation_moves_corners_to_corners() {
        assert_eq!(transform_square(0, Symmetry::Rotate90), 2);
        assert_eq!(transform_square(2, Symmetry::Rotate90), 8);
        assert_eq!(transform_square(1, Symmetry::Rotate90), 5);
        assert_eq!(transform_square(0, Symmetry::Rotate180), 8);
        assert_eq!(transform_square(0, Symmetry::FlipHorizontal), 2);
        assert_eq!(transform_square(1, Symmetry::Transpose), 3);
        assert_eq!(transform_square(0, Symmetry::AntiTranspose), 8);
    }

    #[test]
    fn bitboard_transform_keeps_count() {
        let board = 0b000_010_011;
        for symmetry in Symmetry::all() {
            assert_eq!(transform_bitboard(board, symmetry).count_ones(), 3);
        }
        assert_eq!(transform_bitboard(board, Symmetry::Identity), board);
    }
}
