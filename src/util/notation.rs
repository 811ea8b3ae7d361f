use crate::rules::Side;

use super::errors::ValueError;


pub fn get_notation_for_square(occupant: Option<Side>) -> char {
    return match occupant {
        Some(side) => side.symbol(),
        None => '-',
    }
}


fn get_occupant_for_notation(c: char) -> Result<Option<Side>, ValueError> {
    return match c {
        'X' | 'x' => Ok(Some(Side::Cross)),
        'O' | 'o' => Ok(Some(Side::Nought)),
        '-' | '.' => Ok(None),
        _ => Err(ValueError::NotationCharacter(c)),
    }
}


/// Parses the squares of a position, row by row from the top left, into one
/// bitboard per side. Whitespace and '|' separators are skipped.
pub fn parse_notation(notation: &str) -> Result<[u16; 2], ValueError> {
    let markers: Vec<char> = notation.chars().filter(|c| !c.is_whitespace() && *c != '|').collect();
    if markers.len() != 9 {
        return Err(ValueError::NotationLength(markers.len()));
    }
    let mut squares = [0u16; 2];
    for (square, marker) in markers.into_iter().enumerate() {
        if let Some(side) = get_occupant_for_notation(marker)? {
            squares[side.index()] |= 1u16 << square;
        }
    }
    return Ok(squares);
}


pub fn notation_from_occupants<I>(occupants: I) -> String where I: Iterator<Item=Option<Side>> {
    return occupants.map(get_notation_for_square).collect();
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_in_order() {
        let squares = parse_notation("XO-|-X-|--O").unwrap();
        assert_eq!(squares[Side::Cross.index()], 0b000_010_001);
        assert_eq!(squares[Side::Nought.index()], 0b100_000_010);
    }

    #[test]
    fn separators_and_case_are_ignored() {
        assert_eq!(parse_notation("x o -\n- - -\n- - -").unwrap(), parse_notation("XO-------").unwrap());
        assert_eq!(parse_notation("---------").unwrap(), [0, 0]);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(parse_notation("XO"), Err(ValueError::NotationLength(2)));
        assert_eq!(parse_notation("XO-------Z"), Err(ValueError::NotationLength(10)));
        assert_eq!(parse_notation("XO------Z"), Err(ValueError::NotationCharacter('Z')));
    }

    #[test]
    fn writes_markers() {
        let occupants = [Some(Side::Cross), None, Some(Side::Nought)];
        assert_eq!(notation_from_occupants(occupants.into_iter()), "X-O");
    }
}
