pub mod board;


#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Cross,
    Nought,
}

impl Side {
    pub fn from_ply(ply: u8) -> Side {
        return match ply % 2 {
            0 => Side::Cross,
            _ => Side::Nought,
        }
    }

    pub fn swap(&self) -> Side {
        return match self {
            Side::Cross => Side::Nought,
            Side::Nought => Side::Cross,
        }
    }

    pub fn index(&self) -> usize {
        return match self {
            Side::Cross => 0,
            Side::Nought => 1,
        }
    }

    pub fn symbol(&self) -> char {
        return match self {
            Side::Cross => 'X',
            Side::Nought => 'O',
        }
    }

    pub fn value(&self) -> &str {
        return match self {
            Side::Cross => "cross",
            Side::Nought => "nought",
        }
    }
}

impl Default for Side {
    fn default() -> Self { Side::Cross }
}
