use thiserror::Error;


#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid input: unknown command '{0}'")]
    UnknownCommand(String),
    #[error("Invalid input: unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("Invalid input: no value was specified for '{0}'")]
    MissingValue(String),
    #[error("Invalid input: required argument '{0}' was not provided")]
    MissingArgument(String),
    #[error("Invalid input: {0}")]
    Malformed(String),
    #[error("Invalid input: {0}")]
    Value(#[from] ValueError),
}


#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("Invalid argument: '{0}' is not a square, enter a number from 1 to 9")]
    SquareLabel(String),
    #[error("Invalid argument: expected 9 squares in the position, found {0}")]
    NotationLength(usize),
    #[error("Invalid argument: '{0}' is not a valid square marker")]
    NotationCharacter(char),
    #[error("Invalid argument: {cross} crosses and {nought} noughts cannot occur in a game")]
    PieceCounts { cross: u32, nought: u32 },
    #[error("Invalid argument: square {0} is occupied by both sides")]
    Overlap(u8),
    #[error("Invalid argument: bitboard {0:#b} has bits outside the board")]
    OutOfRange(u16),
    #[error("Invalid argument: '{0}' is not a player, use 'human' or 'engine'")]
    Player(String),
    #[error("Invalid argument: '{value}' is not a valid {name}")]
    Number { name: String, value: String },
}


#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("Square {0} is already taken")]
    Occupied(char),
    #[error("The game is already over")]
    GameOver,
    #[error(transparent)]
    Label(#[from] ValueError),
}
