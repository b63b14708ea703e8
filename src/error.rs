use thiserror::Error;

/// Failures of the maze identity codec. A malformed code cannot be repaired.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    #[error("Unknown code version {0}")]
    UnknownVersion(u8),
    #[error("Expected {expected} digits in maze code, found {found}")]
    Length { expected: usize, found: usize },
    #[error("Illegal character {0:?} in maze code")]
    IllegalCharacter(char),
    #[error("Maze code leaves a non-zero remainder {0} after decoding")]
    Remainder(u64),
}

/// Failures while stepping a solver.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("Maze is already solved")]
    AlreadySolved,
    #[error("Solver has no move left but the target was not reached")]
    Exhausted,
}
