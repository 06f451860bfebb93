pub mod error;
pub mod game;
pub mod model;

pub use error::PuzzleError;
pub use game::{solve_puzzle, PuzzleOutcome};
