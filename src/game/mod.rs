pub mod board;
pub mod clue_parser;
pub mod constraint_compiler;
pub mod interpreter;
pub mod solver;

pub use board::{Board, Space};
pub use clue_parser::ClueParser;
pub use constraint_compiler::{compile, ConstraintProgram, OccupancyConstraint};
pub use interpreter::{interpret, verdict};
pub use solver::{Assignment, SolveSummary, Solver, SolverStatus};

use log::debug;

use crate::error::PuzzleError;
use crate::model::{Puzzle, Solution};

/// Everything a caller learns from one solve: the solver status, the
/// number of satisfying assignments (0 contradictory, 1 well posed,
/// more than 1 under-constrained), and, when feasible, the interpreted
/// solution with its verdict.
#[derive(Debug, Clone)]
pub struct PuzzleOutcome {
    pub status: SolverStatus,
    pub solution_count: usize,
    pub solution: Option<Solution>,
    pub verdict: Option<String>,
}

/// Runs the whole pipeline: validate, parse the clues, build the board,
/// compile, enumerate, interpret. Syntax and invariant errors abort
/// before any solving; infeasibility and ambiguity come back as data.
pub fn solve_puzzle(puzzle: &Puzzle) -> Result<PuzzleOutcome, PuzzleError> {
    puzzle.validate()?;
    let parser = ClueParser::new(&puzzle.people, &puzzle.crime_scene.rooms);
    let clues = parser.parse_all(&puzzle.clues)?;
    let board = Board::build(&puzzle.crime_scene, puzzle.n())?;
    let program = compile(&board, &clues, &puzzle.people);
    let summary = Solver::new(&program).solve();
    debug!(
        target: "solver",
        "{}: {:?}, {} solution(s)",
        puzzle.name,
        summary.status,
        summary.solution_count
    );

    let mut outcome = PuzzleOutcome {
        status: summary.status,
        solution_count: summary.solution_count,
        solution: None,
        verdict: None,
    };
    if summary.status == SolverStatus::Feasible {
        if let Some(assignment) = &summary.last_solution {
            let solution = interpret(puzzle, &board, assignment)?;
            outcome.verdict = Some(verdict(puzzle, &board, &solution)?);
            outcome.solution = Some(solution);
        }
    }
    Ok(outcome)
}
