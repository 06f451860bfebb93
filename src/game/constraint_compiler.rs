use std::collections::HashSet;

use itertools::Itertools;
use log::trace;

use crate::game::Board;
use crate::model::{
    Clue, Coordinate, CountConstraint, Person, PersonId, PositionSelector, SubjectSelector,
};

/// "Sum of occ[p][cell] over persons × cells == K (or >= K)."
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyConstraint {
    pub persons: Vec<PersonId>,
    pub cells: Vec<Coordinate>,
    pub count: CountConstraint,
}

impl OccupancyConstraint {
    fn new(persons: Vec<PersonId>, cells: Vec<Coordinate>, count: CountConstraint) -> Self {
        Self {
            persons,
            cells,
            count,
        }
    }
}

/// The compiled boolean program over `occ[person][row][col]`:
/// unoccupiable cells are fixed false, everything else is a cardinality
/// constraint over a person × cell rectangle.
#[derive(Debug, Clone)]
pub struct ConstraintProgram {
    pub n: usize,
    pub blocked: HashSet<Coordinate>,
    pub constraints: Vec<OccupancyConstraint>,
}

/// Merges the board and the structured clues into one constraint
/// program. Never fails: a clue whose target set turns out empty
/// simply makes the program infeasible.
pub fn compile(board: &Board, clues: &[Clue], people: &[Person]) -> ConstraintProgram {
    let n = board.n();
    let mut constraints = Vec::new();

    let everyone: Vec<PersonId> = people.iter().map(|person| person.id).collect();
    let open_cells: Vec<Coordinate> = board.cells().filter(|c| !board.is_blocked(*c)).collect();

    // permutation shape: each person somewhere, one occupant per row
    // and per column
    for person in people {
        constraints.push(OccupancyConstraint::new(
            vec![person.id],
            open_cells.clone(),
            CountConstraint::Exactly(1),
        ));
    }
    for row in 0..n {
        let cells = (0..n).map(|column| Coordinate::new(row, column)).collect();
        constraints.push(OccupancyConstraint::new(
            everyone.clone(),
            cells,
            CountConstraint::Exactly(1),
        ));
    }
    for column in 0..n {
        let cells = (0..n).map(|row| Coordinate::new(row, column)).collect();
        constraints.push(OccupancyConstraint::new(
            everyone.clone(),
            cells,
            CountConstraint::Exactly(1),
        ));
    }

    for clue in clues {
        compile_clue(board, clue, people, &mut constraints);
    }

    trace!(
        target: "compiler",
        "compiled {} clues into {} constraints over a {}x{} grid",
        clues.len(),
        constraints.len(),
        n,
        n
    );

    ConstraintProgram {
        n,
        blocked: board.blocked_cells().clone(),
        constraints,
    }
}

fn compile_clue(
    board: &Board,
    clue: &Clue,
    people: &[Person],
    constraints: &mut Vec<OccupancyConstraint>,
) {
    let subjects = resolve_subjects(&clue.subjects, people);
    let n = board.n();

    match clue.position {
        PositionSelector::On(kind) => {
            let cells = board
                .cells()
                .filter(|cell| board.space(*cell).on == Some(kind))
                .collect();
            constraints.push(OccupancyConstraint::new(subjects, cells, clue.count));
        }
        PositionSelector::Beside(kind) => {
            let cells = board
                .cells()
                .filter(|cell| board.space(*cell).beside.contains(&kind))
                .collect();
            constraints.push(OccupancyConstraint::new(subjects, cells, clue.count));
        }
        PositionSelector::InRoom(room_id) => {
            let cells = board.cells_of_room(room_id).to_vec();
            constraints.push(OccupancyConstraint::new(subjects, cells, clue.count));
        }
        // the equivalence predicates are inverted: lines and rooms
        // lacking the feature are closed to the subjects, the rest are
        // left unconstrained
        PositionSelector::InSameRowAs(kind) => {
            for row in 0..n {
                if !board.row_features(row).contains(&kind) {
                    let cells = (0..n).map(|column| Coordinate::new(row, column)).collect();
                    constraints.push(OccupancyConstraint::new(
                        subjects.clone(),
                        cells,
                        CountConstraint::Exactly(0),
                    ));
                }
            }
        }
        PositionSelector::InSameColumnAs(kind) => {
            for column in 0..n {
                if !board.column_features(column).contains(&kind) {
                    let cells = (0..n).map(|row| Coordinate::new(row, column)).collect();
                    constraints.push(OccupancyConstraint::new(
                        subjects.clone(),
                        cells,
                        CountConstraint::Exactly(0),
                    ));
                }
            }
        }
        PositionSelector::InSameRoomAs(kind) => {
            for index in 0..board.n_rooms() {
                let room_id = index as u32 + 1;
                if !board.features_of_room(room_id).contains(&kind) {
                    constraints.push(OccupancyConstraint::new(
                        subjects.clone(),
                        board.cells_of_room(room_id).to_vec(),
                        CountConstraint::Exactly(0),
                    ));
                }
            }
        }
    }
}

/// Union of the resolved selector sets, sorted for determinism.
fn resolve_subjects(selectors: &[SubjectSelector], people: &[Person]) -> Vec<PersonId> {
    selectors
        .iter()
        .flat_map(|selector| {
            people
                .iter()
                .filter(|person| selector.matches(person))
                .map(|person| person.id)
        })
        .sorted_unstable()
        .dedup()
        .collect()
}
