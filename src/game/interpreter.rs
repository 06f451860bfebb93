use log::debug;

use crate::error::PuzzleError;
use crate::game::{Assignment, Board};
use crate::model::{PersonPosition, Puzzle, Role, RoomId, Solution};

/// Reads a satisfying assignment back into the puzzle's terms: where
/// everyone stood, and which suspect shared the victim's room.
pub fn interpret(
    puzzle: &Puzzle,
    board: &Board,
    assignment: &Assignment,
) -> Result<Solution, PuzzleError> {
    let positions: Vec<PersonPosition> = puzzle
        .people
        .iter()
        .map(|person| PersonPosition {
            person_id: person.id,
            coordinate: assignment.position_of(person.id),
        })
        .collect();

    let victim = puzzle
        .victim()
        .ok_or_else(|| PuzzleError::invariant("puzzle has no victim"))?;
    let murder_room = board.room_of(assignment.position_of(victim.id));

    // first suspect by id in the murder room; a well-formed puzzle has
    // exactly one
    let murderer_id = puzzle
        .people
        .iter()
        .filter(|person| person.role == Role::Suspect)
        .find(|person| board.room_of(assignment.position_of(person.id)) == murder_room)
        .map(|person| person.id);

    debug!(
        target: "solver",
        "victim {} found in room {}, murderer: {:?}",
        victim.name,
        murder_room,
        murderer_id
    );

    Ok(Solution {
        positions,
        murderer_id,
    })
}

/// The verdict sentence for a solved puzzle.
pub fn verdict(puzzle: &Puzzle, board: &Board, solution: &Solution) -> Result<String, PuzzleError> {
    let victim = puzzle
        .victim()
        .ok_or_else(|| PuzzleError::invariant("puzzle has no victim"))?;
    let victim_position = solution
        .position_of(victim.id)
        .ok_or_else(|| PuzzleError::invariant("solution has no position for the victim"))?;
    let murder_room = board.room_of(victim_position);
    let room_name = room_name(puzzle, murder_room)?;

    match solution.murderer_id {
        Some(murderer_id) => {
            let murderer = puzzle
                .people
                .iter()
                .find(|person| person.id == murderer_id)
                .ok_or_else(|| PuzzleError::invariant("solution names an unknown murderer"))?;
            Ok(format!(
                "{} murdered {} in the {}!",
                murderer.name, victim.name, room_name
            ))
        }
        None => Ok(format!(
            "Nobody was with {} in the {}.",
            victim.name, room_name
        )),
    }
}

fn room_name(puzzle: &Puzzle, room_id: RoomId) -> Result<&str, PuzzleError> {
    puzzle
        .crime_scene
        .room_name(room_id)
        .ok_or_else(|| PuzzleError::invariant(format!("unknown room {}", room_id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{compile, Solver, SolverStatus};
    use crate::model::{
        Clue, CrimeScene, FloorPlan, Gender, Person, PositionSelector, Room,
    };

    fn puzzle_with_clues(clues: Vec<Clue>) -> (Puzzle, Board, Assignment) {
        // 1 1   top row Kitchen, bottom row Parlor
        // 2 2
        let scene = CrimeScene::new(
            vec![Room::new(1, "Kitchen"), Room::new(2, "Parlor")],
            FloorPlan::new(2, vec![1, 1, 2, 2]),
            vec![],
        );
        let puzzle = Puzzle::new(
            "test",
            scene,
            vec![
                Person::suspect(1, "Alice", Gender::Female),
                Person::victim(2, "Bob", Gender::Male),
            ],
            vec![],
        );
        let board = Board::build(&puzzle.crime_scene, puzzle.n()).unwrap();
        let program = compile(&board, &clues, &puzzle.people);
        let summary = Solver::new(&program).solve();
        assert_eq!(summary.status, SolverStatus::Feasible);
        (puzzle, board, summary.last_solution.unwrap())
    }

    #[test]
    fn test_interpret_positions() {
        let (puzzle, board, assignment) =
            puzzle_with_clues(vec![Clue::single(1, PositionSelector::InRoom(1))]);
        let solution = interpret(&puzzle, &board, &assignment).unwrap();

        assert_eq!(solution.positions.len(), 2);
        assert_eq!(solution.position_of(1).unwrap().row, 0);
        assert_eq!(solution.position_of(2).unwrap().row, 1);
    }

    #[test]
    fn test_no_suspect_in_murder_room() {
        // Alice in the Kitchen, Bob murdered in the Parlor, alone
        let (puzzle, board, assignment) =
            puzzle_with_clues(vec![Clue::single(1, PositionSelector::InRoom(1))]);
        let solution = interpret(&puzzle, &board, &assignment).unwrap();

        assert_eq!(solution.murderer_id, None);
        let text = verdict(&puzzle, &board, &solution).unwrap();
        assert_eq!(text, "Nobody was with Bob in the Parlor.");
    }

    #[test]
    fn test_murder_room_tie_breaks_by_lowest_id() {
        // two suspects share the victim's room; the first by id takes
        // the blame
        let scene = CrimeScene::new(
            vec![Room::new(1, "Kitchen"), Room::new(2, "Study")],
            FloorPlan::new(4, vec![1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2]),
            vec![],
        );
        let puzzle = Puzzle::new(
            "test",
            scene,
            vec![
                Person::suspect(1, "Alice", Gender::Female),
                Person::suspect(2, "Bob", Gender::Male),
                Person::suspect(3, "Carol", Gender::Female),
                Person::victim(4, "Dave", Gender::Male),
            ],
            vec![],
        );
        let board = Board::build(&puzzle.crime_scene, puzzle.n()).unwrap();
        let clues = vec![
            Clue::single(1, PositionSelector::InRoom(1)),
            Clue::single(2, PositionSelector::InRoom(2)),
            Clue::single(3, PositionSelector::InRoom(2)),
            Clue::single(4, PositionSelector::InRoom(2)),
        ];
        let program = compile(&board, &clues, &puzzle.people);
        let summary = Solver::new(&program).solve();
        assert_eq!(summary.status, SolverStatus::Feasible);

        let assignment = summary.last_solution.unwrap();
        let solution = interpret(&puzzle, &board, &assignment).unwrap();
        assert_eq!(solution.murderer_id, Some(2));
    }

    #[test]
    fn test_murderer_is_first_suspect_by_id() {
        // wider board where a suspect can share the victim's room
        let scene = CrimeScene::new(
            vec![Room::new(1, "Kitchen"), Room::new(2, "Study")],
            FloorPlan::new(3, vec![1, 1, 1, 2, 2, 2, 2, 2, 2]),
            vec![],
        );
        let puzzle = Puzzle::new(
            "test",
            scene,
            vec![
                Person::suspect(1, "Alice", Gender::Female),
                Person::suspect(2, "Bob", Gender::Male),
                Person::victim(3, "Carol", Gender::Female),
            ],
            vec![],
        );
        let board = Board::build(&puzzle.crime_scene, puzzle.n()).unwrap();
        let clues = vec![
            Clue::single(1, PositionSelector::InRoom(1)),
            Clue::single(2, PositionSelector::InRoom(2)),
            Clue::single(3, PositionSelector::InRoom(2)),
        ];
        let program = compile(&board, &clues, &puzzle.people);
        let summary = Solver::new(&program).solve();
        assert_eq!(summary.status, SolverStatus::Feasible);

        let assignment = summary.last_solution.unwrap();
        let solution = interpret(&puzzle, &board, &assignment).unwrap();
        assert_eq!(solution.murderer_id, Some(2));

        let text = verdict(&puzzle, &board, &solution).unwrap();
        assert_eq!(text, "Bob murdered Carol in the Study!");
    }

    #[test]
    fn test_interpret_requires_a_victim() {
        let (mut puzzle, board, assignment) =
            puzzle_with_clues(vec![Clue::single(1, PositionSelector::InRoom(1))]);
        puzzle.people[1].role = Role::Suspect;
        assert!(interpret(&puzzle, &board, &assignment).is_err());
    }
}
