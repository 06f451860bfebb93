use serde::{Deserialize, Serialize};

use crate::error::PuzzleError;
use crate::model::{CrimeScene, Person, Role};

/// The authored puzzle description: the input boundary of the pipeline.
/// Assembled externally by plain data construction; validated here once
/// before compilation.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Puzzle {
    pub name: String,
    pub crime_scene: CrimeScene,
    pub people: Vec<Person>,
    pub clues: Vec<String>,
}

impl Puzzle {
    pub fn new(
        name: &str,
        crime_scene: CrimeScene,
        people: Vec<Person>,
        clues: Vec<String>,
    ) -> Self {
        Self {
            name: name.to_string(),
            crime_scene,
            people,
            clues,
        }
    }

    pub fn n(&self) -> usize {
        self.people.len()
    }

    pub fn victim(&self) -> Option<&Person> {
        self.people.iter().find(|person| person.role == Role::Victim)
    }

    /// Checks the authoring invariants. A failure here is a defect in
    /// the authoring collaborator, not a normal runtime condition.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.people.is_empty() {
            return Err(PuzzleError::invariant("puzzle has no people"));
        }
        for (index, person) in self.people.iter().enumerate() {
            if person.id != index as u32 + 1 {
                return Err(PuzzleError::invariant(format!(
                    "person ids must be dense from 1, found {} at index {}",
                    person.id, index
                )));
            }
            if person.role == Role::Murderer {
                return Err(PuzzleError::invariant(format!(
                    "{} is authored as murderer; the murderer is deduced, never authored",
                    person.name
                )));
            }
        }
        let victims = self
            .people
            .iter()
            .filter(|person| person.role == Role::Victim)
            .count();
        if victims != 1 {
            return Err(PuzzleError::invariant(format!(
                "expected exactly one victim, found {}",
                victims
            )));
        }
        for (index, room) in self.crime_scene.rooms.iter().enumerate() {
            if room.id != index as u32 + 1 {
                return Err(PuzzleError::invariant(format!(
                    "room ids must be dense from 1, found {} at index {}",
                    room.id, index
                )));
            }
        }
        let n = self.crime_scene.floor_plan.n();
        if n != self.people.len() {
            return Err(PuzzleError::invariant(format!(
                "floor plan is {}x{} but the cast has {} people",
                n,
                n,
                self.people.len()
            )));
        }
        for (index, room_id) in self.crime_scene.floor_plan.cells().iter().enumerate() {
            if self.crime_scene.room_name(*room_id).is_none() {
                return Err(PuzzleError::invariant(format!(
                    "floor plan cell {} references unknown room {}",
                    index, room_id
                )));
            }
        }
        Ok(())
    }
}
