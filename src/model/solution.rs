use serde::{Deserialize, Serialize};

use crate::model::{Coordinate, PersonId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PersonPosition {
    pub person_id: PersonId,
    pub coordinate: Coordinate,
}

/// Where everyone stood, and who did it. Written once by the
/// interpreter after a feasible solve.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Solution {
    pub positions: Vec<PersonPosition>,
    pub murderer_id: Option<PersonId>,
}

impl Solution {
    pub fn position_of(&self, person_id: PersonId) -> Option<Coordinate> {
        self.positions
            .iter()
            .find(|position| position.person_id == person_id)
            .map(|position| position.coordinate)
    }
}
