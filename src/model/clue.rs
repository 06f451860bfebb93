use serde::{Deserialize, Serialize};

use crate::model::{FeatureKind, Gender, Person, PersonId, Role, RoomId};

/// Filter over the cast. Unset fields are wildcards; `negate` inverts
/// the whole match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubjectSelector {
    pub person_id: Option<PersonId>,
    pub role: Option<Role>,
    pub gender: Option<Gender>,
    pub negate: bool,
}

impl SubjectSelector {
    pub fn anyone() -> Self {
        Self {
            person_id: None,
            role: None,
            gender: None,
            negate: false,
        }
    }

    pub fn person(person_id: PersonId) -> Self {
        Self {
            person_id: Some(person_id),
            ..Self::anyone()
        }
    }

    pub fn everyone_except(person_id: PersonId) -> Self {
        Self {
            person_id: Some(person_id),
            negate: true,
            ..Self::anyone()
        }
    }

    pub fn matching(role: Option<Role>, gender: Option<Gender>) -> Self {
        Self {
            role,
            gender,
            ..Self::anyone()
        }
    }

    pub fn matches(&self, person: &Person) -> bool {
        let pass = self.person_id.map_or(true, |id| id == person.id)
            && self.role.map_or(true, |role| role == person.role)
            && self.gender.map_or(true, |gender| gender == person.gender);
        pass != self.negate
    }
}

/// Spatial predicate of a clue. The three `InSame*As` variants are
/// equivalence-class predicates over rows, columns and rooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum PositionSelector {
    On(FeatureKind),
    Beside(FeatureKind),
    InRoom(RoomId),
    InSameRowAs(FeatureKind),
    InSameColumnAs(FeatureKind),
    InSameRoomAs(FeatureKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum CountConstraint {
    Exactly(usize),
    AtLeast(usize),
}

/// One structured constraint statement: how many of the selected people
/// stand on the selected cells.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Clue {
    pub subjects: Vec<SubjectSelector>,
    pub position: PositionSelector,
    pub count: CountConstraint,
}

impl Clue {
    pub fn new(
        subjects: Vec<SubjectSelector>,
        position: PositionSelector,
        count: CountConstraint,
    ) -> Self {
        Self {
            subjects,
            position,
            count,
        }
    }

    /// The common case: one named person, exactly once, somewhere.
    pub fn single(person_id: PersonId, position: PositionSelector) -> Self {
        Self::new(
            vec![SubjectSelector::person(person_id)],
            position,
            CountConstraint::Exactly(1),
        )
    }

    pub fn room_occupied(room_id: RoomId) -> Self {
        Self::new(
            vec![SubjectSelector::anyone()],
            PositionSelector::InRoom(room_id),
            CountConstraint::AtLeast(1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cast() -> Vec<Person> {
        vec![
            Person::suspect(1, "Alice", Gender::Female),
            Person::suspect(2, "Bob", Gender::Male),
            Person::victim(3, "Carol", Gender::Female),
        ]
    }

    #[test]
    fn test_selector_wildcards() {
        let people = cast();
        let anyone = SubjectSelector::anyone();
        assert!(people.iter().all(|p| anyone.matches(p)));
    }

    #[test]
    fn test_selector_by_person() {
        let people = cast();
        let bob = SubjectSelector::person(2);
        let matched: Vec<_> = people.iter().filter(|p| bob.matches(p)).collect();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].name, "Bob");
    }

    #[test]
    fn test_selector_negated() {
        let people = cast();
        let others = SubjectSelector::everyone_except(2);
        let matched: Vec<_> = people
            .iter()
            .filter(|p| others.matches(p))
            .map(|p| p.id)
            .collect();
        assert_eq!(matched, vec![1, 3]);
    }

    #[test]
    fn test_selector_role_and_gender() {
        let people = cast();
        let women = SubjectSelector::matching(None, Some(Gender::Female));
        let matched: Vec<_> = people
            .iter()
            .filter(|p| women.matches(p))
            .map(|p| p.id)
            .collect();
        assert_eq!(matched, vec![1, 3]);

        let female_suspects = SubjectSelector::matching(Some(Role::Suspect), Some(Gender::Female));
        let matched: Vec<_> = people
            .iter()
            .filter(|p| female_suspects.matches(p))
            .map(|p| p.id)
            .collect();
        assert_eq!(matched, vec![1]);
    }
}
