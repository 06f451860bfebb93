use serde::{Deserialize, Serialize};

/// 1-based, dense; 0 is reserved as "unset" in authored data.
pub type PersonId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Gender {
    Female,
    Male,
}

impl Gender {
    /// Maps the clue-grammar nouns ("man", "women", ...) onto a gender.
    pub fn from_noun(noun: &str) -> Option<Self> {
        match noun {
            "female" | "woman" | "women" => Some(Gender::Female),
            "male" | "man" | "men" => Some(Gender::Male),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum Role {
    Suspect,
    Victim,
    // never authored; a verdict, see the interpreter
    Murderer,
}

impl Role {
    pub fn from_noun(noun: &str) -> Option<Self> {
        match noun {
            "suspect" => Some(Role::Suspect),
            "victim" => Some(Role::Victim),
            "murderer" => Some(Role::Murderer),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub gender: Gender,
    pub role: Role,
}

impl Person {
    pub fn new(id: PersonId, name: &str, gender: Gender, role: Role) -> Self {
        Self {
            id,
            name: name.to_string(),
            gender,
            role,
        }
    }

    pub fn suspect(id: PersonId, name: &str, gender: Gender) -> Self {
        Self::new(id, name, gender, Role::Suspect)
    }

    pub fn victim(id: PersonId, name: &str, gender: Gender) -> Self {
        Self::new(id, name, gender, Role::Victim)
    }
}
