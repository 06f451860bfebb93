use serde::{Deserialize, Serialize};

/// 1-based, dense; 0 is reserved as "unset" in authored data.
pub type RoomId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
}

impl Room {
    pub fn new(id: RoomId, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
        }
    }
}
