use serde::{Deserialize, Serialize};

use crate::model::{Coordinate, Feature, Room, RoomId};

/// Row-major N×N grid of room ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FloorPlan {
    n: usize,
    cells: Vec<RoomId>,
}

impl FloorPlan {
    /// Panics if `cells` is not a perfect square; deeper authoring
    /// defects are caught by `Puzzle::validate`.
    pub fn new(n: usize, cells: Vec<RoomId>) -> Self {
        assert_eq!(cells.len(), n * n, "floor plan must hold {0}x{0} cells", n);
        Self { n, cells }
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn room_id(&self, row: usize, column: usize) -> RoomId {
        self.cells[row * self.n + column]
    }

    pub fn cells(&self) -> &[RoomId] {
        &self.cells
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.n * self.n).map(move |index| Coordinate::new(index / self.n, index % self.n))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CrimeScene {
    pub rooms: Vec<Room>,
    pub floor_plan: FloorPlan,
    pub features: Vec<Feature>,
}

impl CrimeScene {
    pub fn new(rooms: Vec<Room>, floor_plan: FloorPlan, features: Vec<Feature>) -> Self {
        Self {
            rooms,
            floor_plan,
            features,
        }
    }

    pub fn room_name(&self, room_id: RoomId) -> Option<&str> {
        self.rooms
            .iter()
            .find(|room| room.id == room_id)
            .map(|room| room.name.as_str())
    }
}
