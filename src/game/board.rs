use std::collections::HashSet;

use log::trace;

use crate::error::PuzzleError;
use crate::model::{Coordinate, CrimeScene, FeatureKind, FeaturePlacement, RoomId};

/// One cell's derived facts: the room that owns it, the feature standing
/// on it, and the features (walls and corners included) it sits beside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    pub room_id: RoomId,
    pub on: Option<FeatureKind>,
    pub beside: HashSet<FeatureKind>,
}

impl Space {
    fn new(room_id: RoomId) -> Self {
        Self {
            room_id,
            on: None,
            beside: HashSet::new(),
        }
    }
}

/// The per-cell adjacency model derived from rooms, floor plan and
/// features. Built once per puzzle, read-only afterwards.
#[derive(Debug, Clone)]
pub struct Board {
    n: usize,
    spaces: Vec<Vec<Space>>,
    blocked: HashSet<Coordinate>,
    row_features: Vec<HashSet<FeatureKind>>,
    column_features: Vec<HashSet<FeatureKind>>,
    room_features: Vec<HashSet<FeatureKind>>,
    room_cells: Vec<Vec<Coordinate>>,
}

impl Board {
    pub fn build(crime_scene: &CrimeScene, n: usize) -> Result<Board, PuzzleError> {
        let n_rooms = crime_scene.rooms.len();
        let mut spaces = Vec::with_capacity(n);
        let mut room_cells = vec![Vec::new(); n_rooms];
        for row in 0..n {
            let mut spaces_row = Vec::with_capacity(n);
            for column in 0..n {
                let room_id = crime_scene.floor_plan.room_id(row, column);
                if room_id < 1 || room_id as usize > n_rooms {
                    return Err(PuzzleError::invariant(format!(
                        "cell ({},{}) references unknown room {}",
                        row, column, room_id
                    )));
                }
                room_cells[room_id as usize - 1].push(Coordinate::new(row, column));
                spaces_row.push(Space::new(room_id));
            }
            spaces.push(spaces_row);
        }

        let mut board = Board {
            n,
            spaces,
            blocked: HashSet::new(),
            row_features: vec![HashSet::new(); n],
            column_features: vec![HashSet::new(); n],
            room_features: vec![HashSet::new(); n_rooms],
            room_cells,
        };
        board.add_walls();
        for feature in &crime_scene.features {
            match &feature.placement {
                FeaturePlacement::Cells(cells) => board.add_furniture(feature.kind, cells)?,
                FeaturePlacement::VerticalBoundary { row, left, right } => {
                    board.add_vertical_boundary(feature.kind, *row, *left, *right)?
                }
                FeaturePlacement::HorizontalBoundary {
                    column,
                    top,
                    bottom,
                } => board.add_horizontal_boundary(feature.kind, *column, *top, *bottom)?,
            }
        }
        trace!(
            target: "board",
            "built {}x{} board, {} rooms, {} blocked cells",
            n,
            n,
            n_rooms,
            board.blocked.len()
        );
        Ok(board)
    }

    /// Marks wall and corner adjacency per cell. A neighbor in another
    /// room, or off the grid, counts as a wall on that side.
    fn add_walls(&mut self) {
        for row in 0..self.n {
            for column in 0..self.n {
                let room_id = self.spaces[row][column].room_id;
                let walled = |other: Option<RoomId>| other.map_or(true, |id| id != room_id);
                let north = walled(row.checked_sub(1).map(|r| self.spaces[r][column].room_id));
                let south = walled(self.spaces.get(row + 1).map(|r| r[column].room_id));
                let west = walled(column.checked_sub(1).map(|c| self.spaces[row][c].room_id));
                let east = walled(self.spaces[row].get(column + 1).map(|space| space.room_id));

                let space = &mut self.spaces[row][column];
                if north || south || east || west {
                    space.beside.insert(FeatureKind::Wall);
                }
                if (north || south) && (east || west) {
                    space.beside.insert(FeatureKind::Corner);
                }
            }
        }
    }

    fn add_furniture(
        &mut self,
        kind: FeatureKind,
        cells: &[Coordinate],
    ) -> Result<(), PuzzleError> {
        for cell in cells {
            self.check_in_grid(*cell)?;
            let room_id = self.spaces[cell.row][cell.column].room_id;
            self.spaces[cell.row][cell.column].on = Some(kind);
            self.row_features[cell.row].insert(kind);
            self.column_features[cell.column].insert(kind);
            self.room_features[room_id as usize - 1].insert(kind);
            // Furniture is beside its same-room neighbors; walls block
            // adjacency to the next room over.
            for neighbor in self.neighbors_in_room(*cell) {
                if !cells.contains(&neighbor) {
                    self.spaces[neighbor.row][neighbor.column].beside.insert(kind);
                }
            }
        }
        if !kind.is_occupiable() {
            self.blocked.extend(cells.iter().copied());
        }
        Ok(())
    }

    fn add_vertical_boundary(
        &mut self,
        kind: FeatureKind,
        row: usize,
        left: Option<usize>,
        right: Option<usize>,
    ) -> Result<(), PuzzleError> {
        if row >= self.n {
            return Err(PuzzleError::invariant(format!(
                "boundary feature row {} is off the {}x{} grid",
                row, self.n, self.n
            )));
        }
        self.row_features[row].insert(kind);
        for column in [left, right].into_iter().flatten() {
            let cell = Coordinate::new(row, column);
            self.check_in_grid(cell)?;
            let room_id = self.spaces[row][column].room_id;
            self.spaces[row][column].beside.insert(kind);
            self.room_features[room_id as usize - 1].insert(kind);
        }
        Ok(())
    }

    fn add_horizontal_boundary(
        &mut self,
        kind: FeatureKind,
        column: usize,
        top: Option<usize>,
        bottom: Option<usize>,
    ) -> Result<(), PuzzleError> {
        if column >= self.n {
            return Err(PuzzleError::invariant(format!(
                "boundary feature column {} is off the {}x{} grid",
                column, self.n, self.n
            )));
        }
        self.column_features[column].insert(kind);
        for row in [top, bottom].into_iter().flatten() {
            let cell = Coordinate::new(row, column);
            self.check_in_grid(cell)?;
            let room_id = self.spaces[row][column].room_id;
            self.spaces[row][column].beside.insert(kind);
            self.room_features[room_id as usize - 1].insert(kind);
        }
        Ok(())
    }

    fn check_in_grid(&self, cell: Coordinate) -> Result<(), PuzzleError> {
        if cell.row >= self.n || cell.column >= self.n {
            return Err(PuzzleError::invariant(format!(
                "feature cell {} is off the {}x{} grid",
                cell, self.n, self.n
            )));
        }
        Ok(())
    }

    fn neighbors_in_room(&self, cell: Coordinate) -> Vec<Coordinate> {
        let room_id = self.spaces[cell.row][cell.column].room_id;
        let mut neighbors = Vec::new();
        if cell.row > 0 {
            neighbors.push(Coordinate::new(cell.row - 1, cell.column));
        }
        if cell.column > 0 {
            neighbors.push(Coordinate::new(cell.row, cell.column - 1));
        }
        if cell.row + 1 < self.n {
            neighbors.push(Coordinate::new(cell.row + 1, cell.column));
        }
        if cell.column + 1 < self.n {
            neighbors.push(Coordinate::new(cell.row, cell.column + 1));
        }
        neighbors
            .into_iter()
            .filter(|c| self.spaces[c.row][c.column].room_id == room_id)
            .collect()
    }

    pub fn n(&self) -> usize {
        self.n
    }

    pub fn n_rooms(&self) -> usize {
        self.room_cells.len()
    }

    pub fn space(&self, cell: Coordinate) -> &Space {
        &self.spaces[cell.row][cell.column]
    }

    pub fn room_of(&self, cell: Coordinate) -> RoomId {
        self.spaces[cell.row][cell.column].room_id
    }

    pub fn is_blocked(&self, cell: Coordinate) -> bool {
        self.blocked.contains(&cell)
    }

    pub fn blocked_cells(&self) -> &HashSet<Coordinate> {
        &self.blocked
    }

    pub fn cells(&self) -> impl Iterator<Item = Coordinate> + '_ {
        (0..self.n * self.n).map(move |index| Coordinate::new(index / self.n, index % self.n))
    }

    /// Cells owned by a room; empty for an id the floor plan never
    /// mentions (the resulting empty target set surfaces as solver
    /// infeasibility, not an error).
    pub fn cells_of_room(&self, room_id: RoomId) -> &[Coordinate] {
        room_id
            .checked_sub(1)
            .and_then(|index| self.room_cells.get(index as usize))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn row_features(&self, row: usize) -> &HashSet<FeatureKind> {
        &self.row_features[row]
    }

    pub fn column_features(&self, column: usize) -> &HashSet<FeatureKind> {
        &self.column_features[column]
    }

    pub fn features_of_room(&self, room_id: RoomId) -> &HashSet<FeatureKind> {
        &self.room_features[room_id as usize - 1]
    }
}
