mod clue;
mod coordinate;
mod crime_scene;
mod feature;
mod person;
mod puzzle;
mod room;
mod solution;

pub use clue::{Clue, CountConstraint, PositionSelector, SubjectSelector};
pub use coordinate::Coordinate;
pub use crime_scene::{CrimeScene, FloorPlan};
pub use feature::{Feature, FeatureKind, FeaturePlacement, PositionKind};
pub use person::{Gender, Person, PersonId, Role};
pub use puzzle::Puzzle;
pub use room::{Room, RoomId};
pub use solution::{PersonPosition, Solution};
