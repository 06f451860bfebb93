use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

/// How a feature sits on the floor plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PositionKind {
    OccupiableSpace,
    BlockedSpace,
    VerticalBoundary,
    HorizontalBoundary,
}

/// The closed vocabulary of crime-scene features. Wall and Corner are
/// derived from the floor plan and never authored directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
pub enum FeatureKind {
    Wall,
    Corner,
    Window,
    Chair,
    Bed,
    Carpet,
    Plant,
    Tv,
    Table,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 9] = [
        FeatureKind::Wall,
        FeatureKind::Corner,
        FeatureKind::Window,
        FeatureKind::Chair,
        FeatureKind::Bed,
        FeatureKind::Carpet,
        FeatureKind::Plant,
        FeatureKind::Tv,
        FeatureKind::Table,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FeatureKind::Wall => "wall",
            FeatureKind::Corner => "corner",
            FeatureKind::Window => "window",
            FeatureKind::Chair => "chair",
            FeatureKind::Bed => "bed",
            FeatureKind::Carpet => "carpet",
            FeatureKind::Plant => "plant",
            FeatureKind::Tv => "tv",
            FeatureKind::Table => "table",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.name() == name)
    }

    /// Furniture that a person may stand or sit on. Blocking furniture
    /// makes its cells unoccupiable.
    pub fn is_occupiable(&self) -> bool {
        matches!(self, FeatureKind::Chair | FeatureKind::Bed | FeatureKind::Carpet)
    }

    pub fn is_furniture(&self) -> bool {
        matches!(
            self,
            FeatureKind::Chair
                | FeatureKind::Bed
                | FeatureKind::Carpet
                | FeatureKind::Plant
                | FeatureKind::Tv
                | FeatureKind::Table
        )
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where a feature sits: furniture covers whole cells, a window sits on
/// the boundary between two adjacent cells (either side may be off-grid).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub enum FeaturePlacement {
    Cells(Vec<Coordinate>),
    VerticalBoundary {
        row: usize,
        left: Option<usize>,
        right: Option<usize>,
    },
    HorizontalBoundary {
        column: usize,
        top: Option<usize>,
        bottom: Option<usize>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Feature {
    pub kind: FeatureKind,
    pub placement: FeaturePlacement,
}

impl Feature {
    pub fn furniture(kind: FeatureKind, cells: Vec<Coordinate>) -> Self {
        assert!(kind.is_furniture(), "{} is not furniture", kind.name());
        Self {
            kind,
            placement: FeaturePlacement::Cells(cells),
        }
    }

    /// Window on the boundary between (row, left) and (row, right).
    pub fn vertical_window(row: usize, left: Option<usize>, right: Option<usize>) -> Self {
        Self {
            kind: FeatureKind::Window,
            placement: FeaturePlacement::VerticalBoundary { row, left, right },
        }
    }

    /// Window on the boundary between (top, column) and (bottom, column).
    pub fn horizontal_window(column: usize, top: Option<usize>, bottom: Option<usize>) -> Self {
        Self {
            kind: FeatureKind::Window,
            placement: FeaturePlacement::HorizontalBoundary {
                column,
                top,
                bottom,
            },
        }
    }

    pub fn position_kind(&self) -> PositionKind {
        match &self.placement {
            FeaturePlacement::Cells(_) => {
                if self.kind.is_occupiable() {
                    PositionKind::OccupiableSpace
                } else {
                    PositionKind::BlockedSpace
                }
            }
            FeaturePlacement::VerticalBoundary { .. } => PositionKind::VerticalBoundary,
            FeaturePlacement::HorizontalBoundary { .. } => PositionKind::HorizontalBoundary,
        }
    }
}
