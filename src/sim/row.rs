//! Row descriptors
//!
//! Every generated row is either a forest strip with static trees or a lane
//! with scrolling vehicles. Rows are immutable after generation except for
//! the body handles the renderer attaches to vehicles.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::bodies::BodyHandle;
use crate::consts::*;

/// Row kind, used for generation and error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowKind {
    Forest,
    Car,
    Truck,
}

impl RowKind {
    pub const ALL: [RowKind; 3] = [RowKind::Forest, RowKind::Car, RowKind::Truck];

    /// Obstacles placed in a row of this kind
    pub fn obstacle_count(self) -> usize {
        match self {
            RowKind::Forest => TREES_PER_ROW,
            RowKind::Car => CARS_PER_LANE,
            RowKind::Truck => TRUCKS_PER_LANE,
        }
    }

    /// Tiles either side of the spawn tile that belong to the footprint
    pub fn margin(self) -> i32 {
        match self {
            RowKind::Forest => 0,
            RowKind::Car => CAR_MARGIN,
            RowKind::Truck => TRUCK_MARGIN,
        }
    }

    /// Narrowest row that always fits every obstacle
    ///
    /// Each placed footprint blocks `4m + 1` candidate spawn tiles, so after
    /// `n - 1` placements one more tile must remain free.
    pub fn min_tiles(self) -> i32 {
        let blocked_per_obstacle = 4 * self.margin() + 1;
        (self.obstacle_count() as i32 - 1) * blocked_per_obstacle + 1
    }
}

/// Vehicle lane flavor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaneKind {
    Car,
    Truck,
}

impl LaneKind {
    pub fn row_kind(self) -> RowKind {
        match self {
            LaneKind::Car => RowKind::Car,
            LaneKind::Truck => RowKind::Truck,
        }
    }

    /// Ground-plane footprint of one vehicle (length, depth)
    pub fn body_size(self) -> (f32, f32) {
        match self {
            LaneKind::Car => CAR_SIZE,
            LaneKind::Truck => TRUCK_SIZE,
        }
    }
}

/// Travel direction of a lane
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// +1 for rightward travel, -1 for leftward
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }
}

/// A static tree in a forest row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    pub tile: i32,
    pub height: u32,
}

/// A vehicle in a lane row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    /// Spawn tile (center of the footprint)
    pub initial_tile: i32,
    /// Body color (0xRRGGBB)
    pub color: u32,
    /// Body bound by the renderer; `None` until realized
    #[serde(skip)]
    pub body: Option<BodyHandle>,
}

/// A lane of scrolling vehicles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub kind: LaneKind,
    pub direction: Direction,
    /// World units per second
    pub speed: f32,
    pub vehicles: Vec<Vehicle>,
}

/// One generated row of the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Row {
    Forest { trees: Vec<Tree> },
    Lane(Lane),
}

impl Row {
    pub fn kind(&self) -> RowKind {
        match self {
            Row::Forest { .. } => RowKind::Forest,
            Row::Lane(lane) => lane.kind.row_kind(),
        }
    }

    /// True if a tree stands exactly on `tile`
    pub fn has_tree_at(&self, tile: i32) -> bool {
        match self {
            Row::Forest { trees } => trees.iter().any(|tree| tree.tile == tile),
            Row::Lane(_) => false,
        }
    }

    pub fn as_lane(&self) -> Option<&Lane> {
        match self {
            Row::Lane(lane) => Some(lane),
            Row::Forest { .. } => None,
        }
    }

    pub fn as_lane_mut(&mut self) -> Option<&mut Lane> {
        match self {
            Row::Lane(lane) => Some(lane),
            Row::Forest { .. } => None,
        }
    }

    /// Spawn footprints of every obstacle in the row, margins included
    pub fn footprints(&self) -> Vec<RangeInclusive<i32>> {
        let margin = self.kind().margin();
        match self {
            Row::Forest { trees } => trees.iter().map(|t| footprint(t.tile, margin)).collect(),
            Row::Lane(lane) => lane
                .vehicles
                .iter()
                .map(|v| footprint(v.initial_tile, margin))
                .collect(),
        }
    }
}

/// Tiles covered by an obstacle spawned at `center`
#[inline]
pub fn footprint(center: i32, margin: i32) -> RangeInclusive<i32> {
    (center - margin)..=(center + margin)
}

/// True if two footprints share at least one tile
#[inline]
pub fn footprints_overlap(a: &RangeInclusive<i32>, b: &RangeInclusive<i32>) -> bool {
    a.start() <= b.end() && b.start() <= a.end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_tiles_fit_defaults() {
        assert_eq!(RowKind::Forest.min_tiles(), 4);
        assert_eq!(RowKind::Car.min_tiles(), 11);
        assert_eq!(RowKind::Truck.min_tiles(), 10);
        for kind in RowKind::ALL {
            assert!(kind.min_tiles() <= TILES_PER_ROW);
        }
    }

    #[test]
    fn test_footprint_overlap() {
        let car = footprint(0, CAR_MARGIN);
        assert!(footprints_overlap(&car, &footprint(2, CAR_MARGIN)));
        assert!(!footprints_overlap(&car, &footprint(3, CAR_MARGIN)));
        assert!(footprints_overlap(&footprint(0, TRUCK_MARGIN), &footprint(4, TRUCK_MARGIN)));
        assert!(!footprints_overlap(&footprint(0, 0), &footprint(1, 0)));
    }

    #[test]
    fn test_tree_lookup() {
        let row = Row::Forest {
            trees: vec![
                Tree {
                    tile: -3,
                    height: 20,
                },
                Tree {
                    tile: 5,
                    height: 60,
                },
            ],
        };
        assert!(row.has_tree_at(-3));
        assert!(row.has_tree_at(5));
        assert!(!row.has_tree_at(0));
        assert_eq!(row.kind(), RowKind::Forest);
        assert!(row.as_lane().is_none());
    }
}
