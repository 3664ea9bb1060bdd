//! Player vs. traffic collision
//!
//! Only the row the player is committed to is examined. A vehicle one row
//! over can never end the run, however close it passes.

use super::bodies::{Bodies, bound_body};
use super::grid::GridPosition;
use super::map::MapState;
use super::motion::PlayerPose;
use crate::error::SimResult;

/// A vehicle overlapping the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VehicleHit {
    /// 1-based map row
    pub row: i32,
    /// Index of the vehicle within its lane
    pub vehicle: usize,
}

/// First vehicle in the player's row whose bounds touch the player's
pub fn detect_collision(
    map: &MapState,
    bodies: &Bodies,
    position: GridPosition,
    pose: &PlayerPose,
) -> SimResult<Option<VehicleHit>> {
    let Some(lane) = map.row(position.row).and_then(|row| row.as_lane()) else {
        return Ok(None);
    };

    let player = pose.bounds();
    for (index, vehicle) in lane.vehicles.iter().enumerate() {
        let handle = bound_body(position.row as usize, index, vehicle.body)?;
        if player.intersects(&bodies.get(handle)?.bounds()) {
            return Ok(Some(VehicleHit {
                row: position.row,
                vehicle: index,
            }));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::bodies::realize_row;
    use crate::sim::row::{Direction, Lane, LaneKind, Row, Tree, Vehicle};
    use glam::Vec2;

    /// Row 1: car at tile 3, row 2: forest, row 3: truck at tile 0
    fn traffic() -> (MapState, Bodies) {
        let settings = Settings::default();
        let lane = |kind, tile| {
            Row::Lane(Lane {
                kind,
                direction: Direction::Right,
                speed: 0.0,
                vehicles: vec![Vehicle {
                    initial_tile: tile,
                    color: 0xa52523,
                    body: None,
                }],
            })
        };
        let mut rows = vec![
            lane(LaneKind::Car, 3),
            Row::Forest {
                trees: vec![Tree {
                    tile: 5,
                    height: 20,
                }],
            },
            lane(LaneKind::Truck, 0),
        ];
        let mut bodies = Bodies::new();
        for (i, row) in rows.iter_mut().enumerate() {
            realize_row(i as i32 + 1, row, &mut bodies, TILE_SIZE);
        }
        (MapState::from_rows(&settings, rows), bodies)
    }

    #[test]
    fn test_clear_of_traffic() {
        let (map, bodies) = traffic();
        let position = GridPosition::new(1, 0);
        let pose = PlayerPose::at(position, TILE_SIZE);
        assert_eq!(detect_collision(&map, &bodies, position, &pose).expect("ok"), None);
    }

    #[test]
    fn test_overlap_hits() {
        let (map, bodies) = traffic();
        let position = GridPosition::new(1, 3);
        let pose = PlayerPose::at(position, TILE_SIZE);
        assert_eq!(
            detect_collision(&map, &bodies, position, &pose).expect("ok"),
            Some(VehicleHit { row: 1, vehicle: 0 })
        );
    }

    #[test]
    fn test_edge_contact_counts() {
        let (map, bodies) = traffic();
        let position = GridPosition::new(1, 2);
        // Car spans 3*48 +/- 30; place the player's right edge on its left edge
        let mut pose = PlayerPose::at(position, TILE_SIZE);
        pose.pos.x = 3.0 * TILE_SIZE - CAR_SIZE.0 / 2.0 - PLAYER_SIZE.0 / 2.0;
        assert!(detect_collision(&map, &bodies, position, &pose).expect("ok").is_some());
        pose.pos.x -= 1.0;
        assert!(detect_collision(&map, &bodies, position, &pose).expect("ok").is_none());
    }

    #[test]
    fn test_other_rows_ignored() {
        let (map, bodies) = traffic();
        // Standing in the forest row, drawn right on top of the truck
        let position = GridPosition::new(2, 0);
        let mut pose = PlayerPose::at(position, TILE_SIZE);
        pose.pos = Vec2::new(0.0, 3.0 * TILE_SIZE);
        assert_eq!(detect_collision(&map, &bodies, position, &pose).expect("ok"), None);

        // Start strip has no row at all
        let origin = GridPosition::ORIGIN;
        let pose = PlayerPose::at(origin, TILE_SIZE);
        assert_eq!(detect_collision(&map, &bodies, origin, &pose).expect("ok"), None);
    }
}
