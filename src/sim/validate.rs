//! Move validation
//!
//! A candidate is always checked together with everything already queued,
//! so a buffered sequence can never route the player through a tree or off
//! the generated map.

use super::grid::{GridPosition, MoveIntent, apply_moves};
use super::map::MapState;

/// True if `moves`, applied from `position`, end on a legal cell
pub fn is_valid<'a, I>(map: &MapState, position: GridPosition, moves: I) -> bool
where
    I: IntoIterator<Item = &'a MoveIntent>,
{
    let target = apply_moves(position, moves);
    let (min_tile, max_tile) = map.tile_range();

    if target.row < 1 || target.tile < min_tile || target.tile > max_tile {
        return false;
    }

    match map.row(target.row) {
        // Past the generated edge
        None => false,
        Some(row) => !row.has_tree_at(target.tile),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::settings::Settings;
    use crate::sim::row::{Direction, Lane, LaneKind, Row, Tree, Vehicle};
    use proptest::prelude::*;

    fn scenario_map() -> MapState {
        let grass = || Row::Forest { trees: Vec::new() };
        let rows = vec![
            grass(),
            Row::Lane(Lane {
                kind: LaneKind::Car,
                direction: Direction::Right,
                speed: 125.0,
                vehicles: vec![Vehicle {
                    initial_tile: 0,
                    color: 0xa52523,
                    body: None,
                }],
            }),
            Row::Forest {
                trees: vec![
                    Tree {
                        tile: 0,
                        height: 45,
                    },
                    Tree {
                        tile: 4,
                        height: 20,
                    },
                ],
            },
            grass(),
        ];
        MapState::from_rows(&Settings::default(), rows)
    }

    #[test]
    fn test_bounds() {
        let map = scenario_map();
        let origin = GridPosition::ORIGIN;
        assert!(is_valid(&map, origin, &[MoveIntent::Forward]));
        // Row 0 is not a playable target
        assert!(!is_valid(&map, origin, &[MoveIntent::Left]));
        assert!(!is_valid(&map, origin, &[MoveIntent::Backward]));
        // Past the last generated row
        assert!(!is_valid(&map, GridPosition::new(4, 0), &[MoveIntent::Forward]));
        // Tile range
        assert!(is_valid(
            &map,
            GridPosition::new(1, MAX_TILE),
            &[MoveIntent::Backward, MoveIntent::Forward]
        ));
        assert!(!is_valid(&map, GridPosition::new(1, MAX_TILE), &[MoveIntent::Right]));
        assert!(!is_valid(&map, GridPosition::new(1, MIN_TILE), &[MoveIntent::Left]));
    }

    #[test]
    fn test_trees_block_exact_tile_only() {
        let map = scenario_map();
        assert!(!is_valid(&map, GridPosition::new(2, 0), &[MoveIntent::Forward]));
        assert!(is_valid(&map, GridPosition::new(2, 1), &[MoveIntent::Forward]));
        assert!(!is_valid(&map, GridPosition::new(3, 3), &[MoveIntent::Right]));
        // Vehicles never block a move
        assert!(is_valid(&map, GridPosition::new(1, 0), &[MoveIntent::Forward]));
    }

    #[test]
    fn test_third_forward_hits_tree() {
        let map = scenario_map();
        let origin = GridPosition::ORIGIN;
        let mut queue = Vec::new();
        for _ in 0..2 {
            queue.push(MoveIntent::Forward);
            assert!(is_valid(&map, origin, &queue));
        }
        queue.push(MoveIntent::Forward);
        assert!(!is_valid(&map, origin, &queue));
    }

    proptest! {
        #[test]
        fn prop_valid_iff_in_bounds_and_not_on_tree(
            row in -2i32..8,
            tile in (MIN_TILE - 2)..=(MAX_TILE + 2),
        ) {
            let map = scenario_map();
            let target = GridPosition::new(row, tile);
            let none: [MoveIntent; 0] = [];
            let expected = row >= 1
                && row <= map.len() as i32
                && (MIN_TILE..=MAX_TILE).contains(&tile)
                && !map.row(row).is_some_and(|r| r.has_tree_at(tile));
            prop_assert_eq!(is_valid(&map, target, &none), expected);
        }
    }
}
