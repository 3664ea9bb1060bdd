//! Live bodies bound to generated obstacles
//!
//! The renderer owns the meshes; the simulation owns where they are. Each
//! realized vehicle gets a `Body` in this store and its row descriptor
//! keeps the handle. Scrolling writes body positions, collision reads them,
//! and the renderer copies them onto its scene graph every frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::row::Row;
use crate::error::{SimError, SimResult};
use crate::grid_to_world;

/// Index of a body in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Axis-aligned box on the ground plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Overlap test; touching edges count as a hit
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }
}

/// A moving obstacle body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Center in world units
    pub pos: Vec2,
    /// Width along the row, depth across it
    pub size: Vec2,
}

impl Body {
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.size)
    }
}

/// Store of every realized obstacle body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bodies {
    bodies: Vec<Body>,
}

impl Bodies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, body: Body) -> BodyHandle {
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(body);
        handle
    }

    pub fn get(&self, handle: BodyHandle) -> SimResult<&Body> {
        self.bodies
            .get(handle.0 as usize)
            .ok_or(SimError::UnknownBody(handle.0))
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> SimResult<&mut Body> {
        self.bodies
            .get_mut(handle.0 as usize)
            .ok_or(SimError::UnknownBody(handle.0))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.bodies
            .iter()
            .enumerate()
            .map(|(i, body)| (BodyHandle(i as u32), body))
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }
}

/// Create bodies for every vehicle of a lane row and bind their handles
///
/// `row_index` is the 1-based map row. Forest rows have nothing to bind.
/// Vehicles that already carry a handle are left alone.
pub fn realize_row(row_index: i32, row: &mut Row, bodies: &mut Bodies, tile_size: f32) {
    let Some(lane) = row.as_lane_mut() else {
        return;
    };
    let (length, depth) = lane.kind.body_size();
    for vehicle in lane.vehicles.iter_mut().filter(|v| v.body.is_none()) {
        let pos = grid_to_world(row_index, vehicle.initial_tile, tile_size);
        vehicle.body = Some(bodies.spawn(Body {
            pos,
            size: Vec2::new(length, depth),
        }));
    }
}

/// Body handle of a vehicle, or the fatal missing-binding error
pub fn bound_body(
    row_index: usize,
    vehicle_index: usize,
    handle: Option<BodyHandle>,
) -> SimResult<BodyHandle> {
    handle.ok_or(SimError::MissingBody {
        row: row_index,
        vehicle: vehicle_index,
    })
}
