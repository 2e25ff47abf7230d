//! Placement of an entity relative to a parent entity.
//!
//! A location is parent reference + relative coordinates, optionally with a
//! bounding box and a velocity. Locations are plain values: a handler that
//! wants to emit a modified placement clones the original and edits the
//! clone, so the source entity is untouched until the host applies the
//! resulting `set` or `move` operation.

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Vector3};
use crate::ids::EntityId;

/// Where an entity sits, relative to its containing parent entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// The entity this location is relative to (`None` at the world root).
    pub parent: Option<EntityId>,
    /// Coordinates relative to the parent's origin.
    pub coords: Vector3,
    /// Spatial extent, when known.
    pub bbox: Option<BoundingBox>,
    /// Velocity, when moving.
    pub velocity: Option<Vector3>,
}

impl Location {
    /// Create a location inside `parent` at the given coordinates.
    pub const fn new(parent: EntityId, coords: Vector3) -> Self {
        Self {
            parent: Some(parent),
            coords,
            bbox: None,
            velocity: None,
        }
    }

    /// Create a location at the world root.
    pub const fn at_root(coords: Vector3) -> Self {
        Self {
            parent: None,
            coords,
            bbox: None,
            velocity: None,
        }
    }

    /// Attach a bounding box.
    pub const fn with_bbox(mut self, bbox: BoundingBox) -> Self {
        self.bbox = Some(bbox);
        self
    }

    /// Attach a velocity.
    pub const fn with_velocity(mut self, velocity: Vector3) -> Self {
        self.velocity = Some(velocity);
        self
    }

    /// A copy of this location with the velocity zeroed.
    pub fn stilled(&self) -> Self {
        let mut copy = self.clone();
        copy.velocity = Some(Vector3::ZERO);
        copy
    }

    /// A copy of this location displaced by `offset` within the same parent.
    pub fn displaced(&self, offset: Vector3) -> Self {
        let mut copy = self.clone();
        copy.coords = copy.coords + offset;
        copy
    }
}
