//! Vectors and axis-aligned bounding boxes.
//!
//! Geometry here is deliberately small: enough for handlers to place
//! created entities and to carry bounding volumes through the mutation
//! protocol. Physics proper stays with the host.

use serde::{Deserialize, Serialize};

/// A point or displacement in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    /// East-west component.
    pub x: f64,
    /// North-south component.
    pub y: f64,
    /// Vertical component.
    pub z: f64,
}

impl Vector3 {
    /// The zero vector.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a vector from its components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl core::ops::Add for Vector3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

/// An axis-aligned bounding box given by two opposite corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// The corner with the smallest coordinates.
    pub low: Vector3,
    /// The corner with the largest coordinates.
    pub high: Vector3,
}

impl BoundingBox {
    /// Create a box from its two corners.
    pub const fn new(low: Vector3, high: Vector3) -> Self {
        Self { low, high }
    }

    /// Create a box from the wire form `[lx, ly, lz, hx, hy, hz]`.
    pub const fn from_corners(corners: [f64; 6]) -> Self {
        let [lx, ly, lz, hx, hy, hz] = corners;
        Self {
            low: Vector3::new(lx, ly, lz),
            high: Vector3::new(hx, hy, hz),
        }
    }

    /// Create a box extending from the origin by the given size.
    ///
    /// This matches the single-vector bounding-volume form used when
    /// placing walls: the box spans `[0, size]` on each axis.
    pub const fn from_size(size: Vector3) -> Self {
        Self {
            low: Vector3::ZERO,
            high: size,
        }
    }
}
