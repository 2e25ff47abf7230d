//! Shared type definitions for the Wildgrove dispatch kernel.
//!
//! This crate is the single source of truth for the types that cross the
//! handler boundary: operations, entity patches, locations, and attribute
//! values. It has no dependency on the world store or the rule handlers --
//! everything downstream builds on these definitions.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers for entities and type names
//! - [`attr`] -- The dynamic attribute value type and well-known attribute names
//! - [`geometry`] -- Vectors and axis-aligned bounding boxes
//! - [`location`] -- Placement of an entity relative to a parent entity
//! - [`operation`] -- Named, directed, optionally deferred actions
//! - [`oplist`] -- Ordered operation sequences and handler results

pub mod attr;
pub mod geometry;
pub mod ids;
pub mod location;
pub mod operation;
pub mod oplist;

// Re-export all public types at crate root for convenience.
pub use attr::AttrValue;
pub use geometry::{BoundingBox, Vector3};
pub use ids::{EntityId, Parentage, TypeName};
pub use location::Location;
pub use operation::{EntityPatch, OpKind, Operation, UnknownOpKind};
pub use oplist::{HandlerResult, Oplist};
