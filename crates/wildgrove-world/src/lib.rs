//! Prototype registry and entity store for the Wildgrove simulation.
//!
//! This crate owns the entity side of the dispatch contract: prototype
//! templates that entities inherit default attributes from, the runtime
//! entity store, and the application of the primitive mutation operations
//! (`set`, `create`, `move`, `delete`) that handlers emit.
//!
//! # Modules
//!
//! - [`entity`] -- The runtime [`Entity`] record and the transient
//!   [`EntityView`] handle with prototype-overlay attribute lookup.
//! - [`error`] -- Error types for store and registry operations.
//! - [`prototype`] -- [`PrototypeRegistry`]: type name to attribute
//!   template, with parent-chain resolution and the stock grove types.
//! - [`world`] -- [`WorldState`]: the entity store and the primitive
//!   operation application.
//!
//! [`Entity`]: entity::Entity
//! [`EntityView`]: entity::EntityView

pub mod entity;
pub mod error;
pub mod prototype;
pub mod world;

// Re-export primary types at crate root.
pub use entity::{Entity, EntityView};
pub use error::WorldError;
pub use prototype::{Prototype, PrototypeRegistry};
pub use world::{Applied, WorldState};
