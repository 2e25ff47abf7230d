//! Dispatch table and stock rule handlers for the Wildgrove simulation.
//!
//! A rule handler is a pure function: it receives a transient view of the
//! target entity, the incoming operation, and an explicit [`RuleContext`],
//! and answers with zero, one, or many follow-up operations. Handlers never
//! mutate the world; the dispatch loop applies what they return.
//!
//! Handlers are looked up through a [`Ruleset`] built once at registration
//! time -- an explicit `(type, operation)` table resolved along the
//! prototype parent chain, so behaviors registered on a base type cover
//! its descendants.
//!
//! # Modules
//!
//! - [`context`] -- The explicit per-dispatch context handed to handlers.
//! - [`registry`] -- The [`Ruleset`] dispatch table and the error-reply
//!   convention.
//! - [`animals`] -- Chop behaviors for huntable animals.
//! - [`seeds`] -- Eat, decay, and germination behaviors for seeds.
//! - [`buildings`] -- Wall placement when a house enters the world.
//! - [`undead`] -- Collapse-on-touch behavior for skeletons.
//! - [`tools`] -- Fire-starting behavior for the tinderbox.

pub mod animals;
pub mod buildings;
pub mod context;
pub mod registry;
pub mod seeds;
pub mod tools;
pub mod undead;

// Re-export the handler contract at crate root.
pub use context::RuleContext;
pub use registry::{RuleFn, Ruleset, error_reply};
