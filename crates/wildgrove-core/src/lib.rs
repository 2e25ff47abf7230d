//! Operation router, result composer, and the delay-queue dispatch loop.
//!
//! This crate owns the dispatch contract end to end: operations enter
//! through [`Simulation::submit`], wait in the chronologically ordered
//! queue, and are drained in bounded batches by [`Simulation::idle`] --
//! primitives to the world store, everything else through the
//! [`Router`] to rule handlers, whose composed results feed back into
//! the same queue.
//!
//! # Modules
//!
//! - [`clock`] -- Monotonic simulation clock in seconds.
//! - [`composer`] -- Flattening of handler results into ordered sequences.
//! - [`config`] -- YAML configuration for the dispatch loop and engine.
//! - [`router`] -- Handler resolution and invocation; never mutates state.
//! - [`scheduler`] -- The delay queue with due-time ordering.
//! - [`simulation`] -- The single-threaded cooperative dispatch loop.
//!
//! [`Router`]: router::Router
//! [`Simulation::idle`]: simulation::Simulation::idle
//! [`Simulation::submit`]: simulation::Simulation::submit

pub mod clock;
pub mod composer;
pub mod config;
pub mod router;
pub mod scheduler;
pub mod simulation;

// Re-export primary types at crate root.
pub use clock::{ClockError, SimClock};
pub use config::{ConfigError, WildgroveConfig};
pub use router::Router;
pub use scheduler::Scheduler;
pub use simulation::{IdleSummary, Simulation};
