//! The explicit context handed to every rule handler call.
//!
//! There is no ambient world or server handle anywhere in the handler
//! code: everything a handler may consult arrives through [`RuleContext`].
//! That keeps handlers deterministic under test (seed the rng, fix the
//! clock) and makes the dispatch loop the only place that wires state
//! together.

use rand::rngs::SmallRng;

use wildgrove_types::EntityId;
use wildgrove_world::{EntityView, WorldState};

/// Read access to the world plus the per-dispatch services a handler may
/// need: randomness and the current simulation time.
#[derive(Debug)]
pub struct RuleContext<'a> {
    /// Read-only view of the entity store.
    pub world: &'a WorldState,
    /// Seeded random source for handlers that jitter (bone scatter).
    pub rng: &'a mut SmallRng,
    /// Simulation seconds at which the operation is being dispatched.
    pub now: f64,
}

impl<'a> RuleContext<'a> {
    /// Bundle a context from its parts.
    pub const fn new(world: &'a WorldState, rng: &'a mut SmallRng, now: f64) -> Self {
        Self { world, rng, now }
    }

    /// Look up another entity by id.
    pub fn lookup(&self, id: EntityId) -> Option<EntityView<'a>> {
        self.world.view(id)
    }
}
