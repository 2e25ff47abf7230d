//! The single-threaded cooperative dispatch loop.
//!
//! [`Simulation`] wires the pieces together: the world store, the router,
//! the delay queue, the clock, and a seeded random source. Operations are
//! handled strictly one at a time -- each to completion before the next --
//! and scheduled operations are the only asynchrony, re-entering the same
//! loop when due. No locking is needed under this model; any parallel
//! subsystem of the host must serialize access on its side.
//!
//! Each [`Simulation::idle`] call drains at most a configured batch of due
//! operations, mirroring the original dispatcher's cap, and reports
//! whether more are already due so the host can skip sleeping.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use tracing::{debug, warn};

use wildgrove_rules::{RuleContext, Ruleset};
use wildgrove_types::{EntityId, EntityPatch, OpKind, Operation};
use wildgrove_world::{WorldError, WorldState};

use crate::clock::{ClockError, SimClock};
use crate::composer;
use crate::config::DispatchSettings;
use crate::router::Router;
use crate::scheduler::Scheduler;

/// Summary of a single idle cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IdleSummary {
    /// Operations dispatched this cycle.
    pub dispatched: u32,
    /// Follow-up operations emitted by handlers this cycle.
    pub emitted: u32,
    /// Primitive applications that failed (logged and skipped).
    pub faults: u32,
    /// Whether more operations were already due when the cycle ended.
    /// The host uses this to keep draining without sleeping.
    pub more_due: bool,
}

/// The dispatch loop: world, router, queue, clock, and randomness in one
/// single-threaded bundle.
#[derive(Debug)]
pub struct Simulation {
    world: WorldState,
    router: Router,
    scheduler: Scheduler,
    clock: SimClock,
    rng: SmallRng,
    max_ops_per_idle: u32,
}

impl Simulation {
    /// Assemble a simulation from a world, a dispatch table, and the
    /// dispatch settings. The random source is seeded from `seed` so runs
    /// are reproducible.
    pub fn new(world: WorldState, ruleset: Ruleset, settings: &DispatchSettings, seed: u64) -> Self {
        Self {
            world,
            router: Router::new(ruleset),
            scheduler: Scheduler::new(
                settings.time_multiplier,
                settings.idle_horizon_seconds,
            ),
            clock: SimClock::new(),
            rng: SmallRng::seed_from_u64(seed),
            max_ops_per_idle: settings.max_ops_per_idle,
        }
    }

    /// Read access to the world store.
    pub const fn world(&self) -> &WorldState {
        &self.world
    }

    /// The current simulation time, in seconds.
    pub const fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Number of operations waiting in the queue, due or not.
    pub fn queue_len(&self) -> usize {
        self.scheduler.len()
    }

    /// Seconds until the next queued operation is due; the idle horizon
    /// when the queue is empty.
    pub fn seconds_until_next_op(&self) -> f64 {
        self.scheduler.seconds_until_next(self.clock.now())
    }

    /// Move the clock forward. Returns the new reading.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidAdvance`] for negative or non-finite
    /// deltas.
    pub fn advance(&mut self, dt: f64) -> Result<f64, ClockError> {
        self.clock.advance(dt)
    }

    /// Submit an operation to the queue, attributed to `from` when given.
    pub fn submit(&mut self, op: Operation, from: Option<EntityId>) {
        self.scheduler.enqueue(op, from, self.clock.now());
    }

    /// Spawn an entity and fire the conventional `setup` operation at it.
    ///
    /// Entities react to entering the world through their `setup` handler
    /// (an acorn schedules its decay, a house raises its walls), so every
    /// spawn through the simulation announces itself.
    ///
    /// # Errors
    ///
    /// Returns the world store's spawn errors unchanged.
    pub fn spawn(&mut self, patch: &EntityPatch) -> Result<EntityId, WorldError> {
        let now = self.clock.now();
        let id = self.world.spawn(patch, now)?;
        self.scheduler
            .enqueue(Operation::new(OpKind::Setup).to_entity(id), Some(id), now);
        Ok(id)
    }

    /// Drain due operations, up to the configured per-cycle cap.
    ///
    /// Each operation is stamped with the current clock reading, then
    /// either applied to the world (primitives) or routed to its handler;
    /// handler results are composed and fed back into the queue at the
    /// same instant, preserving emission order. Faults in primitive
    /// application are logged and skipped -- one bad operation never
    /// stalls the loop.
    pub fn idle(&mut self) -> IdleSummary {
        let now = self.clock.now();
        let mut summary = IdleSummary::default();

        while summary.dispatched < self.max_ops_per_idle {
            let Some(mut op) = self.scheduler.pop_due(now) else {
                break;
            };
            op.stamp_seconds(now);
            summary.dispatched = summary.dispatched.saturating_add(1);

            if op.kind.is_primitive() {
                match self.world.apply(&op, now) {
                    Ok(applied) => debug!(?applied, kind = %op.kind, "Primitive applied"),
                    Err(error) => {
                        warn!(%error, kind = %op.kind, "Primitive application failed");
                        summary.faults = summary.faults.saturating_add(1);
                    }
                }
                continue;
            }

            let result = {
                let mut ctx = RuleContext::new(&self.world, &mut self.rng, now);
                self.router.route(&op, &mut ctx)
            };
            let follow_ups = composer::compose(result);
            summary.emitted = summary
                .emitted
                .saturating_add(u32::try_from(follow_ups.len()).unwrap_or(u32::MAX));
            // Results are attributed to the entity that produced them.
            for follow_up in follow_ups {
                self.scheduler.enqueue(follow_up, op.to, now);
            }
        }

        summary.more_due = self
            .scheduler
            .next_due()
            .is_some_and(|due| due <= now);
        summary
    }

    /// Run idle cycles until nothing more is due at the current time, or
    /// until `max_cycles` is reached. Returns the total dispatched.
    ///
    /// This does not advance the clock; scheduled operations still in the
    /// future stay queued.
    pub fn run_until_quiet(&mut self, max_cycles: u32) -> u32 {
        let mut total: u32 = 0;
        for _ in 0..max_cycles {
            let summary = self.idle();
            total = total.saturating_add(summary.dispatched);
            if !summary.more_due {
                break;
            }
        }
        total
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use wildgrove_types::TypeName;
    use wildgrove_types::attr::names;
    use wildgrove_world::PrototypeRegistry;

    use super::*;

    fn make_simulation() -> Simulation {
        Simulation::new(
            WorldState::new(PrototypeRegistry::stock()),
            Ruleset::stock(),
            &DispatchSettings::default(),
            42,
        )
    }

    #[test]
    fn spawn_fires_setup_at_the_new_entity() {
        let mut sim = make_simulation();
        let acorn = sim
            .spawn(&EntityPatch::of_type(TypeName::from("acorn")))
            .unwrap();

        // The setup op sits in the queue, due immediately.
        assert_eq!(sim.queue_len(), 1);
        let summary = sim.idle();
        assert_eq!(summary.dispatched, 1);

        // Setup scheduled the acorn's decay tick 1800 s out.
        assert_eq!(sim.queue_len(), 1);
        assert_eq!(sim.seconds_until_next_op(), 1800.0);
        assert!(sim.world().contains(acorn));
    }

    #[test]
    fn idle_respects_the_batch_cap() {
        let mut sim = Simulation::new(
            WorldState::new(PrototypeRegistry::stock()),
            Ruleset::stock(),
            &DispatchSettings {
                max_ops_per_idle: 3,
                ..DispatchSettings::default()
            },
            42,
        );

        for _ in 0..5 {
            sim.submit(Operation::new(OpKind::Tick), None);
        }
        let summary = sim.idle();
        assert_eq!(summary.dispatched, 3);
        assert!(summary.more_due);

        let summary = sim.idle();
        assert_eq!(summary.dispatched, 2);
        assert!(!summary.more_due);
    }

    #[test]
    fn primitive_faults_are_counted_not_fatal() {
        let mut sim = make_simulation();
        // A set against nothing: no patch, no target.
        sim.submit(Operation::new(OpKind::Set), None);
        let summary = sim.idle();
        assert_eq!(summary.dispatched, 1);
        assert_eq!(summary.faults, 1);
    }

    #[test]
    fn handler_results_apply_within_one_drain() {
        let mut sim = make_simulation();
        let acorn = sim
            .spawn(&EntityPatch::of_type(TypeName::from("acorn")))
            .unwrap();
        let _ = sim.run_until_quiet(10);

        // Decay tick: advance past it and drain.
        let _ = sim.advance(1800.0).unwrap();
        let dispatched = sim.run_until_quiet(10);
        // The tick itself plus the terminal set it emitted.
        assert_eq!(dispatched, 2);
        assert!(sim.world().view(acorn).unwrap().is_inert());
    }

    #[test]
    fn run_until_quiet_leaves_future_ops_queued() {
        let mut sim = make_simulation();
        let _ = sim
            .spawn(&EntityPatch::of_type(TypeName::from("acorn")))
            .unwrap();
        let _ = sim.run_until_quiet(10);
        assert_eq!(sim.queue_len(), 1);
    }

    #[test]
    fn dispatched_ops_are_stamped_with_the_clock() {
        let mut sim = make_simulation();
        let deer = sim
            .spawn(&EntityPatch::of_type(TypeName::from("deer")))
            .unwrap();
        let _ = sim.run_until_quiet(10);

        let _ = sim.advance(12.5).unwrap();
        sim.submit(
            Operation::new(OpKind::Set)
                .with_arg(EntityPatch::for_entity(deer).with_attr(names::MASS, 90.0))
                .to_entity(deer),
            None,
        );
        let _ = sim.run_until_quiet(10);
        assert_eq!(sim.world().view(deer).unwrap().mass().unwrap(), 90.0);
    }
}
