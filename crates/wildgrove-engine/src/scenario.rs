//! The demonstration grove seeded at engine startup.
//!
//! A small scene exercising every stock behavior: a house that raises its
//! walls on setup, animals to chop, acorns whose decay timers populate
//! the delay queue, a skeleton to touch, and a tinderbox. The engine only
//! seeds it; what happens next is driven entirely by operations.

use tracing::debug;

use wildgrove_core::Simulation;
use wildgrove_types::{EntityId, EntityPatch, Location, Parentage, Vector3};

use crate::error::EngineError;

/// Number of acorns scattered under the oak stand.
const ACORN_COUNT: usize = 3;

/// Handles to the seeded entities, for logging and poking at the world.
#[derive(Debug, Clone)]
pub struct SeededGrove {
    /// The root ground entity everything else sits on.
    pub ground: EntityId,
    /// The house (walls appear once its setup fires).
    pub house: EntityId,
    /// A full-grown deer.
    pub deer: EntityId,
    /// A pig.
    pub pig: EntityId,
    /// A skeleton waiting to be touched.
    pub skeleton: EntityId,
    /// A tinderbox.
    pub tinderbox: EntityId,
    /// Acorns with decay timers running.
    pub acorns: Vec<EntityId>,
}

/// Spawn the demonstration grove into a fresh simulation.
///
/// Every spawn goes through [`Simulation::spawn`], so each entity's
/// `setup` operation is queued and will fire on the first idle cycle.
///
/// # Errors
///
/// Returns [`EngineError::World`] if any spawn is rejected.
pub fn seed_grove(sim: &mut Simulation) -> Result<SeededGrove, EngineError> {
    let ground = sim.spawn(
        &EntityPatch::of_type(Parentage::single("thing")).named("ground"),
    )?;

    let house = sim.spawn(
        &EntityPatch::of_type(Parentage::single("house"))
            .named("house")
            .at(Location::new(ground, Vector3::new(20.0, 20.0, 0.0))),
    )?;
    let deer = sim.spawn(
        &EntityPatch::of_type(Parentage::single("deer"))
            .named("deer")
            .at(Location::new(ground, Vector3::new(5.0, 40.0, 0.0))),
    )?;
    let pig = sim.spawn(
        &EntityPatch::of_type(Parentage::single("pig"))
            .named("pig")
            .at(Location::new(ground, Vector3::new(12.0, 35.0, 0.0))),
    )?;
    let skeleton = sim.spawn(
        &EntityPatch::of_type(Parentage::single("skeleton"))
            .named("skeleton")
            .at(Location::new(ground, Vector3::new(40.0, 8.0, 0.0))),
    )?;
    let tinderbox = sim.spawn(
        &EntityPatch::of_type(Parentage::single("tinderbox"))
            .named("tinderbox")
            .at(Location::new(ground, Vector3::new(21.0, 21.0, 0.0))),
    )?;

    let mut acorns = Vec::with_capacity(ACORN_COUNT);
    let mut offset = 0.0;
    for _ in 0..ACORN_COUNT {
        let acorn = sim.spawn(
            &EntityPatch::of_type(Parentage::single("acorn"))
                .named("acorn")
                .at(Location::new(ground, Vector3::new(30.0 + offset, 15.0, 0.0))),
        )?;
        acorns.push(acorn);
        offset += 2.0;
    }

    debug!(
        %ground, %house, %deer, %pig, %skeleton, %tinderbox,
        acorns = acorns.len(),
        "Grove seeded"
    );

    Ok(SeededGrove {
        ground,
        house,
        deer,
        pig,
        skeleton,
        tinderbox,
        acorns,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use wildgrove_core::config::DispatchSettings;
    use wildgrove_rules::Ruleset;
    use wildgrove_types::TypeName;
    use wildgrove_world::{PrototypeRegistry, WorldState};

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
    fn grove_seeds_and_settles() {
        let mut sim = make_simulation();
        let grove = seed_grove(&mut sim).unwrap();

        // Ground, house, deer, pig, skeleton, tinderbox, three acorns.
        assert_eq!(sim.world().len(), 8);

        // Let every setup fire.
        let _ = sim.run_until_quiet(20);

        // The house raised its walls.
        let wall_type = TypeName::from("wall");
        assert_eq!(sim.world().entities_of_type(&wall_type).count(), 5);

        // Each acorn's decay tick is waiting in the queue.
        assert_eq!(sim.queue_len(), grove.acorns.len());
    }
}
