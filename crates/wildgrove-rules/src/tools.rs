//! Fire-starting behavior for the tinderbox.
//!
//! Ignite is the one stock behavior that reaches into the world through
//! the context: the target named by the operation's first argument must
//! actually exist before a fire can be seated at its origin. Both failure
//! paths answer with an error reply -- failures cross the handler
//! boundary as operations, never as exceptions.

use wildgrove_types::attr::names;
use wildgrove_types::{
    EntityPatch, HandlerResult, Location, OpKind, Operation, Parentage, Vector3,
};
use wildgrove_world::EntityView;

use crate::context::RuleContext;
use crate::registry::error_reply;

/// Status a freshly struck fire starts at: barely alight.
const FIRE_STARTING_STATUS: f64 = 0.05;

/// Ignite on a tinderbox: create a small fire inside the named target.
pub fn tinderbox_ignite(
    entity: &EntityView<'_>,
    op: &Operation,
    ctx: &mut RuleContext<'_>,
) -> HandlerResult {
    if entity.is_inert() {
        return HandlerResult::None;
    }
    let Some(target) = op.first_arg().and_then(|arg| arg.entity_id) else {
        return error_reply(entity.id(), op, "target is undefined").into();
    };
    if ctx.lookup(target).is_none() {
        return error_reply(entity.id(), op, "target is not in the world").into();
    }

    Operation::new(OpKind::Create)
        .with_arg(
            EntityPatch::of_type(Parentage::single("fire"))
                .with_attr(names::STATUS, FIRE_STARTING_STATUS)
                .at(Location::new(target, Vector3::ZERO)),
        )
        .to_entity(target)
        .into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use wildgrove_types::{AttrValue, EntityId, TypeName};
    use wildgrove_world::{PrototypeRegistry, WorldState};

    use super::*;

    fn world_with_tinderbox() -> (WorldState, EntityId) {
        let mut world = WorldState::new(PrototypeRegistry::stock());
        let tinderbox = world
            .spawn(&EntityPatch::of_type(TypeName::from("tinderbox")), 0.0)
            .unwrap();
        (world, tinderbox)
    }

    fn run_ignite(world: &WorldState, tinderbox: EntityId, op: &Operation) -> Vec<Operation> {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ctx = RuleContext::new(world, &mut rng, 0.0);
        let view = world.view(tinderbox).unwrap();
        match tinderbox_ignite(&view, op, &mut ctx) {
            HandlerResult::None => Vec::new(),
            HandlerResult::One(op) => vec![op],
            HandlerResult::Many(ops) => ops.into_vec(),
        }
    }

    #[test]
    fn ignite_seats_a_small_fire_in_the_target() {
        let (mut world, tinderbox) = world_with_tinderbox();
        let log = world
            .spawn(&EntityPatch::of_type(TypeName::from("thing")), 0.0)
            .unwrap();

        let op = Operation::new(OpKind::Ignite)
            .with_arg(EntityPatch::for_entity(log))
            .to_entity(tinderbox);
        let ops = run_ignite(&world, tinderbox, &op);
        assert_eq!(ops.len(), 1);

        let create = ops.first().unwrap();
        assert_eq!(create.kind, OpKind::Create);
        assert_eq!(create.to, Some(log));
        let fire = create.first_arg().unwrap();
        assert_eq!(
            fire.attr(names::STATUS).and_then(AttrValue::as_float),
            Some(FIRE_STARTING_STATUS)
        );
        let seat = fire.location.as_ref().unwrap();
        assert_eq!(seat.parent, Some(log));
        assert_eq!(seat.coords, Vector3::ZERO);
    }

    #[test]
    fn ignite_without_a_target_is_an_error_reply() {
        let (world, tinderbox) = world_with_tinderbox();
        let sender = EntityId::new();
        let op = Operation::new(OpKind::Ignite)
            .to_entity(tinderbox)
            .from_entity(sender);

        let ops = run_ignite(&world, tinderbox, &op);
        assert_eq!(ops.len(), 1);
        let reply = ops.first().unwrap();
        assert_eq!(reply.kind, OpKind::Error);
        assert_eq!(reply.to, Some(sender));
    }

    #[test]
    fn ignite_at_a_missing_entity_is_an_error_reply() {
        let (world, tinderbox) = world_with_tinderbox();
        let op = Operation::new(OpKind::Ignite)
            .with_arg(EntityPatch::for_entity(EntityId::new()))
            .to_entity(tinderbox);

        let ops = run_ignite(&world, tinderbox, &op);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops.first().unwrap().kind, OpKind::Error);
    }
}
