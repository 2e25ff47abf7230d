//! Wall placement when a house enters the world.
//!
//! A decorated house footprint is 8 x 8 with the south-west corner at
//! (-0.5, -0.5). Setup surrounds it with five wall segments: the south
//! side is split in two around the doorway, the other three sides are
//! single runs. Walls are created inside the house entity, so their
//! coordinates are relative to its origin.

use wildgrove_types::{
    BoundingBox, EntityPatch, HandlerResult, Location, OpKind, Operation, Oplist, Parentage,
    Vector3,
};
use wildgrove_world::EntityView;

use crate::context::RuleContext;

/// Wall segments as (offset, extent) pairs relative to the house origin.
const WALLS: [(Vector3, Vector3); 5] = [
    // South wall, split around the door
    (Vector3::new(-0.5, -0.5, 0.0), Vector3::new(2.0, 0.5, 5.0)),
    (Vector3::new(3.5, -0.5, 0.0), Vector3::new(4.0, 0.5, 5.0)),
    // West wall
    (Vector3::new(-0.5, -0.5, 0.0), Vector3::new(0.5, 8.0, 5.0)),
    // North wall
    (Vector3::new(-0.5, 7.0, 0.0), Vector3::new(8.0, 0.5, 5.0)),
    // East wall
    (Vector3::new(7.0, -0.5, 0.0), Vector3::new(0.5, 8.0, 5.0)),
];

/// Setup on a house: create the five wall segments.
pub fn house_setup(
    entity: &EntityView<'_>,
    _op: &Operation,
    _ctx: &mut RuleContext<'_>,
) -> HandlerResult {
    if entity.is_inert() {
        return HandlerResult::None;
    }

    let mut res = Oplist::new();
    for (offset, extent) in WALLS {
        let placement =
            Location::new(entity.id(), offset).with_bbox(BoundingBox::from_size(extent));
        res.push(
            Operation::new(OpKind::Create)
                .with_arg(
                    EntityPatch::of_type(Parentage::single("wall"))
                        .named("wall")
                        .at(placement),
                )
                .to_entity(entity.id()),
        );
    }
    res.into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use wildgrove_types::TypeName;
    use wildgrove_world::{PrototypeRegistry, WorldState};

    use super::*;

    #[test]
    fn setup_creates_five_walls_inside_the_house() {
        let mut world = WorldState::new(PrototypeRegistry::stock());
        let house = world
            .spawn(&EntityPatch::of_type(TypeName::from("house")), 0.0)
            .unwrap();

        let op = Operation::new(OpKind::Setup).to_entity(house);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ctx = RuleContext::new(&world, &mut rng, 0.0);
        let view = world.view(house).unwrap();

        let result = house_setup(&view, &op, &mut ctx);
        let ops = match result {
            HandlerResult::Many(ops) => ops.into_vec(),
            HandlerResult::One(op) => vec![op],
            HandlerResult::None => Vec::new(),
        };
        assert_eq!(ops.len(), 5);

        for op in &ops {
            assert_eq!(op.kind, OpKind::Create);
            assert_eq!(op.to, Some(house));
            let wall = op.first_arg().unwrap();
            assert_eq!(wall.name.as_deref(), Some("wall"));
            let placement = wall.location.as_ref().unwrap();
            assert_eq!(placement.parent, Some(house));
            assert!(placement.bbox.is_some());
        }

        // First segment: the short south run beside the door.
        let first = ops.first().unwrap();
        let placement = first.first_arg().unwrap().location.as_ref().unwrap();
        assert_eq!(placement.coords, Vector3::new(-0.5, -0.5, 0.0));
        assert_eq!(
            placement.bbox.unwrap().high,
            Vector3::new(2.0, 0.5, 5.0)
        );
    }

    #[test]
    fn inert_house_does_not_build() {
        let mut world = WorldState::new(PrototypeRegistry::stock());
        let house = world
            .spawn(
                &EntityPatch::of_type(TypeName::from("house"))
                    .with_attr(wildgrove_types::attr::names::STATUS, -1.0),
                0.0,
            )
            .unwrap();

        let op = Operation::new(OpKind::Setup).to_entity(house);
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ctx = RuleContext::new(&world, &mut rng, 0.0);
        let view = world.view(house).unwrap();

        assert!(house_setup(&view, &op, &mut ctx).is_none());
    }
}
