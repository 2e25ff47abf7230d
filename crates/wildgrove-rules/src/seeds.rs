//! Eat, decay, and germination behaviors for seeds.
//!
//! An acorn is the stock seed: it nourishes whoever eats it, decays on a
//! scheduled timer if nothing happens to it first, and germinates into an
//! oak at its own spot. Every path ends the acorn with a terminal
//! `set status=-1`; the paths differ only in what else they produce.

use wildgrove_types::attr::names;
use wildgrove_types::{
    BoundingBox, EntityPatch, HandlerResult, Location, OpKind, Operation, Oplist, Parentage,
};
use wildgrove_world::EntityView;

use crate::context::RuleContext;
use crate::registry::error_reply;

/// Seconds from setup until an untouched acorn decays away.
pub const ACORN_DECAY_SECONDS: f64 = 1800.0;

/// Bounding volume of a freshly germinated oak sapling.
const SAPLING_BBOX: [f64; 6] = [-0.02, -0.02, 0.0, 0.02, 0.02, 0.12];

/// Eat on an acorn: the acorn goes inert and its mass is delivered to the
/// eater as nourishment. An eat with no sender cannot be answered and gets
/// an error reply.
pub fn acorn_eat(
    entity: &EntityView<'_>,
    op: &Operation,
    _ctx: &mut RuleContext<'_>,
) -> HandlerResult {
    if entity.is_inert() {
        return HandlerResult::None;
    }
    let Some(eater) = op.from else {
        return error_reply(entity.id(), op, "eater is undefined").into();
    };

    let mut res = Oplist::new();
    res.push(
        Operation::new(OpKind::Set)
            .with_arg(EntityPatch::for_entity(entity.id()).with_attr(names::STATUS, -1.0))
            .to_entity(entity.id()),
    );
    res.push(
        Operation::new(OpKind::Nourish)
            .with_arg(
                EntityPatch::for_entity(eater)
                    .with_attr(names::MASS, entity.mass().unwrap_or(0.0)),
            )
            .to_entity(eater),
    );
    res.into()
}

/// Setup on an acorn: schedule the decay tick.
///
/// Acorns do not last forever; a real one would germinate first.
pub fn acorn_setup(
    entity: &EntityView<'_>,
    _op: &Operation,
    _ctx: &mut RuleContext<'_>,
) -> HandlerResult {
    Operation::new(OpKind::Tick)
        .to_entity(entity.id())
        .after_seconds(ACORN_DECAY_SECONDS)
        .into()
}

/// Tick on an acorn: the decay timer fired; the acorn rots away.
///
/// Idempotent by the inert guard -- a tick reaching an acorn that already
/// went inert (eaten, germinated, or previously decayed) does nothing, so
/// a re-fired timer never pushes status further down.
pub fn acorn_tick(
    entity: &EntityView<'_>,
    _op: &Operation,
    _ctx: &mut RuleContext<'_>,
) -> HandlerResult {
    if entity.is_inert() {
        return HandlerResult::None;
    }
    Operation::new(OpKind::Set)
        .with_arg(EntityPatch::for_entity(entity.id()).with_attr(names::STATUS, -1.0))
        .to_entity(entity.id())
        .into()
}

/// Germinate on an acorn: the acorn goes inert and an oak is created in
/// its place -- same parent, same coordinates, the acorn's mass, and the
/// sapling bounding volume.
pub fn acorn_germinate(
    entity: &EntityView<'_>,
    op: &Operation,
    _ctx: &mut RuleContext<'_>,
) -> HandlerResult {
    if entity.is_inert() {
        return HandlerResult::None;
    }
    let Some(spot) = entity.location() else {
        return error_reply(entity.id(), op, "seed has no location").into();
    };

    let sprout_spot = Location {
        parent: spot.parent,
        coords: spot.coords,
        bbox: Some(BoundingBox::from_corners(SAPLING_BBOX)),
        velocity: None,
    };

    let mut res = Oplist::new();
    res.push(
        Operation::new(OpKind::Set)
            .with_arg(EntityPatch::for_entity(entity.id()).with_attr(names::STATUS, -1.0))
            .to_entity(entity.id()),
    );
    res.push(
        Operation::new(OpKind::Create)
            .with_arg(
                EntityPatch::of_type(Parentage::Multiple(vec!["oak".into()]))
                    .named("oak")
                    .with_attr(names::MASS, entity.mass().unwrap_or(0.0))
                    .at(sprout_spot),
            )
            .to_entity(entity.id()),
    );
    res.into()
}
