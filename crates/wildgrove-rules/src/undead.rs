//! Collapse-on-touch behavior for skeletons.
//!
//! A touched skeleton falls apart: it stops moving, switches to the
//! collapsed mode, scatters its six bone parts around where it stood,
//! and goes inert. The scatter is cumulative -- each bone lands a random
//! step from the previous one, so the pile trails away from the body.

use rand::Rng;
use rand::rngs::SmallRng;

use wildgrove_types::attr::names;
use wildgrove_types::{
    EntityPatch, HandlerResult, OpKind, Operation, Oplist, Parentage, Vector3,
};
use wildgrove_world::EntityView;

use crate::context::RuleContext;

/// The bone parts a collapsing skeleton scatters, in drop order.
const BONE_PARTS: [&str; 6] = ["skull", "ribcage", "arm", "pelvis", "thigh", "shin"];

/// Maximum per-axis step between one bone and the next.
const SCATTER_STEP: f64 = 1.0;

/// Touch on a skeleton: collapse, scatter bones, go inert.
///
/// Emits, in order: one `move` (collapsed, velocity zeroed), six bone
/// `create` ops at cumulatively jittered positions, and the terminal
/// `set status=-1`. An already-inert skeleton does not react.
pub fn skeleton_touch(
    entity: &EntityView<'_>,
    _op: &Operation,
    ctx: &mut RuleContext<'_>,
) -> HandlerResult {
    if entity.is_inert() {
        return HandlerResult::None;
    }
    let Some(stand) = entity.location() else {
        return HandlerResult::None;
    };

    let mut res = Oplist::new();
    let resting = stand.stilled();
    res.push(
        Operation::new(OpKind::Move)
            .with_arg(
                EntityPatch::for_entity(entity.id())
                    .with_attr(names::MODE, "collapsed")
                    .at(resting.clone()),
            )
            .to_entity(entity.id()),
    );

    let mut bone_spot = resting;
    for part in BONE_PARTS {
        bone_spot = bone_spot.displaced(scatter_step(ctx.rng));
        res.push(
            Operation::new(OpKind::Create)
                .with_arg(
                    EntityPatch::of_type(Parentage::single(part))
                        .named(part)
                        .at(bone_spot.clone()),
                )
                .to_entity(entity.id()),
        );
    }

    res.push(
        Operation::new(OpKind::Set)
            .with_arg(EntityPatch::for_entity(entity.id()).with_attr(names::STATUS, -1.0))
            .to_entity(entity.id()),
    );
    res.into()
}

/// One random scatter step, uniform in `[-SCATTER_STEP, SCATTER_STEP]`
/// per axis.
fn scatter_step(rng: &mut SmallRng) -> Vector3 {
    Vector3::new(
        rng.random_range(-SCATTER_STEP..=SCATTER_STEP),
        rng.random_range(-SCATTER_STEP..=SCATTER_STEP),
        rng.random_range(-SCATTER_STEP..=SCATTER_STEP),
    )
}
