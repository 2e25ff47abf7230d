//! Chop behaviors for huntable animals.
//!
//! A chop is a felling blow: the animal loses mass, switches to the dead
//! mode, and drops a butchered product. The product is created at the
//! chopper (the operation's second argument) when one is named, otherwise
//! at the animal itself. Order matters and is relied on downstream: the
//! `set` marking the animal dead always precedes the `create` of the drop.

use wildgrove_types::attr::names;
use wildgrove_types::{
    EntityPatch, HandlerResult, OpKind, Operation, Oplist, Parentage,
};
use wildgrove_world::EntityView;

use crate::context::RuleContext;

/// Mass removed from the animal by a single blow.
const CHOP_MASS_LOSS: f64 = 1.0;

/// Chop on a deer: drops venison. The drop carries no placement; the host
/// puts it wherever the chopper is.
pub fn deer_chop(
    entity: &EntityView<'_>,
    op: &Operation,
    _ctx: &mut RuleContext<'_>,
) -> HandlerResult {
    butcher(entity, op, "venison", false)
}

/// Chop on a pig: drops ham at a copy of the pig's own placement.
pub fn pig_chop(
    entity: &EntityView<'_>,
    op: &Operation,
    _ctx: &mut RuleContext<'_>,
) -> HandlerResult {
    butcher(entity, op, "ham", true)
}

/// Shared butchering sequence.
///
/// An exhausted animal (mass below one blow) is finished off with a single
/// terminal `set status=-1` and drops nothing.
fn butcher(
    entity: &EntityView<'_>,
    op: &Operation,
    product: &str,
    carry_location: bool,
) -> HandlerResult {
    if entity.is_inert() {
        return HandlerResult::None;
    }

    let mass = entity.mass().unwrap_or(0.0);
    if mass < CHOP_MASS_LOSS {
        return Operation::new(OpKind::Set)
            .with_arg(EntityPatch::for_entity(entity.id()).with_attr(names::STATUS, -1.0))
            .to_entity(entity.id())
            .into();
    }

    let mut res = Oplist::new();
    res.push(
        Operation::new(OpKind::Set)
            .with_arg(
                EntityPatch::for_entity(entity.id())
                    .with_attr(names::MODE, "dead")
                    .with_attr(names::MASS, mass - CHOP_MASS_LOSS),
            )
            .to_entity(entity.id()),
    );

    let mut drop = EntityPatch::of_type(Parentage::single(product)).named(product);
    if carry_location {
        if let Some(location) = entity.location() {
            drop = drop.at(location.clone());
        }
    }
    // The chopper receives the drop when the operation names one.
    let recipient = op
        .second_arg()
        .and_then(|arg| arg.entity_id)
        .unwrap_or_else(|| entity.id());
    res.push(Operation::new(OpKind::Create).with_arg(drop).to_entity(recipient));

    res.into()
}
