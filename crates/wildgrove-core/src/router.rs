//! Handler resolution and invocation.
//!
//! The router is deliberately thin: given an operation, it finds the
//! target entity, resolves the handler registered for the entity's type
//! and the operation's kind, and invokes it. It mutates nothing -- state
//! changes only happen when the loop applies the primitive operations a
//! handler returns.
//!
//! Failures at this level follow the same errors-are-data convention as
//! the handlers: a misaddressed operation yields an `error` operation
//! back to its sender, not an `Err`.

use tracing::{debug, warn};

use wildgrove_rules::{RuleContext, Ruleset, error_reply};
use wildgrove_types::{HandlerResult, OpKind, Operation};

/// Resolves incoming operations to rule handlers and invokes them.
#[derive(Debug, Clone, Default)]
pub struct Router {
    ruleset: Ruleset,
}

impl Router {
    /// Create a router over a dispatch table.
    pub const fn new(ruleset: Ruleset) -> Self {
        Self { ruleset }
    }

    /// The dispatch table this router resolves against.
    pub const fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Route one operation to its handler.
    ///
    /// Outcomes:
    /// - target entity has a handler for this kind: the handler's result;
    /// - no handler registered: no-op (logged at debug);
    /// - no target, or target not in the world: an error reply to the
    ///   sender when one is known, otherwise a dropped no-op. Error
    ///   operations themselves are never bounced, so a failure reply
    ///   that cannot be delivered terminates instead of echoing forever.
    pub fn route(&self, op: &Operation, ctx: &mut RuleContext<'_>) -> HandlerResult {
        let world = ctx.world;

        let Some(target) = op.to else {
            if op.kind == OpKind::Error {
                warn!(kind = %op.kind, "Undeliverable error operation dropped");
                return HandlerResult::None;
            }
            return op.from.map_or(HandlerResult::None, |sender| {
                error_reply(sender, op, "operation has no target").into()
            });
        };

        let Some(view) = world.view(target) else {
            debug!(kind = %op.kind, %target, "Operation for unknown entity");
            if op.kind == OpKind::Error {
                return HandlerResult::None;
            }
            return op.from.map_or(HandlerResult::None, |sender| {
                error_reply(sender, op, "target is not in the world").into()
            });
        };

        let Some(type_name) = view.type_name() else {
            return HandlerResult::None;
        };
        let Some(handler) = self.ruleset.resolve(type_name, op.kind, world.registry())
        else {
            debug!(kind = %op.kind, %type_name, "No handler registered");
            return HandlerResult::None;
        };

        handler(&view, op, ctx)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use wildgrove_types::{EntityId, EntityPatch, TypeName};
    use wildgrove_world::{PrototypeRegistry, WorldState};

    use super::*;

    fn stock_router() -> Router {
        Router::new(Ruleset::stock())
    }

    fn route(router: &Router, world: &WorldState, op: &Operation) -> HandlerResult {
        let mut rng = SmallRng::seed_from_u64(42);
        let mut ctx = RuleContext::new(world, &mut rng, 0.0);
        router.route(op, &mut ctx)
    }

    #[test]
    fn routes_to_the_registered_handler() {
        let mut world = WorldState::new(PrototypeRegistry::stock());
        let acorn = world
            .spawn(&EntityPatch::of_type(TypeName::from("acorn")), 0.0)
            .unwrap();
        let router = stock_router();

        let op = Operation::new(OpKind::Tick).to_entity(acorn);
        let result = route(&router, &world, &op);
        assert!(matches!(result, HandlerResult::One(_)));
    }

    #[test]
    fn unhandled_kind_is_a_no_op() {
        let mut world = WorldState::new(PrototypeRegistry::stock());
        let acorn = world
            .spawn(&EntityPatch::of_type(TypeName::from("acorn")), 0.0)
            .unwrap();
        let router = stock_router();

        // No handler registers touch for seeds.
        let op = Operation::new(OpKind::Touch).to_entity(acorn);
        assert!(route(&router, &world, &op).is_none());
    }

    #[test]
    fn missing_target_yields_an_error_reply() {
        let world = WorldState::new(PrototypeRegistry::stock());
        let router = stock_router();
        let sender = EntityId::new();

        let op = Operation::new(OpKind::Chop).from_entity(sender);
        let ops = crate::composer::compose(route(&router, &world, &op));
        assert_eq!(ops.len(), 1);
        let reply = ops.first().unwrap();
        assert_eq!(reply.kind, OpKind::Error);
        assert_eq!(reply.to, Some(sender));
    }

    #[test]
    fn missing_target_without_sender_is_dropped() {
        let world = WorldState::new(PrototypeRegistry::stock());
        let router = stock_router();

        let op = Operation::new(OpKind::Chop);
        assert!(route(&router, &world, &op).is_none());
    }

    #[test]
    fn unknown_entity_yields_an_error_reply() {
        let world = WorldState::new(PrototypeRegistry::stock());
        let router = stock_router();
        let sender = EntityId::new();

        let op = Operation::new(OpKind::Chop)
            .to_entity(EntityId::new())
            .from_entity(sender);
        let ops = crate::composer::compose(route(&router, &world, &op));
        assert_eq!(ops.len(), 1);
        assert_eq!(ops.first().unwrap().kind, OpKind::Error);
    }

    #[test]
    fn undeliverable_error_operations_terminate() {
        let world = WorldState::new(PrototypeRegistry::stock());
        let router = stock_router();

        // An error op that lost its addressing must not bounce another error.
        let op = Operation::new(OpKind::Error).from_entity(EntityId::new());
        assert!(route(&router, &world, &op).is_none());

        let op = Operation::new(OpKind::Error).to_entity(EntityId::new());
        assert!(route(&router, &world, &op).is_none());
    }
}
