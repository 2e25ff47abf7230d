//! The dispatch table mapping `(type, operation)` to handler functions.
//!
//! Handler lookup is resolved from an explicit table built at registration
//! time -- there is no runtime reflection and no name mangling. Resolution
//! walks the prototype parent chain, so registering a behavior on `seed`
//! covers `acorn` unless `acorn` registers its own.
//!
//! This module also defines [`error_reply`], the errors-are-data channel:
//! a handler (or the router) observing a bad precondition answers with an
//! `error` operation directed back at the sender, never with an exception
//! across the handler boundary.

use std::collections::BTreeMap;

use tracing::debug;

use wildgrove_types::attr::names;
use wildgrove_types::{EntityId, EntityPatch, HandlerResult, OpKind, Operation, TypeName};
use wildgrove_world::{EntityView, PrototypeRegistry};

use crate::context::RuleContext;
use crate::{animals, buildings, seeds, tools, undead};

/// The shape of every rule handler.
///
/// Handlers are plain function pointers: they read the entity through its
/// transient view, inspect the operation, and return follow-up operations.
pub type RuleFn =
    fn(&EntityView<'_>, &Operation, &mut RuleContext<'_>) -> HandlerResult;

/// Attribute carried by error operations naming the operation that failed.
const FAILED_OP_ATTR: &str = "op";

/// The dispatch table: `(type name, operation kind)` to handler.
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    handlers: BTreeMap<(TypeName, OpKind), RuleFn>,
}

impl Ruleset {
    /// Create an empty table.
    pub const fn new() -> Self {
        Self {
            handlers: BTreeMap::new(),
        }
    }

    /// Register a handler for a type and operation kind.
    ///
    /// A later registration for the same pair replaces the earlier one.
    pub fn register(
        &mut self,
        type_name: impl Into<TypeName>,
        kind: OpKind,
        handler: RuleFn,
    ) {
        let type_name = type_name.into();
        if self
            .handlers
            .insert((type_name.clone(), kind), handler)
            .is_some()
        {
            debug!(kind = %kind, type_name = %type_name, "Handler registration replaced");
        }
    }

    /// Resolve the handler for an entity type and operation kind.
    ///
    /// Walks the prototype parent chain nearest-first; the type itself is
    /// tried directly when the registry does not know it.
    pub fn resolve(
        &self,
        type_name: &TypeName,
        kind: OpKind,
        registry: &PrototypeRegistry,
    ) -> Option<RuleFn> {
        let chain = registry.parent_chain(type_name);
        if chain.is_empty() {
            return self.handlers.get(&(type_name.clone(), kind)).copied();
        }
        for candidate in chain {
            if let Some(handler) = self.handlers.get(&(candidate, kind)) {
                return Some(*handler);
            }
        }
        None
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// The stock grove table: every behavior shipped with the simulation.
    pub fn stock() -> Self {
        let mut table = Self::new();
        table.register("deer", OpKind::Chop, animals::deer_chop);
        table.register("pig", OpKind::Chop, animals::pig_chop);
        table.register("acorn", OpKind::Eat, seeds::acorn_eat);
        table.register("acorn", OpKind::Setup, seeds::acorn_setup);
        table.register("acorn", OpKind::Tick, seeds::acorn_tick);
        table.register("acorn", OpKind::Germinate, seeds::acorn_germinate);
        table.register("house", OpKind::Setup, buildings::house_setup);
        table.register("skeleton", OpKind::Touch, undead::skeleton_touch);
        table.register("tinderbox", OpKind::Ignite, tools::tinderbox_ignite);
        table
    }
}

/// Build a failure reply for an operation: an `error` operation carrying
/// the message and the failed kind, directed back at the sender.
///
/// When the offending operation has no sender the reply is left untargeted;
/// the dispatch loop drops untargeted errors rather than bouncing them.
pub fn error_reply(sender: EntityId, op: &Operation, message: &str) -> Operation {
    let mut reply = Operation::new(OpKind::Error)
        .with_arg(
            EntityPatch::default()
                .with_attr(names::MESSAGE, message)
                .with_attr(FAILED_OP_ATTR, op.kind.as_str()),
        )
        .from_entity(sender);
    reply.to = op.from;
    reply
}
