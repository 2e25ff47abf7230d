//! Named, directed, optionally deferred actions.
//!
//! An [`Operation`] is the only way anything changes in the simulation:
//! handlers receive one and answer with more of them. Arguments are
//! [`EntityPatch`] values -- partial entity descriptions that the primitive
//! `set`/`create`/`move` operations carry as their payload.
//!
//! Operations are immutable once constructed, with two host-side
//! exceptions used by the dispatch queue: stamping the dispatch time
//! ([`Operation::stamp_seconds`]) and attributing the sender
//! ([`Operation::attribute_from`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::attr::AttrValue;
use crate::ids::{EntityId, Parentage};
use crate::location::Location;

/// The name tag of an operation.
///
/// Dispatch is resolved from this tag at ruleset registration time -- there
/// is no runtime reflection. `Set`, `Create`, `Move`, and `Delete` are the
/// primitive mutations applied by the world store; the rest are routed to
/// rule handlers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    /// Merge an attribute patch into an existing entity.
    Set,
    /// Instantiate a new entity from a patch over its prototype.
    Create,
    /// Update an entity's location.
    Move,
    /// Remove an entity from the world.
    Delete,
    /// A scheduled timer firing.
    Tick,
    /// Fired once at an entity right after it enters the world.
    Setup,
    /// A felling/butchering blow.
    Chop,
    /// Something is eating the target.
    Eat,
    /// Physical contact with the target.
    Touch,
    /// A seed sprouting into a plant.
    Germinate,
    /// Striking a flame at the target.
    Ignite,
    /// Nutrition delivered to an eater.
    Nourish,
    /// A failure reply; the error channel is data, not an exception.
    Error,
}

impl OpKind {
    /// The wire name of this operation kind.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Set => "set",
            Self::Create => "create",
            Self::Move => "move",
            Self::Delete => "delete",
            Self::Tick => "tick",
            Self::Setup => "setup",
            Self::Chop => "chop",
            Self::Eat => "eat",
            Self::Touch => "touch",
            Self::Germinate => "germinate",
            Self::Ignite => "ignite",
            Self::Nourish => "nourish",
            Self::Error => "error",
        }
    }

    /// Whether this kind is a primitive mutation applied by the world
    /// store rather than routed to a rule handler.
    pub const fn is_primitive(self) -> bool {
        matches!(self, Self::Set | Self::Create | Self::Move | Self::Delete)
    }
}

impl core::fmt::Display for OpKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an unrecognized operation name.
#[derive(Debug, thiserror::Error)]
#[error("unknown operation kind: {0}")]
pub struct UnknownOpKind(pub String);

impl core::str::FromStr for OpKind {
    type Err = UnknownOpKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "set" => Ok(Self::Set),
            "create" => Ok(Self::Create),
            "move" => Ok(Self::Move),
            "delete" => Ok(Self::Delete),
            "tick" => Ok(Self::Tick),
            "setup" => Ok(Self::Setup),
            "chop" => Ok(Self::Chop),
            "eat" => Ok(Self::Eat),
            "touch" => Ok(Self::Touch),
            "germinate" => Ok(Self::Germinate),
            "ignite" => Ok(Self::Ignite),
            "nourish" => Ok(Self::Nourish),
            "error" => Ok(Self::Error),
            other => Err(UnknownOpKind(other.to_owned())),
        }
    }
}

/// A partial entity description carried as an operation argument.
///
/// A `set` names the target id plus the attributes to merge; a `create`
/// names the prototype type plus whatever the new entity overrides. Fields
/// left `None` are simply not part of the message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityPatch {
    /// The entity this patch refers to, when it refers to an existing one.
    pub entity_id: Option<EntityId>,
    /// Prototype type tags for entities being created.
    pub parentage: Option<Parentage>,
    /// Display name override.
    pub name: Option<String>,
    /// Named attribute values to merge.
    pub attrs: BTreeMap<String, AttrValue>,
    /// Placement, for patches that carry one.
    pub location: Option<Location>,
}

impl EntityPatch {
    /// A patch referring to an existing entity.
    pub fn for_entity(id: EntityId) -> Self {
        Self {
            entity_id: Some(id),
            ..Self::default()
        }
    }

    /// A patch describing a new entity of the given prototype type.
    pub fn of_type(parentage: impl Into<Parentage>) -> Self {
        Self {
            parentage: Some(parentage.into()),
            ..Self::default()
        }
    }

    /// Set the display name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add one named attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Attach a placement.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Look up an attribute carried by this patch.
    pub fn attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }
}

/// A named action directed at an entity, optionally deferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// What kind of action this is.
    pub kind: OpKind,
    /// Ordered argument entities.
    pub args: Vec<EntityPatch>,
    /// The entity this operation is directed at.
    pub to: Option<EntityId>,
    /// The entity responsible for submitting this operation.
    pub from: Option<EntityId>,
    /// Simulation seconds at which this operation was dispatched.
    ///
    /// Stamped by the dispatch loop; components downstream read it as
    /// "the current time" while handling the operation.
    pub seconds: Option<f64>,
    /// Requested delay before dispatch, in simulation seconds.
    ///
    /// Cleared by the scheduler once the absolute due time is computed.
    pub future_seconds: Option<f64>,
}

impl Operation {
    /// Create an operation of the given kind with no arguments or target.
    pub const fn new(kind: OpKind) -> Self {
        Self {
            kind,
            args: Vec::new(),
            to: None,
            from: None,
            seconds: None,
            future_seconds: None,
        }
    }

    /// Append one argument patch.
    #[must_use]
    pub fn with_arg(mut self, arg: EntityPatch) -> Self {
        self.args.push(arg);
        self
    }

    /// Direct the operation at an entity.
    #[must_use]
    pub const fn to_entity(mut self, id: EntityId) -> Self {
        self.to = Some(id);
        self
    }

    /// Record the submitting entity.
    #[must_use]
    pub const fn from_entity(mut self, id: EntityId) -> Self {
        self.from = Some(id);
        self
    }

    /// Request dispatch after the given delay in simulation seconds.
    #[must_use]
    pub const fn after_seconds(mut self, delay: f64) -> Self {
        self.future_seconds = Some(delay);
        self
    }

    /// The first argument patch, when present.
    pub fn first_arg(&self) -> Option<&EntityPatch> {
        self.args.first()
    }

    /// The second argument patch, when present.
    pub fn second_arg(&self) -> Option<&EntityPatch> {
        self.args.get(1)
    }

    /// Stamp the dispatch time. Called by the dispatch loop just before the
    /// operation is handed to the world store or a handler.
    pub const fn stamp_seconds(&mut self, now: f64) {
        self.seconds = Some(now);
    }

    /// Attribute the operation to the submitting entity. Called when the
    /// operation enters the queue.
    pub const fn attribute_from(&mut self, id: EntityId) {
        self.from = Some(id);
    }

    /// Take the requested delay, clearing the flag.
    pub const fn take_future_seconds(&mut self) -> Option<f64> {
        self.future_seconds.take()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use core::str::FromStr;

    use super::*;
    use crate::attr::names;

    #[test]
    fn op_kind_name_roundtrip() {
        for kind in [
            OpKind::Set,
            OpKind::Create,
            OpKind::Move,
            OpKind::Delete,
            OpKind::Tick,
            OpKind::Setup,
            OpKind::Chop,
            OpKind::Eat,
            OpKind::Touch,
            OpKind::Germinate,
            OpKind::Ignite,
            OpKind::Nourish,
            OpKind::Error,
        ] {
            assert_eq!(OpKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn unknown_op_kind_is_rejected() {
        assert!(OpKind::from_str("sing").is_err());
    }

    #[test]
    fn primitive_kinds() {
        assert!(OpKind::Set.is_primitive());
        assert!(OpKind::Create.is_primitive());
        assert!(OpKind::Move.is_primitive());
        assert!(OpKind::Delete.is_primitive());
        assert!(!OpKind::Chop.is_primitive());
        assert!(!OpKind::Tick.is_primitive());
    }

    #[test]
    fn builder_produces_directed_operation() {
        let target = EntityId::new();
        let op = Operation::new(OpKind::Set)
            .with_arg(EntityPatch::for_entity(target).with_attr(names::STATUS, -1.0))
            .to_entity(target);

        assert_eq!(op.kind, OpKind::Set);
        assert_eq!(op.to, Some(target));
        let arg = op.first_arg().unwrap();
        assert_eq!(arg.attr(names::STATUS).unwrap().as_float().unwrap(), -1.0);
    }

    #[test]
    fn future_seconds_taken_once() {
        let mut op = Operation::new(OpKind::Tick).after_seconds(1800.0);
        assert_eq!(op.take_future_seconds(), Some(1800.0));
        assert_eq!(op.take_future_seconds(), None);
    }

    #[test]
    fn stamping_sets_dispatch_time() {
        let mut op = Operation::new(OpKind::Tick);
        op.stamp_seconds(42.5);
        assert_eq!(op.seconds, Some(42.5));
    }
}
