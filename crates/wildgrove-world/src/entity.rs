//! The runtime entity record and its transient view handle.
//!
//! [`Entity`] is the mutable record owned by the world store. Handlers
//! never receive it directly: they get an [`EntityView`], a read-only
//! handle that resolves attribute lookups through the overlay -- the
//! entity's local attributes first, then the prototype chain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use wildgrove_types::attr::names;
use wildgrove_types::{AttrValue, EntityId, Location, Parentage, TypeName};

use crate::prototype::PrototypeRegistry;

/// A simulated object with identity, attributes, and prototype-derived
/// defaults. Owned by the world store; mutated only through the primitive
/// operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Opaque identity, assigned at spawn.
    pub id: EntityId,
    /// Parent-type tags used for prototype inheritance.
    pub parentage: Parentage,
    /// Display name, when one was given.
    pub name: Option<String>,
    /// Entity-local attribute values (the overlay over the prototype).
    pub attrs: BTreeMap<String, AttrValue>,
    /// Placement in the world, when the entity has one.
    pub location: Option<Location>,
    /// Simulation seconds at which the entity entered the world.
    pub created_seconds: f64,
}

impl Entity {
    /// The primary type tag, used for prototype and handler resolution.
    pub fn type_name(&self) -> Option<&TypeName> {
        self.parentage.primary()
    }

    /// A local attribute value, without prototype fallback.
    pub fn local_attr(&self, name: &str) -> Option<&AttrValue> {
        self.attrs.get(name)
    }
}

/// A transient, read-only handle onto an entity.
///
/// Attribute lookups consult the entity-local map first and fall back to
/// the prototype registry's resolved chain, so a freshly spawned deer
/// with no local overrides still reports the template mass.
#[derive(Debug, Clone, Copy)]
pub struct EntityView<'a> {
    entity: &'a Entity,
    registry: &'a PrototypeRegistry,
}

impl<'a> EntityView<'a> {
    /// Create a view over an entity with the given registry for fallback.
    pub const fn new(entity: &'a Entity, registry: &'a PrototypeRegistry) -> Self {
        Self { entity, registry }
    }

    /// The entity's identity.
    pub const fn id(&self) -> EntityId {
        self.entity.id
    }

    /// The primary type tag.
    pub fn type_name(&self) -> Option<&'a TypeName> {
        self.entity.type_name()
    }

    /// The display name, when one was given.
    pub fn name(&self) -> Option<&'a str> {
        self.entity.name.as_deref()
    }

    /// The entity's placement, when it has one.
    pub const fn location(&self) -> Option<&'a Location> {
        self.entity.location.as_ref()
    }

    /// An attribute value through the overlay: local first, then the
    /// prototype chain.
    pub fn attr(&self, name: &str) -> Option<&'a AttrValue> {
        if let Some(local) = self.entity.attrs.get(name) {
            return Some(local);
        }
        let type_name = self.entity.type_name()?;
        self.registry.attr(type_name, name)
    }

    /// The mass attribute as a float.
    pub fn mass(&self) -> Option<f64> {
        self.attr(names::MASS).and_then(AttrValue::as_float)
    }

    /// The status attribute as a float.
    pub fn status(&self) -> Option<f64> {
        self.attr(names::STATUS).and_then(AttrValue::as_float)
    }

    /// The mode tag.
    pub fn mode(&self) -> Option<&'a str> {
        self.attr(names::MODE).and_then(AttrValue::as_text)
    }

    /// Whether the entity is logically destroyed (status below zero).
    ///
    /// Every reactive handler checks this before doing anything else.
    pub fn is_inert(&self) -> bool {
        self.status().is_some_and(|status| status < 0.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    fn make_deer() -> Entity {
        Entity {
            id: EntityId::new(),
            parentage: Parentage::single("deer"),
            name: None,
            attrs: BTreeMap::new(),
            location: None,
            created_seconds: 0.0,
        }
    }

    #[test]
    fn overlay_falls_back_to_prototype() {
        let registry = PrototypeRegistry::stock();
        let deer = make_deer();
        let view = EntityView::new(&deer, &registry);
        // No local mass: the template value shows through.
        assert_eq!(view.mass().unwrap(), 100.0);
        // Status is inherited from the root type.
        assert_eq!(view.status().unwrap(), 1.0);
    }

    #[test]
    fn local_attribute_wins_over_prototype() {
        let registry = PrototypeRegistry::stock();
        let mut deer = make_deer();
        deer.attrs
            .insert(names::MASS.to_owned(), AttrValue::from(42.0));
        let view = EntityView::new(&deer, &registry);
        assert_eq!(view.mass().unwrap(), 42.0);
    }

    #[test]
    fn inert_detection_reads_overlay() {
        let registry = PrototypeRegistry::stock();
        let mut deer = make_deer();
        let alive = EntityView::new(&deer, &registry);
        assert!(!alive.is_inert());

        deer.attrs
            .insert(names::STATUS.to_owned(), AttrValue::from(-1.0));
        let dead = EntityView::new(&deer, &registry);
        assert!(dead.is_inert());
    }

    #[test]
    fn unknown_attribute_is_none() {
        let registry = PrototypeRegistry::stock();
        let deer = make_deer();
        let view = EntityView::new(&deer, &registry);
        assert!(view.attr("antlers").is_none());
    }
}
