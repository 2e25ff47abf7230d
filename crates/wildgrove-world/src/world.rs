//! The entity store and the primitive mutation operations.
//!
//! [`WorldState`] owns every entity in the simulation. Nothing outside
//! this module mutates an entity: handlers emit `set`/`create`/`move`/
//! `delete` operations, the dispatch loop hands them to
//! [`WorldState::apply`], and the store performs the change. That keeps
//! the router side-effect free and makes every mutation observable as an
//! operation in the queue.

use std::collections::BTreeMap;

use tracing::debug;

use wildgrove_types::attr::names;
use wildgrove_types::{AttrValue, EntityId, EntityPatch, OpKind, Operation, TypeName};

use crate::entity::{Entity, EntityView};
use crate::error::WorldError;
use crate::prototype::PrototypeRegistry;

/// What a successfully applied primitive operation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// An existing entity's attributes were merged.
    Updated(EntityId),
    /// A new entity entered the world.
    Created(EntityId),
    /// An entity's placement changed.
    Moved(EntityId),
    /// An entity left the world.
    Removed(EntityId),
}

/// The entity store: all live entities plus the prototype registry they
/// resolve their defaults against.
#[derive(Debug, Clone)]
pub struct WorldState {
    registry: PrototypeRegistry,
    entities: BTreeMap<EntityId, Entity>,
}

impl WorldState {
    /// Create an empty world over the given registry.
    pub const fn new(registry: PrototypeRegistry) -> Self {
        Self {
            registry,
            entities: BTreeMap::new(),
        }
    }

    /// The prototype registry entities resolve defaults against.
    pub const fn registry(&self) -> &PrototypeRegistry {
        &self.registry
    }

    /// Instantiate an entity from a patch.
    ///
    /// The patch must carry a parentage whose primary type is registered.
    /// Attributes in the patch become the entity's local overlay; prototype
    /// defaults stay in the registry and are resolved at read time.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MissingArgument`] when the patch has no
    /// parentage, [`WorldError::UnknownPrototype`] when the primary type is
    /// unregistered, and [`WorldError::DuplicateEntity`] when the patch
    /// names an id already in the store.
    pub fn spawn(&mut self, patch: &EntityPatch, now: f64) -> Result<EntityId, WorldError> {
        let Some(parentage) = patch.parentage.clone() else {
            return Err(WorldError::MissingArgument {
                kind: OpKind::Create,
                what: "a parent type",
            });
        };
        let Some(primary) = parentage.primary() else {
            return Err(WorldError::MissingArgument {
                kind: OpKind::Create,
                what: "a non-empty parent type list",
            });
        };
        if !self.registry.contains(primary) {
            return Err(WorldError::UnknownPrototype(primary.clone()));
        }

        let id = patch.entity_id.unwrap_or_else(EntityId::new);
        if self.entities.contains_key(&id) {
            return Err(WorldError::DuplicateEntity(id));
        }

        debug!(entity = %id, kind = %primary, "Entity spawned");
        let entity = Entity {
            id,
            parentage,
            name: patch.name.clone(),
            attrs: patch.attrs.clone(),
            location: patch.location.clone(),
            created_seconds: now,
        };
        self.entities.insert(id, entity);
        Ok(id)
    }

    /// Look up an entity record.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// A transient view handle over an entity, for handler consumption.
    pub fn view(&self, id: EntityId) -> Option<EntityView<'_>> {
        self.entities
            .get(&id)
            .map(|entity| EntityView::new(entity, &self.registry))
    }

    /// Whether an entity exists in the store.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the world holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over all live entities.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterate over live entities whose primary type matches `name`.
    pub fn entities_of_type<'a>(
        &'a self,
        name: &'a TypeName,
    ) -> impl Iterator<Item = &'a Entity> {
        self.entities
            .values()
            .filter(move |entity| entity.type_name() == Some(name))
    }

    /// Apply a primitive mutation operation.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::NotPrimitive`] for non-mutation kinds, and the
    /// per-kind errors documented on the individual application paths.
    pub fn apply(&mut self, op: &Operation, now: f64) -> Result<Applied, WorldError> {
        match op.kind {
            OpKind::Set => self.apply_set(op),
            OpKind::Create => self.apply_create(op, now),
            OpKind::Move => self.apply_move(op),
            OpKind::Delete => self.apply_delete(op),
            kind => Err(WorldError::NotPrimitive { kind }),
        }
    }

    /// Merge a `set` patch into its target entity.
    fn apply_set(&mut self, op: &Operation) -> Result<Applied, WorldError> {
        let Some(patch) = op.first_arg() else {
            return Err(WorldError::MissingArgument {
                kind: OpKind::Set,
                what: "an entity patch",
            });
        };
        let Some(id) = patch.entity_id.or(op.to) else {
            return Err(WorldError::MissingTarget { kind: OpKind::Set });
        };
        let Some(entity) = self.entities.get_mut(&id) else {
            return Err(WorldError::EntityNotFound(id));
        };

        merge_patch(entity, patch);
        if patch
            .attr(names::STATUS)
            .and_then(AttrValue::as_float)
            .is_some_and(|status| status < 0.0)
        {
            debug!(entity = %id, "Entity marked inert");
        }
        Ok(Applied::Updated(id))
    }

    /// Spawn the entity described by a `create` operation's first argument.
    fn apply_create(&mut self, op: &Operation, now: f64) -> Result<Applied, WorldError> {
        let Some(patch) = op.first_arg() else {
            return Err(WorldError::MissingArgument {
                kind: OpKind::Create,
                what: "an entity patch",
            });
        };
        let id = self.spawn(patch, now)?;
        Ok(Applied::Created(id))
    }

    /// Update the target entity's placement from a `move` patch.
    ///
    /// Mode changes ride along with moves (a collapsing skeleton moves
    /// and switches mode in the same operation), so non-location
    /// attributes in the patch are merged too.
    fn apply_move(&mut self, op: &Operation) -> Result<Applied, WorldError> {
        let Some(patch) = op.first_arg() else {
            return Err(WorldError::MissingArgument {
                kind: OpKind::Move,
                what: "an entity patch",
            });
        };
        if patch.location.is_none() {
            return Err(WorldError::MissingArgument {
                kind: OpKind::Move,
                what: "a location",
            });
        }
        let Some(id) = patch.entity_id.or(op.to) else {
            return Err(WorldError::MissingTarget { kind: OpKind::Move });
        };
        let Some(entity) = self.entities.get_mut(&id) else {
            return Err(WorldError::EntityNotFound(id));
        };

        merge_patch(entity, patch);
        Ok(Applied::Moved(id))
    }

    /// Remove the target entity from the store.
    fn apply_delete(&mut self, op: &Operation) -> Result<Applied, WorldError> {
        let id = op
            .first_arg()
            .and_then(|patch| patch.entity_id)
            .or(op.to);
        let Some(id) = id else {
            return Err(WorldError::MissingTarget {
                kind: OpKind::Delete,
            });
        };
        if self.entities.remove(&id).is_none() {
            return Err(WorldError::EntityNotFound(id));
        }
        debug!(entity = %id, "Entity removed");
        Ok(Applied::Removed(id))
    }
}

/// Merge a patch into an entity record: attributes one by one, then name
/// and location when the patch carries them. Attributes the patch does not
/// name are preserved.
fn merge_patch(entity: &mut Entity, patch: &EntityPatch) {
    for (attr, value) in &patch.attrs {
        entity.attrs.insert(attr.clone(), value.clone());
    }
    if let Some(name) = &patch.name {
        entity.name = Some(name.clone());
    }
    if let Some(location) = &patch.location {
        entity.location = Some(location.clone());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use wildgrove_types::{Location, Vector3};

    use super::*;

    fn stock_world() -> WorldState {
        WorldState::new(PrototypeRegistry::stock())
    }

    fn spawn_deer(world: &mut WorldState) -> EntityId {
        world
            .spawn(&EntityPatch::of_type(TypeName::from("deer")), 0.0)
            .unwrap()
    }

    #[test]
    fn spawn_resolves_defaults_through_overlay() {
        let mut world = stock_world();
        let id = spawn_deer(&mut world);

        // No local attributes were written at spawn time.
        assert!(world.get(id).unwrap().attrs.is_empty());
        // The view still reports the template mass.
        assert_eq!(world.view(id).unwrap().mass().unwrap(), 100.0);
    }

    #[test]
    fn spawn_without_parentage_is_rejected() {
        let mut world = stock_world();
        let result = world.spawn(&EntityPatch::default(), 0.0);
        assert!(matches!(
            result,
            Err(WorldError::MissingArgument { .. })
        ));
    }

    #[test]
    fn spawn_of_unknown_type_is_rejected() {
        let mut world = stock_world();
        let result = world.spawn(&EntityPatch::of_type(TypeName::from("gryphon")), 0.0);
        assert!(matches!(result, Err(WorldError::UnknownPrototype(_))));
    }

    #[test]
    fn spawn_with_duplicate_id_is_rejected() {
        let mut world = stock_world();
        let id = spawn_deer(&mut world);
        let result = world.spawn(
            &EntityPatch {
                entity_id: Some(id),
                ..EntityPatch::of_type(TypeName::from("pig"))
            },
            0.0,
        );
        assert!(matches!(result, Err(WorldError::DuplicateEntity(_))));
    }

    #[test]
    fn set_merges_and_preserves_unnamed_attrs() {
        let mut world = stock_world();
        let id = spawn_deer(&mut world);

        let first = Operation::new(OpKind::Set)
            .with_arg(EntityPatch::for_entity(id).with_attr(names::MASS, 99.0))
            .to_entity(id);
        let second = Operation::new(OpKind::Set)
            .with_arg(EntityPatch::for_entity(id).with_attr(names::MODE, "dead"))
            .to_entity(id);

        assert_eq!(world.apply(&first, 1.0).unwrap(), Applied::Updated(id));
        assert_eq!(world.apply(&second, 2.0).unwrap(), Applied::Updated(id));

        let view = world.view(id).unwrap();
        assert_eq!(view.mass().unwrap(), 99.0);
        assert_eq!(view.mode().unwrap(), "dead");
    }

    #[test]
    fn set_falls_back_to_operation_target() {
        let mut world = stock_world();
        let id = spawn_deer(&mut world);

        // The patch names no entity; the operation's target is used.
        let op = Operation::new(OpKind::Set)
            .with_arg(EntityPatch::default().with_attr(names::STATUS, -1.0))
            .to_entity(id);
        assert_eq!(world.apply(&op, 1.0).unwrap(), Applied::Updated(id));
        assert!(world.view(id).unwrap().is_inert());
    }

    #[test]
    fn set_on_missing_entity_errors() {
        let mut world = stock_world();
        let op = Operation::new(OpKind::Set)
            .with_arg(EntityPatch::for_entity(EntityId::new()));
        assert!(matches!(
            world.apply(&op, 0.0),
            Err(WorldError::EntityNotFound(_))
        ));
    }

    #[test]
    fn create_spawns_from_first_argument() {
        let mut world = stock_world();
        let op = Operation::new(OpKind::Create).with_arg(
            EntityPatch::of_type(TypeName::from("venison")).named("venison"),
        );
        let applied = world.apply(&op, 3.0).unwrap();
        assert!(matches!(applied, Applied::Created(_)));

        let venison_type = TypeName::from("venison");
        let entity = world.entities_of_type(&venison_type).next().unwrap();
        assert_eq!(entity.name.as_deref(), Some("venison"));
        assert_eq!(entity.created_seconds, 3.0);
    }

    #[test]
    fn move_requires_a_location() {
        let mut world = stock_world();
        let id = spawn_deer(&mut world);
        let op = Operation::new(OpKind::Move)
            .with_arg(EntityPatch::for_entity(id))
            .to_entity(id);
        assert!(matches!(
            world.apply(&op, 0.0),
            Err(WorldError::MissingArgument { .. })
        ));
    }

    #[test]
    fn move_updates_location_and_mode() {
        let mut world = stock_world();
        let id = spawn_deer(&mut world);
        let place = Location::at_root(Vector3::new(4.0, 2.0, 0.0));
        let op = Operation::new(OpKind::Move)
            .with_arg(
                EntityPatch::for_entity(id)
                    .with_attr(names::MODE, "collapsed")
                    .at(place.clone()),
            )
            .to_entity(id);

        assert_eq!(world.apply(&op, 1.0).unwrap(), Applied::Moved(id));
        let view = world.view(id).unwrap();
        assert_eq!(view.location().unwrap(), &place);
        assert_eq!(view.mode().unwrap(), "collapsed");
    }

    #[test]
    fn delete_removes_the_entity() {
        let mut world = stock_world();
        let id = spawn_deer(&mut world);
        let op = Operation::new(OpKind::Delete).to_entity(id);
        assert_eq!(world.apply(&op, 1.0).unwrap(), Applied::Removed(id));
        assert!(!world.contains(id));
    }

    #[test]
    fn non_primitive_kinds_are_rejected() {
        let mut world = stock_world();
        let op = Operation::new(OpKind::Chop);
        assert!(matches!(
            world.apply(&op, 0.0),
            Err(WorldError::NotPrimitive { .. })
        ));
    }

    #[test]
    fn entities_of_type_filters_by_primary_tag() {
        let mut world = stock_world();
        let _ = spawn_deer(&mut world);
        let _ = spawn_deer(&mut world);
        let _ = world
            .spawn(&EntityPatch::of_type(TypeName::from("pig")), 0.0)
            .unwrap();

        let deer_type = TypeName::from("deer");
        assert_eq!(world.entities_of_type(&deer_type).count(), 2);
    }
}
