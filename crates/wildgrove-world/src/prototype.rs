//! Prototype templates and the registry that resolves them.
//!
//! Entities are constructed with a parent-type reference and inherit
//! default attributes (mass, status, bounding volume) from a named
//! template. Templates themselves chain: `deer` inherits from `creature`,
//! which inherits from `thing`. Resolution walks that chain with the
//! child winning on conflicts.
//!
//! The registry is also what makes handler dispatch by type work: the
//! ruleset resolves handlers along the same parent chain, so a behavior
//! registered on a base type applies to all of its descendants.

use std::collections::{BTreeMap, BTreeSet};

use wildgrove_types::attr::names;
use wildgrove_types::{AttrValue, TypeName};

use crate::error::WorldError;

/// A named attribute template that entities inherit defaults from.
#[derive(Debug, Clone, PartialEq)]
pub struct Prototype {
    /// The type name this template is registered under.
    pub name: TypeName,
    /// The parent type this template inherits from, if any.
    pub parent: Option<TypeName>,
    /// Default attribute values.
    pub attrs: BTreeMap<String, AttrValue>,
}

impl Prototype {
    /// Create a template with no parent and no attributes.
    pub fn root(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            attrs: BTreeMap::new(),
        }
    }

    /// Create a template inheriting from `parent`.
    pub fn child_of(name: impl Into<TypeName>, parent: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent.into()),
            attrs: BTreeMap::new(),
        }
    }

    /// Add one default attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// Registry mapping type names to prototype templates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrototypeRegistry {
    /// Registered templates, keyed by type name.
    types: BTreeMap<TypeName, Prototype>,
}

impl PrototypeRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Register a template.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::DuplicatePrototype`] if the type name is
    /// already registered.
    pub fn register(&mut self, prototype: Prototype) -> Result<(), WorldError> {
        if self.types.contains_key(&prototype.name) {
            return Err(WorldError::DuplicatePrototype(prototype.name));
        }
        self.types.insert(prototype.name.clone(), prototype);
        Ok(())
    }

    /// Look up a single template by name.
    pub fn get(&self, name: &TypeName) -> Option<&Prototype> {
        self.types.get(name)
    }

    /// Whether a type name is registered.
    pub fn contains(&self, name: &TypeName) -> bool {
        self.types.contains_key(name)
    }

    /// The parent chain of a type, starting with the type itself.
    ///
    /// An unknown name yields an empty chain. Malformed registrations
    /// (a parent link forming a cycle) terminate at the first repeat
    /// rather than looping.
    pub fn parent_chain(&self, name: &TypeName) -> Vec<TypeName> {
        let mut chain = Vec::new();
        let mut seen = BTreeSet::new();
        let mut cursor = Some(name.clone());
        while let Some(current) = cursor {
            if !seen.insert(current.clone()) {
                break;
            }
            let Some(prototype) = self.types.get(&current) else {
                break;
            };
            chain.push(current);
            cursor = prototype.parent.clone();
        }
        chain
    }

    /// The fully resolved attribute template for a type: its own defaults
    /// over everything inherited from its ancestors.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::UnknownPrototype`] if the name is not
    /// registered.
    pub fn template(&self, name: &TypeName) -> Result<BTreeMap<String, AttrValue>, WorldError> {
        if !self.contains(name) {
            return Err(WorldError::UnknownPrototype(name.clone()));
        }
        let mut resolved = BTreeMap::new();
        // Walk ancestors root-first so nearer types overwrite farther ones.
        for type_name in self.parent_chain(name).iter().rev() {
            if let Some(prototype) = self.types.get(type_name) {
                for (attr, value) in &prototype.attrs {
                    resolved.insert(attr.clone(), value.clone());
                }
            }
        }
        Ok(resolved)
    }

    /// Look up one attribute for a type, walking the parent chain.
    ///
    /// Cheaper than [`PrototypeRegistry::template`] when only a single
    /// attribute is needed, which is the common case for overlay lookups.
    pub fn attr(&self, name: &TypeName, attr: &str) -> Option<&AttrValue> {
        let mut seen = BTreeSet::new();
        let mut cursor = Some(name);
        while let Some(current) = cursor {
            if !seen.insert(current.clone()) {
                break;
            }
            let prototype = self.types.get(current)?;
            if let Some(value) = prototype.attrs.get(attr) {
                return Some(value);
            }
            cursor = prototype.parent.as_ref();
        }
        None
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The stock grove registry: every type the stock ruleset spawns or
    /// reacts on.
    ///
    /// Mass defaults follow the source material: a full-grown deer carries
    /// 100 kg against a 150 kg ceiling, a piglet starts at 5 kg against
    /// 100 kg.
    pub fn stock() -> Self {
        let mut registry = Self::new();
        let prototypes = [
            Prototype::root("thing").with_attr(names::STATUS, 1.0),
            Prototype::child_of("creature", "thing"),
            Prototype::child_of("deer", "creature")
                .with_attr(names::MASS, 100.0)
                .with_attr(names::MAX_MASS, 150.0),
            Prototype::child_of("pig", "creature")
                .with_attr(names::MASS, 5.0)
                .with_attr(names::MAX_MASS, 100.0),
            Prototype::child_of("venison", "thing").with_attr(names::MASS, 3.0),
            Prototype::child_of("ham", "thing").with_attr(names::MASS, 2.0),
            Prototype::child_of("plant", "thing"),
            Prototype::child_of("seed", "plant"),
            Prototype::child_of("acorn", "seed").with_attr(names::MASS, 0.05),
            Prototype::child_of("oak", "plant"),
            Prototype::child_of("structure", "thing"),
            Prototype::child_of("house", "structure"),
            Prototype::child_of("wall", "structure"),
            Prototype::child_of("undead", "creature"),
            Prototype::child_of("skeleton", "undead").with_attr(names::MASS, 30.0),
            Prototype::child_of("skull", "thing"),
            Prototype::child_of("ribcage", "thing"),
            Prototype::child_of("arm", "thing"),
            Prototype::child_of("pelvis", "thing"),
            Prototype::child_of("thigh", "thing"),
            Prototype::child_of("shin", "thing"),
            Prototype::child_of("tool", "thing"),
            Prototype::child_of("tinderbox", "tool"),
            Prototype::child_of("fire", "thing").with_attr(names::STATUS, 0.1),
        ];
        for prototype in prototypes {
            // Names above are unique by construction; a duplicate here is
            // a programming error surfaced in tests, not at runtime.
            let _ = registry.register(prototype);
        }
        registry
    }
}
