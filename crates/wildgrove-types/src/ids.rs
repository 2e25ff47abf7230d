//! Type-safe identifier wrappers for the simulation.
//!
//! Entities carry an opaque [`EntityId`] (UUID v7, time-ordered) assigned by
//! the world store. Prototype types are named by [`TypeName`], a thin string
//! wrapper that keeps type tags from being confused with arbitrary strings
//! at the handler boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Generates a newtype wrapper around [`Uuid`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Create a new identifier using UUID v7 (time-ordered).
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Return the inner [`Uuid`] value.
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<Uuid> for $name {
            fn from(id: Uuid) -> Self {
                Self(id)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id! {
    /// Unique identifier for an entity in the world store.
    EntityId
}

/// The name of a prototype type (e.g. `deer`, `acorn`, `wall`).
///
/// Entities reference their prototype through [`Parentage`]; the registry
/// resolves a `TypeName` to an attribute template.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeName(pub String);

impl TypeName {
    /// Create a type name from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Return the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TypeName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for TypeName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The parent-type tags of an entity.
///
/// The wire protocol accepts both a single `parent` and a `parents` list;
/// which form was used is preserved rather than silently unified, because
/// the production host treats them as distinct fields. [`Parentage::primary`]
/// gives the type used for prototype and handler resolution in either case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parentage {
    /// The single-parent form (`parent=<type>`).
    Single(TypeName),
    /// The list form (`parents=[<type>, ...]`). The first entry is primary.
    Multiple(Vec<TypeName>),
}

impl Parentage {
    /// Create a single-parent tag from anything string-like.
    pub fn single(name: impl Into<String>) -> Self {
        Self::Single(TypeName::new(name))
    }

    /// The primary type tag: the single parent, or the first of the list.
    ///
    /// Returns `None` for an empty `Multiple` list.
    pub fn primary(&self) -> Option<&TypeName> {
        match self {
            Self::Single(name) => Some(name),
            Self::Multiple(names) => names.first(),
        }
    }
}

impl From<TypeName> for Parentage {
    fn from(name: TypeName) -> Self {
        Self::Single(name)
    }
}
