//! Error types for the `wildgrove-world` crate.
//!
//! These cover infrastructure faults only -- a handler observing a bad
//! precondition answers with an error *operation*, never with one of
//! these. All fallible store and registry operations return [`WorldError`].

use wildgrove_types::{EntityId, OpKind, TypeName};

/// Errors that can occur during entity-store and registry operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// An entity was not found in the store.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityId),

    /// A prototype type name is not registered.
    #[error("unknown prototype: {0}")]
    UnknownPrototype(TypeName),

    /// A prototype was registered twice.
    #[error("duplicate prototype: {0}")]
    DuplicatePrototype(TypeName),

    /// An entity was spawned with an id already present in the store.
    #[error("duplicate entity id: {0}")]
    DuplicateEntity(EntityId),

    /// An operation is missing a required argument.
    #[error("{kind} operation is missing {what}")]
    MissingArgument {
        /// The operation kind.
        kind: OpKind,
        /// What was expected.
        what: &'static str,
    },

    /// An operation names no target entity and none of its arguments do.
    #[error("{kind} operation names no target entity")]
    MissingTarget {
        /// The operation kind.
        kind: OpKind,
    },

    /// A non-primitive operation was handed to the store for application.
    #[error("{kind} is not a primitive mutation")]
    NotPrimitive {
        /// The operation kind.
        kind: OpKind,
    },
}
