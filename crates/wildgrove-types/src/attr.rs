//! Dynamic attribute values and the well-known attribute names.
//!
//! Entities hold a mapping of named attributes; prototypes hold a template
//! of the same shape. [`AttrValue`] is the value type on both sides of that
//! overlay. The handler code reads attributes through typed accessors, so
//! the variants here stay few and concrete.

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// Well-known attribute names used by the stock ruleset.
///
/// Defined once so handlers and the world store agree on spelling.
pub mod names {
    /// Physical mass in kilograms.
    pub const MASS: &str = "mass";
    /// Upper bound on mass an entity can grow to.
    pub const MAX_MASS: &str = "maxmass";
    /// Health/integrity in `[0, 1]`; negative marks the entity inert.
    pub const STATUS: &str = "status";
    /// Behavioral mode tag (e.g. `dead`, `collapsed`).
    pub const MODE: &str = "mode";
    /// Human-readable message text carried by error operations.
    pub const MESSAGE: &str = "message";
}

/// A dynamically typed attribute value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    /// A floating-point quantity (mass, status).
    Float(f64),
    /// An integral quantity.
    Int(i64),
    /// A string value (mode tags, names, messages).
    Text(String),
    /// A boolean flag.
    Flag(bool),
    /// An ordered list of values.
    List(Vec<AttrValue>),
    /// A spatial placement.
    Location(Location),
}

impl AttrValue {
    /// Return the float value, if this is a [`AttrValue::Float`].
    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Return the integer value, if this is an [`AttrValue::Int`].
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Return the text value, if this is an [`AttrValue::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Return the flag value, if this is an [`AttrValue::Flag`].
    pub const fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(v) => Some(*v),
            _ => None,
        }
    }

    /// Return the location, if this is an [`AttrValue::Location`].
    pub const fn as_location(&self) -> Option<&Location> {
        match self {
            Self::Location(v) => Some(v),
            _ => None,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Flag(v)
    }
}

impl From<Location> for AttrValue {
    fn from(v: Location) -> Self {
        Self::Location(v)
    }
}
