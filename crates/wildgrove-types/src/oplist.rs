//! Ordered operation sequences and handler results.
//!
//! Handlers answer with zero, one, or many operations. [`Oplist`] is the
//! "many" form; [`HandlerResult`] is the exact shape of a handler's return
//! value, preserved so the composer can flatten it without guessing.
//! Ordering is load-bearing: a handler that emits "mark the source dead"
//! before "create the dropped item" relies on that sequence surviving
//! composition.

use serde::{Deserialize, Serialize};

use crate::operation::Operation;

/// An ordered sequence of operations produced as a handler's result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Oplist(Vec<Operation>);

impl Oplist {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append one operation at the end.
    pub fn push(&mut self, op: Operation) {
        self.0.push(op);
    }

    /// Append every operation of `other`, preserving order.
    pub fn extend(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    /// Number of operations in the list.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the operations in order.
    pub fn iter(&self) -> core::slice::Iter<'_, Operation> {
        self.0.iter()
    }

    /// Consume the list into its underlying vector.
    pub fn into_vec(self) -> Vec<Operation> {
        self.0
    }
}

impl From<Operation> for Oplist {
    fn from(op: Operation) -> Self {
        Self(vec![op])
    }
}

impl From<Vec<Operation>> for Oplist {
    fn from(ops: Vec<Operation>) -> Self {
        Self(ops)
    }
}

impl IntoIterator for Oplist {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Oplist {
    type Item = &'a Operation;
    type IntoIter = core::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The return value of a rule handler: nothing, one operation, or an
/// ordered list.
///
/// The three shapes are kept distinct (rather than collapsing everything
/// into [`Oplist`]) so the composer's flattening is an explicit, tested
/// step of the protocol.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerResult {
    /// The handler chose not to react.
    None,
    /// A single follow-up operation.
    One(Operation),
    /// An ordered sequence of follow-up operations.
    Many(Oplist),
}

impl HandlerResult {
    /// Whether the handler produced no operations at all.
    ///
    /// An empty [`HandlerResult::Many`] still counts as producing nothing.
    pub fn is_none(&self) -> bool {
        match self {
            Self::None => true,
            Self::One(_) => false,
            Self::Many(ops) => ops.is_empty(),
        }
    }
}

impl From<Operation> for HandlerResult {
    fn from(op: Operation) -> Self {
        Self::One(op)
    }
}

impl From<Oplist> for HandlerResult {
    fn from(ops: Oplist) -> Self {
        Self::Many(ops)
    }
}

impl From<Option<Operation>> for HandlerResult {
    fn from(op: Option<Operation>) -> Self {
        op.map_or(Self::None, Self::One)
    }
}
