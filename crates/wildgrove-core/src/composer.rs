//! Flattening of handler results into ordered operation sequences.
//!
//! Handlers answer with nothing, one operation, or an ordered list. The
//! composer normalizes all three shapes into a flat `Vec` in the handler's
//! natural emission order, ready for re-submission to the queue. Ordering
//! is the whole contract: a `set` marking an animal dead must reach the
//! world before the `create` of its drop.

use wildgrove_types::{HandlerResult, Operation};

/// Flatten a single handler result in emission order.
pub fn compose(result: HandlerResult) -> Vec<Operation> {
    match result {
        HandlerResult::None => Vec::new(),
        HandlerResult::One(op) => vec![op],
        HandlerResult::Many(ops) => ops.into_vec(),
    }
}

/// Flatten a sequence of handler results into one ordered sequence.
///
/// Results are concatenated in the order given; within each result the
/// emission order is preserved.
pub fn compose_all(results: impl IntoIterator<Item = HandlerResult>) -> Vec<Operation> {
    let mut ops = Vec::new();
    for result in results {
        ops.extend(compose(result));
    }
    ops
}
