//! One module per subcommand.

pub mod exists;
pub mod get;
pub mod index;
pub mod lookup;
pub mod put;
pub mod remove;

use confstore::backend::NodeSchema;

/// Schema used when the caller asks for optimistic locking
pub fn locked_schema(lock: bool) -> Option<NodeSchema> {
    lock.then(|| NodeSchema::locked("node"))
}
