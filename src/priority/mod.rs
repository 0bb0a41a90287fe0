pub mod order;

pub use order::{DEFAULT_PREFERRED_ORDER, PriorityPolicy};
