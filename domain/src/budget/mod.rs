//! Budget and cost algebra.
//!
//! Sources declare what a query will consume ([`Cost`]); an invocation
//! carries what it may still consume ([`Budget`]). Both are immutable
//! values; spending produces new snapshots.

mod budget;
mod cost;

pub use budget::Budget;
pub use cost::{Cost, FlagRequirement};
