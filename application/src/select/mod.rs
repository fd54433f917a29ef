//! Built-in selection policies.

mod consult_all;
mod trust_ordered;

pub use consult_all::ConsultAll;
pub use trust_ordered::TrustOrdered;
