//! Aggregation strategies.
//!
//! An [`Aggregator`] reduces the opinions collected so far to a single
//! [`Verdict`]. Strategies are pure and side-effect free; they are re-run
//! every time the opinion set grows, so "no usable result" must be an
//! explicit `None`, never an exception or a NaN-bearing quality.

mod numeric;
mod probabilistic;
mod rank;
mod sets;
mod vote;

pub use numeric::WeightedMean;
pub use probabilistic::Probabilistic;
pub use rank::Rank;
pub use sets::{SetIntersection, SetUnion, SetVoting};
pub use vote::Vote;

use crate::opinion::{Opinion, Verdict};

/// Reduces a collection of opinions to a consensus verdict.
///
/// Implementations must handle the empty slice (return `None`) and must be
/// deterministic: given the same opinions in the same order, the same
/// verdict comes out, including tie-breaks.
pub trait Aggregator<V, T>: Send + Sync {
    /// Quality measure this strategy produces (a ratio, a belief, a trust
    /// value of the winning opinion, ...).
    type Quality;

    /// Reduce `opinions` to a verdict, or `None` when nothing usable exists.
    fn aggregate(&self, opinions: &[Opinion<V, T>]) -> Option<Verdict<V, Self::Quality>>;
}
