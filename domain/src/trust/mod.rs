//! Trust representations and the Evidence-Based Trust numerics.
//!
//! Two interchangeable views of how much a source's word is worth:
//!
//! - [`Trust`] - a bounded belief/disbelief pair (what aggregators compare)
//! - [`Evidence`] - pseudo-counts of supporting/opposing observations
//!   (what accumulates additively)
//!
//! [`ebt`] converts between them via numerical quadrature and bisection.

pub mod ebt;
mod evidence;
mod trust;

pub use ebt::{EbtParams, confidence, evidence_to_trust, trust_to_evidence};
pub use evidence::Evidence;
pub use trust::Trust;

/// Trust representations that reduce to a non-negative scalar weight.
///
/// Weight-based aggregators (vote, weighted mean, set voting) only need a
/// magnitude, not a full trust pair. Plain scalars weigh as themselves; a
/// [`Trust`] pair weighs by its belief mass.
pub trait Weight {
    fn weight(&self) -> f64;
}

impl Weight for f64 {
    fn weight(&self) -> f64 {
        self.max(0.0)
    }
}

impl Weight for Trust {
    fn weight(&self) -> f64 {
        self.belief
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_weight_clamps_negative() {
        assert_eq!(0.7f64.weight(), 0.7);
        assert_eq!((-0.2f64).weight(), 0.0);
    }

    #[test]
    fn test_trust_weight_is_belief() {
        assert_eq!(Trust::new(0.6, 0.3).weight(), 0.6);
    }
}
