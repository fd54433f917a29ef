//! Pseudo-count evidence representation.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Pseudo-counts of consenting and dissenting observations.
///
/// Evidence is additive: folding two bodies of evidence about the same
/// proposition sums their counts. Counts are real-valued because converted
/// trust rarely lands on whole observations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Evidence {
    /// Observations supporting the proposition.
    pub consenting: f64,
    /// Observations opposing the proposition.
    pub dissenting: f64,
}

impl Evidence {
    /// No observations at all.
    pub const NONE: Evidence = Evidence {
        consenting: 0.0,
        dissenting: 0.0,
    };

    /// Create evidence counts, clamping negatives to zero.
    pub fn new(consenting: f64, dissenting: f64) -> Self {
        Self {
            consenting: consenting.max(0.0),
            dissenting: dissenting.max(0.0),
        }
    }

    /// Evidence that only supports.
    pub fn consenting(count: f64) -> Self {
        Self::new(count, 0.0)
    }

    /// Evidence that only opposes.
    pub fn dissenting(count: f64) -> Self {
        Self::new(0.0, count)
    }

    /// Total number of observations.
    pub fn total(&self) -> f64 {
        self.consenting + self.dissenting
    }
}

impl Add for Evidence {
    type Output = Evidence;

    fn add(self, rhs: Evidence) -> Evidence {
        Evidence {
            consenting: self.consenting + rhs.consenting,
            dissenting: self.dissenting + rhs.dissenting,
        }
    }
}

impl AddAssign for Evidence {
    fn add_assign(&mut self, rhs: Evidence) {
        self.consenting += rhs.consenting;
        self.dissenting += rhs.dissenting;
    }
}
