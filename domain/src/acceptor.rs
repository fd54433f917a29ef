//! Early-exit acceptance policy.
//!
//! An [`Acceptor`] classifies an intermediate verdict so the invocation can
//! stop consulting sources once the answer is good enough.

use crate::opinion::Verdict;

/// Classification of a verdict's acceptability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acceptance {
    /// Good enough to settle on immediately, abandoning unconsulted sources.
    Good,
    /// Acceptable if nothing more can be consulted; otherwise keep going.
    Tolerable,
    /// Not acceptable; a final verdict classified this way is a failure.
    Bad,
}

impl Acceptance {
    pub fn is_good(&self) -> bool {
        matches!(self, Acceptance::Good)
    }

    pub fn is_bad(&self) -> bool {
        matches!(self, Acceptance::Bad)
    }
}

impl std::fmt::Display for Acceptance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Acceptance::Good => write!(f, "good"),
            Acceptance::Tolerable => write!(f, "tolerable"),
            Acceptance::Bad => write!(f, "bad"),
        }
    }
}

/// Policy judging whether a verdict is worth settling on.
pub trait Acceptor<V, Q>: Send + Sync {
    fn classify(&self, verdict: &Verdict<V, Q>) -> Acceptance;
}

/// Threshold acceptor over an `f64` quality.
///
/// Quality at or above `good_at` is [`Acceptance::Good`], at or above
/// `tolerable_at` is [`Acceptance::Tolerable`], anything below is
/// [`Acceptance::Bad`].
#[derive(Debug, Clone, Copy)]
pub struct QualityThreshold {
    good_at: f64,
    tolerable_at: f64,
}

impl QualityThreshold {
    /// Create a threshold acceptor; `tolerable_at` is capped at `good_at`.
    pub fn new(good_at: f64, tolerable_at: f64) -> Self {
        Self {
            good_at,
            tolerable_at: tolerable_at.min(good_at),
        }
    }

    /// Only early-exit at `good_at`; everything below is still tolerable.
    pub fn good_at(threshold: f64) -> Self {
        Self::new(threshold, f64::NEG_INFINITY)
    }
}

impl<V> Acceptor<V, f64> for QualityThreshold
where
    V: Send + Sync,
{
    fn classify(&self, verdict: &Verdict<V, f64>) -> Acceptance {
        if verdict.quality >= self.good_at {
            Acceptance::Good
        } else if verdict.quality >= self.tolerable_at {
            Acceptance::Tolerable
        } else {
            Acceptance::Bad
        }
    }
}
