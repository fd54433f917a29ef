//! Bounded trust representation.

use serde::{Deserialize, Serialize};

/// A bounded trust pair: `belief + disbelief <= 1`, both non-negative.
///
/// The remainder `1 - belief - disbelief` is uncertainty; a fresh source
/// about which nothing is known is all uncertainty ([`Trust::NONE`]).
///
/// # Example
///
/// ```
/// use consilium_domain::trust::Trust;
///
/// let trust = Trust::new(0.6, 0.2);
/// assert_eq!(trust.belief, 0.6);
/// assert!((trust.uncertainty() - 0.2).abs() < 1e-12);
/// assert!((trust.confidence() - 0.8).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Trust {
    /// Mass supporting the proposition.
    pub belief: f64,
    /// Mass opposing the proposition.
    pub disbelief: f64,
}

impl Trust {
    /// Complete uncertainty: no belief, no disbelief.
    pub const NONE: Trust = Trust {
        belief: 0.0,
        disbelief: 0.0,
    };

    /// Create a trust pair, projecting invalid input into the valid region.
    ///
    /// Negative components clamp to zero; a pair summing past 1 is scaled
    /// down proportionally so the invariant `belief + disbelief <= 1` holds.
    pub fn new(belief: f64, disbelief: f64) -> Self {
        let belief = belief.max(0.0);
        let disbelief = disbelief.max(0.0);
        let sum = belief + disbelief;
        if sum > 1.0 {
            Self {
                belief: belief / sum,
                disbelief: disbelief / sum,
            }
        } else {
            Self { belief, disbelief }
        }
    }

    /// Mass committed neither way.
    pub fn uncertainty(&self) -> f64 {
        (1.0 - self.belief - self.disbelief).max(0.0)
    }

    /// Total committed mass, `belief + disbelief`.
    pub fn confidence(&self) -> f64 {
        self.belief + self.disbelief
    }

    /// Fraction of committed mass that is belief; 0.5 when nothing is
    /// committed.
    pub fn alpha(&self) -> f64 {
        let c = self.confidence();
        if c == 0.0 { 0.5 } else { self.belief / c }
    }
}

/// A plain trust scalar is read as pure belief: `t` believed, the rest
/// uncertain.
impl From<f64> for Trust {
    fn from(scalar: f64) -> Self {
        Trust::new(scalar.clamp(0.0, 1.0), 0.0)
    }
}
