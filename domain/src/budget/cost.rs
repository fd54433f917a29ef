//! Cost declarations for source queries.
//!
//! A [`Cost`] is what a source claims a single query will consume: wall-clock
//! time, depletable units (money-like amounts keyed by unit name) and
//! requirements on boolean flags. Costs are immutable values built once and
//! handed to the budget algebra.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// How a cost relates to a boolean flag in the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FlagRequirement {
    /// The flag must be active for the query to be feasible.
    Required,
    /// The flag must be absent for the query to be feasible.
    Restricted,
    /// The flag has no effect on feasibility.
    #[default]
    Ignored,
}

impl FlagRequirement {
    /// Check whether this requirement is met given the flag's activation.
    pub fn is_met(&self, active: bool) -> bool {
        match self {
            FlagRequirement::Required => active,
            FlagRequirement::Restricted => !active,
            FlagRequirement::Ignored => true,
        }
    }
}

/// Declared resource consumption of one source query.
///
/// # Example
///
/// ```
/// use consilium_domain::budget::Cost;
/// use std::time::Duration;
///
/// let cost = Cost::free()
///     .with_time(Duration::from_secs(2))
///     .with_depletable("USD", 1.0);
/// assert_eq!(cost.depletable("USD"), 1.0);
/// assert_eq!(cost.depletable("tokens"), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cost {
    /// Expected query duration; `None` means negligible time.
    pub time: Option<Duration>,
    /// Depletable amounts by unit name (e.g. "USD", "tokens").
    pub depletables: HashMap<String, f64>,
    /// Flag requirements by flag name.
    pub flag_requirements: HashMap<String, FlagRequirement>,
}

impl Cost {
    /// A cost that consumes nothing.
    pub fn free() -> Self {
        Self::default()
    }

    /// Set the expected time consumption.
    pub fn with_time(mut self, time: Duration) -> Self {
        self.time = Some(time);
        self
    }

    /// Add a depletable amount for a unit.
    pub fn with_depletable(mut self, unit: impl Into<String>, amount: f64) -> Self {
        self.depletables.insert(unit.into(), amount);
        self
    }

    /// Add a flag requirement.
    pub fn with_flag(mut self, flag: impl Into<String>, requirement: FlagRequirement) -> Self {
        self.flag_requirements.insert(flag.into(), requirement);
        self
    }

    /// Amount required for a unit; absent units cost nothing.
    pub fn depletable(&self, unit: &str) -> f64 {
        self.depletables.get(unit).copied().unwrap_or(0.0)
    }

    /// Whether this cost consumes nothing and constrains nothing.
    pub fn is_free(&self) -> bool {
        self.time.is_none()
            && self.depletables.values().all(|a| *a == 0.0)
            && self
                .flag_requirements
                .values()
                .all(|r| *r == FlagRequirement::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_cost() {
        let cost = Cost::free();
        assert!(cost.is_free());
        assert_eq!(cost.depletable("USD"), 0.0);
    }

    #[test]
    fn test_builder() {
        let cost = Cost::free()
            .with_time(Duration::from_secs(3))
            .with_depletable("USD", 2.5)
            .with_flag("paid_tier", FlagRequirement::Required);

        assert_eq!(cost.time, Some(Duration::from_secs(3)));
        assert_eq!(cost.depletable("USD"), 2.5);
        assert_eq!(
            cost.flag_requirements.get("paid_tier"),
            Some(&FlagRequirement::Required)
        );
        assert!(!cost.is_free());
    }

    #[test]
    fn test_flag_requirement_is_met() {
        assert!(FlagRequirement::Required.is_met(true));
        assert!(!FlagRequirement::Required.is_met(false));
        assert!(!FlagRequirement::Restricted.is_met(true));
        assert!(FlagRequirement::Restricted.is_met(false));
        assert!(FlagRequirement::Ignored.is_met(true));
        assert!(FlagRequirement::Ignored.is_met(false));
    }

    #[test]
    fn test_ignored_flag_keeps_cost_free() {
        let cost = Cost::free().with_flag("beta", FlagRequirement::Ignored);
        assert!(cost.is_free());
    }

    #[test]
    fn test_serde_roundtrip() {
        let cost = Cost::free()
            .with_time(Duration::from_millis(250))
            .with_depletable("tokens", 128.0)
            .with_flag("external", FlagRequirement::Restricted);
        let json = serde_json::to_string(&cost).unwrap();
        let back: Cost = serde_json::from_str(&json).unwrap();
        assert_eq!(cost, back);
    }
}
