//! Budget snapshots and the covers/spend algebra.
//!
//! A [`Budget`] is an immutable snapshot of what an invocation may still
//! consume. Spending never mutates: [`Budget::spend`] returns a new snapshot
//! and the old one stays valid, which is what lets the control loop thread a
//! single owned value through its iterations without locking.
//!
//! Feasibility ([`Budget::covers`]) and spending are deliberately separate.
//! `spend` trusts that the caller checked `covers` first and does not
//! re-validate.

use super::cost::Cost;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Immutable snapshot of remaining resources.
///
/// # Example
///
/// ```
/// use consilium_domain::budget::{Budget, Cost};
/// use std::time::Duration;
///
/// let budget = Budget::unlimited()
///     .with_time(Duration::from_secs(10))
///     .with_depletable("USD", 5.0);
/// let cost = Cost::free()
///     .with_time(Duration::from_secs(2))
///     .with_depletable("USD", 1.0);
///
/// assert!(budget.covers(&cost, Duration::ZERO));
/// let after = budget.spend(&cost);
/// assert_eq!(after.depletable_remaining("USD"), 4.0);
/// // The original snapshot is untouched.
/// assert_eq!(budget.depletable_remaining("USD"), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Remaining wall-clock allowance; `None` means unlimited time.
    pub time_remaining: Option<Duration>,
    /// Remaining depletable amounts by unit name. Absent units are depleted.
    pub depletables_remaining: HashMap<String, f64>,
    /// Flags currently active for this invocation.
    pub active_flags: HashSet<String>,
}

impl Budget {
    /// A budget with unlimited time, no depletables and no flags.
    ///
    /// Note that "unlimited" only refers to time: any cost carrying a
    /// depletable amount is infeasible against this budget until the unit is
    /// granted via [`with_depletable`](Self::with_depletable).
    pub fn unlimited() -> Self {
        Self {
            time_remaining: None,
            depletables_remaining: HashMap::new(),
            active_flags: HashSet::new(),
        }
    }

    /// Limit the total wall-clock time.
    pub fn with_time(mut self, time: Duration) -> Self {
        self.time_remaining = Some(time);
        self
    }

    /// Grant a depletable amount for a unit.
    pub fn with_depletable(mut self, unit: impl Into<String>, amount: f64) -> Self {
        self.depletables_remaining.insert(unit.into(), amount);
        self
    }

    /// Activate a flag.
    pub fn with_flag(mut self, flag: impl Into<String>) -> Self {
        self.active_flags.insert(flag.into());
        self
    }

    /// Remaining amount for a unit; absent units have zero remaining.
    pub fn depletable_remaining(&self, unit: &str) -> f64 {
        self.depletables_remaining.get(unit).copied().unwrap_or(0.0)
    }

    /// Whether `cost` fits in this budget, given time already elapsed.
    ///
    /// Checks, in order: the time allowance (skipped when unlimited), every
    /// depletable the cost names, and every flag requirement. Absent
    /// depletables count as zero remaining.
    pub fn covers(&self, cost: &Cost, elapsed: Duration) -> bool {
        if let Some(limit) = self.time_remaining {
            let needed = elapsed + cost.time.unwrap_or(Duration::ZERO);
            if needed > limit {
                return false;
            }
        }

        for (unit, amount) in &cost.depletables {
            if *amount > self.depletable_remaining(unit) {
                return false;
            }
        }

        cost.flag_requirements
            .iter()
            .all(|(flag, req)| req.is_met(self.active_flags.contains(flag)))
    }

    /// Produce the budget remaining after paying `cost`.
    ///
    /// Does not re-validate feasibility: callers must check [`covers`]
    /// first. Subtracts the cost's time from the allowance (saturating) and
    /// each depletable amount from its unit.
    ///
    /// [`covers`]: Self::covers
    pub fn spend(&self, cost: &Cost) -> Budget {
        let mut next = self.clone();

        if let (Some(limit), Some(time)) = (next.time_remaining, cost.time) {
            next.time_remaining = Some(limit.saturating_sub(time));
        }

        for (unit, amount) in &cost.depletables {
            let remaining = next.depletable_remaining(unit) - amount;
            next.depletables_remaining.insert(unit.clone(), remaining);
        }

        next
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::unlimited()
    }
}
