//! Selector port
//!
//! Defines the policy interface that picks which source to consult next.

use super::source::Source;
use async_trait::async_trait;
use consilium_domain::Budget;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// What a selector may observe when choosing the next source.
///
/// Indices refer into `sources`. `consulted` holds sources already
/// dispatched this invocation; `declined` holds sources the control loop
/// found infeasible (cost failure or budget) this invocation. Budgets only
/// shrink, so a declined source stays unattractive.
pub struct SelectionContext<'a, A, V, T> {
    /// The full source pool, in registration order.
    pub sources: &'a [Arc<dyn Source<A, V, T>>],
    /// Indices already dispatched.
    pub consulted: &'a HashSet<usize>,
    /// Indices the loop declined as infeasible.
    pub declined: &'a HashSet<usize>,
    /// Budget remaining right now.
    pub budget: &'a Budget,
    /// Time since the invocation started.
    pub elapsed: Duration,
    /// The query arguments.
    pub args: &'a A,
}

impl<'a, A, V, T> SelectionContext<'a, A, V, T> {
    /// Whether a source is still worth offering.
    pub fn is_available(&self, index: usize) -> bool {
        !self.consulted.contains(&index) && !self.declined.contains(&index)
    }

    /// Indices of sources neither consulted nor declined, in pool order.
    pub fn available(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.sources.len()).filter(|i| self.is_available(*i))
    }
}

/// Policy choosing the next source to query.
///
/// `next` may await while deciding (e.g. wait for a slow dependency). The
/// contract is per-invocation: once a selector returns `None` it must keep
/// returning `None` for the rest of that invocation, and a conforming
/// selector stops offering sources it knows to be infeasible - the control
/// loop guards against the latter but cannot repair it.
#[async_trait]
pub trait Selector<A, V, T>: Send {
    /// Pick the index of the next source to consult, or `None` to end the
    /// selection loop.
    async fn next(&mut self, ctx: SelectionContext<'_, A, V, T>) -> Option<usize>;
}
