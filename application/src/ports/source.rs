//! Source port
//!
//! Defines the interface the invocation engine consumes to query one
//! pluggable opinion provider. Concrete sources (search clients, scrapers,
//! classifiers) live in the embedding application.

use async_trait::async_trait;
use consilium_domain::{Cost, Opinion};
use thiserror::Error;

/// Errors a source can report for a single query.
///
/// All of these are expected and absorbed locally by the control loop: a
/// failing source is a completed-but-discarded attempt, never a retry and
/// never a surfaced error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("No opinion available")]
    NoOpinion,

    #[error("Cost unavailable: {0}")]
    CostUnavailable(String),

    #[error("Query failed: {0}")]
    Failed(String),
}

/// A pluggable provider of one (value, trust) opinion per query.
///
/// Sources may block on arbitrary external I/O in [`consult`](Self::consult)
/// and must treat the arguments as read-only. A failing
/// [`cost`](Self::cost) makes the source infeasible for that selection
/// round.
#[async_trait]
pub trait Source<A, V: Sync, T>: Send + Sync {
    /// Stable name used for logging and for attributing opinions.
    fn name(&self) -> &str;

    /// Declared resource consumption of one query with these arguments.
    async fn cost(&self, args: &A) -> Result<Cost, SourceError>;

    /// Run the query and report an opinion.
    async fn consult(&self, args: &A) -> Result<Opinion<V, T>, SourceError>;

    /// Trust estimate without (or after) observing a value, for
    /// trust-ordered selection. Sources that cannot estimate up front
    /// return `None`.
    async fn prior_trust(&self, _args: &A, _observed: Option<&V>) -> Option<T> {
        None
    }
}
