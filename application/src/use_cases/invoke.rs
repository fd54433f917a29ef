//! Invoke use case
//!
//! Binds a selector, a budget and a pool of sources into one settled
//! consensus. A single control task drives selection serially - no two
//! budget checks or spends ever overlap - while each dispatched source
//! query runs as an independent concurrent task feeding the
//! [`Estimate`].

use crate::estimate::Estimate;
use crate::ports::{SelectionContext, Selector, Source};
use consilium_domain::{Acceptor, Aggregator, Budget, ConsensusError, Verdict};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors a caller of the invoke use case can see.
///
/// Absorbed conditions (a failing source, a pick the budget cannot cover)
/// never surface here; they only reduce the information available.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvokeError {
    /// The invocation was executed a second time. One-shot means one shot.
    #[error("Invocation already executed")]
    AlreadyInvoked,

    #[error(transparent)]
    Consensus(#[from] ConsensusError),

    /// The blocking entry point could not build its runtime.
    #[error("Runtime error: {0}")]
    Runtime(String),
}

/// One-shot coordinator for a single consensus query.
///
/// Built from the source pool, an aggregation strategy, a selection policy
/// and an optional acceptance policy. Executing it a second time is a
/// programming error and fails fast with [`InvokeError::AlreadyInvoked`].
///
/// # Example
///
/// ```no_run
/// # use consilium_application::use_cases::Invocation;
/// # use consilium_application::select::ConsultAll;
/// # use consilium_application::ports::Source;
/// # use consilium_domain::{Budget, Vote};
/// # use std::sync::Arc;
/// # async fn run(sources: Vec<Arc<dyn Source<String, String, f64>>>) {
/// let mut invocation = Invocation::new(sources, Arc::new(Vote), ConsultAll);
/// let verdict = invocation
///     .invoke("what animal?".to_string(), Budget::unlimited())
///     .await
///     .unwrap();
/// println!("{} (quality {})", verdict.value, verdict.quality);
/// # }
/// ```
pub struct Invocation<A, V, T, Q> {
    sources: Vec<Arc<dyn Source<A, V, T>>>,
    aggregator: Arc<dyn Aggregator<V, T, Quality = Q>>,
    selector: Option<Box<dyn Selector<A, V, T>>>,
    acceptor: Option<Arc<dyn Acceptor<V, Q>>>,
}

impl<A, V, T, Q> Invocation<A, V, T, Q>
where
    A: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
    Q: Clone + Send + Sync + 'static,
{
    pub fn new(
        sources: Vec<Arc<dyn Source<A, V, T>>>,
        aggregator: Arc<dyn Aggregator<V, T, Quality = Q>>,
        selector: impl Selector<A, V, T> + 'static,
    ) -> Self {
        Self {
            sources,
            aggregator,
            selector: Some(Box::new(selector)),
            acceptor: None,
        }
    }

    /// Attach an early-exit acceptance policy.
    pub fn with_acceptor(mut self, acceptor: Arc<dyn Acceptor<V, Q>>) -> Self {
        self.acceptor = Some(acceptor);
        self
    }

    /// Start the invocation and return the estimate without blocking.
    ///
    /// The control loop runs on a spawned task; the returned [`Estimate`]
    /// can be polled early, awaited, or cancelled.
    pub fn invoke_async(&mut self, args: A, budget: Budget) -> Result<Estimate<V, T, Q>, InvokeError> {
        let selector = self.selector.take().ok_or(InvokeError::AlreadyInvoked)?;
        let estimate = Estimate::new(Arc::clone(&self.aggregator), self.acceptor.clone());

        let sources = self.sources.clone();
        let handle = estimate.clone();
        tokio::spawn(async move {
            control_loop(sources, selector, args, budget, handle).await;
        });

        Ok(estimate)
    }

    /// Run the invocation to settlement.
    pub async fn invoke(&mut self, args: A, budget: Budget) -> Result<Verdict<V, Q>, InvokeError> {
        let estimate = self.invoke_async(args, budget)?;
        Ok(estimate.settled().await?)
    }

    /// Run the invocation on the calling thread.
    ///
    /// Builds a current-thread runtime and blocks until settlement; worker
    /// tasks interleave deterministically at await points, which is what
    /// tests and synchronous embedders want. Must not be called from
    /// within an async context.
    pub fn invoke_blocking(&mut self, args: A, budget: Budget) -> Result<Verdict<V, Q>, InvokeError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .map_err(|e| InvokeError::Runtime(e.to_string()))?;
        runtime.block_on(self.invoke(args, budget))
    }
}

/// The serialized SELECT -> CHECK -> SPEND -> DISPATCH loop.
///
/// Owns the budget value outright: only this task ever replaces it, so the
/// spend path needs no locking. Sources the budget cannot cover are
/// declined (never retried - the budget only shrinks) and a selector that
/// keeps re-offering unusable sources is cut off after a full pool's worth
/// of stale offers.
async fn control_loop<A, V, T, Q>(
    sources: Vec<Arc<dyn Source<A, V, T>>>,
    mut selector: Box<dyn Selector<A, V, T>>,
    args: A,
    mut budget: Budget,
    estimate: Estimate<V, T, Q>,
) where
    A: Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
    Q: Clone + Send + Sync + 'static,
{
    let started = Instant::now();
    let mut consulted: HashSet<usize> = HashSet::new();
    let mut declined: HashSet<usize> = HashSet::new();
    let mut stale_offers = 0usize;

    info!(sources = sources.len(), "invocation started");

    loop {
        if estimate.is_settled() {
            debug!("estimate settled; abandoning remaining sources");
            break;
        }

        let ctx = SelectionContext {
            sources: &sources,
            consulted: &consulted,
            declined: &declined,
            budget: &budget,
            elapsed: started.elapsed(),
            args: &args,
        };
        let Some(index) = selector.next(ctx).await else {
            debug!("selector exhausted");
            break;
        };

        let Some(source) = sources.get(index) else {
            warn!(index, "selector returned an unknown source index");
            break;
        };
        if consulted.contains(&index) || declined.contains(&index) {
            stale_offers += 1;
            if stale_offers >= sources.len().max(1) {
                warn!(
                    source = source.name(),
                    "selector keeps re-offering unusable sources; ending selection"
                );
                break;
            }
            continue;
        }
        stale_offers = 0;

        // Costs may depend on the args and the moment, so recompute per pick.
        let cost = match source.cost(&args).await {
            Ok(cost) => cost,
            Err(e) => {
                debug!(source = source.name(), error = %e, "cost unavailable; declined");
                declined.insert(index);
                continue;
            }
        };
        if !budget.covers(&cost, started.elapsed()) {
            debug!(source = source.name(), "budget does not cover cost; declined");
            declined.insert(index);
            continue;
        }

        // The selector may have awaited; re-check before committing budget.
        if estimate.is_settled() {
            debug!("estimate settled during selection; abandoning remaining sources");
            break;
        }

        budget = budget.spend(&cost);
        consulted.insert(index);
        debug!(source = source.name(), "dispatching query");

        let source = Arc::clone(source);
        let query_args = args.clone();
        estimate.augment(async move { source.consult(&query_args).await });
    }

    estimate.seal();
    info!(
        consulted = consulted.len(),
        declined = declined.len(),
        "selection loop finished"
    );
}
