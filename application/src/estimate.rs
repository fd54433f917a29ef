//! The incrementally-refined consensus estimate.
//!
//! An [`Estimate`] is the meeting point of an invocation: the control loop
//! registers pending source queries with [`augment`](Estimate::augment),
//! worker tasks feed their completions in as they land (in any order), and
//! the aggregator is re-applied as the opinion set grows. Callers may poll
//! [`current`](Estimate::current) at any time or await
//! [`settled`](Estimate::settled) for the terminal outcome.
//!
//! All shared state sits behind one internal lock; completion order of
//! worker tasks is therefore irrelevant. Settlement is a one-time
//! transition published over a watch channel; anything arriving afterwards
//! is a silent no-op, which is how late stragglers from a cancelled or
//! early-settled invocation are tolerated.

use crate::ports::SourceError;
use consilium_domain::{Acceptor, Aggregator, ConsensusError, Opinion, Verdict};
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

type Outcome<V, Q> = Result<Verdict<V, Q>, ConsensusError>;

struct State<V, T, Q> {
    opinions: Vec<Opinion<V, T>>,
    /// Aggregate over the opinions inserted so far, if usable.
    latest: Option<Verdict<V, Q>>,
    outstanding: usize,
    sealed: bool,
    settled: bool,
}

struct Inner<V, T, Q> {
    aggregator: Arc<dyn Aggregator<V, T, Quality = Q>>,
    acceptor: Option<Arc<dyn Acceptor<V, Q>>>,
    state: Mutex<State<V, T, Q>>,
    terminal: watch::Sender<Option<Outcome<V, Q>>>,
    halted: CancellationToken,
}

/// Thread-safe, eventually-settled aggregate over source opinions.
///
/// Cloning yields another handle to the same estimate.
pub struct Estimate<V, T, Q> {
    inner: Arc<Inner<V, T, Q>>,
}

impl<V, T, Q> Clone for Estimate<V, T, Q> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V, T, Q> Estimate<V, T, Q>
where
    V: Clone + Send + Sync + 'static,
    T: Send + Sync + 'static,
    Q: Clone + Send + Sync + 'static,
{
    /// Create an empty, open estimate.
    pub fn new(
        aggregator: Arc<dyn Aggregator<V, T, Quality = Q>>,
        acceptor: Option<Arc<dyn Acceptor<V, Q>>>,
    ) -> Self {
        let (terminal, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                aggregator,
                acceptor,
                state: Mutex::new(State {
                    opinions: Vec::new(),
                    latest: None,
                    outstanding: 0,
                    sealed: false,
                    settled: false,
                }),
                terminal,
                halted: CancellationToken::new(),
            }),
        }
    }

    /// Register a pending source query.
    ///
    /// Increments the outstanding count and spawns a continuation that
    /// folds the query's eventual result in. Once the estimate is settled
    /// this is a silent no-op.
    pub fn augment<F>(&self, query: F)
    where
        F: Future<Output = Result<Opinion<V, T>, SourceError>> + Send + 'static,
    {
        {
            let mut state = self.inner.state.lock().unwrap();
            if state.settled {
                debug!("augment after settlement ignored");
                return;
            }
            state.outstanding += 1;
        }

        let estimate = self.clone();
        tokio::spawn(async move {
            let result = query.await;
            estimate.complete(result);
        });
    }

    /// Fold one completed query into the estimate.
    fn complete(&self, result: Result<Opinion<V, T>, SourceError>) {
        let mut guard = self.inner.state.lock().unwrap();
        let state = &mut *guard;
        if state.settled {
            debug!("completion after settlement discarded");
            return;
        }
        state.outstanding = state.outstanding.saturating_sub(1);

        match result {
            Ok(opinion) => {
                debug!(source = %opinion.source, "opinion inserted");
                state.opinions.push(opinion);
                let latest = self.inner.aggregator.aggregate(&state.opinions);
                state.latest = latest;

                let accepted_early = match (&self.inner.acceptor, &state.latest) {
                    (Some(acceptor), Some(verdict)) => acceptor.classify(verdict).is_good(),
                    _ => false,
                };
                if accepted_early {
                    debug!("verdict classified good; settling early");
                    self.settle_locked(state, false);
                    return;
                }
            }
            Err(e) => {
                warn!(error = %e, "source query failed; attempt discarded");
            }
        }

        if state.sealed && state.outstanding == 0 {
            self.settle_locked(state, false);
        }
    }

    /// Close the estimate to further augmentation.
    ///
    /// Idempotent. Settles immediately when nothing is outstanding;
    /// otherwise settlement happens when the last outstanding query
    /// completes.
    pub fn seal(&self) {
        let mut state = self.inner.state.lock().unwrap();
        state.sealed = true;
        if !state.settled && state.outstanding == 0 {
            self.settle_locked(&mut state, false);
        }
    }

    /// Cancel the estimate: seal and settle right now.
    ///
    /// Cooperative, not preemptive - queries already in flight run to
    /// completion but their results are discarded. With no opinions
    /// gathered the outcome is [`ConsensusError::Cancelled`].
    pub fn cancel(&self) {
        let mut state = self.inner.state.lock().unwrap();
        state.sealed = true;
        if !state.settled {
            self.settle_locked(&mut state, true);
        }
    }

    /// One-time terminal transition; must hold the state lock.
    fn settle_locked(&self, state: &mut State<V, T, Q>, cancelled: bool) {
        state.settled = true;
        let outcome = match self.inner.aggregator.aggregate(&state.opinions) {
            None => Err(if cancelled {
                ConsensusError::Cancelled
            } else {
                ConsensusError::NoUsableResult
            }),
            Some(verdict) => match &self.inner.acceptor {
                Some(acceptor) if acceptor.classify(&verdict).is_bad() => {
                    Err(ConsensusError::Unacceptable)
                }
                _ => Ok(verdict),
            },
        };
        self.inner.terminal.send_replace(Some(outcome));
        self.inner.halted.cancel();
    }

    /// Aggregate over the opinions known so far.
    ///
    /// Pure and non-blocking; defined (as `None`) even before any opinion
    /// arrives.
    pub fn current(&self) -> Option<Verdict<V, Q>> {
        let state = self.inner.state.lock().unwrap();
        self.inner.aggregator.aggregate(&state.opinions)
    }

    /// Number of opinions inserted so far.
    pub fn opinion_count(&self) -> usize {
        self.inner.state.lock().unwrap().opinions.len()
    }

    /// Number of dispatched queries not yet completed.
    pub fn outstanding(&self) -> usize {
        self.inner.state.lock().unwrap().outstanding
    }

    pub fn is_sealed(&self) -> bool {
        self.inner.state.lock().unwrap().sealed
    }

    pub fn is_settled(&self) -> bool {
        self.inner.state.lock().unwrap().settled
    }

    /// Token cancelled the moment the estimate settles, for embedders that
    /// want to tie their own work to the invocation's lifetime.
    pub fn halted(&self) -> CancellationToken {
        self.inner.halted.clone()
    }

    /// The terminal outcome, if the estimate has settled.
    pub fn try_settled(&self) -> Option<Outcome<V, Q>> {
        self.inner.terminal.borrow().clone()
    }

    /// Await settlement and return the terminal outcome.
    pub async fn settled(&self) -> Outcome<V, Q> {
        let mut rx = self.inner.terminal.subscribe();
        match rx.wait_for(Option::is_some).await {
            Ok(outcome) => outcome.clone().unwrap_or(Err(ConsensusError::Cancelled)),
            // The sender lives in self, so this arm is unreachable in
            // practice; fail closed anyway.
            Err(_) => Err(ConsensusError::Cancelled),
        }
    }
}
