//! Trust-ordered selection.

use crate::ports::{SelectionContext, Selector};
use async_trait::async_trait;
use consilium_domain::Weight;
use tracing::debug;

/// Offers the most trusted affordable source first.
///
/// Asks each remaining source for a pre-query trust estimate (no observed
/// value) and its cost, then returns the highest-trust source whose cost
/// the current budget covers, or `None` when nothing affordable remains.
/// Sources without a trust estimate rank at zero weight but stay eligible.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrustOrdered;

#[async_trait]
impl<A, V, T> Selector<A, V, T> for TrustOrdered
where
    A: Send + Sync,
    V: Send + Sync,
    T: Weight + Send + Sync,
{
    async fn next(&mut self, ctx: SelectionContext<'_, A, V, T>) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;

        for index in ctx.available().collect::<Vec<_>>() {
            let source = &ctx.sources[index];

            let cost = match source.cost(ctx.args).await {
                Ok(cost) => cost,
                Err(e) => {
                    debug!(source = source.name(), error = %e, "no cost; not offering");
                    continue;
                }
            };
            if !ctx.budget.covers(&cost, ctx.elapsed) {
                continue;
            }

            let weight = source
                .prior_trust(ctx.args, None)
                .await
                .map(|t| t.weight())
                .unwrap_or(0.0);
            match best {
                Some((_, top)) if weight <= top => {}
                _ => best = Some((index, weight)),
            }
        }

        best.map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Source, SourceError};
    use consilium_domain::{Budget, Cost, Opinion};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    struct Priced {
        name: &'static str,
        trust: Option<f64>,
        usd: f64,
    }

    #[async_trait]
    impl Source<String, String, f64> for Priced {
        fn name(&self) -> &str {
            self.name
        }

        async fn cost(&self, _args: &String) -> Result<Cost, SourceError> {
            Ok(Cost::free().with_depletable("USD", self.usd))
        }

        async fn consult(&self, _args: &String) -> Result<Opinion<String, f64>, SourceError> {
            Err(SourceError::NoOpinion)
        }

        async fn prior_trust(&self, _args: &String, _observed: Option<&String>) -> Option<f64> {
            self.trust
        }
    }

    fn ctx_parts() -> (HashSet<usize>, HashSet<usize>, String) {
        (HashSet::new(), HashSet::new(), "q".to_string())
    }

    #[tokio::test]
    async fn test_picks_highest_trust_affordable() {
        let sources: Vec<Arc<dyn Source<String, String, f64>>> = vec![
            Arc::new(Priced { name: "cheap_low", trust: Some(0.3), usd: 1.0 }),
            Arc::new(Priced { name: "pricey_high", trust: Some(0.9), usd: 50.0 }),
            Arc::new(Priced { name: "cheap_mid", trust: Some(0.6), usd: 1.0 }),
        ];
        let budget = Budget::unlimited().with_depletable("USD", 5.0);
        let (consulted, declined, args) = ctx_parts();

        let picked = TrustOrdered
            .next(SelectionContext {
                sources: &sources,
                consulted: &consulted,
                declined: &declined,
                budget: &budget,
                elapsed: Duration::ZERO,
                args: &args,
            })
            .await;
        // The 0.9 source is unaffordable, so the 0.6 one wins.
        assert_eq!(picked, Some(2));
    }

    #[tokio::test]
    async fn test_none_when_nothing_affordable() {
        let sources: Vec<Arc<dyn Source<String, String, f64>>> =
            vec![Arc::new(Priced { name: "pricey", trust: Some(0.9), usd: 50.0 })];
        let budget = Budget::unlimited().with_depletable("USD", 5.0);
        let (consulted, declined, args) = ctx_parts();

        let picked = TrustOrdered
            .next(SelectionContext {
                sources: &sources,
                consulted: &consulted,
                declined: &declined,
                budget: &budget,
                elapsed: Duration::ZERO,
                args: &args,
            })
            .await;
        assert_eq!(picked, None);
    }

    #[tokio::test]
    async fn test_unestimated_source_ranks_last_but_eligible() {
        let sources: Vec<Arc<dyn Source<String, String, f64>>> =
            vec![Arc::new(Priced { name: "unknown", trust: None, usd: 0.0 })];
        let budget = Budget::unlimited();
        let (consulted, declined, args) = ctx_parts();

        let picked = TrustOrdered
            .next(SelectionContext {
                sources: &sources,
                consulted: &consulted,
                declined: &declined,
                budget: &budget,
                elapsed: Duration::ZERO,
                args: &args,
            })
            .await;
        assert_eq!(picked, Some(0));
    }
}
