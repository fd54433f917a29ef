//! Typed source adaptation.
//!
//! Presents an inner [`Source`] under different argument, value and trust
//! types. The transformations are fixed at construction, so composition is
//! checked by the type system; there are no runtime casts.

use crate::ports::{Source, SourceError};
use async_trait::async_trait;
use consilium_domain::{Cost, Opinion};
use std::marker::PhantomData;

/// A source wrapped with argument, value and trust transformations.
///
/// `map_args` converts the outer query arguments into what the inner source
/// expects; `map_value` and `map_trust` convert its opinion back out. The
/// opinion keeps the inner source's name, so attribution survives adaptation.
///
/// `prior_trust` is forwarded without an observed value: the value mapping
/// is one-way, so an outer observation cannot be translated back for the
/// inner source.
pub struct Adapted<S, FA, FV, FT, V2, T2> {
    inner: S,
    map_args: FA,
    map_value: FV,
    map_trust: FT,
    _marker: PhantomData<fn(V2, T2)>,
}

impl<S, FA, FV, FT, V2, T2> Adapted<S, FA, FV, FT, V2, T2> {
    pub fn new(inner: S, map_args: FA, map_value: FV, map_trust: FT) -> Self {
        Self {
            inner,
            map_args,
            map_value,
            map_trust,
            _marker: PhantomData,
        }
    }
}

#[async_trait]
impl<A, V, T, A2, V2, T2, S, FA, FV, FT> Source<A, V, T> for Adapted<S, FA, FV, FT, V2, T2>
where
    A: Send + Sync,
    V: Send + Sync,
    T: Send + Sync,
    A2: Send + Sync,
    V2: Send + Sync,
    T2: Send,
    S: Source<A2, V2, T2>,
    FA: Fn(&A) -> A2 + Send + Sync,
    FV: Fn(V2) -> V + Send + Sync,
    FT: Fn(T2) -> T + Send + Sync,
{
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn cost(&self, args: &A) -> Result<Cost, SourceError> {
        let inner_args = (self.map_args)(args);
        self.inner.cost(&inner_args).await
    }

    async fn consult(&self, args: &A) -> Result<Opinion<V, T>, SourceError> {
        let inner_args = (self.map_args)(args);
        let opinion = self.inner.consult(&inner_args).await?;
        Ok(Opinion::new(
            (self.map_value)(opinion.value),
            (self.map_trust)(opinion.trust),
            opinion.source,
        ))
    }

    async fn prior_trust(&self, args: &A, _observed: Option<&V>) -> Option<T> {
        let inner_args = (self.map_args)(args);
        self.inner
            .prior_trust(&inner_args, None)
            .await
            .map(&self.map_trust)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    struct Echo;

    #[async_trait]
    impl Source<String, String, f64> for Echo {
        fn name(&self) -> &str {
            "echo"
        }

        async fn cost(&self, _args: &String) -> Result<Cost, SourceError> {
            Ok(Cost::free().with_depletable("USD", 1.0))
        }

        async fn consult(&self, args: &String) -> Result<Opinion<String, f64>, SourceError> {
            Ok(Opinion::new(args.clone(), 0.8, "echo"))
        }

        async fn prior_trust(&self, _args: &String, _observed: Option<&String>) -> Option<f64> {
            Some(0.8)
        }
    }

    fn adapted() -> impl Source<u32, usize, f64> {
        Adapted::new(
            Echo,
            |n: &u32| n.to_string(),
            |v: String| v.len(),
            |t: f64| t / 2.0,
        )
    }

    #[tokio::test]
    async fn test_consult_maps_value_and_trust() {
        let source = adapted();
        let opinion = source.consult(&1234).await.unwrap();
        assert_eq!(opinion.value, 4);
        assert_eq!(opinion.trust, 0.4);
        assert_eq!(opinion.source, "echo");
    }

    #[tokio::test]
    async fn test_cost_and_name_pass_through() {
        let source = adapted();
        assert_eq!(source.name(), "echo");
        let cost = source.cost(&7).await.unwrap();
        assert_eq!(cost.depletable("USD"), 1.0);
    }

    #[tokio::test]
    async fn test_prior_trust_is_mapped() {
        let source = adapted();
        assert_eq!(source.prior_trust(&7, None).await, Some(0.4));
    }

    #[tokio::test]
    async fn test_usable_as_trait_object() {
        let source: Arc<dyn Source<u32, usize, f64>> = Arc::new(adapted());
        let opinion = source.consult(&90210).await.unwrap();
        assert_eq!(opinion.value, 5);
    }
}
