//! Capability registry.
//!
//! An explicit registration table mapping a capability tag to source
//! constructors. The embedding application populates it at startup and
//! asks for the pool of sources implementing a capability when building an
//! invocation; the engine itself never inspects types at runtime.

use crate::ports::Source;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

type SourceConstructor<A, V, T> = Arc<dyn Fn() -> Arc<dyn Source<A, V, T>> + Send + Sync>;

/// Registration table from capability tags to source constructors.
///
/// # Example
///
/// ```no_run
/// # use consilium_application::registry::SourceRegistry;
/// # use consilium_application::ports::Source;
/// # use std::sync::Arc;
/// # fn demo<A: 'static, V: 'static, T: 'static>(make_wiki: fn() -> Arc<dyn Source<A, V, T>>) {
/// let mut registry: SourceRegistry<A, V, T> = SourceRegistry::new();
/// registry.register("animal-lookup", move || make_wiki());
/// let pool = registry.sources_for("animal-lookup");
/// # }
/// ```
pub struct SourceRegistry<A, V, T> {
    entries: HashMap<String, Vec<SourceConstructor<A, V, T>>>,
}

impl<A, V, T> SourceRegistry<A, V, T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a constructor under a capability tag.
    pub fn register<F>(&mut self, capability: impl Into<String>, constructor: F)
    where
        F: Fn() -> Arc<dyn Source<A, V, T>> + Send + Sync + 'static,
    {
        let capability = capability.into();
        debug!(capability = %capability, "source constructor registered");
        self.entries
            .entry(capability)
            .or_default()
            .push(Arc::new(constructor));
    }

    /// Build the pool of sources registered for a capability, in
    /// registration order. Unknown capabilities yield an empty pool.
    pub fn sources_for(&self, capability: &str) -> Vec<Arc<dyn Source<A, V, T>>> {
        self.entries
            .get(capability)
            .map(|constructors| constructors.iter().map(|make| make()).collect())
            .unwrap_or_default()
    }

    /// Registered capability tags, in no particular order.
    pub fn capabilities(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<A, V, T> Default for SourceRegistry<A, V, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SourceError;
    use async_trait::async_trait;
    use consilium_domain::{Cost, Opinion};

    struct Named(&'static str);

    #[async_trait]
    impl Source<String, String, f64> for Named {
        fn name(&self) -> &str {
            self.0
        }

        async fn cost(&self, _args: &String) -> Result<Cost, SourceError> {
            Ok(Cost::free())
        }

        async fn consult(&self, _args: &String) -> Result<Opinion<String, f64>, SourceError> {
            Err(SourceError::NoOpinion)
        }
    }

    #[test]
    fn test_register_and_build_pool() {
        let mut registry: SourceRegistry<String, String, f64> = SourceRegistry::new();
        registry.register("lookup", || Arc::new(Named("wiki")));
        registry.register("lookup", || Arc::new(Named("scan")));
        registry.register("classify", || Arc::new(Named("model")));

        let pool = registry.sources_for("lookup");
        assert_eq!(pool.len(), 2);
        assert_eq!(pool[0].name(), "wiki");
        assert_eq!(pool[1].name(), "scan");

        let mut caps: Vec<_> = registry.capabilities().collect();
        caps.sort_unstable();
        assert_eq!(caps, vec!["classify", "lookup"]);
    }

    #[test]
    fn test_unknown_capability_is_empty() {
        let registry: SourceRegistry<String, String, f64> = SourceRegistry::default();
        assert!(registry.sources_for("nope").is_empty());
    }

    #[test]
    fn test_constructors_build_fresh_instances() {
        let mut registry: SourceRegistry<String, String, f64> = SourceRegistry::new();
        registry.register("lookup", || Arc::new(Named("wiki")));
        let a = registry.sources_for("lookup");
        let b = registry.sources_for("lookup");
        assert!(!Arc::ptr_eq(&a[0], &b[0]));
    }
}
