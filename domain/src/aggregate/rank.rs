//! Pick the single most trusted opinion.

use super::Aggregator;
use crate::opinion::{Opinion, Verdict};

/// Takes the one opinion with the greatest trust, verbatim.
///
/// No blending: the verdict value is that opinion's value and the quality
/// is its trust. Only needs trust to be orderable. Ties (and incomparable
/// trust values) keep the earlier opinion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rank;

impl<V, T> Aggregator<V, T> for Rank
where
    V: Clone + Send + Sync,
    T: PartialOrd + Clone + Send + Sync,
{
    type Quality = T;

    fn aggregate(&self, opinions: &[Opinion<V, T>]) -> Option<Verdict<V, T>> {
        let mut best = opinions.first()?;
        for opinion in &opinions[1..] {
            if opinion.trust > best.trust {
                best = opinion;
            }
        }
        Some(Verdict::new(best.value.clone(), best.trust.clone()))
    }
}
