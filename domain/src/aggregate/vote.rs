//! Trust-weighted voting.

use super::Aggregator;
use crate::opinion::{Opinion, Verdict};
use crate::trust::Weight;

/// Weighted plurality vote over distinct values.
///
/// Each distinct value's tally is the summed trust weight of the opinions
/// proposing it; the winner is the value with the greatest tally and the
/// quality is its share of the total weight. Ties break deterministically:
/// a later value only displaces the leader with a *strictly* greater tally,
/// so the first value to reach the maximum wins.
///
/// # Example
///
/// ```
/// use consilium_domain::aggregate::{Aggregator, Vote};
/// use consilium_domain::opinion::Opinion;
///
/// let opinions = vec![
///     Opinion::new("cat", 0.9, "a"),
///     Opinion::new("dog", 0.5, "b"),
/// ];
/// let verdict = Vote.aggregate(&opinions).unwrap();
/// assert_eq!(verdict.value, "cat");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Vote;

impl<V, T> Aggregator<V, T> for Vote
where
    V: Clone + PartialEq + Send + Sync,
    T: Weight + Send + Sync,
{
    type Quality = f64;

    fn aggregate(&self, opinions: &[Opinion<V, T>]) -> Option<Verdict<V, f64>> {
        let mut tallies: Vec<(&V, f64)> = Vec::new();
        for opinion in opinions {
            let weight = opinion.trust.weight();
            match tallies.iter_mut().find(|(v, _)| *v == &opinion.value) {
                Some((_, tally)) => *tally += weight,
                None => tallies.push((&opinion.value, weight)),
            }
        }

        let total: f64 = tallies.iter().map(|(_, t)| t).sum();
        if total <= 0.0 {
            return None;
        }

        let mut winner = tallies.first()?;
        for candidate in &tallies[1..] {
            if candidate.1 > winner.1 {
                winner = candidate;
            }
        }

        Some(Verdict::new(winner.0.clone(), winner.1 / total))
    }
}
