//! Aggregation over set-valued opinions.

use super::Aggregator;
use crate::opinion::{Opinion, Verdict};
use crate::trust::Weight;
use std::collections::BTreeSet;

fn overlap_ratio<E: Ord>(union: &BTreeSet<E>, intersection: &BTreeSet<E>) -> f64 {
    if union.is_empty() {
        0.0
    } else {
        intersection.len() as f64 / union.len() as f64
    }
}

fn union_and_intersection<E, T>(
    opinions: &[Opinion<BTreeSet<E>, T>],
) -> Option<(BTreeSet<E>, BTreeSet<E>)>
where
    E: Ord + Clone,
{
    let first = opinions.first()?;
    let mut union = first.value.clone();
    let mut intersection = first.value.clone();
    for opinion in &opinions[1..] {
        union.extend(opinion.value.iter().cloned());
        intersection.retain(|e| opinion.value.contains(e));
    }
    Some((union, intersection))
}

/// Union of all reported sets; quality is the overlap ratio
/// (intersection size over union size).
#[derive(Debug, Clone, Copy, Default)]
pub struct SetUnion;

impl<E, T> Aggregator<BTreeSet<E>, T> for SetUnion
where
    E: Ord + Clone + Send + Sync,
    T: Send + Sync,
{
    type Quality = f64;

    fn aggregate(
        &self,
        opinions: &[Opinion<BTreeSet<E>, T>],
    ) -> Option<Verdict<BTreeSet<E>, f64>> {
        let (union, intersection) = union_and_intersection(opinions)?;
        let quality = overlap_ratio(&union, &intersection);
        Some(Verdict::new(union, quality))
    }
}

/// Intersection of all reported sets; quality is the overlap ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SetIntersection;

impl<E, T> Aggregator<BTreeSet<E>, T> for SetIntersection
where
    E: Ord + Clone + Send + Sync,
    T: Send + Sync,
{
    type Quality = f64;

    fn aggregate(
        &self,
        opinions: &[Opinion<BTreeSet<E>, T>],
    ) -> Option<Verdict<BTreeSet<E>, f64>> {
        let (union, intersection) = union_and_intersection(opinions)?;
        let quality = overlap_ratio(&union, &intersection);
        Some(Verdict::new(intersection, quality))
    }
}

/// Per-element trust-weighted vote across set-valued opinions.
///
/// An element's agreement is the weight of the opinions containing it over
/// the total weight; elements at or above the inclusion threshold make the
/// verdict set. Quality is the mean agreement of the included elements
/// (0.0 when nothing clears the threshold). Zero total weight yields no
/// verdict.
#[derive(Debug, Clone, Copy)]
pub struct SetVoting {
    threshold: f64,
}

impl SetVoting {
    /// Create a set vote with the given inclusion threshold in `[0, 1]`.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl Default for SetVoting {
    /// Default: simple majority of trust mass.
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl<E, T> Aggregator<BTreeSet<E>, T> for SetVoting
where
    E: Ord + Clone + Send + Sync,
    T: Weight + Send + Sync,
{
    type Quality = f64;

    fn aggregate(
        &self,
        opinions: &[Opinion<BTreeSet<E>, T>],
    ) -> Option<Verdict<BTreeSet<E>, f64>> {
        if opinions.is_empty() {
            return None;
        }
        let total: f64 = opinions.iter().map(|o| o.trust.weight()).sum();
        if total <= 0.0 {
            return None;
        }

        let mut elements: BTreeSet<&E> = BTreeSet::new();
        for opinion in opinions {
            elements.extend(opinion.value.iter());
        }

        let mut included = BTreeSet::new();
        let mut agreement_sum = 0.0;
        for element in elements {
            let support: f64 = opinions
                .iter()
                .filter(|o| o.value.contains(element))
                .map(|o| o.trust.weight())
                .sum();
            let agreement = support / total;
            if agreement >= self.threshold {
                included.insert(element.clone());
                agreement_sum += agreement;
            }
        }

        let quality = if included.is_empty() {
            0.0
        } else {
            agreement_sum / included.len() as f64
        };
        Some(Verdict::new(included, quality))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_is_none() {
        let opinions: Vec<Opinion<BTreeSet<String>, f64>> = vec![];
        assert!(SetUnion.aggregate(&opinions).is_none());
        assert!(SetIntersection.aggregate(&opinions).is_none());
        assert!(SetVoting::default().aggregate(&opinions).is_none());
    }

    #[test]
    fn test_union_and_overlap() {
        let opinions = vec![
            Opinion::new(set(&["a", "b"]), 1.0, "x"),
            Opinion::new(set(&["b", "c"]), 1.0, "y"),
        ];
        let verdict = SetUnion.aggregate(&opinions).unwrap();
        assert_eq!(verdict.value, set(&["a", "b", "c"]));
        assert!((verdict.quality - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_intersection() {
        let opinions = vec![
            Opinion::new(set(&["a", "b", "c"]), 1.0, "x"),
            Opinion::new(set(&["b", "c", "d"]), 1.0, "y"),
            Opinion::new(set(&["b", "c"]), 1.0, "z"),
        ];
        let verdict = SetIntersection.aggregate(&opinions).unwrap();
        assert_eq!(verdict.value, set(&["b", "c"]));
        assert_eq!(verdict.quality, 0.5);
    }

    #[test]
    fn test_disjoint_sets_zero_quality() {
        let opinions = vec![
            Opinion::new(set(&["a"]), 1.0, "x"),
            Opinion::new(set(&["b"]), 1.0, "y"),
        ];
        let verdict = SetIntersection.aggregate(&opinions).unwrap();
        assert!(verdict.value.is_empty());
        assert_eq!(verdict.quality, 0.0);
    }

    #[test]
    fn test_empty_sets_only() {
        let opinions: Vec<Opinion<BTreeSet<String>, f64>> =
            vec![Opinion::new(BTreeSet::new(), 1.0, "x")];
        let verdict = SetUnion.aggregate(&opinions).unwrap();
        assert!(verdict.value.is_empty());
        assert_eq!(verdict.quality, 0.0);
    }

    #[test]
    fn test_set_voting_threshold() {
        let opinions = vec![
            Opinion::new(set(&["a", "b"]), 2.0, "x"),
            Opinion::new(set(&["a"]), 1.0, "y"),
            Opinion::new(set(&["c"]), 1.0, "z"),
        ];
        // total weight 4: a=3/4, b=2/4, c=1/4
        let verdict = SetVoting::new(0.5).aggregate(&opinions).unwrap();
        assert_eq!(verdict.value, set(&["a", "b"]));
        assert!((verdict.quality - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_set_voting_nothing_included() {
        let opinions = vec![
            Opinion::new(set(&["a"]), 1.0, "x"),
            Opinion::new(set(&["b"]), 1.0, "y"),
        ];
        let verdict = SetVoting::new(0.9).aggregate(&opinions).unwrap();
        assert!(verdict.value.is_empty());
        assert_eq!(verdict.quality, 0.0);
    }

    #[test]
    fn test_set_voting_zero_weight_is_none() {
        let opinions = vec![Opinion::new(set(&["a"]), 0.0, "x")];
        assert!(SetVoting::default().aggregate(&opinions).is_none());
    }
}
