//! Trust-weighted mean over numeric opinions.

use super::Aggregator;
use crate::opinion::{Opinion, Verdict};
use crate::trust::Weight;

/// Trust-weighted mean of numeric values.
///
/// The verdict value is the weighted mean; the quality is
/// `1 / (1 + weighted_stdev)`, so tight agreement scores near 1 and wide
/// scatter decays toward 0. Zero total weight yields no verdict.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedMean;

impl<T> Aggregator<f64, T> for WeightedMean
where
    T: Weight + Send + Sync,
{
    type Quality = f64;

    fn aggregate(&self, opinions: &[Opinion<f64, T>]) -> Option<Verdict<f64, f64>> {
        let total: f64 = opinions.iter().map(|o| o.trust.weight()).sum();
        if total <= 0.0 {
            return None;
        }

        let mean = opinions
            .iter()
            .map(|o| o.trust.weight() * o.value)
            .sum::<f64>()
            / total;

        let variance = opinions
            .iter()
            .map(|o| o.trust.weight() * (o.value - mean).powi(2))
            .sum::<f64>()
            / total;

        Some(Verdict::new(mean, 1.0 / (1.0 + variance.sqrt())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_none() {
        let opinions: Vec<Opinion<f64, f64>> = vec![];
        assert!(WeightedMean.aggregate(&opinions).is_none());
    }

    #[test]
    fn test_perfect_agreement_full_quality() {
        let opinions = vec![
            Opinion::new(42.0, 0.9, "a"),
            Opinion::new(42.0, 0.2, "b"),
        ];
        let verdict = WeightedMean.aggregate(&opinions).unwrap();
        assert_eq!(verdict.value, 42.0);
        assert_eq!(verdict.quality, 1.0);
    }

    #[test]
    fn test_weighting() {
        let opinions = vec![
            Opinion::new(10.0, 3.0, "a"),
            Opinion::new(20.0, 1.0, "b"),
        ];
        let verdict = WeightedMean.aggregate(&opinions).unwrap();
        assert!((verdict.value - 12.5).abs() < 1e-12);
        // stdev = sqrt(0.75*6.25 + 0.25*56.25) = sqrt(18.75)
        let expected_quality = 1.0 / (1.0 + 18.75f64.sqrt());
        assert!((verdict.quality - expected_quality).abs() < 1e-12);
    }

    #[test]
    fn test_zero_weight_is_none() {
        let opinions = vec![Opinion::new(5.0, 0.0, "a")];
        assert!(WeightedMean.aggregate(&opinions).is_none());
    }
}
