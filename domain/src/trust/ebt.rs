//! Evidence-Based Trust conversion.
//!
//! Relates the bounded [`Trust`] pair to pseudo-count [`Evidence`] through
//! the certainty of the implied posterior over outcome probabilities. For
//! counts `(r, s)` the unnormalized posterior kernel is
//! `f(x) = x^r * (1-x)^s` on `[0, 1]`; confidence is how far its normalized
//! form departs from the uniform density:
//!
//! ```text
//! c = 1/2 * integral |f(x)/I - 1| dx,   I = integral f(x) dx
//! ```
//!
//! Zero evidence gives the uniform kernel and confidence 0; as counts grow
//! the kernel peaks and confidence approaches 1. Both integrals are
//! evaluated by trapezoid quadrature. When the kernel underflows to zero
//! everywhere (very large counts), confidence is taken as 1.
//!
//! The inverse direction has no closed form: [`trust_to_evidence`] bisects
//! the total count whose forward confidence matches the trust's committed
//! mass, exploiting that confidence is monotone in the total.

use super::evidence::Evidence;
use super::trust::Trust;
use serde::{Deserialize, Serialize};

/// Tuning knobs for the Evidence-Based Trust numerics.
///
/// Three knobs:
/// - `quadrature_steps`: trapezoid intervals over `[0, 1]`
/// - `max_evidence`: upper bracket for the inverse bisection
/// - `tolerance`: bisection stops when the bracket is this narrow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EbtParams {
    quadrature_steps: usize,
    max_evidence: f64,
    tolerance: f64,
}

impl EbtParams {
    /// Create params with explicit values.
    pub fn new(quadrature_steps: usize, max_evidence: f64, tolerance: f64) -> Self {
        Self {
            quadrature_steps,
            max_evidence,
            tolerance,
        }
    }

    /// Coarse preset: faster, still inside the round-trip tolerance for
    /// moderate evidence totals.
    pub fn coarse() -> Self {
        Self {
            quadrature_steps: 200,
            max_evidence: 1000.0,
            tolerance: 1.0,
        }
    }

    // ==================== Accessors ====================

    pub fn quadrature_steps(&self) -> usize {
        self.quadrature_steps
    }

    pub fn max_evidence(&self) -> f64 {
        self.max_evidence
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    // ==================== Builder Methods ====================

    pub fn with_quadrature_steps(mut self, steps: usize) -> Self {
        self.quadrature_steps = steps;
        self
    }

    pub fn with_max_evidence(mut self, max: f64) -> Self {
        self.max_evidence = max;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    // ==================== Validation ====================

    /// Validate these params, returning a list of issues.
    ///
    /// Rules:
    /// - `quadrature_steps >= 2`
    /// - `max_evidence > 0`
    /// - `0 < tolerance < max_evidence`
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.quadrature_steps < 2 {
            issues.push("ebt: quadrature_steps must be >= 2".to_string());
        }
        if self.max_evidence <= 0.0 {
            issues.push("ebt: max_evidence must be > 0".to_string());
        }
        if self.tolerance <= 0.0 || self.tolerance >= self.max_evidence {
            issues.push(format!(
                "ebt: tolerance ({}) must be > 0 and < max_evidence ({})",
                self.tolerance, self.max_evidence
            ));
        }
        issues
    }
}

impl Default for EbtParams {
    /// Default: 1000 quadrature intervals, total evidence searched in
    /// `[0, 1000]` to a bracket width of 1.
    fn default() -> Self {
        Self {
            quadrature_steps: 1000,
            max_evidence: 1000.0,
            tolerance: 1.0,
        }
    }
}

/// Confidence of the posterior implied by counts `(r, s)`.
///
/// Returns a value in `[0, 1]`: 0 for the uniform kernel (no evidence),
/// approaching 1 as the counts concentrate the posterior. An everywhere
/// underflowed kernel is treated as maximally concentrated.
pub fn confidence(consenting: f64, dissenting: f64, params: &EbtParams) -> f64 {
    let n = params.quadrature_steps;
    let h = 1.0 / n as f64;

    let kernel: Vec<f64> = (0..=n)
        .map(|i| {
            let x = i as f64 * h;
            x.powf(consenting) * (1.0 - x).powf(dissenting)
        })
        .collect();

    let norm = trapezoid(&kernel, h);
    if norm == 0.0 {
        return 1.0;
    }

    let deviation: Vec<f64> = kernel.iter().map(|f| (f / norm - 1.0).abs()).collect();
    (0.5 * trapezoid(&deviation, h)).clamp(0.0, 1.0)
}

/// Convert pseudo-counts to a bounded trust pair.
///
/// `alpha = r / (r + s)` splits the confidence mass into belief and
/// disbelief. Zero total evidence is complete uncertainty.
pub fn evidence_to_trust(evidence: &Evidence, params: &EbtParams) -> Trust {
    let total = evidence.total();
    if total == 0.0 {
        return Trust::NONE;
    }

    let alpha = evidence.consenting / total;
    let c = confidence(evidence.consenting, evidence.dissenting, params);
    Trust::new(alpha * c, (1.0 - alpha) * c)
}

/// Convert a bounded trust pair back to pseudo-counts.
///
/// Bisects the total count `t` in `[0, max_evidence]` so that the forward
/// confidence of `(alpha*t, t - alpha*t)` matches the trust's committed
/// mass, stopping when the bracket is narrower than the tolerance. A trust
/// with nothing committed maps to no evidence.
pub fn trust_to_evidence(trust: &Trust, params: &EbtParams) -> Evidence {
    let target = trust.confidence();
    if target == 0.0 {
        return Evidence::NONE;
    }

    let alpha = trust.alpha();
    let mut lo = 0.0;
    let mut hi = params.max_evidence;
    while hi - lo > params.tolerance {
        let mid = (lo + hi) / 2.0;
        let c = confidence(alpha * mid, mid - alpha * mid, params);
        if c < target {
            lo = mid;
        } else {
            hi = mid;
        }
    }

    let total = (lo + hi) / 2.0;
    Evidence::new(alpha * total, total - alpha * total)
}

fn trapezoid(samples: &[f64], h: f64) -> f64 {
    if samples.len() < 2 {
        return 0.0;
    }
    let ends = (samples[0] + samples[samples.len() - 1]) / 2.0;
    let interior: f64 = samples[1..samples.len() - 1].iter().sum();
    (ends + interior) * h
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_evidence_is_zero_confidence() {
        let params = EbtParams::default();
        assert_eq!(confidence(0.0, 0.0, &params), 0.0);
        assert_eq!(evidence_to_trust(&Evidence::NONE, &params), Trust::NONE);
    }

    #[test]
    fn test_confidence_monotone_in_total() {
        let params = EbtParams::default();
        let mut prev = 0.0;
        for total in [1.0, 2.0, 5.0, 10.0, 50.0, 200.0] {
            let c = confidence(0.7 * total, 0.3 * total, &params);
            assert!(
                c > prev,
                "confidence not monotone: c({total}) = {c} <= {prev}"
            );
            prev = c;
        }
        assert!(prev < 1.0);
    }

    #[test]
    fn test_confidence_boundary_counts() {
        let params = EbtParams::default();
        // One-sided evidence still concentrates the posterior.
        let only_consent = confidence(10.0, 0.0, &params);
        let only_dissent = confidence(0.0, 10.0, &params);
        assert!(only_consent > 0.5);
        // The kernel is symmetric under r <-> s.
        assert!((only_consent - only_dissent).abs() < 1e-6);
    }

    #[test]
    fn test_underflowed_kernel_is_full_confidence() {
        let params = EbtParams::default();
        // x^4000 * (1-x)^4000 underflows to zero at every grid point.
        assert_eq!(confidence(4000.0, 4000.0, &params), 1.0);
    }

    #[test]
    fn test_evidence_to_trust_splits_by_alpha() {
        let params = EbtParams::default();
        let trust = evidence_to_trust(&Evidence::new(8.0, 2.0), &params);
        assert!(trust.belief > trust.disbelief);
        assert!((trust.alpha() - 0.8).abs() < 1e-9);
        assert!(trust.confidence() > 0.0 && trust.confidence() < 1.0);
    }

    #[test]
    fn test_no_commitment_maps_to_no_evidence() {
        let params = EbtParams::default();
        assert_eq!(trust_to_evidence(&Trust::NONE, &params), Evidence::NONE);
    }

    #[test]
    fn test_round_trip_trust() {
        let params = EbtParams::default();
        for trust in [
            Trust::new(0.6, 0.2),
            Trust::new(0.3, 0.3),
            Trust::new(0.05, 0.45),
            Trust::new(0.9, 0.0),
        ] {
            let evidence = trust_to_evidence(&trust, &params);
            let back = evidence_to_trust(&evidence, &params);
            assert!(
                (back.belief - trust.belief).abs() < 0.02
                    && (back.disbelief - trust.disbelief).abs() < 0.02,
                "round trip drifted: {trust:?} -> {evidence:?} -> {back:?}"
            );
        }
    }

    #[test]
    fn test_round_trip_evidence_total() {
        let params = EbtParams::default();
        let evidence = Evidence::new(12.0, 4.0);
        let trust = evidence_to_trust(&evidence, &params);
        let back = trust_to_evidence(&trust, &params);
        assert!(
            (back.total() - evidence.total()).abs() <= params.tolerance(),
            "total drifted: {} -> {}",
            evidence.total(),
            back.total()
        );
        assert!((back.consenting / back.total() - 0.75).abs() < 0.01);
    }

    #[test]
    fn test_saturated_trust_hits_search_ceiling() {
        let params = EbtParams::default();
        let evidence = trust_to_evidence(&Trust::new(1.0, 0.0), &params);
        assert!(evidence.total() > params.max_evidence() - params.tolerance() * 2.0);
    }

    #[test]
    fn test_params_validate() {
        assert!(EbtParams::default().validate().is_empty());
        assert!(EbtParams::coarse().validate().is_empty());

        let bad = EbtParams::new(1, 0.0, 5.0);
        let issues = bad.validate();
        assert_eq!(issues.len(), 3);
    }

    #[test]
    fn test_params_builder() {
        let params = EbtParams::default()
            .with_quadrature_steps(500)
            .with_max_evidence(200.0)
            .with_tolerance(0.5);
        assert_eq!(params.quadrature_steps(), 500);
        assert_eq!(params.max_evidence(), 200.0);
        assert_eq!(params.tolerance(), 0.5);
    }

    #[test]
    fn test_params_serde_roundtrip() {
        let params = EbtParams::new(300, 500.0, 0.25);
        let json = serde_json::to_string(&params).unwrap();
        let back: EbtParams = serde_json::from_str(&json).unwrap();
        assert_eq!(params, back);
    }
}
