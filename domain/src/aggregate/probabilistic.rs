//! Evidence-based probabilistic aggregation.

use super::Aggregator;
use crate::opinion::{Opinion, Verdict};
use crate::trust::{EbtParams, Evidence, Trust, evidence_to_trust, trust_to_evidence};

/// Probabilistic aggregation over Evidence-Based Trust.
///
/// Each opinion's trust is converted to pseudo-count evidence and folded
/// into a per-candidate accumulator: the full evidence consents to the
/// opinion's own value, and its consenting count dissents against every
/// other value tracked at that point. When the total number of possible
/// answers is known ([`with_option_count`](Self::with_option_count)) the
/// dissent is split across the alternatives; otherwise each alternative
/// receives it at full strength.
///
/// After folding, every candidate's accumulated evidence is converted back
/// to a trust pair; the candidate with the greatest belief wins (first-seen
/// on ties) and that belief is the quality.
#[derive(Debug, Clone, Default)]
pub struct Probabilistic {
    params: EbtParams,
    option_count: Option<usize>,
}

impl Probabilistic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use non-default conversion numerics.
    pub fn with_params(mut self, params: EbtParams) -> Self {
        self.params = params;
        self
    }

    /// Declare how many distinct answers the query admits, so dissent can
    /// be split across the alternatives instead of counted in full against
    /// each.
    pub fn with_option_count(mut self, count: usize) -> Self {
        self.option_count = Some(count);
        self
    }

    fn dissent_share(&self, consenting: f64) -> f64 {
        match self.option_count {
            Some(n) if n > 1 => consenting / (n - 1) as f64,
            _ => consenting,
        }
    }
}

impl<V, T> Aggregator<V, T> for Probabilistic
where
    V: Clone + PartialEq + Send + Sync,
    T: Clone + Into<Trust> + Send + Sync,
{
    type Quality = f64;

    fn aggregate(&self, opinions: &[Opinion<V, T>]) -> Option<Verdict<V, f64>> {
        let mut candidates: Vec<(&V, Evidence)> = Vec::new();

        for opinion in opinions {
            let trust: Trust = opinion.trust.clone().into();
            let evidence = trust_to_evidence(&trust, &self.params);
            let dissent = Evidence::dissenting(self.dissent_share(evidence.consenting));

            if !candidates.iter().any(|(v, _)| *v == &opinion.value) {
                candidates.push((&opinion.value, Evidence::NONE));
            }
            for (value, accumulated) in candidates.iter_mut() {
                if *value == &opinion.value {
                    *accumulated += evidence;
                } else {
                    *accumulated += dissent;
                }
            }
        }

        let mut winner: Option<(&V, Trust)> = None;
        for (value, evidence) in &candidates {
            let trust = evidence_to_trust(evidence, &self.params);
            match &winner {
                Some((_, best)) if trust.belief <= best.belief => {}
                _ => winner = Some((*value, trust)),
            }
        }

        winner.map(|(value, trust)| Verdict::new(value.clone(), trust.belief))
    }
}
