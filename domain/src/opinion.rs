//! Opinion and verdict value objects.
//!
//! An [`Opinion`] is one source's reported value with its trust; a
//! [`Verdict`] is the terminal aggregate an invocation settles on.

use serde::{Deserialize, Serialize};

/// One source's answer to one query.
///
/// The trust type is parametric: a plain scalar, a
/// [`Trust`](crate::trust::Trust) pair, or `()` for aggregators that ignore
/// trust entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opinion<V, T> {
    /// The reported value.
    pub value: V,
    /// How much the source's word is worth here.
    pub trust: T,
    /// Name of the reporting source.
    pub source: String,
}

impl<V, T> Opinion<V, T> {
    pub fn new(value: V, trust: T, source: impl Into<String>) -> Self {
        Self {
            value,
            trust,
            source: source.into(),
        }
    }
}

/// The consensus an invocation settles on: a value and a quality score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict<V, Q> {
    /// The agreed value.
    pub value: V,
    /// Aggregator-specific quality of the agreement.
    pub quality: Q,
}

impl<V, Q> Verdict<V, Q> {
    pub fn new(value: V, quality: Q) -> Self {
        Self { value, quality }
    }
}
