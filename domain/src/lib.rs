//! Domain layer for consilium
//!
//! This crate contains the pure core of the consensus engine: no runtime,
//! no I/O, no locking.
//!
//! # Core Concepts
//!
//! ## Opinions and Verdicts
//!
//! Independent, unreliable sources each report an [`Opinion`] - a value plus
//! a trust score. An [`Aggregator`] strategy reduces the opinions gathered
//! so far into a [`Verdict`] - the consensus value with a quality score.
//!
//! ## Budget and Cost
//!
//! Every query has a declared [`Cost`] (time, depletable units, flag
//! requirements) that is checked and spent against an immutable [`Budget`]
//! snapshot. Spending yields a new snapshot; old values never change.
//!
//! ## Evidence-Based Trust
//!
//! The probabilistic aggregator works in pseudo-count [`Evidence`] space and
//! converts to and from the bounded [`Trust`] pair via numerical quadrature
//! ([`trust`] module).

pub mod acceptor;
pub mod aggregate;
pub mod budget;
pub mod error;
pub mod opinion;
pub mod trust;

// Re-export commonly used types
pub use acceptor::{Acceptance, Acceptor, QualityThreshold};
pub use aggregate::{
    Aggregator, Probabilistic, Rank, SetIntersection, SetUnion, SetVoting, Vote, WeightedMean,
};
pub use budget::{Budget, Cost, FlagRequirement};
pub use error::ConsensusError;
pub use opinion::{Opinion, Verdict};
pub use trust::{EbtParams, Evidence, Trust, Weight, evidence_to_trust, trust_to_evidence};
