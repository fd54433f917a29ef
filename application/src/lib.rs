//! Application layer for consilium
//!
//! Binds the pure domain core to a tokio runtime: the [`Source`] and
//! [`Selector`] ports the engine consumes, the [`Estimate`] accumulator
//! that worker tasks feed, and the [`Invocation`] use case whose single
//! control task serializes budget accounting while source queries run
//! concurrently.
//!
//! Concrete sources and the wiring that registers them live in the
//! embedding application; see [`registry::SourceRegistry`].
//!
//! [`Source`]: ports::Source
//! [`Selector`]: ports::Selector
//! [`Estimate`]: estimate::Estimate
//! [`Invocation`]: use_cases::Invocation

pub mod adapt;
pub mod estimate;
pub mod ports;
pub mod registry;
pub mod select;
pub mod use_cases;

// Re-export commonly used types
pub use adapt::Adapted;
pub use estimate::Estimate;
pub use ports::{SelectionContext, Selector, Source, SourceError};
pub use registry::SourceRegistry;
pub use select::{ConsultAll, TrustOrdered};
pub use use_cases::{Invocation, InvokeError};
