//! Ports - interfaces the engine consumes.
//!
//! Implementations live in the embedding application; the engine only ever
//! sees these traits.

pub mod selector;
pub mod source;

pub use selector::{SelectionContext, Selector};
pub use source::{Source, SourceError};
