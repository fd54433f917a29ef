//! Use cases - the orchestration entry points.

pub mod invoke;

pub use invoke::{Invocation, InvokeError};
