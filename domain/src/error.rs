//! Domain error types

use thiserror::Error;

/// Ways a consensus can fail to produce a usable verdict.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsensusError {
    #[error("No source produced a usable opinion")]
    NoUsableResult,

    #[error("Final verdict was classified as unacceptable")]
    Unacceptable,

    #[error("Invocation cancelled before any opinion arrived")]
    Cancelled,
}

impl ConsensusError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ConsensusError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            ConsensusError::NoUsableResult.to_string(),
            "No source produced a usable opinion"
        );
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(ConsensusError::Cancelled.is_cancelled());
        assert!(!ConsensusError::NoUsableResult.is_cancelled());
        assert!(!ConsensusError::Unacceptable.is_cancelled());
    }
}
