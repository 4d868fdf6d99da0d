//! Error types returned by network construction, propagation and learning.

use thiserror::Error;

/// Result type alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the direct caller. None of them are retried internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A vector's length does not match the number of nodes it feeds.
    #[error("shape mismatch: expected {expected} values, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A synapse cannot be registered in this network.
    #[error("invalid synapse: {0}")]
    InvalidEdge(String),

    /// The layers handed to the network are not ordered input, inner...,
    /// output.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// Output was requested before the network was propagated.
    #[error("network output requested before propagation")]
    NotPropagated,

    /// Learning was aborted through its cancellation token.
    #[error("learning cancelled")]
    Cancelled,
}

impl Error {
    pub(crate) fn check_shape(expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Error::ShapeMismatch { expected, actual })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_shape() {
        assert_eq!(Error::check_shape(3, 3), Ok(()));
    }

    #[test]
    fn mismatched_shape() {
        assert_eq!(Error::check_shape(2, 3),
                   Err(Error::ShapeMismatch { expected: 2, actual: 3 }));
    }

    #[test]
    fn display() {
        let err = Error::ShapeMismatch { expected: 2, actual: 1 };
        assert_eq!(err.to_string(), "shape mismatch: expected 2 values, got 1");
    }
}
