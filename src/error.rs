use thiserror::Error;

use crate::point::Point;

/// Errors returned by the merge engine and its collaborators.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// `make_set` was called for a point that is already registered.
    ///
    /// The existing registration is left untouched.
    #[error("point {point} is already registered")]
    DuplicateRegistration {
        /// The rejected point.
        point: Point,
    },

    /// A point was looked up that was never registered with `make_set`.
    #[error("point {point} is not registered")]
    NotFound {
        /// The missing point.
        point: Point,
    },

    /// Nearest-neighbor query against an index holding no points.
    #[error("nearest-neighbor query on an empty index")]
    EmptyIndexQuery,

    /// A coordinate is NaN or infinite.
    #[error("point {point} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// The rejected point.
        point: Point,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Malformed edge-list input.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
