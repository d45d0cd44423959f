//! Error types for the TSP engine.
//!
//! Two families of failure exist: the city table handed to the engine is
//! malformed (validation), or the run parameters name something the engine
//! does not know (configuration). Both are fatal to a run; the engine never
//! retries or suppresses them.

use thiserror::Error;

/// Result type alias for engine operations.
pub type TspResult<T> = Result<T, TspError>;

/// Unified error type for all engine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TspError {
    // ===== Validation Errors =====
    /// The city table contains no cities.
    #[error("city table is empty")]
    EmptyCityTable,

    /// Two or more cities share the same ID.
    #[error("city IDs are not unique: {id} appears more than once")]
    DuplicateCityId {
        /// The repeated ID.
        id: usize,
    },

    /// A city ID falls outside `[0, n)`.
    #[error("city ID {id} is out of the valid range [0, {count})")]
    CityIdOutOfRange {
        /// The offending ID.
        id: usize,
        /// Number of cities in the table.
        count: usize,
    },

    /// A sequence of city indices does not form a closed tour.
    #[error("invalid tour: {message}")]
    InvalidTour {
        /// What is wrong with the tour.
        message: String,
    },

    // ===== Configuration Errors =====
    /// Unrecognized crossover variant name.
    #[error("unknown crossover type '{0}' (expected one of: ox, pmx, cx, pbx)")]
    UnknownCrossover(String),

    /// Unrecognized mutation variant name.
    #[error(
        "unknown mutation type '{0}' (expected one of: swap, inversion, scramble, insert, displacement, two_opt)"
    )]
    UnknownMutation(String),

    /// Unrecognized initial population mode.
    #[error("unknown initial population mode '{0}' (expected one of: nn, random)")]
    UnknownInitialPopulation(String),

    /// A numeric parameter is out of its allowed range.
    #[error("invalid parameters: {message}")]
    InvalidParams {
        /// Description of the violated constraint.
        message: String,
    },
}

impl TspError {
    /// Create an invalid-parameters error.
    pub fn params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Create an invalid-tour error.
    pub fn tour(message: impl Into<String>) -> Self {
        Self::InvalidTour {
            message: message.into(),
        }
    }

    /// Returns `true` if the error comes from a malformed city table or tour.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyCityTable
                | Self::DuplicateCityId { .. }
                | Self::CityIdOutOfRange { .. }
                | Self::InvalidTour { .. }
        )
    }

    /// Returns `true` if the error comes from the run parameters.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        !self.is_validation()
    }
}
