//! Error taxonomy for grid operations.

use thiserror::Error;

/// Failure classes reported by a [`GridProvider`](crate::provider::GridProvider).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Size or memory condition (output would not fit, overflow).
    #[error("size error: {0}")]
    Size(String),

    /// Pentagon distortion met by an algorithm that cannot handle it.
    #[error("pentagon encountered: {0}")]
    Pentagon(String),

    #[error("provider failure: {0}")]
    Failed(String),
}

/// Errors surfaced by [`Grid`](crate::Grid) operations.
///
/// Every error aborts the operation; no partial result is ever returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Invalid resolution: {0}")]
    InvalidResolution(String),

    #[error("Invalid index: {0}")]
    InvalidIndex(String),

    #[error("Unsupported unit: {0}")]
    UnsupportedUnit(String),

    #[error("Compact error: {0}")]
    Compact(String),

    #[error("Uncompact error: {0}")]
    Uncompact(String),

    #[error("Line size error: {0}")]
    LineSize(String),

    #[error("Pentagon encountered: {0}")]
    PentagonEncountered(String),

    /// Malformed input shape (wrong element kinds, non-finite coordinates).
    #[error("Argument error: {0}")]
    Argument(String),

    /// Provider failure or violated internal invariant.
    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

impl GridError {
    /// Numeric code shared with the host-facing error table.
    pub fn code(&self) -> u32 {
        match self {
            GridError::InvalidResolution(_) => 1,
            GridError::InvalidIndex(_) => 2,
            GridError::UnsupportedUnit(_) => 3,
            GridError::Compact(_) => 4,
            GridError::Uncompact(_) => 5,
            GridError::LineSize(_) => 6,
            GridError::PentagonEncountered(_) => 7,
            GridError::Argument(_) | GridError::OperationFailed(_) => 0,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GridError::InvalidResolution(_) => "invalid_resolution",
            GridError::InvalidIndex(_) => "invalid_index",
            GridError::UnsupportedUnit(_) => "unsupported_unit",
            GridError::Compact(_) => "compact",
            GridError::Uncompact(_) => "uncompact",
            GridError::LineSize(_) => "line_size",
            GridError::PentagonEncountered(_) => "pentagon_encountered",
            GridError::Argument(_) => "argument",
            GridError::OperationFailed(_) => "operation_failed",
        }
    }

    /// Argument-class errors: the caller can fix the input and retry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GridError::InvalidResolution(_)
                | GridError::InvalidIndex(_)
                | GridError::UnsupportedUnit(_)
                | GridError::Argument(_)
        )
    }

    pub fn message(&self) -> &str {
        match self {
            GridError::InvalidResolution(m)
            | GridError::InvalidIndex(m)
            | GridError::UnsupportedUnit(m)
            | GridError::Compact(m)
            | GridError::Uncompact(m)
            | GridError::LineSize(m)
            | GridError::PentagonEncountered(m)
            | GridError::Argument(m)
            | GridError::OperationFailed(m) => m,
        }
    }
}

/// Default mapping for provider failures with no operation-specific class.
impl From<ProviderError> for GridError {
    fn from(e: ProviderError) -> Self {
        match e {
            ProviderError::InvalidResolution(m) => GridError::InvalidResolution(m),
            ProviderError::Pentagon(m) => GridError::PentagonEncountered(m),
            other => GridError::OperationFailed(other.to_string()),
        }
    }
}

/// Result type for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
