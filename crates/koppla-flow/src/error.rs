//! Document model error types.

use thiserror::Error;

/// Result type for document model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised on caller-contract violations.
///
/// Incomplete documents never produce these. Navigation and editing
/// tolerate missing flows, absent step lists, and out-of-range
/// positions by returning empty results or the document unchanged;
/// advisory data problems are reported through
/// [`FlowError`](crate::validate::FlowError) instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A flow ID was required but empty.
    #[error("empty flow id")]
    EmptyFlowId,
}
