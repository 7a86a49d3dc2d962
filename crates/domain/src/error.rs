//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`HomesimError`] via `#[from]`. No `String`-typed variants: callers can
//! always match on the concrete failure.

/// Top-level error for all homesim operations.
#[derive(Debug, thiserror::Error)]
pub enum HomesimError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced entity does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The persistence collaborator failed.
    #[error("storage error")]
    Storage(#[from] StorageError),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A name field was empty.
    #[error("name must not be empty")]
    EmptyName,

    /// An event was defined without any actions.
    #[error("event must have at least one action")]
    NoActions,

    /// A sensor's variation range was negative.
    #[error("variation range must not be negative")]
    NegativeVariation,
}

/// A lookup failed to find its target.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {id}")]
pub struct NotFoundError {
    /// Entity kind, e.g. `"Container"` or `"Scenario"`.
    pub entity: &'static str,
    /// Identifier or name that was looked up.
    pub id: String,
}

/// Failure reported by a storage adapter.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backing store rejected or lost the operation.
    #[error("storage backend failure: {0}")]
    Backend(String),
}
