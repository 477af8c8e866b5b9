//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`DealflowError`] via `#[from]`. Adapters wrap their infrastructure
//! errors (sqlx, LLM transport) in the boxed `Storage`/`Generation`
//! variants so the domain never depends on IO crates.

/// Top-level error for dealflow operations.
#[derive(Debug, thiserror::Error)]
pub enum DealflowError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A referenced record does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),

    /// The persistence layer failed.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The rule-generation collaborator failed.
    #[error("generation error")]
    Generation(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A contact must carry a non-empty name.
    #[error("name must not be empty")]
    EmptyName,

    /// An identifier in a request could not be parsed.
    #[error("invalid identifier: {given}")]
    InvalidId {
        /// The raw string that failed to parse.
        given: String,
    },
}

/// A lookup by id found nothing.
#[derive(Debug, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    /// The kind of record that was looked up.
    pub entity: &'static str,
    /// The identifier that missed.
    pub id: String,
}
