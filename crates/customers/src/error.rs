//! Customer-relations error model.

use thiserror::Error;

use fleetrent_core::DomainError;

/// Failures raised by the customer-relations context.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CustomerError {
    /// A verification attempt on a customer who is already verified.
    #[error("customer is already verified")]
    AlreadyVerified,

    /// A document with the same number is already on file.
    #[error("duplicate identity document: {0}")]
    DuplicateDocument(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
