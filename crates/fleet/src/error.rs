//! Fleet-management error model.

use thiserror::Error;

use fleetrent_core::DomainError;

/// Failures raised by the fleet-management context.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FleetError {
    /// A VIN failed validation.
    #[error("invalid VIN: {0}")]
    InvalidVin(String),

    /// Operation attempted on a car whose state forbids it.
    #[error("invalid car operation: {0}")]
    InvalidOperation(String),

    /// Operation attempted from a registration status that forbids it.
    #[error("invalid registration state: {0}")]
    InvalidRegistrationState(String),

    /// A registration cannot expire before its grace period has run out.
    #[error("premature expiration: {0}")]
    PrematureExpiration(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
