//! Rental-contracting error model.

use thiserror::Error;

use fleetrent_core::DomainError;

use crate::entities::SelectedAddonId;

/// Failures raised by the rental-contracting context.
///
/// Every variant is a deterministic business rejection: the operation fails
/// before any mutation, and the aggregate is left unchanged.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RentalError {
    /// Operation attempted from a status that forbids it.
    #[error("invalid rental state: {0}")]
    InvalidState(String),

    /// An addon with the same id is already selected.
    #[error("addon {0} is already selected")]
    DuplicateAddon(SelectedAddonId),

    /// The operation requires an addon that has not been selected.
    #[error("missing required addon: {0}")]
    MissingAddon(String),

    /// The driver is younger than the minimum rental age.
    #[error("driver is {age}, younger than the minimum rental age")]
    DriverUnderage { age: i32 },

    /// The driver's license is missing, expired, or otherwise unusable.
    #[error("driver document invalid: {0}")]
    DriverDocumentInvalid(String),

    /// The rental still carries a balance that has not been cleared.
    #[error("cannot close a rental that has outstanding balance")]
    OutstandingBalance,

    /// A period change was rejected.
    #[error("invalid rental period: {0}")]
    InvalidPeriod(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
