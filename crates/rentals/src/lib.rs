//! Rental-contracting domain module.
//!
//! This crate contains the business rules for rental contracts, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage). The
//! [`Rental`] aggregate guards the contract lifecycle; drivers, the rented
//! car snapshot, and selected addons live inside its consistency boundary.

pub mod entities;
pub mod error;
pub mod rental;
pub mod value_objects;

pub use entities::{Driver, DriverId, RentalCar, RentalCarId, SelectedAddon, SelectedAddonId};
pub use error::RentalError;
pub use rental::{
    AddonSelected, Cancelled, CheckedIn, CheckedOut, Closed, Extended, Rental, RentalEvent,
    RentalId, RentalStatus,
};
pub use value_objects::{
    BalanceClearance, DriverLicense, FuelLevel, MileagePolicy, OdometerReading, OdometerUnit,
    RentalPeriod, RentalRate,
};
