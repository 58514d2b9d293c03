//! Fleet-management domain module.
//!
//! This crate contains the business rules for the physical fleet, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage). Two
//! aggregates share the context: [`Car`] owns a vehicle's physical state and
//! operational lifecycle, [`Registration`] owns its regulatory authorization
//! to be on the road.

pub mod car;
pub mod error;
pub mod registration;
pub mod value_objects;

pub use car::{
    Car, CarEvent, CarId, CarInsured, CarOdometerUpdated, CarRegistered, CarServiceCompleted,
    CarStatus, CarStatusChanged,
};
pub use error::FleetError;
pub use registration::{
    Registration, RegistrationEvent, RegistrationExpired, RegistrationId, RegistrationReinstated,
    RegistrationStatus, RegistrationSuspended, RegistrationTransferred,
};
pub use value_objects::{
    CarModel, CarPlates, CarType, Damage, DamageSeverity, FuelTank, FuelType, InsuranceCompliance,
    OdometerReading, OdometerUnit, ServiceLog, ServiceLogId, ServiceType, Vin,
};
