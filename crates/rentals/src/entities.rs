//! Entities inside the rental aggregate boundary.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use fleetrent_core::{Entity, define_id};

use crate::error::RentalError;
use crate::value_objects::{DriverLicense, FuelLevel, MileagePolicy, OdometerReading, RentalRate};

define_id!(
    /// Identifier of a [`Driver`] in the rental-contracting context.
    DriverId
);
define_id!(
    /// Identifier of a [`RentalCar`] in the rental-contracting context.
    RentalCarId
);
define_id!(
    /// Identifier of a [`SelectedAddon`].
    SelectedAddonId
);

/// A driver named on the rental contract.
///
/// Compared by identity, like every entity: two instances with the same id
/// describe the same driver regardless of attribute drift.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    id: DriverId,
    name: String,
    date_of_birth: NaiveDate,
    license: DriverLicense,
}

impl Driver {
    /// Minimum age at which the business rents out a car.
    pub const MINIMUM_AGE: i32 = 21;

    pub fn new(
        id: DriverId,
        name: impl Into<String>,
        date_of_birth: NaiveDate,
        license: DriverLicense,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            date_of_birth,
            license,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn license(&self) -> &DriverLicense {
        &self.license
    }

    /// Age in whole years as of `today`.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.date_of_birth.year();
        if (today.month(), today.day()) < (self.date_of_birth.month(), self.date_of_birth.day()) {
            age -= 1;
        }
        age
    }

    /// Checks the driver against the contract requirements: minimum age and a
    /// license that is still valid as of `today`.
    pub fn ensure_eligible(&self, today: NaiveDate) -> Result<(), RentalError> {
        let age = self.age_on(today);
        if age < Self::MINIMUM_AGE {
            return Err(RentalError::DriverUnderage { age });
        }

        if self.license.is_expired_as_of(today) {
            return Err(RentalError::DriverDocumentInvalid(format!(
                "license {} expired on {}",
                self.license.number(),
                self.license.expiry()
            )));
        }

        Ok(())
    }
}

impl Entity for Driver {
    type Id = DriverId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl PartialEq for Driver {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for Driver {}

/// Snapshot of the fleet car on the contract, guarded by the rental.
///
/// Carries the car's default policy and rates (the rental copies them at
/// opening) and captures the final readings at return.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalCar {
    id: RentalCarId,
    default_mileage_policy: MileagePolicy,
    default_rates: RentalRate,
    initial_odometer: OdometerReading,
    initial_fuel: FuelLevel,
    final_odometer: Option<OdometerReading>,
    final_fuel: Option<FuelLevel>,
}

impl RentalCar {
    pub fn new(
        id: RentalCarId,
        default_mileage_policy: MileagePolicy,
        default_rates: RentalRate,
        initial_odometer: OdometerReading,
        initial_fuel: FuelLevel,
    ) -> Self {
        Self {
            id,
            default_mileage_policy,
            default_rates,
            initial_odometer,
            initial_fuel,
            final_odometer: None,
            final_fuel: None,
        }
    }

    pub fn default_mileage_policy(&self) -> MileagePolicy {
        self.default_mileage_policy
    }

    pub fn default_rates(&self) -> RentalRate {
        self.default_rates
    }

    pub fn initial_odometer(&self) -> OdometerReading {
        self.initial_odometer
    }

    pub fn initial_fuel(&self) -> FuelLevel {
        self.initial_fuel
    }

    pub fn final_odometer(&self) -> Option<OdometerReading> {
        self.final_odometer
    }

    pub fn final_fuel(&self) -> Option<FuelLevel> {
        self.final_fuel
    }

    /// Capture the readings taken when the car comes back.
    pub(crate) fn record_return(&mut self, final_odometer: OdometerReading, final_fuel: FuelLevel) {
        self.final_odometer = Some(final_odometer);
        self.final_fuel = Some(final_fuel);
    }
}

impl Entity for RentalCar {
    type Id = RentalCarId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl PartialEq for RentalCar {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for RentalCar {}

/// An addon chosen for this rental, snapshotted from the addon catalogue onto
/// the physical contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedAddon {
    id: SelectedAddonId,
    quantity: u32,
    /// Whether this addon permits naming a second driver on the contract.
    /// Only a couple of catalogue addons do (additional-driver itself, and the
    /// baby seat, which assumes two parents).
    enables_additional_driver: bool,
}

impl SelectedAddon {
    pub fn new(id: SelectedAddonId, quantity: u32, enables_additional_driver: bool) -> Self {
        Self {
            id,
            quantity,
            enables_additional_driver,
        }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn enables_additional_driver(&self) -> bool {
        self.enables_additional_driver
    }
}

impl Entity for SelectedAddon {
    type Id = SelectedAddonId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl PartialEq for SelectedAddon {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for SelectedAddon {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn license(expiry: NaiveDate) -> DriverLicense {
        DriverLicense::new("DL-12345", expiry).unwrap()
    }

    #[test]
    fn age_accounts_for_birthday_not_yet_reached() {
        let driver = Driver::new(
            DriverId::new(),
            "Sara",
            date(2000, 6, 15),
            license(date(2030, 1, 1)),
        );

        assert_eq!(driver.age_on(date(2025, 6, 14)), 24);
        assert_eq!(driver.age_on(date(2025, 6, 15)), 25);
    }

    #[test]
    fn underage_driver_is_ineligible() {
        let driver = Driver::new(
            DriverId::new(),
            "Omar",
            date(2010, 1, 1),
            license(date(2030, 1, 1)),
        );

        let err = driver.ensure_eligible(date(2025, 1, 1)).unwrap_err();
        match err {
            RentalError::DriverUnderage { age } => assert_eq!(age, 15),
            _ => panic!("Expected DriverUnderage"),
        }
    }

    #[test]
    fn expired_license_is_ineligible() {
        let driver = Driver::new(
            DriverId::new(),
            "Omar",
            date(1990, 1, 1),
            license(date(2024, 12, 31)),
        );

        let err = driver.ensure_eligible(date(2025, 1, 1)).unwrap_err();
        match err {
            RentalError::DriverDocumentInvalid(_) => {}
            _ => panic!("Expected DriverDocumentInvalid"),
        }
    }

    #[test]
    fn entities_compare_by_identity() {
        let id = SelectedAddonId::new();
        let a = SelectedAddon::new(id, 1, false);
        let b = SelectedAddon::new(id, 2, true);
        let c = SelectedAddon::new(SelectedAddonId::new(), 1, false);

        // Same id, different attributes: still the same entity.
        assert_eq!(a, b);
        assert!(a.same_identity(&b));

        // Same attributes, different id: different entities.
        assert_ne!(a, c);
        assert!(!a.same_identity(&c));
    }
}
