//! Value objects of the fleet-management context.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use fleetrent_core::{Entity, Money, ValueObject, define_id};

use crate::error::FleetError;

define_id!(
    /// Identifier of a [`ServiceLog`] entry.
    ServiceLogId
);

/// A vehicle identification number.
///
/// A good example of why primitive obsession hurts: the 17-character string
/// has sections that mean different things, and a universal forbidden
/// character set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Vin(String);

impl ValueObject for Vin {}

impl Vin {
    /// Characters universally not allowed in VINs (too easily confused with
    /// digits).
    pub const FORBIDDEN_CHARACTERS: [char; 3] = ['I', 'O', 'Q'];

    /// VINs are universally 17 characters long.
    pub const LENGTH: usize = 17;

    pub fn new(number: impl Into<String>) -> Result<Self, FleetError> {
        let number = number.into().to_ascii_uppercase();

        if number.len() != Self::LENGTH {
            return Err(FleetError::InvalidVin(format!(
                "expected {} characters, got {}",
                Self::LENGTH,
                number.len()
            )));
        }

        if number
            .chars()
            .any(|c| !c.is_ascii_alphanumeric() || Self::FORBIDDEN_CHARACTERS.contains(&c))
        {
            return Err(FleetError::InvalidVin(format!(
                "invalid characters detected: {number}"
            )));
        }

        Ok(Self(number))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// World Manufacturer Identifier: the first three characters.
    pub fn wmi(&self) -> &str {
        &self.0[..3]
    }

    /// Vehicle Descriptor Section: characters four through nine.
    pub fn vds(&self) -> &str {
        &self.0[3..9]
    }

    /// Vehicle Identifier Section: the last eight characters.
    pub fn vis(&self) -> &str {
        &self.0[self.0.len() - 8..]
    }
}

impl core::fmt::Display for Vin {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body style of a car.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarType {
    Sedan,
    Suv,
    Hatchback,
    Pickup,
    Van,
}

/// Make, model and year of a car.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarModel {
    brand: String,
    make: String,
    year: i32,
    car_type: CarType,
}

impl ValueObject for CarModel {}

impl CarModel {
    pub fn new(brand: impl Into<String>, make: impl Into<String>, year: i32, car_type: CarType) -> Self {
        Self {
            brand: brand.into(),
            make: make.into(),
            year,
            car_type,
        }
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn make(&self) -> &str {
        &self.make
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn car_type(&self) -> CarType {
        self.car_type
    }
}

/// Unit an odometer counts in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OdometerUnit {
    Kilometers,
    Miles,
}

/// The odometer of a fleet car, including the mileage at which the car is
/// next due for servicing.
///
/// Readings arrive either from manual employee logging or from telemetry.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdometerReading {
    units: OdometerUnit,
    value: f32,
    next_service_threshold: f32,
}

impl ValueObject for OdometerReading {}

impl OdometerReading {
    pub fn new(units: OdometerUnit, value: f32, next_service_threshold: f32) -> Self {
        Self {
            units,
            value,
            next_service_threshold,
        }
    }

    pub fn units(&self) -> OdometerUnit {
        self.units
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn next_service_threshold(&self) -> f32 {
        self.next_service_threshold
    }

    /// Copy of this reading with a new value.
    pub fn with_value(&self, value: f32) -> Self {
        Self { value, ..*self }
    }

    /// Copy of this reading with a new service threshold.
    pub fn with_next_service_threshold(&self, next_service_threshold: f32) -> Self {
        Self {
            next_service_threshold,
            ..*self
        }
    }

    pub fn due_for_service(&self) -> bool {
        self.value >= self.next_service_threshold
    }
}

/// What a car burns.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    Electric,
}

/// The fuel tank of a car: type, size, and current level.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelTank {
    fuel_type: FuelType,
    capacity: f32,
    level: f32,
}

impl ValueObject for FuelTank {}

impl FuelTank {
    /// Below this many liters a car is not sent out on a trip.
    pub const MINIMUM_TRIP_FUEL: f32 = 20.0;

    pub fn new(fuel_type: FuelType, capacity: f32, level: f32) -> Self {
        Self {
            fuel_type,
            capacity,
            level,
        }
    }

    pub fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    pub fn capacity(&self) -> f32 {
        self.capacity
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn is_trip_sufficient(&self) -> bool {
        self.level > Self::MINIMUM_TRIP_FUEL
    }
}

/// Proof that a car carries valid insurance.
///
/// Contextually maps to an insurance-management subdomain; the fleet only
/// keeps the compliance facts it needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InsuranceCompliance {
    policy_id: Uuid,
    policy_number: String,
    expiration: NaiveDate,
}

impl ValueObject for InsuranceCompliance {}

impl InsuranceCompliance {
    pub fn new(policy_id: Uuid, policy_number: impl Into<String>, expiration: NaiveDate) -> Self {
        Self {
            policy_id,
            policy_number: policy_number.into(),
            expiration,
        }
    }

    pub fn policy_id(&self) -> Uuid {
        self.policy_id
    }

    pub fn policy_number(&self) -> &str {
        &self.policy_number
    }

    pub fn expiration(&self) -> NaiveDate {
        self.expiration
    }
}

/// How bad a reported damage is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageSeverity {
    Minor,
    Moderate,
    Severe,
}

/// Damage reported on a car.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Damage {
    severity: DamageSeverity,
    description: String,
    cost_of_repair: Option<Money>,
    insured: bool,
}

impl ValueObject for Damage {}

impl Damage {
    pub fn new(
        severity: DamageSeverity,
        description: impl Into<String>,
        cost_of_repair: Option<Money>,
        insured: bool,
    ) -> Self {
        Self {
            severity,
            description: description.into(),
            cost_of_repair,
            insured,
        }
    }

    pub fn severity(&self) -> DamageSeverity {
        self.severity
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cost_of_repair(&self) -> Option<Money> {
        self.cost_of_repair
    }

    pub fn insured(&self) -> bool {
        self.insured
    }
}

/// License plates. Plates are stuck on a car, but legally they belong to its
/// registration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CarPlates {
    number: String,
    code: char,
    city: String,
}

impl ValueObject for CarPlates {}

impl CarPlates {
    pub fn new(number: impl Into<String>, code: char, city: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            code,
            city: city.into(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn code(&self) -> char {
        self.code
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Kind of work done during a service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Routine,
    OilChange,
    Tires,
    Brakes,
    MajorRepair,
}

/// One entry in a car's service history. An entity: compared by identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceLog {
    id: ServiceLogId,
    service_type: ServiceType,
    serviced_at_mileage: f32,
    next_service_threshold: f32,
}

impl ServiceLog {
    pub fn new(
        id: ServiceLogId,
        service_type: ServiceType,
        serviced_at_mileage: f32,
        next_service_threshold: f32,
    ) -> Self {
        Self {
            id,
            service_type,
            serviced_at_mileage,
            next_service_threshold,
        }
    }

    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    pub fn serviced_at_mileage(&self) -> f32 {
        self.serviced_at_mileage
    }

    pub fn next_service_threshold(&self) -> f32 {
        self.next_service_threshold
    }
}

impl Entity for ServiceLog {
    type Id = ServiceLogId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl PartialEq for ServiceLog {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for ServiceLog {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn vin_must_be_seventeen_characters() {
        let err = Vin::new("TOOSHORT").unwrap_err();
        match err {
            FleetError::InvalidVin(msg) => assert!(msg.contains("17")),
            _ => panic!("Expected InvalidVin"),
        }
    }

    #[test]
    fn vin_rejects_forbidden_characters() {
        // 'O' is in the forbidden set, even lowercased.
        assert!(Vin::new("4Y1SL65848Z41143o").is_err());
        assert!(Vin::new("4Y1SL65848Z4114-3").is_err());
    }

    #[test]
    fn vin_normalizes_to_uppercase_and_exposes_sections() {
        let vin = Vin::new("4y1sl65848z411439").unwrap();
        assert_eq!(vin.as_str(), "4Y1SL65848Z411439");
        assert_eq!(vin.wmi(), "4Y1");
        assert_eq!(vin.vds(), "SL6584");
        assert_eq!(vin.vis(), "8Z411439");
    }

    #[test]
    fn vin_serde_round_trip_preserves_equality() {
        let vin = Vin::new("4Y1SL65848Z411439").unwrap();
        let json = serde_json::to_string(&vin).unwrap();
        let restored: Vin = serde_json::from_str(&json).unwrap();
        assert_eq!(vin, restored);
    }

    #[test]
    fn odometer_copy_updates() {
        let odometer = OdometerReading::new(OdometerUnit::Kilometers, 10_000.0, 15_000.0);

        let updated = odometer.with_value(14_000.0);
        assert_eq!(updated.value(), 14_000.0);
        assert_eq!(updated.next_service_threshold(), 15_000.0);
        assert!(!updated.due_for_service());

        let serviced = updated.with_next_service_threshold(25_000.0);
        assert_eq!(serviced.value(), 14_000.0);
        assert_eq!(serviced.next_service_threshold(), 25_000.0);

        assert!(odometer.with_value(15_000.0).due_for_service());
    }

    #[test]
    fn fuel_tank_trip_threshold() {
        let low = FuelTank::new(FuelType::Petrol, 60.0, 12.0);
        let full = FuelTank::new(FuelType::Petrol, 60.0, 58.0);

        assert!(!low.is_trip_sufficient());
        assert!(full.is_trip_sufficient());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any 17 characters drawn from the allowed alphabet form a
        /// valid VIN, and the sections partition it.
        #[test]
        fn valid_alphabet_vins_are_accepted(vin in "[ABCDEFGHJKLMNPRSTUVWXYZ0-9]{17}") {
            let parsed = Vin::new(vin.clone()).unwrap();
            prop_assert_eq!(parsed.as_str(), vin.as_str());
            prop_assert_eq!(parsed.wmi().len(), 3);
            prop_assert_eq!(parsed.vds().len(), 6);
            prop_assert_eq!(parsed.vis().len(), 8);
        }
    }
}
