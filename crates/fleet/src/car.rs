//! The car aggregate: physical state and operational lifecycle.

use serde::{Deserialize, Serialize};

use chrono::NaiveDate;
use fleetrent_core::{AggregateRoot, Entity, EventBuffer, EventId, define_id};
use fleetrent_events::DomainEvent;

use crate::error::FleetError;
use crate::registration::RegistrationId;
use crate::value_objects::{
    CarModel, Damage, FuelTank, InsuranceCompliance, OdometerReading, ServiceLog, ServiceLogId, Vin,
};

define_id!(
    /// Identifier of a [`Car`] in the fleet-management context.
    CarId
);

/// Operational status of a fleet car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CarStatus {
    Available,
    Rented,
    Maintenance,
    OutOfService,
}

/// Event: CarRegistered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarRegistered {
    pub event_id: EventId,
    pub car_id: CarId,
    pub registration_id: RegistrationId,
}

/// Event: CarInsured. Raised both for first-time insurance and renewals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarInsured {
    pub event_id: EventId,
    pub car_id: CarId,
    pub expiration: NaiveDate,
}

/// Event: CarStatusChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarStatusChanged {
    pub event_id: EventId,
    pub car_id: CarId,
    pub status: CarStatus,
}

/// Event: CarServiceCompleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarServiceCompleted {
    pub event_id: EventId,
    pub car_id: CarId,
    pub service_log_id: ServiceLogId,
}

/// Event: CarOdometerUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarOdometerUpdated {
    pub event_id: EventId,
    pub car_id: CarId,
    pub value: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CarEvent {
    CarRegistered(CarRegistered),
    CarInsured(CarInsured),
    CarStatusChanged(CarStatusChanged),
    CarServiceCompleted(CarServiceCompleted),
    CarOdometerUpdated(CarOdometerUpdated),
}

impl DomainEvent for CarEvent {
    fn event_id(&self) -> EventId {
        match self {
            CarEvent::CarRegistered(e) => e.event_id,
            CarEvent::CarInsured(e) => e.event_id,
            CarEvent::CarStatusChanged(e) => e.event_id,
            CarEvent::CarServiceCompleted(e) => e.event_id,
            CarEvent::CarOdometerUpdated(e) => e.event_id,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            CarEvent::CarRegistered(_) => "fleet.car.registered",
            CarEvent::CarInsured(_) => "fleet.car.insured",
            CarEvent::CarStatusChanged(_) => "fleet.car.status_changed",
            CarEvent::CarServiceCompleted(_) => "fleet.car.service_completed",
            CarEvent::CarOdometerUpdated(_) => "fleet.car.odometer_updated",
        }
    }
}

/// Aggregate root: a fleet car.
///
/// The single source of truth for a vehicle's physical existence in the
/// fleet: identification, model, odometer, fuel, registration and insurance
/// references, damage reports, and service history. Registration itself is a
/// separate aggregate; the car only holds a reference.
#[derive(Debug, Clone)]
pub struct Car {
    id: CarId,
    vin: Vin,
    model: CarModel,
    odometer: OdometerReading,
    fuel: FuelTank,
    registration_id: Option<RegistrationId>,
    insurance: Option<InsuranceCompliance>,
    status: CarStatus,
    damages: Vec<Damage>,
    service_history: Vec<ServiceLog>,
    version: u64,
    events: EventBuffer<CarEvent>,
}

impl Car {
    /// Add a car to the fleet. A car starts out available, unregistered and
    /// uninsured; registration and insurance are attached as they are issued.
    pub fn new(id: CarId, vin: Vin, model: CarModel, odometer: OdometerReading, fuel: FuelTank) -> Self {
        Self {
            id,
            vin,
            model,
            odometer,
            fuel,
            registration_id: None,
            insurance: None,
            status: CarStatus::Available,
            damages: Vec::new(),
            service_history: Vec::new(),
            version: 0,
            events: EventBuffer::new(),
        }
    }

    pub fn vin(&self) -> &Vin {
        &self.vin
    }

    pub fn model(&self) -> &CarModel {
        &self.model
    }

    pub fn odometer(&self) -> OdometerReading {
        self.odometer
    }

    pub fn fuel(&self) -> FuelTank {
        self.fuel
    }

    pub fn registration_id(&self) -> Option<RegistrationId> {
        self.registration_id
    }

    pub fn insurance(&self) -> Option<&InsuranceCompliance> {
        self.insurance.as_ref()
    }

    pub fn status(&self) -> CarStatus {
        self.status
    }

    pub fn damages(&self) -> &[Damage] {
        &self.damages
    }

    pub fn service_history(&self) -> &[ServiceLog] {
        &self.service_history
    }

    /// Attach a registration to the car.
    pub fn register(&mut self, registration_id: RegistrationId) {
        self.registration_id = Some(registration_id);
        self.version += 1;
        self.events.record(CarEvent::CarRegistered(CarRegistered {
            event_id: EventId::new(),
            car_id: self.id,
            registration_id,
        }));
    }

    /// Attach insurance to the car. An unregistered car cannot be insured.
    pub fn insure(&mut self, insurance: InsuranceCompliance) -> Result<(), FleetError> {
        if self.registration_id.is_none() {
            return Err(FleetError::InvalidOperation(
                "cannot insure an unregistered car".into(),
            ));
        }

        let expiration = insurance.expiration();
        self.insurance = Some(insurance);
        self.version += 1;
        self.events.record(CarEvent::CarInsured(CarInsured {
            event_id: EventId::new(),
            car_id: self.id,
            expiration,
        }));
        Ok(())
    }

    /// Replace the car's insurance with a renewed policy.
    ///
    /// The fleet does not keep an insurance history; that belongs to an
    /// insurance-management context.
    pub fn renew_insurance(&mut self, insurance: InsuranceCompliance) -> Result<(), FleetError> {
        if self.insurance.is_none() {
            return Err(FleetError::InvalidOperation(
                "cannot renew insurance on a car that has none".into(),
            ));
        }

        let expiration = insurance.expiration();
        self.insurance = Some(insurance);
        self.version += 1;
        self.events.record(CarEvent::CarInsured(CarInsured {
            event_id: EventId::new(),
            car_id: self.id,
            expiration,
        }));
        Ok(())
    }

    /// Take the car off the road for servicing.
    pub fn send_to_service(&mut self) {
        self.status = CarStatus::Maintenance;
        self.version += 1;
        self.events
            .record(CarEvent::CarStatusChanged(CarStatusChanged {
                event_id: EventId::new(),
                car_id: self.id,
                status: self.status,
            }));
    }

    /// Put the car back on the road after servicing.
    ///
    /// Appends the log to the service history and carries the log's next
    /// service threshold onto the odometer.
    pub fn complete_service(&mut self, service_log: ServiceLog) -> Result<(), FleetError> {
        if self.status != CarStatus::Maintenance {
            return Err(FleetError::InvalidOperation(
                "cannot complete service on a car that is not in maintenance".into(),
            ));
        }

        self.status = CarStatus::Available;
        self.odometer = self
            .odometer
            .with_next_service_threshold(service_log.next_service_threshold());
        let service_log_id = service_log.id();
        self.service_history.push(service_log);
        self.version += 1;

        self.events
            .record(CarEvent::CarStatusChanged(CarStatusChanged {
                event_id: EventId::new(),
                car_id: self.id,
                status: self.status,
            }));
        self.events
            .record(CarEvent::CarServiceCompleted(CarServiceCompleted {
                event_id: EventId::new(),
                car_id: self.id,
                service_log_id,
            }));
        Ok(())
    }

    /// Replace the odometer value. Accepted unconditionally - readings come
    /// from manual employee logging or telemetry.
    pub fn update_mileage(&mut self, value: f32) {
        self.odometer = self.odometer.with_value(value);
        self.version += 1;
        self.events
            .record(CarEvent::CarOdometerUpdated(CarOdometerUpdated {
                event_id: EventId::new(),
                car_id: self.id,
                value,
            }));
    }

    /// Record reported damage.
    ///
    /// Deliberately raises no event: damage reporting is not wired to
    /// notifications yet, and consumers may already rely on that.
    pub fn report_damage(&mut self, damage: Damage) {
        self.damages.push(damage);
        self.version += 1;
    }

    /// Record several damages at once, e.g. from a return inspection.
    pub fn report_damages(&mut self, damages: impl IntoIterator<Item = Damage>) {
        self.damages.extend(damages);
        self.version += 1;
    }
}

impl Entity for Car {
    type Id = CarId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl AggregateRoot for Car {
    type Event = CarEvent;

    fn pending_events(&self) -> &[Self::Event] {
        self.events.as_slice()
    }

    fn drain_events(&mut self) -> Vec<Self::Event> {
        self.events.drain()
    }

    fn clear_events(&mut self) {
        self.events.clear()
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    use crate::value_objects::{CarType, FuelType, OdometerUnit, ServiceType};

    fn test_car() -> Car {
        Car::new(
            CarId::new(),
            Vin::new("4Y1SL65848Z411439").unwrap(),
            CarModel::new("Toyota", "Corolla", 2023, CarType::Sedan),
            OdometerReading::new(OdometerUnit::Kilometers, 10_000.0, 15_000.0),
            FuelTank::new(FuelType::Petrol, 50.0, 45.0),
        )
    }

    fn test_insurance() -> InsuranceCompliance {
        InsuranceCompliance::new(
            Uuid::now_v7(),
            "POL-2025-001",
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        )
    }

    #[test]
    fn insure_before_register_fails() {
        let mut car = test_car();

        let err = car.insure(test_insurance()).unwrap_err();
        match err {
            FleetError::InvalidOperation(_) => {}
            _ => panic!("Expected InvalidOperation for uninsurable car"),
        }
        assert!(car.insurance().is_none());
        assert!(car.pending_events().is_empty());
    }

    #[test]
    fn insure_after_register_raises_exactly_one_insured_event() {
        let mut car = test_car();
        car.register(RegistrationId::new());
        car.clear_events();

        car.insure(test_insurance()).unwrap();
        assert!(car.insurance().is_some());

        let insured: Vec<_> = car
            .pending_events()
            .iter()
            .filter(|e| matches!(e, CarEvent::CarInsured(_)))
            .collect();
        assert_eq!(insured.len(), 1);
    }

    #[test]
    fn renew_insurance_requires_existing_insurance() {
        let mut car = test_car();
        car.register(RegistrationId::new());

        let err = car.renew_insurance(test_insurance()).unwrap_err();
        match err {
            FleetError::InvalidOperation(_) => {}
            _ => panic!("Expected InvalidOperation"),
        }

        car.insure(test_insurance()).unwrap();
        let renewed = InsuranceCompliance::new(
            Uuid::now_v7(),
            "POL-2026-002",
            NaiveDate::from_ymd_opt(2027, 3, 1).unwrap(),
        );
        car.renew_insurance(renewed.clone()).unwrap();
        assert_eq!(car.insurance(), Some(&renewed));
    }

    #[test]
    fn service_cycle_updates_status_history_and_threshold() {
        let mut car = test_car();

        car.send_to_service();
        assert_eq!(car.status(), CarStatus::Maintenance);

        let log = ServiceLog::new(ServiceLogId::new(), ServiceType::Routine, 14_900.0, 25_000.0);
        car.complete_service(log.clone()).unwrap();

        assert_eq!(car.status(), CarStatus::Available);
        assert_eq!(car.service_history().len(), 1);
        assert_eq!(car.odometer().next_service_threshold(), 25_000.0);

        // StatusChanged (maintenance), StatusChanged (available), ServiceCompleted.
        let types: Vec<_> = car.pending_events().iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec![
                "fleet.car.status_changed",
                "fleet.car.status_changed",
                "fleet.car.service_completed",
            ]
        );
    }

    #[test]
    fn complete_service_requires_maintenance() {
        let mut car = test_car();
        let log = ServiceLog::new(ServiceLogId::new(), ServiceType::Routine, 14_900.0, 25_000.0);

        let err = car.complete_service(log).unwrap_err();
        match err {
            FleetError::InvalidOperation(_) => {}
            _ => panic!("Expected InvalidOperation"),
        }
        assert_eq!(car.status(), CarStatus::Available);
        assert!(car.service_history().is_empty());
    }

    #[test]
    fn update_mileage_is_unconditional_and_raises_event() {
        let mut car = test_car();

        car.update_mileage(10_450.5);
        assert_eq!(car.odometer().value(), 10_450.5);

        match car.pending_events().last().unwrap() {
            CarEvent::CarOdometerUpdated(e) => assert_eq!(e.value, 10_450.5),
            _ => panic!("Expected CarOdometerUpdated"),
        }
    }

    #[test]
    fn damage_reports_accumulate_without_events() {
        let mut car = test_car();

        car.report_damage(Damage::new(
            crate::value_objects::DamageSeverity::Minor,
            "scratched rear bumper",
            None,
            false,
        ));
        car.report_damages(vec![
            Damage::new(
                crate::value_objects::DamageSeverity::Moderate,
                "cracked windshield",
                None,
                true,
            ),
            Damage::new(
                crate::value_objects::DamageSeverity::Minor,
                "curbed front-left rim",
                None,
                false,
            ),
        ]);

        assert_eq!(car.damages().len(), 3);
        assert!(car.pending_events().is_empty());
    }

    #[test]
    fn version_increments_per_behavior_call() {
        let mut car = test_car();
        assert_eq!(car.version(), 0);

        car.register(RegistrationId::new());
        assert_eq!(car.version(), 1);

        car.update_mileage(10_100.0);
        assert_eq!(car.version(), 2);
    }
}
