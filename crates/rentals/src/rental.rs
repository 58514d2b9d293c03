//! The rental contract aggregate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fleetrent_core::{AggregateRoot, Entity, EventBuffer, EventId, define_id};
use fleetrent_events::DomainEvent;

use crate::entities::{Driver, DriverId, RentalCar, RentalCarId, SelectedAddon, SelectedAddonId};
use crate::error::RentalError;
use crate::value_objects::{
    BalanceClearance, FuelLevel, MileagePolicy, OdometerReading, RentalPeriod, RentalRate,
};

define_id!(
    /// Identifier of a [`Rental`].
    RentalId
);

/// Rental contract lifecycle.
///
/// Transitions are one-way and never re-enter `Open`:
/// `Open -> InProgress -> Stopped -> Closed`, and `Open -> Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    Open,
    InProgress,
    Stopped,
    Closed,
    Cancelled,
}

/// Event: AddonSelected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonSelected {
    pub event_id: EventId,
    pub rental_id: RentalId,
    pub addon_id: SelectedAddonId,
}

/// Event: CheckedIn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckedIn {
    pub event_id: EventId,
    pub rental_id: RentalId,
    pub car_id: RentalCarId,
    pub driver_id: DriverId,
    pub period: RentalPeriod,
}

/// Event: Extended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extended {
    pub event_id: EventId,
    pub rental_id: RentalId,
    pub period: RentalPeriod,
}

/// Event: CheckedOut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckedOut {
    pub event_id: EventId,
    pub rental_id: RentalId,
    pub car_id: RentalCarId,
    pub driver_id: DriverId,
    pub final_odometer: OdometerReading,
    pub final_fuel: FuelLevel,
}

/// Event: Closed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Closed {
    pub event_id: EventId,
    pub rental_id: RentalId,
}

/// Event: Cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancelled {
    pub event_id: EventId,
    pub rental_id: RentalId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RentalEvent {
    AddonSelected(AddonSelected),
    CheckedIn(CheckedIn),
    Extended(Extended),
    CheckedOut(CheckedOut),
    Closed(Closed),
    Cancelled(Cancelled),
}

impl DomainEvent for RentalEvent {
    fn event_id(&self) -> EventId {
        match self {
            RentalEvent::AddonSelected(e) => e.event_id,
            RentalEvent::CheckedIn(e) => e.event_id,
            RentalEvent::Extended(e) => e.event_id,
            RentalEvent::CheckedOut(e) => e.event_id,
            RentalEvent::Closed(e) => e.event_id,
            RentalEvent::Cancelled(e) => e.event_id,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            RentalEvent::AddonSelected(_) => "rentals.rental.addon_selected",
            RentalEvent::CheckedIn(_) => "rentals.rental.checked_in",
            RentalEvent::Extended(_) => "rentals.rental.extended",
            RentalEvent::CheckedOut(_) => "rentals.rental.checked_out",
            RentalEvent::Closed(_) => "rentals.rental.closed",
            RentalEvent::Cancelled(_) => "rentals.rental.cancelled",
        }
    }
}

/// Aggregate root: the rental contract.
///
/// Maintains the consistency boundary of one contract: the drivers named on
/// it, the car snapshot it covers, the agreed period, policies and rates, the
/// selected addons, and the status transitions between them. Every behavior
/// method validates its guards before mutating anything, so a failed call
/// leaves the aggregate exactly as it was.
#[derive(Debug, Clone)]
pub struct Rental {
    id: RentalId,
    car: RentalCar,
    primary_driver: Driver,
    secondary_driver: Option<Driver>,
    period: RentalPeriod,
    status: RentalStatus,
    /// The "final" mileage policy on the signed contract. Defaults to the
    /// car's own policy until overridden.
    mileage_policy: MileagePolicy,
    /// The "final" rate schedule on the signed contract. Defaults to the
    /// car's own rates until overridden.
    rates: RentalRate,
    selected_addons: Vec<SelectedAddon>,
    version: u64,
    events: EventBuffer<RentalEvent>,
}

impl Rental {
    /// Open a new rental contract.
    ///
    /// The primary driver must meet the minimum-age and license requirements
    /// as of `today`; an ineligible driver fails the call and no aggregate is
    /// produced. Policy and rates start as the car's defaults.
    pub fn open(
        id: RentalId,
        car: RentalCar,
        primary_driver: Driver,
        period: RentalPeriod,
        today: NaiveDate,
    ) -> Result<Self, RentalError> {
        primary_driver.ensure_eligible(today)?;

        let mileage_policy = car.default_mileage_policy();
        let rates = car.default_rates();

        Ok(Self {
            id,
            car,
            primary_driver,
            secondary_driver: None,
            period,
            status: RentalStatus::Open,
            mileage_policy,
            rates,
            selected_addons: Vec::new(),
            version: 0,
            events: EventBuffer::new(),
        })
    }

    pub fn car(&self) -> &RentalCar {
        &self.car
    }

    pub fn primary_driver(&self) -> &Driver {
        &self.primary_driver
    }

    pub fn secondary_driver(&self) -> Option<&Driver> {
        self.secondary_driver.as_ref()
    }

    pub fn period(&self) -> RentalPeriod {
        self.period
    }

    pub fn status(&self) -> RentalStatus {
        self.status
    }

    pub fn mileage_policy(&self) -> MileagePolicy {
        self.mileage_policy
    }

    pub fn rates(&self) -> RentalRate {
        self.rates
    }

    pub fn selected_addons(&self) -> &[SelectedAddon] {
        &self.selected_addons
    }

    /// The rate currently applicable to this contract, resolved on demand
    /// from the agreed schedule and period.
    pub fn current_rate(&self) -> fleetrent_core::Money {
        self.rates.rate_for(&self.period)
    }

    /// Add an addon to the contract.
    ///
    /// Addons can only be added while the rental is `Open` (the contract has
    /// not been signed), and at most once each - addons carry a quantity for
    /// "more of the same".
    pub fn add_selected_addon(&mut self, addon: SelectedAddon) -> Result<(), RentalError> {
        if self.status != RentalStatus::Open {
            return Err(RentalError::InvalidState(
                "an addon cannot be added once a rental has started".into(),
            ));
        }

        if self.selected_addons.iter().any(|a| a.id() == addon.id()) {
            return Err(RentalError::DuplicateAddon(addon.id()));
        }

        let addon_id = addon.id();
        self.selected_addons.push(addon);
        self.version += 1;
        self.events.record(RentalEvent::AddonSelected(AddonSelected {
            event_id: EventId::new(),
            rental_id: self.id,
            addon_id,
        }));
        Ok(())
    }

    /// Name a second driver on the contract.
    ///
    /// Requires a selected addon that enables an additional driver, and the
    /// driver must pass the same eligibility checks as the primary.
    pub fn add_secondary_driver(
        &mut self,
        driver: Driver,
        today: NaiveDate,
    ) -> Result<(), RentalError> {
        if !self
            .selected_addons
            .iter()
            .any(|a| a.enables_additional_driver())
        {
            return Err(RentalError::MissingAddon(
                "adding a second driver requires an addon".into(),
            ));
        }

        driver.ensure_eligible(today)?;

        self.secondary_driver = Some(driver);
        self.version += 1;
        Ok(())
    }

    /// Hand the car over to the driver: `Open -> InProgress`.
    pub fn check_in(&mut self) -> Result<(), RentalError> {
        if self.status != RentalStatus::Open {
            return Err(RentalError::InvalidState(
                "cannot check in a rental that has already been checked in".into(),
            ));
        }

        self.status = RentalStatus::InProgress;
        self.version += 1;
        self.events.record(RentalEvent::CheckedIn(CheckedIn {
            event_id: EventId::new(),
            rental_id: self.id,
            car_id: self.car.id(),
            driver_id: self.primary_driver.id(),
            period: self.period,
        }));
        Ok(())
    }

    /// Extend the contract to a new check-out date.
    ///
    /// Only active rentals (`Open` or `InProgress`) can be extended, and the
    /// new date must move the check-out strictly forward.
    pub fn extend_until(&mut self, new_check_out: DateTime<Utc>) -> Result<(), RentalError> {
        if self.status != RentalStatus::Open && self.status != RentalStatus::InProgress {
            return Err(RentalError::InvalidState(
                "cannot extend a rental that isn't active".into(),
            ));
        }

        let period = self.period.extended_until(new_check_out)?;

        self.period = period;
        self.version += 1;
        self.events.record(RentalEvent::Extended(Extended {
            event_id: EventId::new(),
            rental_id: self.id,
            period,
        }));
        Ok(())
    }

    /// Take the car back: `InProgress -> Stopped`.
    ///
    /// The final odometer and fuel readings are captured on the car snapshot.
    pub fn check_out(
        &mut self,
        final_odometer: OdometerReading,
        final_fuel: FuelLevel,
    ) -> Result<(), RentalError> {
        if self.status != RentalStatus::InProgress {
            return Err(RentalError::InvalidState(
                "cannot check out a car that is not checked in".into(),
            ));
        }

        self.car.record_return(final_odometer, final_fuel);

        self.status = RentalStatus::Stopped;
        self.version += 1;
        self.events.record(RentalEvent::CheckedOut(CheckedOut {
            event_id: EventId::new(),
            rental_id: self.id,
            car_id: self.car.id(),
            driver_id: self.primary_driver.id(),
            final_odometer,
            final_fuel,
        }));
        Ok(())
    }

    /// Close the contract once billing confirms the balance is cleared.
    pub fn close(&mut self, clearance: BalanceClearance) -> Result<(), RentalError> {
        if !clearance.is_approved() {
            return Err(RentalError::OutstandingBalance);
        }

        self.status = RentalStatus::Closed;
        self.version += 1;
        self.events.record(RentalEvent::Closed(Closed {
            event_id: EventId::new(),
            rental_id: self.id,
        }));
        Ok(())
    }

    /// Replace the contract's mileage policy. Only possible while `Open` -
    /// the signed contract fixes the policy.
    pub fn override_mileage_policy(&mut self, policy: MileagePolicy) -> Result<(), RentalError> {
        if self.status != RentalStatus::Open {
            return Err(RentalError::InvalidState(
                "cannot modify mileage policy after a rental has started".into(),
            ));
        }

        self.mileage_policy = policy;
        self.version += 1;
        Ok(())
    }

    /// Replace the contract's rate schedule. Only possible while `Open`.
    pub fn override_rates(&mut self, rates: RentalRate) -> Result<(), RentalError> {
        if self.status != RentalStatus::Open {
            return Err(RentalError::InvalidState(
                "cannot override rates once the rental has started".into(),
            ));
        }

        self.rates = rates;
        self.version += 1;
        Ok(())
    }

    /// Cancel the contract before it starts: `Open -> Cancelled`.
    pub fn cancel(&mut self) -> Result<(), RentalError> {
        if self.status != RentalStatus::Open {
            return Err(RentalError::InvalidState(
                "cannot cancel a rental once it has started".into(),
            ));
        }

        self.status = RentalStatus::Cancelled;
        self.version += 1;
        self.events.record(RentalEvent::Cancelled(Cancelled {
            event_id: EventId::new(),
            rental_id: self.id,
        }));
        Ok(())
    }
}

impl Entity for Rental {
    type Id = RentalId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl AggregateRoot for Rental {
    type Event = RentalEvent;

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
