//! The registration aggregate: a vehicle's legal authorization to operate.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use fleetrent_core::{AggregateRoot, DateRange, Entity, EventBuffer, EventId, Money, define_id};
use fleetrent_events::DomainEvent;

use crate::car::CarId;
use crate::error::FleetError;
use crate::value_objects::CarPlates;

define_id!(
    /// Identifier of a [`Registration`] in the fleet-management context.
    RegistrationId
);

/// Regulatory status of a registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    Active,
    Suspended,
    Expired,
}

/// Event: RegistrationSuspended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSuspended {
    pub event_id: EventId,
    pub registration_id: RegistrationId,
    pub car_id: CarId,
}

/// Event: RegistrationReinstated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationReinstated {
    pub event_id: EventId,
    pub registration_id: RegistrationId,
}

/// Event: RegistrationExpired.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationExpired {
    pub event_id: EventId,
    pub registration_id: RegistrationId,
}

/// Event: RegistrationTransferred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationTransferred {
    pub event_id: EventId,
    pub registration_id: RegistrationId,
    pub car_id: CarId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegistrationEvent {
    RegistrationSuspended(RegistrationSuspended),
    RegistrationReinstated(RegistrationReinstated),
    RegistrationExpired(RegistrationExpired),
    RegistrationTransferred(RegistrationTransferred),
}

impl DomainEvent for RegistrationEvent {
    fn event_id(&self) -> EventId {
        match self {
            RegistrationEvent::RegistrationSuspended(e) => e.event_id,
            RegistrationEvent::RegistrationReinstated(e) => e.event_id,
            RegistrationEvent::RegistrationExpired(e) => e.event_id,
            RegistrationEvent::RegistrationTransferred(e) => e.event_id,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            RegistrationEvent::RegistrationSuspended(_) => "fleet.registration.suspended",
            RegistrationEvent::RegistrationReinstated(_) => "fleet.registration.reinstated",
            RegistrationEvent::RegistrationExpired(_) => "fleet.registration.expired",
            RegistrationEvent::RegistrationTransferred(_) => "fleet.registration.transferred",
        }
    }
}

/// Aggregate root: a vehicle registration.
///
/// Issued by a governmental authority, it acts as a "regulatory contract":
/// plates, a validity period, a grace period after that, and a status that
/// moves between active, suspended and expired. It references the registered
/// car; the car is its own aggregate.
#[derive(Debug, Clone)]
pub struct Registration {
    id: RegistrationId,
    car_id: CarId,
    plates: CarPlates,
    effective_period: DateRange,
    /// Days after [`Self::effective_period`] ends during which the
    /// registration may still not be marked expired.
    grace_period_days: u32,
    cost: Money,
    /// Location of the registration document (object storage or the issuing
    /// authority's portal).
    document_url: String,
    status: RegistrationStatus,
    version: u64,
    events: EventBuffer<RegistrationEvent>,
}

impl Registration {
    /// Issue a registration for a car. Registrations start out active.
    pub fn issue(
        id: RegistrationId,
        plates: CarPlates,
        car_id: CarId,
        effective_period: DateRange,
        document_url: impl Into<String>,
        cost: Money,
        grace_period_days: u32,
    ) -> Self {
        Self {
            id,
            car_id,
            plates,
            effective_period,
            grace_period_days,
            cost,
            document_url: document_url.into(),
            status: RegistrationStatus::Active,
            version: 0,
            events: EventBuffer::new(),
        }
    }

    pub fn car_id(&self) -> CarId {
        self.car_id
    }

    pub fn plates(&self) -> &CarPlates {
        &self.plates
    }

    pub fn effective_period(&self) -> DateRange {
        self.effective_period
    }

    pub fn grace_period_days(&self) -> u32 {
        self.grace_period_days
    }

    pub fn cost(&self) -> Money {
        self.cost
    }

    pub fn document_url(&self) -> &str {
        &self.document_url
    }

    pub fn status(&self) -> RegistrationStatus {
        self.status
    }

    /// The instant from which [`expire`](Self::expire) is permitted: the end
    /// of the effective period plus the grace period.
    pub fn expirable_from(&self) -> DateTime<Utc> {
        self.effective_period.end() + Duration::days(i64::from(self.grace_period_days))
    }

    /// Suspend the registration, e.g. after a jurisdiction violation.
    pub fn suspend(&mut self) {
        self.status = RegistrationStatus::Suspended;
        self.version += 1;
        self.events
            .record(RegistrationEvent::RegistrationSuspended(
                RegistrationSuspended {
                    event_id: EventId::new(),
                    registration_id: self.id,
                    car_id: self.car_id,
                },
            ));
    }

    /// Reinstate an expired or suspended registration.
    pub fn reinstate(&mut self) -> Result<(), FleetError> {
        if self.status != RegistrationStatus::Expired && self.status != RegistrationStatus::Suspended
        {
            return Err(FleetError::InvalidRegistrationState(
                "cannot reinstate a registration that is not expired or suspended".into(),
            ));
        }

        self.status = RegistrationStatus::Active;
        self.version += 1;
        self.events
            .record(RegistrationEvent::RegistrationReinstated(
                RegistrationReinstated {
                    event_id: EventId::new(),
                    registration_id: self.id,
                },
            ));
        Ok(())
    }

    /// Mark the registration expired.
    ///
    /// Only permitted from `now >= effective_period.end + grace_period_days`
    /// (boundary inclusive). `now` comes from the caller's clock so the
    /// decision stays deterministic.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Result<(), FleetError> {
        if now < self.expirable_from() {
            return Err(FleetError::PrematureExpiration(format!(
                "expiration date has not been crossed (expirable from {})",
                self.expirable_from()
            )));
        }

        self.status = RegistrationStatus::Expired;
        self.version += 1;
        self.events
            .record(RegistrationEvent::RegistrationExpired(RegistrationExpired {
                event_id: EventId::new(),
                registration_id: self.id,
            }));
        Ok(())
    }

    /// Move the registration onto another car. Not possible while suspended.
    pub fn transfer(&mut self, car_id: CarId) -> Result<(), FleetError> {
        if self.status == RegistrationStatus::Suspended {
            return Err(FleetError::InvalidRegistrationState(
                "cannot transfer a registration while it is suspended".into(),
            ));
        }

        self.car_id = car_id;
        self.version += 1;
        self.events
            .record(RegistrationEvent::RegistrationTransferred(
                RegistrationTransferred {
                    event_id: EventId::new(),
                    registration_id: self.id,
                    car_id,
                },
            ));
        Ok(())
    }
}

impl Entity for Registration {
    type Id = RegistrationId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl AggregateRoot for Registration {
    type Event = RegistrationEvent;

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
