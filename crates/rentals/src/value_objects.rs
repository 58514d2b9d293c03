//! Value objects of the rental-contracting context.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use fleetrent_core::{DomainError, DomainResult, Money, ValueObject};

use crate::error::RentalError;

/// Unit an odometer counts in.
///
/// Some cars (e.g. American-spec imports) count miles while the rest of the
/// fleet counts kilometers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OdometerUnit {
    Kilometers,
    Miles,
}

/// Kilometers per mile.
pub const KM_PER_MILE: f32 = 1.60934;

/// A snapshot of an odometer at a point in time.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct OdometerReading {
    units: OdometerUnit,
    value: f32,
}

impl ValueObject for OdometerReading {}

impl OdometerReading {
    pub fn new(units: OdometerUnit, value: f32) -> DomainResult<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(DomainError::validation(
                "odometer value must be a non-negative number",
            ));
        }
        Ok(Self { units, value })
    }

    pub fn units(&self) -> OdometerUnit {
        self.units
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn to_miles(&self) -> f32 {
        match self.units {
            OdometerUnit::Miles => self.value,
            OdometerUnit::Kilometers => self.value / KM_PER_MILE,
        }
    }

    pub fn to_kilometers(&self) -> f32 {
        match self.units {
            OdometerUnit::Kilometers => self.value,
            OdometerUnit::Miles => self.value * KM_PER_MILE,
        }
    }
}

/// Fuel level as a fraction of a full tank.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelLevel(f32);

impl ValueObject for FuelLevel {}

impl FuelLevel {
    pub fn new(fraction: f32) -> DomainResult<Self> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(DomainError::validation(
                "fuel level must be a fraction between 0 and 1",
            ));
        }
        Ok(Self(fraction))
    }

    pub fn full() -> Self {
        Self(1.0)
    }

    pub fn fraction(&self) -> f32 {
        self.0
    }
}

/// The check-in/check-out window agreed on the contract.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RentalPeriod {
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
}

impl ValueObject for RentalPeriod {}

impl RentalPeriod {
    pub fn new(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> DomainResult<Self> {
        if check_out < check_in {
            return Err(DomainError::validation("check-out cannot precede check-in"));
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn check_in(&self) -> DateTime<Utc> {
        self.check_in
    }

    pub fn check_out(&self) -> DateTime<Utc> {
        self.check_out
    }

    /// Contracted duration in whole days.
    pub fn duration_days(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Elapsed duration in whole days as of `now`.
    ///
    /// `now` comes from the caller's clock; the period itself never reads
    /// system time.
    pub fn true_duration_days(&self, now: DateTime<Utc>) -> i64 {
        (now - self.check_in).num_days()
    }

    /// A copy of this period ending at `new_check_out`.
    ///
    /// The new date must be strictly after the current check-out (an extension
    /// never shortens the rental) and cannot precede the check-in.
    pub fn extended_until(&self, new_check_out: DateTime<Utc>) -> Result<Self, RentalError> {
        if new_check_out <= self.check_out || new_check_out < self.check_in {
            return Err(RentalError::InvalidPeriod(format!(
                "extension must end strictly after the current check-out ({})",
                self.check_out
            )));
        }

        Ok(Self {
            check_in: self.check_in,
            check_out: new_check_out,
        })
    }
}

/// Daily/weekly/monthly rates agreed on the contract.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RentalRate {
    daily: Money,
    weekly: Money,
    monthly: Money,
}

impl ValueObject for RentalRate {}

impl RentalRate {
    pub fn new(daily: Money, weekly: Money, monthly: Money) -> Self {
        Self {
            daily,
            weekly,
            monthly,
        }
    }

    pub fn daily(&self) -> Money {
        self.daily
    }

    pub fn weekly(&self) -> Money {
        self.weekly
    }

    pub fn monthly(&self) -> Money {
        self.monthly
    }

    /// The rate that applies to a period of the given length: under 7 days the
    /// daily rate, under 30 the weekly rate, monthly from there on.
    ///
    /// Resolved on demand from the schedule - never cached, so an extension
    /// immediately changes the applicable rate.
    pub fn rate_for(&self, period: &RentalPeriod) -> Money {
        let days = period.duration_days();

        if days < 7 {
            self.daily
        } else if days < 30 {
            self.weekly
        } else {
            self.monthly
        }
    }
}

/// The mileage allowance agreed on the contract, and what exceeding it costs.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct MileagePolicy {
    allowance: OdometerReading,
    excess_charge: Money,
}

impl ValueObject for MileagePolicy {}

impl MileagePolicy {
    pub fn new(allowance: OdometerReading, excess_charge: Money) -> Self {
        Self {
            allowance,
            excess_charge,
        }
    }

    pub fn allowance(&self) -> OdometerReading {
        self.allowance
    }

    pub fn excess_charge(&self) -> Money {
        self.excess_charge
    }
}

/// Upstream billing's verdict on whether the rental's balance is fully
/// cleared. The rental only inspects the verdict; how the balance was
/// computed belongs to the billing context.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BalanceClearance {
    approved: bool,
}

impl ValueObject for BalanceClearance {}

impl BalanceClearance {
    pub fn approved() -> Self {
        Self { approved: true }
    }

    pub fn outstanding() -> Self {
        Self { approved: false }
    }

    pub fn is_approved(&self) -> bool {
        self.approved
    }
}

/// A driver's license as presented at the counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DriverLicense {
    number: String,
    expiry: NaiveDate,
}

impl ValueObject for DriverLicense {}

impl DriverLicense {
    pub fn new(number: impl Into<String>, expiry: NaiveDate) -> DomainResult<Self> {
        let number = number.into();
        if number.trim().is_empty() {
            return Err(DomainError::validation("license number cannot be empty"));
        }
        Ok(Self { number, expiry })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    pub fn is_expired_as_of(&self, date: NaiveDate) -> bool {
        self.expiry < date
    }
}
