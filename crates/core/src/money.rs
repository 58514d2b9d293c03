//! Monetary amounts and currency codes.

use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// ISO 4217 currency codes accepted by the business.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Aed,
    Usd,
    Eur,
    Gbp,
    Jpy,
    Cad,
    Aud,
    Chf,
    Cny,
    Sek,
    Nzd,
}

impl Currency {
    pub const fn code(self) -> &'static str {
        match self {
            Currency::Aed => "AED",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Chf => "CHF",
            Currency::Cny => "CNY",
            Currency::Sek => "SEK",
            Currency::Nzd => "NZD",
        }
    }
}

impl Default for Currency {
    /// The business operates out of the UAE.
    fn default() -> Self {
        Currency::Aed
    }
}

impl core::fmt::Display for Currency {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "AED" => Ok(Currency::Aed),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "JPY" => Ok(Currency::Jpy),
            "CAD" => Ok(Currency::Cad),
            "AUD" => Ok(Currency::Aud),
            "CHF" => Ok(Currency::Chf),
            "CNY" => Ok(Currency::Cny),
            "SEK" => Ok(Currency::Sek),
            "NZD" => Ok(Currency::Nzd),
            other => Err(DomainError::validation(format!(
                "invalid currency code: {other}"
            ))),
        }
    }
}

/// An amount of money in a specific currency.
///
/// Amounts are stored in the smallest currency unit (e.g. fils, cents) and are
/// non-negative by construction. Arithmetic across currencies is rejected
/// rather than converted - exchange is a different context's problem.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Money {
    amount_minor: u64,
    currency: Currency,
}

impl ValueObject for Money {}

impl Money {
    pub fn new(amount_minor: u64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn amount_minor(&self) -> u64 {
        self.amount_minor
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    fn ensure_same_currency(&self, other: &Money, op: &str) -> DomainResult<()> {
        if self.currency != other.currency {
            return Err(DomainError::validation(format!(
                "cannot {op} amounts in different currencies: {} and {}",
                self.currency, other.currency
            )));
        }
        Ok(())
    }

    pub fn add(&self, other: &Money) -> DomainResult<Money> {
        self.ensure_same_currency(other, "add")?;
        let amount = self
            .amount_minor
            .checked_add(other.amount_minor)
            .ok_or_else(|| DomainError::validation("amount overflow"))?;
        Ok(Money::new(amount, self.currency))
    }

    pub fn subtract(&self, other: &Money) -> DomainResult<Money> {
        self.ensure_same_currency(other, "subtract")?;
        let amount = self
            .amount_minor
            .checked_sub(other.amount_minor)
            .ok_or_else(|| DomainError::validation("resulting amount cannot be negative"))?;
        Ok(Money::new(amount, self.currency))
    }

    pub fn multiply(&self, factor: u64) -> DomainResult<Money> {
        let amount = self
            .amount_minor
            .checked_mul(factor)
            .ok_or_else(|| DomainError::validation("amount overflow"))?;
        Ok(Money::new(amount, self.currency))
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.amount_minor, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn equality_is_structural() {
        let a = Money::new(1050, Currency::Usd);
        let b = Money::new(1050, Currency::Usd);
        let c = Money::new(1050, Currency::Eur);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn add_and_subtract_same_currency() {
        let a = Money::new(100, Currency::Aed);
        let b = Money::new(40, Currency::Aed);

        assert_eq!(a.add(&b).unwrap(), Money::new(140, Currency::Aed));
        assert_eq!(a.subtract(&b).unwrap(), Money::new(60, Currency::Aed));
    }

    #[test]
    fn subtract_below_zero_is_rejected() {
        let a = Money::new(10, Currency::Aed);
        let b = Money::new(40, Currency::Aed);

        let err = a.subtract(&b).unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("negative") => {}
            _ => panic!("Expected Validation error for negative result"),
        }
    }

    #[test]
    fn cross_currency_arithmetic_is_rejected() {
        let a = Money::new(100, Currency::Usd);
        let b = Money::new(100, Currency::Eur);

        assert!(a.add(&b).is_err());
        assert!(a.subtract(&b).is_err());
    }

    #[test]
    fn currency_parses_case_insensitively() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("AED".parse::<Currency>().unwrap(), Currency::Aed);
        assert!("XXX".parse::<Currency>().is_err());
    }

    #[test]
    fn serde_round_trip_preserves_equality() {
        let original = Money::new(123_456, Currency::Gbp);
        let json = serde_json::to_string(&original).unwrap();
        let restored: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(original, restored);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: addition is commutative within one currency.
        #[test]
        fn add_is_commutative(a in 0u64..1_000_000_000, b in 0u64..1_000_000_000) {
            let x = Money::new(a, Currency::Aed);
            let y = Money::new(b, Currency::Aed);
            prop_assert_eq!(x.add(&y).unwrap(), y.add(&x).unwrap());
        }

        /// Property: subtracting what was added restores the original amount.
        #[test]
        fn add_then_subtract_round_trips(a in 0u64..1_000_000_000, b in 0u64..1_000_000_000) {
            let x = Money::new(a, Currency::Usd);
            let y = Money::new(b, Currency::Usd);
            prop_assert_eq!(x.add(&y).unwrap().subtract(&y).unwrap(), x);
        }
    }
}
