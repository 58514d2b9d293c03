//! Value objects of the customer-relations context.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use fleetrent_core::{DomainError, DomainResult, Money, ValueObject};

/// A person's name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Name {
    first: String,
    last: String,
    middle: Vec<String>,
}

impl ValueObject for Name {}

impl Name {
    pub fn new(
        first: impl Into<String>,
        last: impl Into<String>,
        middle: Vec<String>,
    ) -> DomainResult<Self> {
        let first = first.into();
        let last = last.into();

        if first.trim().is_empty() || last.trim().is_empty() {
            return Err(DomainError::validation("first and last name are required"));
        }

        Ok(Self {
            first,
            last,
            middle,
        })
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn last(&self) -> &str {
        &self.last
    }

    pub fn middle(&self) -> &[String] {
        &self.middle
    }

    pub fn full_name(&self) -> String {
        if self.middle.is_empty() {
            format!("{} {}", self.first, self.last)
        } else {
            format!("{} {} {}", self.first, self.middle.join(" "), self.last)
        }
    }
}

/// Date of birth.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateOfBirth(NaiveDate);

impl ValueObject for DateOfBirth {}

impl DateOfBirth {
    /// Oldest plausible customer age; anything beyond is a data-entry error.
    pub const MAX_AGE: i32 = 120;

    pub fn new(value: NaiveDate) -> Self {
        Self(value)
    }

    pub fn value(&self) -> NaiveDate {
        self.0
    }

    /// Age in whole years as of `today`.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let mut age = today.year() - self.0.year();
        if (today.month(), today.day()) < (self.0.month(), self.0.day()) {
            age -= 1;
        }
        age
    }
}

/// Nationality as an ISO 3166-1 alpha-2 code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Nationality(String);

impl ValueObject for Nationality {}

impl Nationality {
    pub fn from_code(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into().trim().to_ascii_uppercase();

        if code.len() != 2 || !code.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(DomainError::validation(
                "nationality code must be two alphabetic characters",
            ));
        }

        Ok(Self(code))
    }

    pub fn code(&self) -> &str {
        &self.0
    }
}

/// An email address, normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl ValueObject for Email {}

impl Email {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into().trim().to_lowercase();

        if !Self::is_plausible(&value) {
            return Err(DomainError::validation(format!(
                "invalid email format: {value}"
            )));
        }

        Ok(Self(value))
    }

    // Structural plausibility only; a mailbox's actual existence can only be
    // proven by delivering to it.
    fn is_plausible(value: &str) -> bool {
        let Some((local, domain)) = value.split_once('@') else {
            return false;
        };

        !local.is_empty()
            && !domain.is_empty()
            && !domain.starts_with('.')
            && !domain.ends_with('.')
            && domain.contains('.')
            && !value.contains(char::is_whitespace)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Kind of phone number.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhoneType {
    Mobile,
    Home,
    Work,
}

/// A phone number with its dialing context.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Phone {
    number: String,
    phone_type: PhoneType,
    is_primary: bool,
    country_code: String,
}

impl ValueObject for Phone {}

impl Phone {
    pub fn new(
        number: impl Into<String>,
        phone_type: PhoneType,
        is_primary: bool,
        country_code: impl Into<String>,
    ) -> DomainResult<Self> {
        let number = number.into();
        let country_code = country_code.into();

        if number.trim().is_empty() {
            return Err(DomainError::validation("phone number cannot be empty"));
        }
        if country_code.trim().is_empty() {
            return Err(DomainError::validation("country code cannot be empty"));
        }

        Ok(Self {
            number,
            phone_type,
            is_primary,
            country_code,
        })
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn phone_type(&self) -> PhoneType {
        self.phone_type
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

/// How a customer prefers to be reached.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommunicationMethod {
    Email,
    Sms,
    Phone,
}

/// Contact and marketing preferences.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommunicationPreferences {
    preferred_methods: Vec<CommunicationMethod>,
    email_opt_in: bool,
    sms_opt_in: bool,
    marketing_opt_in: bool,
    preferred_language: String,
}

impl ValueObject for CommunicationPreferences {}

impl CommunicationPreferences {
    pub fn new(
        preferred_methods: Vec<CommunicationMethod>,
        email_opt_in: bool,
        sms_opt_in: bool,
        marketing_opt_in: bool,
        preferred_language: impl Into<String>,
    ) -> Self {
        Self {
            preferred_methods,
            email_opt_in,
            sms_opt_in,
            marketing_opt_in,
            preferred_language: preferred_language.into(),
        }
    }

    pub fn preferred_methods(&self) -> &[CommunicationMethod] {
        &self.preferred_methods
    }

    pub fn email_opt_in(&self) -> bool {
        self.email_opt_in
    }

    pub fn sms_opt_in(&self) -> bool {
        self.sms_opt_in
    }

    pub fn marketing_opt_in(&self) -> bool {
        self.marketing_opt_in
    }

    pub fn preferred_language(&self) -> &str {
        &self.preferred_language
    }
}

impl Default for CommunicationPreferences {
    fn default() -> Self {
        Self {
            preferred_methods: vec![CommunicationMethod::Email],
            email_opt_in: true,
            sms_opt_in: false,
            marketing_opt_in: false,
            preferred_language: "en-US".to_string(),
        }
    }
}

/// All the ways to reach a customer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContactInformation {
    email: Email,
    phone_numbers: Vec<Phone>,
    communication_preferences: CommunicationPreferences,
}

impl ValueObject for ContactInformation {}

impl ContactInformation {
    pub fn new(
        email: Email,
        phone_numbers: Vec<Phone>,
        communication_preferences: CommunicationPreferences,
    ) -> Self {
        Self {
            email,
            phone_numbers,
            communication_preferences,
        }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn phone_numbers(&self) -> &[Phone] {
        &self.phone_numbers
    }

    pub fn communication_preferences(&self) -> &CommunicationPreferences {
        &self.communication_preferences
    }
}

/// Identity facts about a customer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonalInformation {
    name: Name,
    date_of_birth: DateOfBirth,
    nationality: Nationality,
}

impl ValueObject for PersonalInformation {}

impl PersonalInformation {
    pub fn new(name: Name, date_of_birth: DateOfBirth, nationality: Nationality) -> Self {
        Self {
            name,
            date_of_birth,
            nationality,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn date_of_birth(&self) -> DateOfBirth {
        self.date_of_birth
    }

    pub fn nationality(&self) -> &Nationality {
        &self.nationality
    }
}

/// Risk classification computed upstream.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Snapshot of the customer's risk profile.
///
/// A risk-and-compliance context owns the calculation (traffic history,
/// fines, averages); this context only reads the result.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RiskProfile {
    risk_level: RiskLevel,
}

impl ValueObject for RiskProfile {}

impl RiskProfile {
    pub fn new(risk_level: RiskLevel) -> Self {
        Self { risk_level }
    }

    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }
}

impl Default for RiskProfile {
    fn default() -> Self {
        Self::new(RiskLevel::Low)
    }
}

/// Basic facts about a customer's engagement and rental usage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorProfile {
    total_rentals: u32,
    total_spent: Money,
    average_driving_distance: f32,
}

impl ValueObject for BehaviorProfile {}

impl BehaviorProfile {
    pub fn new(total_rentals: u32, total_spent: Money, average_driving_distance: f32) -> Self {
        Self {
            total_rentals,
            total_spent,
            average_driving_distance,
        }
    }

    pub fn total_rentals(&self) -> u32 {
        self.total_rentals
    }

    pub fn total_spent(&self) -> Money {
        self.total_spent
    }

    pub fn average_driving_distance(&self) -> f32 {
        self.average_driving_distance
    }
}

/// Outcome of evaluating the verification policy for a customer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerificationResult {
    verified: bool,
}

impl ValueObject for VerificationResult {}

impl VerificationResult {
    pub fn verified() -> Self {
        Self { verified: true }
    }

    pub fn failed() -> Self {
        Self { verified: false }
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_includes_middle_names() {
        let plain = Name::new("Aisha", "Khan", vec![]).unwrap();
        assert_eq!(plain.full_name(), "Aisha Khan");

        let with_middle = Name::new("Aisha", "Khan", vec!["Bint".to_string()]).unwrap();
        assert_eq!(with_middle.full_name(), "Aisha Bint Khan");
    }

    #[test]
    fn name_requires_first_and_last() {
        assert!(Name::new("", "Khan", vec![]).is_err());
        assert!(Name::new("Aisha", "  ", vec![]).is_err());
    }

    #[test]
    fn age_accounts_for_birthday_not_yet_reached() {
        let dob = DateOfBirth::new(NaiveDate::from_ymd_opt(2000, 9, 10).unwrap());

        assert_eq!(dob.age_on(NaiveDate::from_ymd_opt(2025, 9, 9).unwrap()), 24);
        assert_eq!(dob.age_on(NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()), 25);
    }

    #[test]
    fn nationality_must_be_alpha_two() {
        assert_eq!(Nationality::from_code(" ae ").unwrap().code(), "AE");
        assert!(Nationality::from_code("ARE").is_err());
        assert!(Nationality::from_code("a1").is_err());
    }

    #[test]
    fn email_is_normalized_and_validated() {
        let email = Email::new("  Sara@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "sara@example.com");

        assert!(Email::new("no-at-sign").is_err());
        assert!(Email::new("a@b").is_err());
        assert!(Email::new("@example.com").is_err());
        assert!(Email::new("a b@example.com").is_err());
    }

    #[test]
    fn serde_round_trip_preserves_equality() {
        let contact = ContactInformation::new(
            Email::new("sara@example.com").unwrap(),
            vec![Phone::new("501234567", PhoneType::Mobile, true, "+971").unwrap()],
            CommunicationPreferences::default(),
        );

        let json = serde_json::to_string(&contact).unwrap();
        let restored: ContactInformation = serde_json::from_str(&json).unwrap();
        assert_eq!(contact, restored);
    }
}
