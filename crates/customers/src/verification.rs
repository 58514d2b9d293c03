//! Customer verification: policy + service.
//!
//! A policy is a domain service in its own right: it states a business rule
//! as a yes/no decision and tends to vary by context (country, tenant,
//! product). The service orchestrates one or more policies and maps the
//! decision into a [`VerificationResult`] the aggregate can consume - so new
//! jurisdictions compose at the service without touching the aggregate.

use chrono::NaiveDate;

use crate::customer::Customer;
use crate::document::DocumentType;
use crate::value_objects::VerificationResult;

/// A verification rule evaluated over the customer's exposed data.
///
/// Pure: the decision depends only on the snapshot and the provided date,
/// never on ambient state or system time.
pub trait VerificationPolicy {
    fn evaluate(&self, customer: &Customer, today: NaiveDate) -> bool;
}

/// The standard document-based rule: a customer is verifiable iff they hold
/// at least two verified, unexpired documents, one of which is a driver's
/// license.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentVerificationPolicy;

impl DocumentVerificationPolicy {
    /// Minimum number of verified, unexpired documents.
    pub const REQUIRED_VALID_DOCUMENTS: usize = 2;

    pub fn new() -> Self {
        Self
    }
}

impl VerificationPolicy for DocumentVerificationPolicy {
    fn evaluate(&self, customer: &Customer, today: NaiveDate) -> bool {
        let valid: Vec<_> = customer
            .documents()
            .iter()
            .filter(|d| d.is_valid_as_of(today))
            .collect();

        valid.len() >= Self::REQUIRED_VALID_DOCUMENTS
            && valid
                .iter()
                .any(|d| d.document_type() == DocumentType::DriversLicense)
    }
}

/// Evaluates the configured policies and produces a [`VerificationResult`].
///
/// Every policy must pass. With a single policy this is a thin wrapper;
/// its value shows once rules differ per jurisdiction or product.
pub struct VerificationService {
    policies: Vec<Box<dyn VerificationPolicy + Send + Sync>>,
}

impl VerificationService {
    /// Service applying the standard document rule.
    pub fn standard() -> Self {
        Self::with_policies(vec![Box::new(DocumentVerificationPolicy::new())])
    }

    pub fn with_policies(policies: Vec<Box<dyn VerificationPolicy + Send + Sync>>) -> Self {
        Self { policies }
    }

    pub fn verify(&self, customer: &Customer, today: NaiveDate) -> VerificationResult {
        if self.policies.iter().all(|p| p.evaluate(customer, today)) {
            VerificationResult::verified()
        } else {
            VerificationResult::failed()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetrent_core::Address;

    use crate::customer::CustomerId;
    use crate::document::{DocumentType, IdentityDocument, IdentityDocumentId};
    use crate::value_objects::{
        CommunicationPreferences, ContactInformation, DateOfBirth, Email, Name, Nationality,
        PersonalInformation, Phone, PhoneType,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2025, 6, 1)
    }

    fn test_customer() -> Customer {
        Customer::new(
            CustomerId::new(),
            PersonalInformation::new(
                Name::new("Sara", "Haddad", vec![]).unwrap(),
                DateOfBirth::new(date(1992, 4, 18)),
                Nationality::from_code("AE").unwrap(),
            ),
            ContactInformation::new(
                Email::new("sara@example.com").unwrap(),
                vec![Phone::new("501234567", PhoneType::Mobile, true, "+971").unwrap()],
                CommunicationPreferences::default(),
            ),
            Address::new("1 Marina Walk", "Dubai", "Dubai", "00000", "AE").unwrap(),
            None,
        )
    }

    fn verified_document(doc_type: DocumentType, number: &str, expiry: NaiveDate) -> IdentityDocument {
        let mut doc = IdentityDocument::new(
            IdentityDocumentId::new(),
            doc_type,
            number,
            "UAE",
            date(2020, 1, 1),
            expiry,
        );
        doc.mark_verified();
        doc
    }

    #[test]
    fn two_valid_documents_including_a_license_pass() {
        let mut customer = test_customer();
        customer
            .add_identity_document(verified_document(
                DocumentType::Passport,
                "P111",
                date(2030, 1, 1),
            ))
            .unwrap();
        customer
            .add_identity_document(verified_document(
                DocumentType::DriversLicense,
                "DL222",
                date(2030, 1, 1),
            ))
            .unwrap();

        let policy = DocumentVerificationPolicy::new();
        assert!(policy.evaluate(&customer, today()));
    }

    #[test]
    fn a_single_valid_document_fails() {
        let mut customer = test_customer();
        customer
            .add_identity_document(verified_document(
                DocumentType::DriversLicense,
                "DL222",
                date(2030, 1, 1),
            ))
            .unwrap();

        assert!(!DocumentVerificationPolicy::new().evaluate(&customer, today()));
    }

    #[test]
    fn two_valid_documents_without_a_license_fail() {
        let mut customer = test_customer();
        customer
            .add_identity_document(verified_document(
                DocumentType::Passport,
                "P111",
                date(2030, 1, 1),
            ))
            .unwrap();
        customer
            .add_identity_document(verified_document(
                DocumentType::NationalId,
                "N333",
                date(2030, 1, 1),
            ))
            .unwrap();

        assert!(!DocumentVerificationPolicy::new().evaluate(&customer, today()));
    }

    #[test]
    fn expired_and_pending_documents_do_not_count() {
        let mut customer = test_customer();
        // Expired license.
        customer
            .add_identity_document(verified_document(
                DocumentType::DriversLicense,
                "DL222",
                date(2024, 1, 1),
            ))
            .unwrap();
        // Valid passport.
        customer
            .add_identity_document(verified_document(
                DocumentType::Passport,
                "P111",
                date(2030, 1, 1),
            ))
            .unwrap();
        // Pending national id.
        customer
            .add_identity_document(IdentityDocument::new(
                IdentityDocumentId::new(),
                DocumentType::NationalId,
                "N333",
                "UAE",
                date(2020, 1, 1),
                date(2030, 1, 1),
            ))
            .unwrap();

        assert!(!DocumentVerificationPolicy::new().evaluate(&customer, today()));
    }

    #[test]
    fn service_maps_policy_outcome_to_a_result() {
        let mut customer = test_customer();
        let service = VerificationService::standard();

        assert!(!service.verify(&customer, today()).is_verified());

        customer
            .add_identity_document(verified_document(
                DocumentType::Passport,
                "P111",
                date(2030, 1, 1),
            ))
            .unwrap();
        customer
            .add_identity_document(verified_document(
                DocumentType::DriversLicense,
                "DL222",
                date(2030, 1, 1),
            ))
            .unwrap();

        let result = service.verify(&customer, today());
        assert!(result.is_verified());

        // Feeding the result back into the aggregate completes the flow.
        customer.verify(result).unwrap();
        assert_eq!(
            customer.verification_status(),
            crate::customer::VerificationStatus::Verified
        );
    }
}
