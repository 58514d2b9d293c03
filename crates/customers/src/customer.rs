//! The customer aggregate.

use serde::{Deserialize, Serialize};

use fleetrent_core::{Address, AggregateRoot, Entity, EventBuffer, EventId, define_id};
use fleetrent_events::DomainEvent;

use crate::document::{IdentityDocument, IdentityDocumentId};
use crate::error::CustomerError;
use crate::value_objects::{
    BehaviorProfile, ContactInformation, PersonalInformation, RiskProfile, VerificationResult,
};

define_id!(
    /// Identifier of a [`Customer`].
    CustomerId
);

/// Where a customer stands in the identity-verification process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Unverified,
    Pending,
    Verified,
    Expired,
}

/// Event: CustomerAddressUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressUpdated {
    pub event_id: EventId,
    pub customer_id: CustomerId,
    pub address: Address,
}

/// Event: CustomerPersonalInformationUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInformationUpdated {
    pub event_id: EventId,
    pub customer_id: CustomerId,
    pub personal_information: PersonalInformation,
}

/// Event: CustomerContactInformationUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInformationUpdated {
    pub event_id: EventId,
    pub customer_id: CustomerId,
    pub contact_information: ContactInformation,
}

/// Event: CustomerRiskProfileUpdated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskProfileUpdated {
    pub event_id: EventId,
    pub customer_id: CustomerId,
    pub risk_profile: RiskProfile,
}

/// Event: CustomerBehaviorProfileUpdated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorProfileUpdated {
    pub event_id: EventId,
    pub customer_id: CustomerId,
    pub behavior_profile: BehaviorProfile,
}

/// Event: CustomerIdentityDocumentAdded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityDocumentAdded {
    pub event_id: EventId,
    pub customer_id: CustomerId,
    pub document_id: IdentityDocumentId,
}

/// Event: CustomerVerified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerVerified {
    pub event_id: EventId,
    pub customer_id: CustomerId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CustomerEvent {
    AddressUpdated(AddressUpdated),
    PersonalInformationUpdated(PersonalInformationUpdated),
    ContactInformationUpdated(ContactInformationUpdated),
    RiskProfileUpdated(RiskProfileUpdated),
    BehaviorProfileUpdated(BehaviorProfileUpdated),
    IdentityDocumentAdded(IdentityDocumentAdded),
    CustomerVerified(CustomerVerified),
}

impl DomainEvent for CustomerEvent {
    fn event_id(&self) -> EventId {
        match self {
            CustomerEvent::AddressUpdated(e) => e.event_id,
            CustomerEvent::PersonalInformationUpdated(e) => e.event_id,
            CustomerEvent::ContactInformationUpdated(e) => e.event_id,
            CustomerEvent::RiskProfileUpdated(e) => e.event_id,
            CustomerEvent::BehaviorProfileUpdated(e) => e.event_id,
            CustomerEvent::IdentityDocumentAdded(e) => e.event_id,
            CustomerEvent::CustomerVerified(e) => e.event_id,
        }
    }

    fn event_type(&self) -> &'static str {
        match self {
            CustomerEvent::AddressUpdated(_) => "customers.customer.address_updated",
            CustomerEvent::PersonalInformationUpdated(_) => {
                "customers.customer.personal_information_updated"
            }
            CustomerEvent::ContactInformationUpdated(_) => {
                "customers.customer.contact_information_updated"
            }
            CustomerEvent::RiskProfileUpdated(_) => "customers.customer.risk_profile_updated",
            CustomerEvent::BehaviorProfileUpdated(_) => {
                "customers.customer.behavior_profile_updated"
            }
            CustomerEvent::IdentityDocumentAdded(_) => {
                "customers.customer.identity_document_added"
            }
            CustomerEvent::CustomerVerified(_) => "customers.customer.verified",
        }
    }
}

/// Aggregate root: a customer.
///
/// Holds the customer's personal, contact and address data, the identity
/// documents on file (unique by document number), a read-only risk-profile
/// snapshot owned upstream, and the verification gate.
#[derive(Debug, Clone)]
pub struct Customer {
    id: CustomerId,
    personal_information: PersonalInformation,
    contact_information: ContactInformation,
    address: Address,
    risk_profile: RiskProfile,
    behavior_profile: Option<BehaviorProfile>,
    documents: Vec<IdentityDocument>,
    verification_status: VerificationStatus,
    version: u64,
    events: EventBuffer<CustomerEvent>,
}

impl Customer {
    /// Register a customer. Without an upstream risk snapshot the profile
    /// defaults to low risk; verification starts at `Unverified`.
    pub fn new(
        id: CustomerId,
        personal_information: PersonalInformation,
        contact_information: ContactInformation,
        address: Address,
        risk_profile: Option<RiskProfile>,
    ) -> Self {
        Self {
            id,
            personal_information,
            contact_information,
            address,
            risk_profile: risk_profile.unwrap_or_default(),
            behavior_profile: None,
            documents: Vec::new(),
            verification_status: VerificationStatus::Unverified,
            version: 0,
            events: EventBuffer::new(),
        }
    }

    pub fn personal_information(&self) -> &PersonalInformation {
        &self.personal_information
    }

    pub fn contact_information(&self) -> &ContactInformation {
        &self.contact_information
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn risk_profile(&self) -> RiskProfile {
        self.risk_profile
    }

    pub fn behavior_profile(&self) -> Option<&BehaviorProfile> {
        self.behavior_profile.as_ref()
    }

    pub fn documents(&self) -> &[IdentityDocument] {
        &self.documents
    }

    pub fn verification_status(&self) -> VerificationStatus {
        self.verification_status
    }

    pub fn update_address(&mut self, address: Address) {
        self.address = address.clone();
        self.version += 1;
        self.events.record(CustomerEvent::AddressUpdated(AddressUpdated {
            event_id: EventId::new(),
            customer_id: self.id,
            address,
        }));
    }

    pub fn update_personal_information(&mut self, personal_information: PersonalInformation) {
        self.personal_information = personal_information.clone();
        self.version += 1;
        self.events
            .record(CustomerEvent::PersonalInformationUpdated(
                PersonalInformationUpdated {
                    event_id: EventId::new(),
                    customer_id: self.id,
                    personal_information,
                },
            ));
    }

    pub fn update_contact_information(&mut self, contact_information: ContactInformation) {
        self.contact_information = contact_information.clone();
        self.version += 1;
        self.events
            .record(CustomerEvent::ContactInformationUpdated(
                ContactInformationUpdated {
                    event_id: EventId::new(),
                    customer_id: self.id,
                    contact_information,
                },
            ));
    }

    /// Replace the risk snapshot with a newer one from upstream.
    pub fn update_risk_profile(&mut self, risk_profile: RiskProfile) {
        self.risk_profile = risk_profile;
        self.version += 1;
        self.events
            .record(CustomerEvent::RiskProfileUpdated(RiskProfileUpdated {
                event_id: EventId::new(),
                customer_id: self.id,
                risk_profile,
            }));
    }

    pub fn update_behavior_profile(&mut self, behavior_profile: BehaviorProfile) {
        self.behavior_profile = Some(behavior_profile.clone());
        self.version += 1;
        self.events
            .record(CustomerEvent::BehaviorProfileUpdated(
                BehaviorProfileUpdated {
                    event_id: EventId::new(),
                    customer_id: self.id,
                    behavior_profile,
                },
            ));
    }

    /// File an identity document. Documents are unique by number.
    pub fn add_identity_document(
        &mut self,
        document: IdentityDocument,
    ) -> Result<(), CustomerError> {
        if self.documents.iter().any(|d| d.number() == document.number()) {
            return Err(CustomerError::DuplicateDocument(document.number().into()));
        }

        let document_id = document.id();
        self.documents.push(document);
        self.version += 1;
        self.events
            .record(CustomerEvent::IdentityDocumentAdded(IdentityDocumentAdded {
                event_id: EventId::new(),
                customer_id: self.id,
                document_id,
            }));
        Ok(())
    }

    /// Apply a verification decision.
    ///
    /// The decision arrives as data, not behavior: the aggregate never calls
    /// out to the policy, it only reacts to the result the service computed.
    /// A negative result is a no-op by design - the customer simply stays in
    /// their current status until the next attempt. Verifying an
    /// already-verified customer is an error.
    pub fn verify(&mut self, result: VerificationResult) -> Result<(), CustomerError> {
        if self.verification_status == VerificationStatus::Verified {
            return Err(CustomerError::AlreadyVerified);
        }

        if result.is_verified() {
            self.verification_status = VerificationStatus::Verified;
            self.version += 1;
            self.events
                .record(CustomerEvent::CustomerVerified(CustomerVerified {
                    event_id: EventId::new(),
                    customer_id: self.id,
                }));
        }

        Ok(())
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl AggregateRoot for Customer {
    type Event = CustomerEvent;

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
    use chrono::NaiveDate;

    use crate::document::{DocumentType, IdentityDocumentId};
    use crate::value_objects::{
        CommunicationPreferences, DateOfBirth, Email, Name, Nationality, Phone, PhoneType,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
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

    fn document(number: &str) -> IdentityDocument {
        IdentityDocument::new(
            IdentityDocumentId::new(),
            DocumentType::Passport,
            number,
            "UAE",
            date(2020, 1, 1),
            date(2030, 1, 1),
        )
    }

    #[test]
    fn new_customers_default_to_low_risk_and_unverified() {
        let customer = test_customer();
        assert_eq!(
            customer.risk_profile().risk_level(),
            crate::value_objects::RiskLevel::Low
        );
        assert_eq!(
            customer.verification_status(),
            VerificationStatus::Unverified
        );
        assert!(customer.pending_events().is_empty());
    }

    #[test]
    fn duplicate_document_numbers_are_rejected() {
        let mut customer = test_customer();

        customer.add_identity_document(document("P111")).unwrap();
        let err = customer
            .add_identity_document(document("P111"))
            .unwrap_err();
        match err {
            CustomerError::DuplicateDocument(number) => assert_eq!(number, "P111"),
            _ => panic!("Expected DuplicateDocument"),
        }
        assert_eq!(customer.documents().len(), 1);
    }

    #[test]
    fn positive_verification_sets_status_and_raises_event() {
        let mut customer = test_customer();

        customer.verify(VerificationResult::verified()).unwrap();
        assert_eq!(customer.verification_status(), VerificationStatus::Verified);

        match customer.pending_events().last().unwrap() {
            CustomerEvent::CustomerVerified(_) => {}
            _ => panic!("Expected CustomerVerified"),
        }
    }

    #[test]
    fn negative_verification_is_a_silent_no_op() {
        let mut customer = test_customer();

        customer.verify(VerificationResult::failed()).unwrap();
        assert_eq!(
            customer.verification_status(),
            VerificationStatus::Unverified
        );
        assert!(customer.pending_events().is_empty());
    }

    #[test]
    fn verifying_twice_is_an_error() {
        let mut customer = test_customer();
        customer.verify(VerificationResult::verified()).unwrap();

        let err = customer.verify(VerificationResult::verified()).unwrap_err();
        match err {
            CustomerError::AlreadyVerified => {}
            _ => panic!("Expected AlreadyVerified"),
        }

        // Even a failed result is rejected once verified.
        let err = customer.verify(VerificationResult::failed()).unwrap_err();
        match err {
            CustomerError::AlreadyVerified => {}
            _ => panic!("Expected AlreadyVerified"),
        }
    }

    #[test]
    fn updates_replace_value_objects_and_record_events() {
        let mut customer = test_customer();

        let new_address = Address::new("2 Palm Ave", "Abu Dhabi", "Abu Dhabi", "11111", "AE").unwrap();
        customer.update_address(new_address.clone());
        assert_eq!(customer.address(), &new_address);

        customer.update_risk_profile(RiskProfile::new(crate::value_objects::RiskLevel::High));
        assert_eq!(
            customer.risk_profile().risk_level(),
            crate::value_objects::RiskLevel::High
        );

        let types: Vec<_> = customer
            .pending_events()
            .iter()
            .map(|e| e.event_type())
            .collect();
        assert_eq!(
            types,
            vec![
                "customers.customer.address_updated",
                "customers.customer.risk_profile_updated",
            ]
        );
    }
}
