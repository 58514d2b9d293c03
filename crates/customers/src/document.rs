//! Identity documents held on a customer's file.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use fleetrent_core::{Entity, define_id};

define_id!(
    /// Identifier of an [`IdentityDocument`].
    IdentityDocumentId
);

/// Kind of identity document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Passport,
    DriversLicense,
    NationalId,
}

/// Verification state of one document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pending,
    Verified,
    Failed,
}

/// A document presented as proof of identity: passport, license, national id.
///
/// Documents live inside the customer aggregate and are unique by their
/// document number. An entity: compared by identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityDocument {
    id: IdentityDocumentId,
    document_type: DocumentType,
    number: String,
    issuing_authority: String,
    issue_date: NaiveDate,
    expiry_date: NaiveDate,
    status: DocumentStatus,
}

impl IdentityDocument {
    /// A freshly added document awaits verification.
    pub fn new(
        id: IdentityDocumentId,
        document_type: DocumentType,
        number: impl Into<String>,
        issuing_authority: impl Into<String>,
        issue_date: NaiveDate,
        expiry_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            document_type,
            number: number.into(),
            issuing_authority: issuing_authority.into(),
            issue_date,
            expiry_date,
            status: DocumentStatus::Pending,
        }
    }

    pub fn document_type(&self) -> DocumentType {
        self.document_type
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn issuing_authority(&self) -> &str {
        &self.issuing_authority
    }

    pub fn issue_date(&self) -> NaiveDate {
        self.issue_date
    }

    pub fn expiry_date(&self) -> NaiveDate {
        self.expiry_date
    }

    pub fn status(&self) -> DocumentStatus {
        self.status
    }

    pub fn mark_verified(&mut self) {
        self.status = DocumentStatus::Verified;
    }

    pub fn mark_failed(&mut self) {
        self.status = DocumentStatus::Failed;
    }

    pub fn is_expired_as_of(&self, date: NaiveDate) -> bool {
        self.expiry_date < date
    }

    /// Verified and unexpired as of `date`.
    pub fn is_valid_as_of(&self, date: NaiveDate) -> bool {
        self.status == DocumentStatus::Verified && !self.is_expired_as_of(date)
    }
}

impl Entity for IdentityDocument {
    type Id = IdentityDocumentId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

impl PartialEq for IdentityDocument {
    fn eq(&self, other: &Self) -> bool {
        self.same_identity(other)
    }
}

impl Eq for IdentityDocument {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn passport() -> IdentityDocument {
        IdentityDocument::new(
            IdentityDocumentId::new(),
            DocumentType::Passport,
            "P1234567",
            "UAE",
            date(2020, 1, 1),
            date(2030, 1, 1),
        )
    }

    #[test]
    fn new_documents_start_pending_and_invalid() {
        let doc = passport();
        assert_eq!(doc.status(), DocumentStatus::Pending);
        assert!(!doc.is_valid_as_of(date(2025, 1, 1)));
    }

    #[test]
    fn verified_unexpired_documents_are_valid() {
        let mut doc = passport();
        doc.mark_verified();

        assert!(doc.is_valid_as_of(date(2025, 1, 1)));
        // Expiry day itself still counts.
        assert!(doc.is_valid_as_of(date(2030, 1, 1)));
        assert!(!doc.is_valid_as_of(date(2030, 1, 2)));
    }

    #[test]
    fn failed_documents_are_never_valid() {
        let mut doc = passport();
        doc.mark_failed();
        assert!(!doc.is_valid_as_of(date(2025, 1, 1)));
    }
}
