//! Domain model structs shared by the store and the report layer.
//!
//! Every struct derives `Serialize` and `Deserialize` so it can be handed
//! directly to a presentation layer.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::MIN_SECONDARY_CONTACT_LEN;
use crate::error::LeadValidationError;

// ---------------------------------------------------------------------------
// ClientLead
// ---------------------------------------------------------------------------

/// A prospective-client record logged by a distributor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientLead {
    /// Unique lead identifier, assigned by the store on creation.
    pub id: Uuid,
    /// Uid of the distributor who logged the lead.  Not enforced against
    /// the distributor directory; consumers must tolerate unknown owners.
    pub owner_id: String,
    /// Client full name.
    pub full_name: String,
    /// Primary contact, stored normalized (trimmed, lowercased).
    pub contact1: String,
    /// Optional secondary contact, stored normalized.
    pub contact2: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Creation timestamp stamped by the store, naive UTC.  `None` when the
    /// timestamp has not materialized yet; consumers substitute "now".
    pub date_logged: Option<NaiveDateTime>,
}

// ---------------------------------------------------------------------------
// Distributor
// ---------------------------------------------------------------------------

/// A distributor profile mirrored from the identity directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Distributor {
    /// Identity-provider uid.
    pub uid: String,
    /// Display name, when the profile carries one.
    pub full_name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Last sign-in, naive UTC.  `None` means never signed in.
    pub last_login: Option<NaiveDateTime>,
}

impl Distributor {
    /// Label shown wherever this distributor is named.  Falls back to an
    /// id-derived placeholder when the profile has no usable full name.
    pub fn display_label(&self) -> String {
        match &self.full_name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("ID: {}", self.uid),
        }
    }
}

// ---------------------------------------------------------------------------
// NewLead
// ---------------------------------------------------------------------------

/// Input payload for logging a new lead.
///
/// [`NewLead::normalized`] is the validation gate; stores must call it
/// before persisting anything.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewLead {
    pub owner_id: String,
    pub full_name: String,
    pub contact1: String,
    pub contact2: Option<String>,
    pub notes: Option<String>,
}

impl NewLead {
    /// Validate the payload and return a copy with contacts normalized.
    ///
    /// Rules: the full name and primary contact must be nonempty after
    /// normalization; a secondary contact must be at least
    /// [`MIN_SECONDARY_CONTACT_LEN`] characters and differ from the
    /// primary.  A secondary contact that normalizes to empty is dropped.
    pub fn normalized(&self) -> Result<NewLead, LeadValidationError> {
        let full_name = self.full_name.trim().to_string();
        if full_name.is_empty() {
            return Err(LeadValidationError::EmptyFullName);
        }

        let contact1 = normalize_contact(&self.contact1);
        if contact1.is_empty() {
            return Err(LeadValidationError::EmptyPrimaryContact);
        }

        let contact2 = self
            .contact2
            .as_deref()
            .map(normalize_contact)
            .filter(|c| !c.is_empty());

        if let Some(c2) = &contact2 {
            let len = c2.chars().count();
            if len < MIN_SECONDARY_CONTACT_LEN {
                return Err(LeadValidationError::SecondaryContactTooShort {
                    min: MIN_SECONDARY_CONTACT_LEN,
                    got: len,
                });
            }
            if *c2 == contact1 {
                return Err(LeadValidationError::ContactsIdentical);
            }
        }

        let notes = self
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(String::from);

        Ok(NewLead {
            owner_id: self.owner_id.trim().to_string(),
            full_name,
            contact1,
            contact2,
            notes,
        })
    }
}

/// Normalize a contact value: trim surrounding whitespace, lowercase.
pub fn normalize_contact(raw: &str) -> String {
    raw.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> NewLead {
        NewLead {
            owner_id: "u1".to_string(),
            full_name: "  Jane Client  ".to_string(),
            contact1: " +256-700-111222 ".to_string(),
            contact2: Some("Jane@Example.COM".to_string()),
            notes: Some("  met at expo  ".to_string()),
        }
    }

    #[test]
    fn normalized_trims_and_lowercases() {
        let lead = payload().normalized().unwrap();
        assert_eq!(lead.full_name, "Jane Client");
        assert_eq!(lead.contact1, "+256-700-111222");
        assert_eq!(lead.contact2.as_deref(), Some("jane@example.com"));
        assert_eq!(lead.notes.as_deref(), Some("met at expo"));
    }

    #[test]
    fn empty_full_name_rejected() {
        let mut raw = payload();
        raw.full_name = "   ".to_string();
        assert!(matches!(
            raw.normalized(),
            Err(LeadValidationError::EmptyFullName)
        ));
    }

    #[test]
    fn empty_primary_contact_rejected() {
        let mut raw = payload();
        raw.contact1 = " ".to_string();
        assert!(matches!(
            raw.normalized(),
            Err(LeadValidationError::EmptyPrimaryContact)
        ));
    }

    #[test]
    fn blank_secondary_contact_becomes_none() {
        let mut raw = payload();
        raw.contact2 = Some("   ".to_string());
        let lead = raw.normalized().unwrap();
        assert_eq!(lead.contact2, None);
    }

    #[test]
    fn short_secondary_contact_rejected() {
        let mut raw = payload();
        raw.contact2 = Some("12345".to_string());
        assert!(matches!(
            raw.normalized(),
            Err(LeadValidationError::SecondaryContactTooShort { min: 7, got: 5 })
        ));
    }

    #[test]
    fn identical_contacts_rejected() {
        let mut raw = payload();
        raw.contact2 = Some(raw.contact1.to_uppercase());
        assert!(matches!(
            raw.normalized(),
            Err(LeadValidationError::ContactsIdentical)
        ));
    }

    #[test]
    fn display_label_prefers_full_name() {
        let d = Distributor {
            uid: "abc123".to_string(),
            full_name: Some("Alice Agent".to_string()),
            email: None,
            last_login: None,
        };
        assert_eq!(d.display_label(), "Alice Agent");
    }

    #[test]
    fn display_label_falls_back_to_uid() {
        let d = Distributor {
            uid: "abc123".to_string(),
            full_name: Some("  ".to_string()),
            email: None,
            last_login: None,
        };
        assert_eq!(d.display_label(), "ID: abc123");
    }
}
