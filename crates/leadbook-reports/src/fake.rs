//! In-memory reader fakes with failure injection.
//!
//! Useful for report tests and for wiring the report layer before a real
//! store exists.  `all_leads` and the window query return leads in
//! insertion order, which lets tests script first-seen tie-breaks
//! directly; `leads_for_owner` sorts newest first like the SQLite store.

use chrono::NaiveDateTime;
use uuid::Uuid;

use leadbook_shared::{
    BackendError, ClientLead, Distributor, DistributorReader, LeadReader,
};

/// Failure a fake reader produces on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeFailure {
    /// Report the backend as unreachable.
    Unavailable,
    /// Report an unexpected internal fault.
    Unexpected,
}

impl FakeFailure {
    fn to_error(self) -> BackendError {
        match self {
            FakeFailure::Unavailable => BackendError::Unavailable("fake backend offline".to_string()),
            FakeFailure::Unexpected => BackendError::Unexpected("fake backend fault".to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Lead reader
// ---------------------------------------------------------------------------

/// [`LeadReader`] backed by an in-memory list.
#[derive(Debug, Default)]
pub struct FakeLeadReader {
    leads: Vec<ClientLead>,
    failure: Option<FakeFailure>,
}

impl FakeLeadReader {
    pub fn new(leads: Vec<ClientLead>) -> Self {
        Self {
            leads,
            failure: None,
        }
    }

    /// A reader whose every call fails the given way.
    pub fn failing(failure: FakeFailure) -> Self {
        Self {
            leads: Vec::new(),
            failure: Some(failure),
        }
    }
}

impl LeadReader for FakeLeadReader {
    fn all_leads(&self) -> Result<Vec<ClientLead>, BackendError> {
        match self.failure {
            Some(f) => Err(f.to_error()),
            None => Ok(self.leads.clone()),
        }
    }

    fn leads_for_owner(&self, owner_id: &str) -> Result<Vec<ClientLead>, BackendError> {
        match self.failure {
            Some(f) => Err(f.to_error()),
            None => {
                let mut own: Vec<ClientLead> = self
                    .leads
                    .iter()
                    .filter(|l| l.owner_id == owner_id)
                    .cloned()
                    .collect();
                // Newest first, unstamped rows last; ties keep insertion
                // order.
                own.sort_by(|a, b| b.date_logged.cmp(&a.date_logged));
                Ok(own)
            }
        }
    }

    fn leads_logged_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ClientLead>, BackendError> {
        match self.failure {
            Some(f) => Err(f.to_error()),
            None => Ok(self
                .leads
                .iter()
                .filter(|l| matches!(l.date_logged, Some(t) if start <= t && t < end))
                .cloned()
                .collect()),
        }
    }
}

// ---------------------------------------------------------------------------
// Distributor reader
// ---------------------------------------------------------------------------

/// [`DistributorReader`] backed by an in-memory list.
#[derive(Debug, Default)]
pub struct FakeDistributorReader {
    distributors: Vec<Distributor>,
    failure: Option<FakeFailure>,
}

impl FakeDistributorReader {
    pub fn new(distributors: Vec<Distributor>) -> Self {
        Self {
            distributors,
            failure: None,
        }
    }

    /// A reader whose every call fails the given way.
    pub fn failing(failure: FakeFailure) -> Self {
        Self {
            distributors: Vec::new(),
            failure: Some(failure),
        }
    }
}

impl DistributorReader for FakeDistributorReader {
    fn all_distributors(&self) -> Result<Vec<Distributor>, BackendError> {
        match self.failure {
            Some(f) => Err(f.to_error()),
            None => Ok(self.distributors.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Record builders
// ---------------------------------------------------------------------------

/// Build a lead with a fresh id for the given owner and log time.
pub fn sample_lead(owner_id: &str, date_logged: Option<NaiveDateTime>) -> ClientLead {
    let id = Uuid::new_v4();
    ClientLead {
        id,
        owner_id: owner_id.to_string(),
        full_name: "Sample Client".to_string(),
        contact1: format!("contact-{}", id.simple()),
        contact2: None,
        notes: None,
        date_logged,
    }
}

/// Build a distributor profile with the given uid and display name.
pub fn sample_distributor(uid: &str, full_name: Option<&str>) -> Distributor {
    Distributor {
        uid: uid.to_string(),
        full_name: full_name.map(String::from),
        email: None,
        last_login: None,
    }
}
