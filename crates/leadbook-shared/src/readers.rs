//! Read ports the report layer consumes.
//!
//! The aggregator never talks to a concrete store; it sees these two
//! traits.  `leadbook-store` implements them over SQLite, and the report
//! crate ships in-memory fakes for tests.

use chrono::NaiveDateTime;

use crate::error::BackendError;
use crate::models::{ClientLead, Distributor};

/// Read access to the lead collection.
pub trait LeadReader {
    /// Every lead.  The order must be reproducible across calls, since
    /// downstream first-seen tie-breaks depend on it.
    fn all_leads(&self) -> Result<Vec<ClientLead>, BackendError>;

    /// The leads owned by one distributor, newest first; leads without a
    /// timestamp come last.
    fn leads_for_owner(&self, owner_id: &str) -> Result<Vec<ClientLead>, BackendError>;

    /// Leads whose `date_logged` falls within the half-open naive-UTC
    /// window `[start, end)`.  Leads without a timestamp never match.
    fn leads_logged_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ClientLead>, BackendError>;
}

/// Read access to the distributor directory.
pub trait DistributorReader {
    /// Every known distributor profile.
    fn all_distributors(&self) -> Result<Vec<Distributor>, BackendError>;
}
