//! Intake and query operations for [`ClientLead`] records.

use chrono::NaiveDateTime;
use rusqlite::params;
use uuid::Uuid;

use leadbook_shared::constants::STORED_TIMESTAMP_FORMAT;
use leadbook_shared::{BackendError, ClientLead, LeadReader, NewLead};

use crate::database::Database;
use crate::error::{Result, StoreError};

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Validate, normalize and store a new lead.
    ///
    /// `date_logged` is stamped from the store clock; callers cannot
    /// supply it.  Returns the record as persisted.
    pub fn submit_lead(&self, lead: &NewLead) -> Result<ClientLead> {
        let lead = lead.normalized()?;

        if self.contact_in_use(&lead.contact1)? {
            return Err(StoreError::DuplicateContact(lead.contact1));
        }
        if let Some(c2) = &lead.contact2 {
            if self.contact_in_use(c2)? {
                return Err(StoreError::DuplicateContact(c2.clone()));
            }
        }

        let stored = ClientLead {
            id: Uuid::new_v4(),
            owner_id: lead.owner_id,
            full_name: lead.full_name,
            contact1: lead.contact1,
            contact2: lead.contact2,
            notes: lead.notes,
            date_logged: Some(self.now_naive()),
        };
        self.insert_lead(&stored)?;

        tracing::info!(id = %stored.id, owner_id = %stored.owner_id, "lead submitted");
        Ok(stored)
    }

    /// Insert a fully-formed lead record as-is.
    ///
    /// For tests and embedders backfilling rows with known timestamps.
    /// Skips validation and the cross-column contact check that
    /// [`Database::submit_lead`] runs; only the schema's per-column
    /// uniqueness still applies.
    pub fn insert_lead(&self, lead: &ClientLead) -> Result<()> {
        self.conn().execute(
            "INSERT INTO leads (id, owner_id, full_name, contact1, contact2, notes, date_logged)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                lead.id.to_string(),
                lead.owner_id,
                lead.full_name,
                lead.contact1,
                lead.contact2,
                lead.notes,
                lead
                    .date_logged
                    .map(|t| t.format(STORED_TIMESTAMP_FORMAT).to_string()),
            ],
        )?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// `true` when `contact` already appears in any lead's `contact1` or
    /// `contact2` column.
    pub fn contact_in_use(&self, contact: &str) -> Result<bool> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM leads WHERE contact1 = ?1 OR contact2 = ?1",
            params![contact],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Fetch a single lead by id.
    pub fn get_lead(&self, id: Uuid) -> Result<ClientLead> {
        self.conn()
            .query_row(
                "SELECT id, owner_id, full_name, contact1, contact2, notes, date_logged
                 FROM leads WHERE id = ?1",
                params![id.to_string()],
                row_to_lead,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// Fetch every lead, ordered by log time then id.
    ///
    /// Rows without a timestamp sort first.  The fixed order keeps
    /// downstream first-seen tie-breaks reproducible.
    pub fn all_leads(&self) -> Result<Vec<ClientLead>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, owner_id, full_name, contact1, contact2, notes, date_logged
             FROM leads
             ORDER BY date_logged ASC, id ASC",
        )?;

        let rows = stmt.query_map([], row_to_lead)?;

        let mut leads = Vec::new();
        for row in rows {
            leads.push(row?);
        }
        Ok(leads)
    }

    /// Fetch the leads owned by one distributor, newest first.  Rows
    /// without a timestamp sort last.
    pub fn leads_for_owner(&self, owner_id: &str) -> Result<Vec<ClientLead>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, owner_id, full_name, contact1, contact2, notes, date_logged
             FROM leads
             WHERE owner_id = ?1
             ORDER BY date_logged DESC, id ASC",
        )?;

        let rows = stmt.query_map(params![owner_id], row_to_lead)?;

        let mut leads = Vec::new();
        for row in rows {
            leads.push(row?);
        }
        Ok(leads)
    }

    /// Fetch leads whose `date_logged` falls in the half-open naive-UTC
    /// window `[start, end)`.  Rows without a timestamp never match.
    pub fn leads_logged_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<ClientLead>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, owner_id, full_name, contact1, contact2, notes, date_logged
             FROM leads
             WHERE date_logged >= ?1 AND date_logged < ?2
             ORDER BY date_logged ASC, id ASC",
        )?;

        let rows = stmt.query_map(
            params![
                start.format(STORED_TIMESTAMP_FORMAT).to_string(),
                end.format(STORED_TIMESTAMP_FORMAT).to_string(),
            ],
            row_to_lead,
        )?;

        let mut leads = Vec::new();
        for row in rows {
            leads.push(row?);
        }
        Ok(leads)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`ClientLead`].
fn row_to_lead(row: &rusqlite::Row<'_>) -> rusqlite::Result<ClientLead> {
    let id_str: String = row.get(0)?;
    let owner_id: String = row.get(1)?;
    let full_name: String = row.get(2)?;
    let contact1: String = row.get(3)?;
    let contact2: Option<String> = row.get(4)?;
    let notes: Option<String> = row.get(5)?;
    let logged_str: Option<String> = row.get(6)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let date_logged = logged_str
        .map(|s| NaiveDateTime::parse_from_str(&s, STORED_TIMESTAMP_FORMAT))
        .transpose()
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(ClientLead {
        id,
        owner_id,
        full_name,
        contact1,
        contact2,
        notes,
        date_logged,
    })
}

impl LeadReader for Database {
    fn all_leads(&self) -> std::result::Result<Vec<ClientLead>, BackendError> {
        Database::all_leads(self).map_err(BackendError::from)
    }

    fn leads_for_owner(&self, owner_id: &str) -> std::result::Result<Vec<ClientLead>, BackendError> {
        Database::leads_for_owner(self, owner_id).map_err(BackendError::from)
    }

    fn leads_logged_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> std::result::Result<Vec<ClientLead>, BackendError> {
        Database::leads_logged_between(self, start, end).map_err(BackendError::from)
    }
}
