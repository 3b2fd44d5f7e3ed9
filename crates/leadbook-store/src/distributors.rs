//! CRUD operations for [`Distributor`] records.

use chrono::NaiveDateTime;
use rusqlite::params;

use leadbook_shared::constants::STORED_TIMESTAMP_FORMAT;
use leadbook_shared::{BackendError, Distributor, DistributorReader};

use crate::database::Database;
use crate::error::{Result, StoreError};

impl Database {
    // ------------------------------------------------------------------
    // Create / update
    // ------------------------------------------------------------------

    /// Insert or replace a distributor profile.
    pub fn put_distributor(&self, distributor: &Distributor) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO distributors (uid, full_name, email, last_login)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                distributor.uid,
                distributor.full_name,
                distributor.email,
                distributor
                    .last_login
                    .map(|t| t.format(STORED_TIMESTAMP_FORMAT).to_string()),
            ],
        )?;
        Ok(())
    }

    /// Stamp `last_login` for a distributor from the store clock.
    pub fn record_login(&self, uid: &str) -> Result<()> {
        let stamp = self.now_naive().format(STORED_TIMESTAMP_FORMAT).to_string();
        let affected = self.conn().execute(
            "UPDATE distributors SET last_login = ?2 WHERE uid = ?1",
            params![uid, stamp],
        )?;
        if affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Fetch a single distributor by uid.
    pub fn get_distributor(&self, uid: &str) -> Result<Distributor> {
        self.conn()
            .query_row(
                "SELECT uid, full_name, email, last_login
                 FROM distributors
                 WHERE uid = ?1",
                params![uid],
                row_to_distributor,
            )
            .map_err(|e| match e {
                rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
                other => StoreError::Sqlite(other),
            })
    }

    /// List every distributor, ordered by uid.
    pub fn list_distributors(&self) -> Result<Vec<Distributor>> {
        let mut stmt = self.conn().prepare(
            "SELECT uid, full_name, email, last_login
             FROM distributors
             ORDER BY uid ASC",
        )?;

        let rows = stmt.query_map([], row_to_distributor)?;

        let mut distributors = Vec::new();
        for row in rows {
            distributors.push(row?);
        }
        Ok(distributors)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete a distributor by uid.  Returns `true` if a row was deleted.
    ///
    /// Leads keep their `owner_id` and show up as unknown owners from then
    /// on.
    pub fn delete_distributor(&self, uid: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM distributors WHERE uid = ?1", params![uid])?;
        Ok(affected > 0)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` to a [`Distributor`].
fn row_to_distributor(row: &rusqlite::Row<'_>) -> rusqlite::Result<Distributor> {
    let uid: String = row.get(0)?;
    let full_name: Option<String> = row.get(1)?;
    let email: Option<String> = row.get(2)?;
    let login_str: Option<String> = row.get(3)?;

    let last_login = login_str
        .map(|s| NaiveDateTime::parse_from_str(&s, STORED_TIMESTAMP_FORMAT))
        .transpose()
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(Distributor {
        uid,
        full_name,
        email,
        last_login,
    })
}

impl DistributorReader for Database {
    fn all_distributors(&self) -> std::result::Result<Vec<Distributor>, BackendError> {
        self.list_distributors().map_err(BackendError::from)
    }
}
