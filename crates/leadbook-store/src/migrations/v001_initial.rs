//! v001 -- Initial schema creation.
//!
//! Creates the two core tables: `leads` and `distributors`.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Leads
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS leads (
    id          TEXT PRIMARY KEY NOT NULL,   -- UUID v4
    owner_id    TEXT NOT NULL,               -- distributor uid, unenforced
    full_name   TEXT NOT NULL,
    contact1    TEXT NOT NULL UNIQUE,        -- normalized
    contact2    TEXT,                        -- normalized, nullable
    notes       TEXT,
    date_logged TEXT                         -- naive UTC, '%Y-%m-%d %H:%M:%S'
);

-- Cross-column uniqueness (contact1 vs contact2) is checked at intake;
-- these constraints back the per-column half.
CREATE UNIQUE INDEX IF NOT EXISTS idx_leads_contact2
    ON leads(contact2) WHERE contact2 IS NOT NULL;

CREATE INDEX IF NOT EXISTS idx_leads_owner_id ON leads(owner_id);
CREATE INDEX IF NOT EXISTS idx_leads_date_logged ON leads(date_logged);

-- ----------------------------------------------------------------
-- Distributors
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS distributors (
    uid        TEXT PRIMARY KEY NOT NULL,    -- identity-provider uid
    full_name  TEXT,
    email      TEXT,
    last_login TEXT                          -- naive UTC, '%Y-%m-%d %H:%M:%S'
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
