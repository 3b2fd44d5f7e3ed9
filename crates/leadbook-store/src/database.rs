//! Database connection management.
//!
//! The [`Database`] struct owns a [`rusqlite::Connection`] and guarantees
//! that migrations are run before any other operation.  It also carries
//! the clock used to stamp `date_logged` and `last_login`, injectable so
//! tests can pin time.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDateTime;
use directories::ProjectDirs;
use rusqlite::Connection;

use leadbook_shared::{Clock, SystemClock};

use crate::error::{Result, StoreError};
use crate::migrations;

/// Wrapper around a [`rusqlite::Connection`].
pub struct Database {
    conn: Connection,
    clock: Arc<dyn Clock>,
}

impl Database {
    /// Open (or create) the default application database.
    ///
    /// The database file is placed in the platform-appropriate data
    /// directory:
    /// - Linux:   `~/.local/share/leadbook/leadbook.db`
    /// - macOS:   `~/Library/Application Support/com.leadbook.leadbook/leadbook.db`
    /// - Windows: `{FOLDERID_RoamingAppData}\leadbook\leadbook\data\leadbook.db`
    pub fn new() -> Result<Self> {
        let project_dirs =
            ProjectDirs::from("com", "leadbook", "leadbook").ok_or(StoreError::NoDataDir)?;

        let data_dir = project_dirs.data_dir();
        std::fs::create_dir_all(data_dir)?;

        let db_path = data_dir.join("leadbook.db");

        tracing::info!(path = %db_path.display(), "opening database");

        Self::open_at(&db_path)
    }

    /// Open (or create) a database at an explicit path, stamping records
    /// with the system clock.
    ///
    /// This is useful for tests and for embedding the store inside custom
    /// directory layouts.
    pub fn open_at(path: &Path) -> Result<Self> {
        Self::open_at_with_clock(path, Arc::new(SystemClock))
    }

    /// Open (or create) a database at an explicit path with an injected
    /// clock.
    pub fn open_at_with_clock(path: &Path, clock: Arc<dyn Clock>) -> Result<Self> {
        let conn = Connection::open(path)?;

        // Recommended SQLite settings.
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        // Run schema migrations.
        migrations::run_migrations(&conn)?;

        Ok(Self { conn, clock })
    }

    /// Return a reference to the underlying `rusqlite::Connection`.
    ///
    /// Callers should prefer the typed CRUD helpers, but direct access is
    /// occasionally needed for ad-hoc queries.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Return the filesystem path of the open database (if any).
    pub fn path(&self) -> Option<PathBuf> {
        self.conn.path().map(PathBuf::from)
    }

    /// Current instant from the store clock, naive UTC, as persisted in
    /// timestamp columns.
    pub(crate) fn now_naive(&self) -> NaiveDateTime {
        self.clock.now_utc().naive_utc()
    }
}
