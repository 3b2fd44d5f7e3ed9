//! # leadbook-store
//!
//! SQLite-backed persistence for leads and distributor profiles.
//!
//! The crate exposes a synchronous [`Database`] handle that wraps a
//! `rusqlite::Connection`, runs schema migrations on open, and provides
//! typed CRUD helpers.  It also implements the `leadbook-shared` reader
//! ports, so a `Database` can be handed straight to the report layer.

pub mod database;
pub mod distributors;
pub mod leads;
pub mod migrations;

mod error;

pub use database::Database;
pub use error::StoreError;
