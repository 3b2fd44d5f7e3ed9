//! # leadbook-shared
//!
//! Domain models and ports shared by the leadbook crates.
//!
//! The crate defines the lead and distributor records, the intake
//! validation rules, the reader traits the report layer consumes, and the
//! injectable clock.  It carries no storage or report logic of its own.

pub mod clock;
pub mod constants;
pub mod models;
pub mod readers;

mod error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{BackendError, LeadValidationError};
pub use models::*;
pub use readers::{DistributorReader, LeadReader};
