//! # leadbook-reports
//!
//! KPI aggregation and report assembly over the `leadbook-shared` reader
//! ports: per-owner monthly counts, top-distributor figures, ranked
//! leaderboards and display-ready timestamps, all computed against one
//! configured IANA timezone.
//!
//! The report entry points live on [`Reporter`]; they catch backend
//! failures and render textual markers instead of propagating errors.

pub mod config;
pub mod fake;
pub mod format;
pub mod reporter;
pub mod tally;
pub mod window;

pub use config::ReportConfig;
pub use reporter::{
    ClientDashboard, DistributorProfile, EmployeeLeadReport, LeadRow, PersonalLead, Reporter,
    DATA_ERROR, DEFAULT_LEADERBOARD_SIZE, NO_DATA, SYSTEM_ERROR,
};
pub use tally::{LeaderboardEntry, MonthlyTally};
pub use window::MonthWindow;
