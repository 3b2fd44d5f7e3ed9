//! Report assembly.
//!
//! [`Reporter`] owns the injected data sources and builds the result
//! structures the presentation layer renders.  The three report entry
//! points never propagate backend failures: the affected KPI fields carry
//! the [`DATA_ERROR`] / [`SYSTEM_ERROR`] markers and every field that
//! could still be computed keeps its value.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use leadbook_shared::{
    BackendError, ClientLead, Clock, Distributor, DistributorReader, LeadReader,
};

use crate::config::ReportConfig;
use crate::format::{format_display, format_last_login};
use crate::tally::{
    display_name_map, owner_counts, owner_monthly_counts, resolve_owner_name, top_distributor,
    top_n_distributors, LeaderboardEntry,
};
use crate::window::MonthWindow;

/// Sentinel shown when a KPI has no data to draw from.
pub const NO_DATA: &str = "N/A";

/// Marker shown when the backing store could not be reached.
pub const DATA_ERROR: &str = "Data Error";

/// Marker shown when report assembly failed for any other reason.
pub const SYSTEM_ERROR: &str = "System Error";

/// Leaderboard rows returned when the caller has no size preference.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 3;

// ---------------------------------------------------------------------------
// Result structures
// ---------------------------------------------------------------------------

/// One dashboard row: a lead joined with its distributor's display label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeadRow {
    /// The stored lead record.
    pub lead: ClientLead,
    /// Display label of the owning distributor.
    pub distributor_name: String,
    /// `date_logged` rendered in the report timezone.
    pub date_logged_display: String,
}

/// Everything the client-overview dashboard renders.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientDashboard {
    pub leads: Vec<LeadRow>,
    pub total_leads: u64,
    pub leads_this_month: u64,
    /// Top distributor of the current local month, or a marker.
    pub top_distributor_name: String,
    pub top_distributor_count: u64,
}

/// One row of a distributor's own lead list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersonalLead {
    /// The stored lead record.
    pub lead: ClientLead,
    /// `date_logged` rendered in the report timezone.
    pub date_logged_display: String,
}

/// A distributor's personal totals plus the global monthly front-runner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EmployeeLeadReport {
    pub leads: Vec<PersonalLead>,
    pub total_leads: u64,
    pub leads_this_month: u64,
    /// The month's top distributor across all owners, not the requesting
    /// one's own figure.
    pub top_distributor_name: String,
    pub top_distributor_count: u64,
}

/// One row of the distributor roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DistributorProfile {
    /// The directory record.
    pub distributor: Distributor,
    /// Resolved display label.
    pub display_label: String,
    /// Last sign-in rendered in the report timezone, `"Never"` when
    /// absent.
    pub last_login_display: String,
}

// ---------------------------------------------------------------------------
// Reporter
// ---------------------------------------------------------------------------

/// Assembles KPI reports from injected data sources.
pub struct Reporter {
    leads: Arc<dyn LeadReader>,
    distributors: Arc<dyn DistributorReader>,
    clock: Arc<dyn Clock>,
    config: ReportConfig,
}

impl Reporter {
    /// Create a reporter over the given readers, clock and configuration.
    pub fn new(
        leads: Arc<dyn LeadReader>,
        distributors: Arc<dyn DistributorReader>,
        clock: Arc<dyn Clock>,
        config: ReportConfig,
    ) -> Self {
        Self {
            leads,
            distributors,
            clock,
            config,
        }
    }

    fn window(&self) -> MonthWindow {
        MonthWindow::current(self.clock.as_ref(), self.config.timezone)
    }

    /// Build the client-overview dashboard: every lead with resolved
    /// distributor names and display dates, total and current-month
    /// counts, and the month's top distributor.
    pub fn client_dashboard(&self) -> ClientDashboard {
        let window = self.window();
        let mut failure: Option<&'static str> = None;

        let names = match self.distributors.all_distributors() {
            Ok(list) => display_name_map(&list),
            Err(e) => {
                log_backend_error("distributor directory", &e);
                failure = Some(marker_for(&e));
                HashMap::new()
            }
        };

        let leads = match self.leads.all_leads() {
            Ok(list) => list,
            Err(e) => {
                log_backend_error("lead collection", &e);
                failure.get_or_insert(marker_for(&e));
                Vec::new()
            }
        };

        let total_leads = leads.len() as u64;
        let monthly = owner_monthly_counts(&leads, &window);
        let leads_this_month = monthly.grand_total();

        let top = if failure.is_none() {
            top_distributor(&monthly, &names)
        } else {
            None
        };
        let (top_distributor_name, top_distributor_count) = finish_top(top, failure);

        let rows = leads
            .into_iter()
            .map(|lead| LeadRow {
                distributor_name: resolve_owner_name(&lead.owner_id, &names),
                date_logged_display: format_display(window.localize_or_now(lead.date_logged)),
                lead,
            })
            .collect();

        ClientDashboard {
            leads: rows,
            total_leads,
            leads_this_month,
            top_distributor_name,
            top_distributor_count,
        }
    }

    /// Build one distributor's lead report: their own leads and totals,
    /// plus the global monthly front-runner from the windowed leaderboard
    /// query.
    pub fn employee_lead_report(&self, owner_id: &str) -> EmployeeLeadReport {
        let window = self.window();
        let mut failure: Option<&'static str> = None;

        let names = match self.distributors.all_distributors() {
            Ok(list) => display_name_map(&list),
            Err(e) => {
                log_backend_error("distributor directory", &e);
                failure = Some(marker_for(&e));
                HashMap::new()
            }
        };

        let own = match self.leads.leads_for_owner(owner_id) {
            Ok(list) => list,
            Err(e) => {
                log_backend_error("personal lead query", &e);
                failure.get_or_insert(marker_for(&e));
                Vec::new()
            }
        };

        let total_leads = own.len() as u64;
        let leads_this_month = own
            .iter()
            .filter(|l| window.matches_local_month(l.date_logged))
            .count() as u64;

        let leads = own
            .into_iter()
            .map(|lead| PersonalLead {
                date_logged_display: format_display(window.localize_or_now(lead.date_logged)),
                lead,
            })
            .collect();

        // The leaderboard half only counts owners present in the
        // directory.
        let top = if failure.is_none() {
            match self
                .leads
                .leads_logged_between(window.start_utc, window.end_utc)
            {
                Ok(list) => {
                    let mut counts = owner_counts(&list);
                    counts.retain_known(&names);
                    top_distributor(&counts, &names)
                }
                Err(e) => {
                    log_backend_error("leaderboard query", &e);
                    failure = Some(marker_for(&e));
                    None
                }
            }
        } else {
            None
        };
        let (top_distributor_name, top_distributor_count) = finish_top(top, failure);

        EmployeeLeadReport {
            leads,
            total_leads,
            leads_this_month,
            top_distributor_name,
            top_distributor_count,
        }
    }

    /// Build the monthly top-`n` leaderboard over known distributors.
    ///
    /// Any backend failure is logged and yields an empty board.
    pub fn monthly_leaderboard(&self, top_n: usize) -> Vec<LeaderboardEntry> {
        let window = self.window();

        let names = match self.distributors.all_distributors() {
            Ok(list) => display_name_map(&list),
            Err(e) => {
                log_backend_error("distributor directory", &e);
                return Vec::new();
            }
        };

        let leads = match self
            .leads
            .leads_logged_between(window.start_utc, window.end_utc)
        {
            Ok(list) => list,
            Err(e) => {
                log_backend_error("leaderboard query", &e);
                return Vec::new();
            }
        };

        let mut counts = owner_counts(&leads);
        counts.retain_known(&names);
        top_n_distributors(&counts, &names, top_n)
    }

    /// Every distributor profile with display label and formatted last
    /// sign-in.
    ///
    /// Unlike the report operations, this propagates backend failures.
    pub fn distributor_roster(&self) -> Result<Vec<DistributorProfile>, BackendError> {
        let list = self.distributors.all_distributors()?;
        let tz = self.config.timezone;

        Ok(list
            .into_iter()
            .map(|d| DistributorProfile {
                display_label: d.display_label(),
                last_login_display: format_last_login(d.last_login, tz),
                distributor: d,
            })
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The marker a failure renders as.  The distinction only matters for
/// logging; callers see an opaque string either way.
fn marker_for(err: &BackendError) -> &'static str {
    match err {
        BackendError::Unavailable(_) => DATA_ERROR,
        BackendError::Unexpected(_) => SYSTEM_ERROR,
    }
}

fn log_backend_error(source: &str, err: &BackendError) {
    match err {
        BackendError::Unavailable(_) => {
            warn!(source = %source, error = %err, "backend unavailable during report assembly");
        }
        BackendError::Unexpected(_) => {
            error!(source = %source, error = %err, "unexpected failure during report assembly");
        }
    }
}

fn finish_top(top: Option<(String, u64)>, failure: Option<&'static str>) -> (String, u64) {
    match failure {
        Some(marker) => (marker.to_string(), 0),
        None => match top {
            Some((name, count)) => (name, count),
            None => (NO_DATA.to_string(), 0),
        },
    }
}
