//! Per-owner lead tallies and ranking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use leadbook_shared::{ClientLead, Distributor};

use crate::window::MonthWindow;

// ---------------------------------------------------------------------------
// MonthlyTally
// ---------------------------------------------------------------------------

/// Per-owner lead counts that iterate in first-seen owner order.
///
/// Ranking ties resolve to whichever owner appeared first in the lead
/// sequence, so iteration order is part of the contract and a plain
/// `HashMap` will not do.
#[derive(Debug, Clone, Default)]
pub struct MonthlyTally {
    entries: Vec<(String, u64)>,
    index: HashMap<String, usize>,
}

impl MonthlyTally {
    pub fn new() -> Self {
        Self::default()
    }

    fn add(&mut self, owner_id: &str, n: u64) {
        match self.index.get(owner_id) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(owner_id.to_string(), self.entries.len());
                self.entries.push((owner_id.to_string(), n));
            }
        }
    }

    /// Add one lead to an owner's count.
    pub fn record(&mut self, owner_id: &str) {
        self.add(owner_id, 1);
    }

    /// Count for one owner, zero when unseen.
    pub fn count(&self, owner_id: &str) -> u64 {
        self.index
            .get(owner_id)
            .map(|&i| self.entries[i].1)
            .unwrap_or(0)
    }

    /// Total leads recorded across all owners.
    pub fn grand_total(&self) -> u64 {
        self.entries.iter().map(|(_, n)| n).sum()
    }

    /// Number of distinct owners seen.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Owners and counts in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.entries.iter().map(|(id, n)| (id.as_str(), *n))
    }

    /// Drop owners that have no entry in the given directory map,
    /// preserving first-seen order among the survivors.
    pub fn retain_known(&mut self, names: &HashMap<String, String>) {
        self.entries.retain(|(id, _)| names.contains_key(id));
        self.index.clear();
        for (i, (id, _)) in self.entries.iter().enumerate() {
            self.index.insert(id.clone(), i);
        }
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for MonthlyTally {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut tally = Self::new();
        for (owner, n) in iter {
            tally.add(&owner.into(), n);
        }
        tally
    }
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Count each lead that falls in the current local month against its
/// owner.
///
/// Missing timestamps count as logged now.  Owners absent from the
/// distributor directory are still counted; callers that only want known
/// distributors apply [`MonthlyTally::retain_known`] afterwards.
pub fn owner_monthly_counts(leads: &[ClientLead], window: &MonthWindow) -> MonthlyTally {
    let mut tally = MonthlyTally::new();
    for lead in leads {
        if window.matches_local_month(lead.date_logged) {
            tally.record(&lead.owner_id);
        }
    }
    tally
}

/// Count every lead against its owner, without month filtering.  Used on
/// lead lists already restricted by a window query.
pub fn owner_counts(leads: &[ClientLead]) -> MonthlyTally {
    let mut tally = MonthlyTally::new();
    for lead in leads {
        tally.record(&lead.owner_id);
    }
    tally
}

// ---------------------------------------------------------------------------
// Ranking
// ---------------------------------------------------------------------------

/// One leaderboard row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// Resolved distributor display name.
    pub name: String,
    /// Leads logged in the window.
    pub count: u64,
}

/// The owner with the highest count, resolved to a display name.
///
/// Ties go to the owner seen first.  `None` when the tally holds no
/// positive count; callers render the `"N/A"` sentinel.
pub fn top_distributor(
    counts: &MonthlyTally,
    names: &HashMap<String, String>,
) -> Option<(String, u64)> {
    let mut best: Option<(&str, u64)> = None;
    for (owner, n) in counts.iter() {
        if n == 0 {
            continue;
        }
        match best {
            Some((_, m)) if n <= m => {}
            _ => best = Some((owner, n)),
        }
    }
    best.map(|(owner, n)| (resolve_owner_name(owner, names), n))
}

/// The top `n` owners by count.
///
/// Stable sort descending by count, so equal counts keep first-seen
/// order; zero counts are excluded; empty in, empty out.
pub fn top_n_distributors(
    counts: &MonthlyTally,
    names: &HashMap<String, String>,
    n: usize,
) -> Vec<LeaderboardEntry> {
    let mut ranked: Vec<(&str, u64)> = counts.iter().filter(|(_, c)| *c > 0).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);

    ranked
        .into_iter()
        .map(|(owner, count)| LeaderboardEntry {
            name: resolve_owner_name(owner, names),
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Name resolution
// ---------------------------------------------------------------------------

/// Resolve an owner id through the directory map.
///
/// Owners missing from the map render as a truncated-id placeholder such
/// as `Unknown ID (ab12...)`.
pub fn resolve_owner_name(owner_id: &str, names: &HashMap<String, String>) -> String {
    match names.get(owner_id) {
        Some(name) => name.clone(),
        None => {
            let prefix: String = owner_id.chars().take(4).collect();
            format!("Unknown ID ({}...)", prefix)
        }
    }
}

/// Build the uid -> display label map for a directory snapshot.
pub fn display_name_map(distributors: &[Distributor]) -> HashMap<String, String> {
    distributors
        .iter()
        .map(|d| (d.uid.clone(), d.display_label()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime, TimeZone, Utc};
    use leadbook_shared::FixedClock;
    use uuid::Uuid;

    use crate::window::MonthWindow;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn lead(owner: &str, date_logged: Option<NaiveDateTime>) -> ClientLead {
        ClientLead {
            id: Uuid::new_v4(),
            owner_id: owner.to_string(),
            full_name: "Client".to_string(),
            contact1: Uuid::new_v4().to_string(),
            contact2: None,
            notes: None,
            date_logged,
        }
    }

    fn names(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(uid, name)| (uid.to_string(), name.to_string()))
            .collect()
    }

    fn march_window() -> MonthWindow {
        let now = Utc.with_ymd_and_hms(2025, 3, 5, 6, 41, 0).unwrap();
        MonthWindow::current(&FixedClock(now), chrono_tz::Africa::Kampala)
    }

    #[test]
    fn tally_iterates_in_first_seen_order() {
        let mut tally = MonthlyTally::new();
        tally.record("u2");
        tally.record("u1");
        tally.record("u2");

        let owners: Vec<&str> = tally.iter().map(|(id, _)| id).collect();
        assert_eq!(owners, ["u2", "u1"]);
        assert_eq!(tally.count("u2"), 2);
        assert_eq!(tally.count("u1"), 1);
        assert_eq!(tally.count("ghost"), 0);
        assert_eq!(tally.grand_total(), 3);
    }

    #[test]
    fn retain_known_keeps_order() {
        let mut tally: MonthlyTally =
            [("u3", 4u64), ("ghost", 9), ("u1", 2)].into_iter().collect();
        tally.retain_known(&names(&[("u1", "Alice"), ("u3", "Carol")]));

        let owners: Vec<&str> = tally.iter().map(|(id, _)| id).collect();
        assert_eq!(owners, ["u3", "u1"]);
        assert_eq!(tally.count("ghost"), 0);
        assert_eq!(tally.len(), 2);
    }

    #[test]
    fn monthly_counts_apply_local_month_test() {
        let window = march_window();
        let leads = vec![
            lead("u1", Some(naive(2025, 3, 1, 10, 0, 0))),
            lead("u1", Some(naive(2025, 2, 27, 10, 0, 0))),
            lead("u2", Some(naive(2025, 3, 4, 18, 0, 0))),
            lead("u2", None),
        ];

        let tally = owner_monthly_counts(&leads, &window);
        assert_eq!(tally.count("u1"), 1);
        assert_eq!(tally.count("u2"), 2);
        assert_eq!(tally.grand_total(), 3);
    }

    #[test]
    fn monthly_counts_include_unknown_owners() {
        let window = march_window();
        let leads = vec![lead("ghost", Some(naive(2025, 3, 2, 9, 0, 0)))];
        let tally = owner_monthly_counts(&leads, &window);
        assert_eq!(tally.count("ghost"), 1);
    }

    #[test]
    fn top_distributor_resolves_names() {
        let tally: MonthlyTally = [("u1", 2u64), ("u2", 1)].into_iter().collect();
        let top = top_distributor(&tally, &names(&[("u1", "Alice"), ("u2", "Bob")]));
        assert_eq!(top, Some(("Alice".to_string(), 2)));
    }

    #[test]
    fn top_distributor_tie_goes_to_first_seen() {
        let tally: MonthlyTally = [("u2", 5u64), ("u1", 5)].into_iter().collect();
        let top = top_distributor(&tally, &names(&[("u1", "Alice"), ("u2", "Bob")]));
        assert_eq!(top, Some(("Bob".to_string(), 5)));
    }

    #[test]
    fn top_distributor_empty_is_none() {
        let tally = MonthlyTally::new();
        assert_eq!(top_distributor(&tally, &HashMap::new()), None);

        let zeros: MonthlyTally = [("u1", 0u64)].into_iter().collect();
        assert_eq!(top_distributor(&zeros, &HashMap::new()), None);
    }

    #[test]
    fn top_n_keeps_encounter_order_on_ties() {
        let tally: MonthlyTally =
            [("u1", 5u64), ("u2", 5), ("u3", 1)].into_iter().collect();
        let board = top_n_distributors(
            &tally,
            &names(&[("u1", "Alice"), ("u2", "Bob"), ("u3", "Carol")]),
            2,
        );

        assert_eq!(board.len(), 2);
        assert_eq!(board[0], LeaderboardEntry { name: "Alice".to_string(), count: 5 });
        assert_eq!(board[1], LeaderboardEntry { name: "Bob".to_string(), count: 5 });
    }

    #[test]
    fn top_n_sorted_non_increasing_and_truncated() {
        let tally: MonthlyTally =
            [("u1", 1u64), ("u2", 7), ("u3", 3), ("u4", 0)].into_iter().collect();
        let board = top_n_distributors(&tally, &HashMap::new(), 10);

        // Zero-count owners never appear, even with room to spare.
        assert_eq!(board.len(), 3);
        let counts: Vec<u64> = board.iter().map(|e| e.count).collect();
        assert_eq!(counts, [7, 3, 1]);
    }

    #[test]
    fn top_n_empty_counts_give_empty_board() {
        let board = top_n_distributors(&MonthlyTally::new(), &HashMap::new(), 3);
        assert!(board.is_empty());
    }

    #[test]
    fn unknown_owner_renders_truncated_placeholder() {
        let resolved = resolve_owner_name("abcdef123", &HashMap::new());
        assert_eq!(resolved, "Unknown ID (abcd...)");

        let short = resolve_owner_name("ab", &HashMap::new());
        assert_eq!(short, "Unknown ID (ab...)");
    }

    #[test]
    fn display_name_map_uses_labels() {
        let distributors = vec![
            Distributor {
                uid: "u1".to_string(),
                full_name: Some("Alice Agent".to_string()),
                email: None,
                last_login: None,
            },
            Distributor {
                uid: "u2".to_string(),
                full_name: None,
                email: None,
                last_login: None,
            },
        ];

        let map = display_name_map(&distributors);
        assert_eq!(map.get("u1").map(String::as_str), Some("Alice Agent"));
        assert_eq!(map.get("u2").map(String::as_str), Some("ID: u2"));
    }
}
