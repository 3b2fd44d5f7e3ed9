/// Format of timestamps persisted by the store: naive UTC, zero-padded, so
/// lexicographic comparison of stored text is chronological.
pub const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minimum length of a secondary contact, in characters.
pub const MIN_SECONDARY_CONTACT_LEN: usize = 7;
