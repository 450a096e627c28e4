/// Duty identifiers are opaque strings (generated UUIDs unless supplied).
pub type DutyId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
