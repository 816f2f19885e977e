use chrono::{DateTime, Utc};

pub type UtcTimestamp = DateTime<Utc>;

/// strftime format used for figure titles, e.g. `07 Jul 2023 12:00:00`
pub const TITLE_TIMESTAMP_FORMAT: &str = "%d %b %Y %H:%M:%S";
