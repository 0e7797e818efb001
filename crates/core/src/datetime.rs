use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

/// Sentinel for timestamps that could not be parsed. Descending sorts place
/// these events last instead of aborting the whole fetch.
pub const EARLIEST: NaiveDateTime = NaiveDateTime::MIN;

/// Parses an API event timestamp (`2020-04-30T18:10`, occasionally with
/// seconds). Returns [`EARLIEST`] when no format matches.
#[must_use]
pub fn parse_api_timestamp(raw: &str) -> NaiveDateTime {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .unwrap_or(EARLIEST)
}

/// Parses a portal timeline date (`30/04/2020`). Returns [`EARLIEST`] on
/// failure, mirroring [`parse_api_timestamp`].
#[must_use]
pub fn parse_portal_date(raw: &str) -> NaiveDateTime {
    NaiveDate::parse_from_str(raw.trim(), "%d/%m/%Y")
        .map(|date| date.and_time(NaiveTime::MIN))
        .unwrap_or(EARLIEST)
}
