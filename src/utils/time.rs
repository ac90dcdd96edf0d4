//! Conversion between stored ISO-8601 timestamps and the display format
//! `DD/MM/YYYY HH:mm:ss` shown to map users.
//!
//! Stored timestamps always carry milliseconds and a `Z` suffix so that
//! lexicographic order in the database equals chronological order.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use thiserror::Error;

/// Display format used in API responses
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// ISO timestamps without an offset are read as UTC
const NAIVE_ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TimestampError {
    #[error("Invalid display timestamp '{input}': expected DD/MM/YYYY HH:mm:ss")]
    InvalidDisplayFormat { input: String },
}

/// Formats an ISO timestamp as `DD/MM/YYYY HH:mm:ss` in UTC
///
/// Returns `None` when the input is not a recognisable ISO timestamp.
///
/// ```
/// use weather_station_api::utils::format_timestamp;
///
/// assert_eq!(
///     format_timestamp("2023-08-29T06:00:00.000Z").as_deref(),
///     Some("29/08/2023 06:00:00")
/// );
/// assert_eq!(format_timestamp("not a date"), None);
/// ```
pub fn format_timestamp(iso: &str) -> Option<String> {
    let iso = iso.trim();
    let instant = DateTime::parse_from_rfc3339(iso)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(iso, NAIVE_ISO_FORMAT).map(|dt| dt.and_utc()))
        .ok()?;

    Some(instant.format(DISPLAY_FORMAT).to_string())
}

/// Converts `DD/MM/YYYY HH:mm:ss` (UTC) into the stored ISO form
///
/// ```
/// use weather_station_api::utils::parse_to_iso;
///
/// assert_eq!(
///     parse_to_iso("29/08/2023 06:00:00").unwrap(),
///     "2023-08-29T06:00:00.000Z"
/// );
/// ```
pub fn parse_to_iso(display: &str) -> Result<String, TimestampError> {
    let naive = NaiveDateTime::parse_from_str(display.trim(), DISPLAY_FORMAT).map_err(|_| {
        TimestampError::InvalidDisplayFormat {
            input: display.to_string(),
        }
    })?;

    Ok(naive.and_utc().to_rfc3339_opts(SecondsFormat::Millis, true))
}
