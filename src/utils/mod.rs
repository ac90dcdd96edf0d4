// Shared helpers used by the API handlers and the seeding tools

pub mod time;

pub use time::{format_timestamp, parse_to_iso, TimestampError};
