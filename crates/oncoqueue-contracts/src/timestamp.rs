//! Timestamp wire format shared by receipts and the queue board.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serializer};

/// `YYYY-MM-DD HH:MM:SS`, local wall-clock time without an offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a timestamp in [`TIMESTAMP_FORMAT`].
pub fn format(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Serde adapter for `#[serde(with = "crate::timestamp")]` fields.
pub fn serialize<S: Serializer>(ts: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(ts))
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
}
