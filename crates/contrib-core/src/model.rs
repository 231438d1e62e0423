//! Contribution records as supplied by the contributions endpoint.
//!
//! Records are immutable inputs. The engine borrows them and never writes
//! through those borrows; derived structures hold `&ContributionRecord` or
//! owned copies of individual fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// ISO day format used on the wire (`2024-03-17`).
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// One edit made by the user.
///
/// Wire names follow the contributions endpoint (`edit_type`, `campaign_id`);
/// camelCase aliases are accepted so payloads from other producers decode too.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContributionRecord {
    /// ISO calendar date, day precision. Kept verbatim; see [`Self::day`].
    pub date: String,
    pub campaign: String,
    #[serde(
        default,
        alias = "campaignId",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "campaign_id_from_json"
    )]
    pub campaign_id: Option<String>,
    pub file: String,
    #[serde(alias = "editType")]
    pub edit_type: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub lang: String,
}

impl ContributionRecord {
    /// Parse the record's date, or `None` when it is not a valid ISO day.
    #[must_use]
    pub fn day(&self) -> Option<NaiveDate> {
        parse_day(&self.date)
    }

    /// Year-month bucket key: the first seven characters of `date`.
    #[must_use]
    pub fn month_key(&self) -> &str {
        month_key(&self.date)
    }
}

/// Parse an ISO day string.
///
/// Accepts `YYYY-MM-DD` and tolerates a trailing time component
/// (`2024-03-17T10:00:00Z`, `2024-03-17 10:00`), which some exports emit.
#[must_use]
pub fn parse_day(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(day) = NaiveDate::parse_from_str(raw, DAY_FORMAT) {
        return Some(day);
    }

    let (head, tail) = (raw.get(..10)?, raw.get(10..)?);
    if tail.starts_with('T') || tail.starts_with(' ') {
        NaiveDate::parse_from_str(head, DAY_FORMAT).ok()
    } else {
        None
    }
}

/// First seven characters of a date string (`"2024-03"`), or the whole
/// string when it is shorter.
#[must_use]
pub fn month_key(date: &str) -> &str {
    date.char_indices()
        .nth(7)
        .map_or(date, |(idx, _)| &date[..idx])
}

/// The endpoint serializes `campaign_id` as an integer or `null`; other
/// producers send strings. Normalize both into `Option<String>`.
fn campaign_id_from_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}
