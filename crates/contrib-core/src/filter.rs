//! Facet selections and the predicate compiled from them.
//!
//! Exact-match facets (campaign, language, edit type, country) are
//! case-sensitive. Free-text search is a case-insensitive substring match
//! against the file name. Empty facets impose no constraint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::ContributionRecord;

/// The user's current facet choices. Empty strings and `None` mean "any".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    #[serde(default)]
    pub campaign: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default)]
    pub edit_type: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    #[serde(default)]
    pub search_text: String,
}

impl FilterSelection {
    /// Selection scoped to a single day, as produced by clicking a calendar cell.
    #[must_use]
    pub fn for_day(day: NaiveDate) -> Self {
        Self {
            from_date: Some(day),
            to_date: Some(day),
            ..Self::default()
        }
    }

    /// True when no facet is constrained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Raised when both bounds are set and `from > to`.
///
/// This is a user-facing state rather than a failure: callers show a message
/// and an empty result that is distinguishable from "no matches".
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("start date {from} must be on or before end date {to}")]
pub struct InvalidRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Compiled conjunction of the active facets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    campaign: Option<String>,
    lang: Option<String>,
    edit_type: Option<String>,
    country: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    needle: Option<String>,
}

impl Predicate {
    /// A predicate that accepts every record.
    #[must_use]
    pub const fn accept_all() -> Self {
        Self {
            campaign: None,
            lang: None,
            edit_type: None,
            country: None,
            from: None,
            to: None,
            needle: None,
        }
    }

    /// Whether `record` satisfies every active facet.
    #[must_use]
    pub fn matches(&self, record: &ContributionRecord) -> bool {
        if !exact(self.campaign.as_deref(), &record.campaign)
            || !exact(self.lang.as_deref(), &record.lang)
            || !exact(self.edit_type.as_deref(), &record.edit_type)
            || !exact(self.country.as_deref(), &record.country)
        {
            return false;
        }

        if self.from.is_some() || self.to.is_some() {
            // Unparseable dates cannot satisfy a date bound.
            let Some(day) = record.day() else {
                return false;
            };
            if self.from.is_some_and(|from| day < from) || self.to.is_some_and(|to| day > to) {
                return false;
            }
        }

        self.needle
            .as_deref()
            .is_none_or(|needle| record.file.to_lowercase().contains(needle))
    }

    /// True when no facet is active.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self == &Self::accept_all()
    }
}

impl Default for Predicate {
    fn default() -> Self {
        Self::accept_all()
    }
}

/// Compile a selection into a predicate.
///
/// # Errors
///
/// Returns [`InvalidRange`] when both dates are present and `from > to`.
pub fn build(selection: &FilterSelection) -> Result<Predicate, InvalidRange> {
    if let (Some(from), Some(to)) = (selection.from_date, selection.to_date) {
        if from > to {
            return Err(InvalidRange { from, to });
        }
    }

    Ok(Predicate {
        campaign: non_empty(&selection.campaign),
        lang: non_empty(&selection.lang),
        edit_type: non_empty(&selection.edit_type),
        country: non_empty(&selection.country),
        from: selection.from_date,
        to: selection.to_date,
        needle: non_empty(&selection.search_text).map(|text| text.to_lowercase()),
    })
}

fn exact(wanted: Option<&str>, actual: &str) -> bool {
    wanted.is_none_or(|wanted| wanted == actual)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
