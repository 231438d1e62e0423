//! Summary scalars and chart series over the filtered record set.
//!
//! # Overview
//!
//! [`aggregate`] is a single pass over the caller's records. It borrows them,
//! keeps the matching ones in input order, and derives:
//!
//! - [`Summary`]: total, distinct campaigns, earliest and latest date;
//! - month, campaign, and edit-type [`CountSeries`] for the three charts.
//!
//! [`evaluate`] adds the selection step in front: a reversed date range
//! short-circuits to [`FilterOutcome::InvalidRange`] without aggregating.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::filter::{self, FilterSelection, InvalidRange, Predicate};
use crate::model::ContributionRecord;
use crate::series::CountSeries;

/// Headline numbers for the summary cards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub distinct_campaigns: usize,
    /// Lexicographically smallest ISO date in the filtered set.
    pub first_date: Option<String>,
    /// Lexicographically largest ISO date in the filtered set.
    pub last_date: Option<String>,
}

/// Everything the summary cards and charts need for one filter state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregationResult<'a> {
    pub filtered: Vec<&'a ContributionRecord>,
    pub summary: Summary,
    pub series_by_month: CountSeries,
    pub series_by_campaign: CountSeries,
    pub series_by_edit_type: CountSeries,
}

impl AggregationResult<'_> {
    /// True when nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

/// Result of applying a [`FilterSelection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome<'a> {
    /// The selection was valid; aggregation ran.
    Ready(AggregationResult<'a>),
    /// The date range was reversed; aggregation was skipped.
    InvalidRange(InvalidRange),
}

impl<'a> FilterOutcome<'a> {
    /// The aggregation, or an all-empty one when the range was invalid.
    #[must_use]
    pub fn into_result(self) -> AggregationResult<'a> {
        match self {
            Self::Ready(result) => result,
            Self::InvalidRange(_) => AggregationResult::default(),
        }
    }

    #[must_use]
    pub const fn invalid_range(&self) -> Option<&InvalidRange> {
        match self {
            Self::Ready(_) => None,
            Self::InvalidRange(err) => Some(err),
        }
    }
}

/// Filter `records` with `predicate` and compute summary and series.
///
/// `records` is never mutated and `filtered` preserves input order.
#[must_use]
#[instrument(level = "debug", skip(records, predicate), fields(records = records.len()))]
pub fn aggregate<'a>(records: &'a [ContributionRecord], predicate: &Predicate) -> AggregationResult<'a> {
    let filtered: Vec<&ContributionRecord> = records.iter().filter(|r| predicate.matches(r)).collect();

    let mut campaigns: HashSet<&str> = HashSet::new();
    let mut first_date: Option<&str> = None;
    let mut last_date: Option<&str> = None;
    let mut series_by_month = CountSeries::new();
    let mut series_by_campaign = CountSeries::new();
    let mut series_by_edit_type = CountSeries::new();

    for record in &filtered {
        let date = record.date.as_str();
        if first_date.is_none_or(|first| date < first) {
            first_date = Some(date);
        }
        if last_date.is_none_or(|last| date > last) {
            last_date = Some(date);
        }

        campaigns.insert(record.campaign.as_str());
        series_by_month.bump(record.month_key());
        series_by_campaign.bump(&record.campaign);
        series_by_edit_type.bump(&record.edit_type);
    }

    debug!(matched = filtered.len(), "aggregated contributions");

    AggregationResult {
        summary: Summary {
            total: filtered.len(),
            distinct_campaigns: campaigns.len(),
            first_date: first_date.map(str::to_string),
            last_date: last_date.map(str::to_string),
        },
        filtered,
        series_by_month,
        series_by_campaign,
        series_by_edit_type,
    }
}

/// Build the predicate for `selection` and aggregate, or report a reversed range.
#[must_use]
pub fn evaluate<'a>(records: &'a [ContributionRecord], selection: &FilterSelection) -> FilterOutcome<'a> {
    match filter::build(selection) {
        Ok(predicate) => FilterOutcome::Ready(aggregate(records, &predicate)),
        Err(err) => {
            debug!(%err, "skipping aggregation for reversed date range");
            FilterOutcome::InvalidRange(err)
        }
    }
}
