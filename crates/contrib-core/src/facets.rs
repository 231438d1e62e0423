//! Option lists for the facet selectors.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::model::ContributionRecord;

/// Distinct, sorted, non-empty values per facet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetOptions {
    pub campaigns: Vec<String>,
    pub languages: Vec<String>,
    pub edit_types: Vec<String>,
    pub countries: Vec<String>,
}

/// Collect selector options from the full record set.
///
/// Values are trimmed; blanks are skipped.
#[must_use]
pub fn facet_options(records: &[ContributionRecord]) -> FacetOptions {
    FacetOptions {
        campaigns: distinct(records.iter().map(|r| r.campaign.as_str())),
        languages: distinct(records.iter().map(|r| r.lang.as_str())),
        edit_types: distinct(records.iter().map(|r| r.edit_type.as_str())),
        countries: distinct(records.iter().map(|r| r.country.as_str())),
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
