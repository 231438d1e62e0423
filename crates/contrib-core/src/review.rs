//! Year-in-review statistics.

use std::collections::{BTreeMap, HashSet};

use chrono::Datelike;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::model::ContributionRecord;

/// Default length of the top-campaigns list.
pub const DEFAULT_TOP_CAMPAIGNS: usize = 6;

/// Characters credited per caption edit in the text estimate.
pub const CHARS_PER_CAPTION: u64 = 50;

/// Campaign name used for records that carry none.
pub const UNNAMED_CAMPAIGN: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignEdits {
    pub name: String,
    pub edits: u64,
}

/// One calendar year's totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearReview {
    pub year: i32,
    pub total_edits: u64,
    pub depicts_edits: u64,
    pub caption_edits: u64,
    pub campaigns_count: usize,
    pub languages_count: usize,
    pub estimated_caption_chars: u64,
    pub top_campaigns: Vec<CampaignEdits>,
}

/// Summarize the records whose date falls in `year`.
///
/// Records with unparseable dates are ignored.
#[must_use]
#[instrument(level = "debug", skip(records), fields(records = records.len()))]
pub fn year_review(records: &[ContributionRecord], year: i32, top_limit: usize) -> YearReview {
    let mut total_edits = 0_u64;
    let mut depicts_edits = 0_u64;
    let mut caption_edits = 0_u64;
    let mut campaigns: HashSet<&str> = HashSet::new();
    let mut languages: HashSet<&str> = HashSet::new();
    let mut per_campaign: BTreeMap<&str, u64> = BTreeMap::new();

    for record in records {
        if record.day().is_none_or(|day| day.year() != year) {
            continue;
        }
        total_edits += 1;
        match record.edit_type.as_str() {
            "depicts" => depicts_edits += 1,
            "caption" => caption_edits += 1,
            _ => {}
        }

        let campaign = record.campaign.trim();
        if !campaign.is_empty() {
            campaigns.insert(campaign);
        }
        let lang = record.lang.trim();
        if !lang.is_empty() {
            languages.insert(lang);
        }

        let name = if campaign.is_empty() {
            UNNAMED_CAMPAIGN
        } else {
            campaign
        };
        *per_campaign.entry(name).or_default() += 1;
    }

    let mut top_campaigns: Vec<CampaignEdits> = per_campaign
        .into_iter()
        .map(|(name, edits)| CampaignEdits {
            name: name.to_string(),
            edits,
        })
        .collect();
    // BTreeMap order already sorts names ascending; the stable sort keeps it
    // as the tiebreak.
    top_campaigns.sort_by(|a, b| b.edits.cmp(&a.edits));
    top_campaigns.truncate(top_limit);

    debug!(year, total_edits, "built year review");

    YearReview {
        year,
        total_edits,
        depicts_edits,
        caption_edits,
        campaigns_count: campaigns.len(),
        languages_count: languages.len(),
        estimated_caption_chars: caption_edits * CHARS_PER_CAPTION,
        top_campaigns,
    }
}
