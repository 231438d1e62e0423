//! Stand-in record sets: the fixed fallback list and seeded demo histories.

use chrono::{Datelike, Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::model::{ContributionRecord, DAY_FORMAT};

/// Size of the fallback record set.
pub const FALLBACK_LEN: usize = 100;

/// Look-back span for [`SyntheticRange::Trailing`].
pub const TRAILING_DAYS: u64 = 730;

const COUNTRIES: [&str; 5] = ["SE", "US", "DE", "FR", "GB"];
const LANGUAGES: [&str; 5] = ["en", "sv", "de", "fr", "es"];
const EDIT_TYPES: [&str; 2] = ["caption", "depicts"];

/// Deterministic records shown when a fetch fails and fallback is enabled.
#[must_use]
pub fn fallback_records() -> Vec<ContributionRecord> {
    (0..FALLBACK_LEN)
        .map(|i| ContributionRecord {
            date: format!("2024-0{}-01", (i % 9) + 1),
            campaign: ["Birds", "Nature"][i % 2].to_string(),
            campaign_id: None,
            file: format!("File_{i}.jpg"),
            edit_type: ["caption", "rotate"][i % 2].to_string(),
            country: "US".to_string(),
            lang: "en".to_string(),
        })
        .collect()
}

/// Where synthetic dates land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntheticRange {
    /// Uniformly inside one calendar year.
    Year(i32),
    /// Within [`TRAILING_DAYS`] days before (and including) `today`.
    Trailing { today: NaiveDate },
}

/// A campaign the generator may attribute edits to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticCampaign {
    pub id: Option<String>,
    pub name: String,
}

impl SyntheticCampaign {
    fn general() -> Self {
        Self {
            id: None,
            name: "General".to_string(),
        }
    }
}

/// Seed derived from a username: the first 32 bits of its SHA-256 digest.
#[must_use]
pub fn username_seed(username: &str) -> u32 {
    let digest = Sha256::digest(username.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Generate a plausible history for `username`.
///
/// The same username, range and campaigns always produce the same records.
/// An empty campaign list falls back to a single `General` campaign.
#[must_use]
pub fn synthetic_history(
    username: &str,
    range: SyntheticRange,
    campaigns: &[SyntheticCampaign],
) -> Vec<ContributionRecord> {
    let seed = username_seed(username);
    let mut rng = StdRng::seed_from_u64(u64::from(seed));
    let count = 80 + (seed % 50) as usize;

    let fallback = [SyntheticCampaign::general()];
    let campaigns = if campaigns.is_empty() {
        &fallback[..]
    } else {
        campaigns
    };

    let Some((base, span)) = date_span(range) else {
        debug!(?range, "synthetic range outside the supported calendar");
        return Vec::new();
    };

    let mut records = Vec::with_capacity(count);
    for i in 0..count {
        let offset = rng.gen_range(0..span);
        let Some(day) = base.checked_add_days(Days::new(offset)) else {
            continue;
        };
        let campaign = &campaigns[rng.gen_range(0..campaigns.len())];
        records.push(ContributionRecord {
            date: day.format(DAY_FORMAT).to_string(),
            campaign: campaign.name.clone(),
            campaign_id: campaign.id.clone(),
            file: format!("{username}_file_{i}.jpg"),
            edit_type: EDIT_TYPES[rng.gen_range(0..EDIT_TYPES.len())].to_string(),
            country: COUNTRIES[rng.gen_range(0..COUNTRIES.len())].to_string(),
            lang: LANGUAGES[rng.gen_range(0..LANGUAGES.len())].to_string(),
        });
    }

    debug!(username, records = records.len(), "generated synthetic history");
    records
}

/// First possible day and number of candidate days.
fn date_span(range: SyntheticRange) -> Option<(NaiveDate, u64)> {
    match range {
        SyntheticRange::Year(year) => {
            let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
            let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
            Some((start, u64::from(end.ordinal())))
        }
        SyntheticRange::Trailing { today } => {
            let start = today.checked_sub_days(Days::new(TRAILING_DAYS))?;
            Some((start, TRAILING_DAYS + 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_set_shape() {
        let records = fallback_records();
        assert_eq!(records.len(), FALLBACK_LEN);
        assert_eq!(records[0].date, "2024-01-01");
        assert_eq!(records[8].date, "2024-09-01");
        assert_eq!(records[9].date, "2024-01-01");
        assert_eq!(records[1].campaign, "Nature");
        assert_eq!(records[0].edit_type, "caption");
        assert_eq!(records[1].edit_type, "rotate");
        assert_eq!(records[42].file, "File_42.jpg");
        assert!(records.iter().all(|r| r.day().is_some()));
    }

    #[test]
    fn synthetic_history_is_deterministic() {
        let a = synthetic_history("Dev", SyntheticRange::Year(2024), &[]);
        let b = synthetic_history("Dev", SyntheticRange::Year(2024), &[]);
        assert_eq!(a, b);
        assert!(!a.is_empty());
    }

    #[test]
    fn count_follows_seed() {
        let seed = username_seed("Dev");
        let records = synthetic_history("Dev", SyntheticRange::Year(2024), &[]);
        assert_eq!(records.len(), 80 + (seed % 50) as usize);
    }

    #[test]
    fn year_range_stays_in_year() {
        let records = synthetic_history("alice", SyntheticRange::Year(2023), &[]);
        assert!(records.iter().all(|r| r.date.starts_with("2023-")));
        assert!(records.iter().all(|r| r.campaign == "General"));
        assert!(records.iter().all(|r| r.campaign_id.is_none()));
    }

    #[test]
    fn trailing_range_stays_in_window() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let earliest = today.checked_sub_days(Days::new(TRAILING_DAYS)).unwrap();
        let records = synthetic_history("bob", SyntheticRange::Trailing { today }, &[]);
        for record in &records {
            let day = record.day().unwrap();
            assert!(day >= earliest && day <= today, "{day} outside window");
        }
    }

    #[test]
    fn uses_supplied_campaigns() {
        let campaigns = vec![
            SyntheticCampaign {
                id: Some("3".to_string()),
                name: "Birds".to_string(),
            },
            SyntheticCampaign {
                id: Some("4".to_string()),
                name: "Nature".to_string(),
            },
        ];
        let records = synthetic_history("carol", SyntheticRange::Year(2024), &campaigns);
        assert!(
            records
                .iter()
                .all(|r| r.campaign == "Birds" || r.campaign == "Nature")
        );
        assert!(records.iter().all(|r| r.campaign_id.is_some()));
    }

    #[test]
    fn seed_is_first_eight_hex_digits() {
        // sha256("") = e3b0c442...
        assert_eq!(username_seed(""), 0xe3b0_c442);
    }
}
