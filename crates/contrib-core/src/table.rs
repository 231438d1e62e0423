//! Sorted, paginated rows for the contributions table.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::ContributionRecord;

/// Rows per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Column to order rows by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Date,
    Campaign,
    File,
    EditType,
    Country,
    Lang,
}

impl SortKey {
    fn field(self, record: &ContributionRecord) -> &str {
        match self {
            Self::Date => &record.date,
            Self::Campaign => &record.campaign,
            Self::File => &record.file,
            Self::EditType => &record.edit_type,
            Self::Country => &record.country,
            Self::Lang => &record.lang,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Campaign => "campaign",
            Self::File => "file",
            Self::EditType => "edit_type",
            Self::Country => "country",
            Self::Lang => "lang",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "campaign" => Ok(Self::Campaign),
            "file" => Ok(Self::File),
            "edit_type" | "edit-type" | "type" => Ok(Self::EditType),
            "country" => Ok(Self::Country),
            "lang" | "language" => Ok(Self::Lang),
            other => Err(format!(
                "unknown sort key '{other}': expected date, campaign, file, edit_type, country, or lang"
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    /// Newest first is the table's default.
    #[default]
    Descending,
}

/// Sort and page settings for the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView {
    pub sort_key: SortKey,
    pub direction: SortDirection,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableView {
    fn default() -> Self {
        Self {
            sort_key: SortKey::default(),
            direction: SortDirection::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of table rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TablePage<'a> {
    pub rows: Vec<&'a ContributionRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total_rows: usize,
}

impl TableView {
    /// Sort `rows` (stable) and cut out the requested page.
    ///
    /// Page numbers past the end clamp to the last page; page 0 reads as 1.
    #[must_use]
    pub fn page<'a>(&self, rows: &[&'a ContributionRecord]) -> TablePage<'a> {
        let page_size = self.page_size.max(1);
        let total_rows = rows.len();
        let total_pages = total_rows.div_ceil(page_size);
        let page = self.page.clamp(1, total_pages.max(1));

        let mut sorted: Vec<&ContributionRecord> = rows.to_vec();
        let key = self.sort_key;
        sorted.sort_by(|a, b| {
            let ord: Ordering = key.field(a).cmp(key.field(b));
            match self.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        });

        let start = (page - 1) * page_size;
        let rows = sorted.into_iter().skip(start).take(page_size).collect();

        TablePage {
            rows,
            page,
            total_pages,
            total_rows,
        }
    }
}
