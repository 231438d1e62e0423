//! 53-week activity calendar layout.
//!
//! # Overview
//!
//! The grid is a fixed 53 × 7 matrix of day cells, one column per week,
//! Sunday through Saturday. It covers the one-year window that ends on
//! December 31 of the reference year:
//!
//! ```text
//! window_end   = Dec 31 of reference year
//! window_start = window_end - 1 year + 1 day     (Jan 1 of reference year)
//! grid_start   = Sunday on or before window_start
//! ```
//!
//! Days before `window_start` or after `window_end` are padding cells with no
//! date. The column count never changes: in the rare window that needs 54
//! columns (a leap year starting on Saturday) the trailing day falls off the
//! grid, while `year_total` still counts it because it is summed over the
//! daily-count map rather than over emitted cells.
//!
//! Records whose date does not parse contribute to no cell.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::filter::FilterSelection;
use crate::model::ContributionRecord;

/// Number of week columns in every grid.
pub const WEEKS: usize = 53;

/// Rows per week column.
pub const DAYS_PER_WEEK: usize = 7;

/// Reference years are clamped into this range so every window date is
/// representable.
pub const MIN_REFERENCE_YEAR: i32 = -200_000;
pub const MAX_REFERENCE_YEAR: i32 = 200_000;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---------------------------------------------------------------------------
// Intensity
// ---------------------------------------------------------------------------

/// Discrete shading bucket for a day's count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Intensity {
    #[default]
    None,
    Low,
    Medium,
    High,
    Max,
}

impl Intensity {
    /// Bucket a raw count: `0`, `1–2`, `3–4`, `5–9`, `10+`.
    #[must_use]
    pub const fn from_count(count: u32) -> Self {
        match count {
            0 => Self::None,
            1..=2 => Self::Low,
            3..=4 => Self::Medium,
            5..=9 => Self::High,
            _ => Self::Max,
        }
    }

    /// Numeric level, 0 through 4.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Low => 1,
            Self::Medium => 2,
            Self::High => 3,
            Self::Max => 4,
        }
    }
}

impl From<Intensity> for u8 {
    fn from(value: Intensity) -> Self {
        value.level()
    }
}

// ---------------------------------------------------------------------------
// Grid types
// ---------------------------------------------------------------------------

/// One square of the calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayCell {
    /// `None` for padding cells outside the window.
    pub date: Option<NaiveDate>,
    pub count: u32,
    pub level: Intensity,
}

impl DayCell {
    const PADDING: Self = Self {
        date: None,
        count: 0,
        level: Intensity::None,
    };

    fn active(date: NaiveDate, count: u32) -> Self {
        Self {
            date: Some(date),
            count,
            level: Intensity::from_count(count),
        }
    }

    #[must_use]
    pub const fn is_padding(&self) -> bool {
        self.date.is_none()
    }
}

/// Seven consecutive days, Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekColumn {
    pub days: [DayCell; DAYS_PER_WEEK],
}

impl WeekColumn {
    /// The first day of this week that lies inside the window.
    #[must_use]
    pub fn first_day(&self) -> Option<NaiveDate> {
        self.days.iter().find_map(|cell| cell.date)
    }
}

/// A month header spanning `[start_week_index, end_week_index)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSpan {
    pub label: &'static str,
    pub year: i32,
    /// Calendar month, 1 through 12.
    pub month: u32,
    pub start_week_index: usize,
    pub end_week_index: usize,
}

impl MonthSpan {
    /// Number of week columns the label covers.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.end_week_index - self.start_week_index
    }
}

/// The inclusive date window shown by a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl CalendarWindow {
    /// The one-year window ending December 31 of `reference_year`.
    ///
    /// Years outside [`MIN_REFERENCE_YEAR`]..=[`MAX_REFERENCE_YEAR`] are clamped.
    #[must_use]
    pub fn for_year(reference_year: i32) -> Self {
        let year = reference_year.clamp(MIN_REFERENCE_YEAR, MAX_REFERENCE_YEAR);
        let end = NaiveDate::from_ymd_opt(year, 12, 31).unwrap_or(NaiveDate::MAX);
        let start = end
            .checked_sub_months(Months::new(12))
            .and_then(|d| d.succ_opt())
            .unwrap_or(NaiveDate::MIN);
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The Sunday on or before `start`.
    #[must_use]
    pub fn grid_start(&self) -> NaiveDate {
        let back = u64::from(self.start.weekday().num_days_from_sunday());
        self.start
            .checked_sub_days(Days::new(back))
            .unwrap_or(self.start)
    }

    /// Number of days in the window (365 or 366).
    #[must_use]
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// The laid-out calendar for one reference year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarGrid {
    pub reference_year: i32,
    pub window: CalendarWindow,
    /// Always [`WEEKS`] columns.
    pub weeks: Vec<WeekColumn>,
    pub month_spans: Vec<MonthSpan>,
    /// Contributions dated inside the window.
    pub year_total: u64,
}

impl CalendarGrid {
    /// All cells in column-major order.
    pub fn cells(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|week| week.days.iter())
    }

    /// The cell showing `date`, if the grid shows it.
    #[must_use]
    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        self.cells().find(|cell| cell.date == Some(date))
    }

    /// Day-scoped selection for a clicked cell. Padding cells have none.
    #[must_use]
    pub fn selection_for(&self, date: NaiveDate) -> Option<FilterSelection> {
        self.cell(date)
            .and_then(|cell| cell.date)
            .map(FilterSelection::for_day)
    }

    /// Days in the window with at least one contribution.
    #[must_use]
    pub fn active_days(&self) -> usize {
        self.cells().filter(|cell| cell.count > 0).count()
    }

    /// Highest single-day count shown.
    #[must_use]
    pub fn max_count(&self) -> u32 {
        self.cells().map(|cell| cell.count).max().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Count records per calendar day. Unparseable dates are dropped.
#[must_use]
pub fn daily_counts(records: &[ContributionRecord]) -> BTreeMap<NaiveDate, u32> {
    let mut by_date: BTreeMap<NaiveDate, u32> = BTreeMap::new();
    let mut dropped = 0_usize;

    for record in records {
        match record.day() {
            Some(day) => {
                let slot = by_date.entry(day).or_insert(0);
                *slot = slot.saturating_add(1);
            }
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        debug!(dropped, "records with unparseable dates left off the calendar");
    }

    by_date
}

/// Lay out the 53-week calendar for `reference_year`.
///
/// The caller decides which records to pass; the builder applies no filter.
#[must_use]
#[instrument(level = "debug", skip(records), fields(records = records.len()))]
pub fn build_grid(records: &[ContributionRecord], reference_year: i32) -> CalendarGrid {
    let by_date = daily_counts(records);
    let window = CalendarWindow::for_year(reference_year);
    let grid_start = window.grid_start();

    let weeks: Vec<WeekColumn> = (0..WEEKS)
        .map(|week| {
            let mut days = [DayCell::PADDING; DAYS_PER_WEEK];
            for (row, slot) in days.iter_mut().enumerate() {
                let offset = (week * DAYS_PER_WEEK + row) as u64;
                let date = grid_start
                    .checked_add_days(Days::new(offset))
                    .filter(|date| window.contains(*date));
                if let Some(date) = date {
                    *slot = DayCell::active(date, by_date.get(&date).copied().unwrap_or(0));
                }
            }
            WeekColumn { days }
        })
        .collect();

    let month_spans = month_spans(&weeks);
    let year_total = by_date
        .range(window.start..=window.end)
        .map(|(_, count)| u64::from(*count))
        .sum();

    CalendarGrid {
        reference_year: window.end.year(),
        window,
        weeks,
        month_spans,
        year_total,
    }
}

/// Month header spans keyed on each week's first in-window day.
fn month_spans(weeks: &[WeekColumn]) -> Vec<MonthSpan> {
    let mut spans: Vec<MonthSpan> = Vec::with_capacity(13);
    let mut current: Option<(i32, u32)> = None;

    for (index, week) in weeks.iter().enumerate() {
        let Some(first) = week.first_day() else {
            continue;
        };
        let key = (first.year(), first.month());
        if current == Some(key) {
            continue;
        }

        if let Some(open) = spans.last_mut() {
            open.end_week_index = index;
        }
        spans.push(MonthSpan {
            label: MONTH_LABELS[first.month0() as usize],
            year: first.year(),
            month: first.month(),
            start_week_index: index,
            end_week_index: weeks.len(),
        });
        current = Some(key);
    }

    spans
}
