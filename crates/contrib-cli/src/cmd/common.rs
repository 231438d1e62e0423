//! Record loading, filter flags, and the per-run dashboard state shared by
//! every command.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Args;
use contrib_core::config::ProjectConfig;
use contrib_core::error::ErrorCode;
use contrib_core::navigation::{CalendarController, Navigator};
use contrib_core::sample::{self, SyntheticRange};
use contrib_core::source::{self, LoadError};
use contrib_core::timing;
use contrib_core::{ContributionRecord, FilterOutcome, FilterSelection, evaluate};
use tracing::{info, warn};

use crate::output::{CliError, OutputMode, render_error};

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Where records come from. All flags are global.
#[derive(Args, Debug, Default, Clone)]
pub struct SourceArgs {
    /// Read the contributions payload from a file, or `-` for stdin.
    #[arg(long, global = true, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Fetch the contributions payload from this endpoint.
    #[arg(long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Use the built-in sample records if loading fails.
    #[arg(long, global = true)]
    pub fallback: bool,

    /// Generate a deterministic demo history for this username.
    #[arg(long, global = true, value_name = "USER", conflicts_with_all = ["input", "url"])]
    pub demo: Option<String>,
}

/// Facet flags shared by `summary` and `table`.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Only this campaign (exact match).
    #[arg(long)]
    pub campaign: Option<String>,

    /// Only this language code (exact match).
    #[arg(long)]
    pub lang: Option<String>,

    /// Only this edit type, e.g. `caption` or `depicts`.
    #[arg(long)]
    pub edit_type: Option<String>,

    /// Only this country code (exact match).
    #[arg(long)]
    pub country: Option<String>,

    /// Earliest date, inclusive (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Latest date, inclusive (YYYY-MM-DD).
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Case-insensitive substring of the file name.
    #[arg(long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Shorthand for `--from DAY --to DAY`, as when clicking a calendar cell.
    #[arg(long, value_name = "DATE", conflicts_with_all = ["from", "to"])]
    pub day: Option<NaiveDate>,
}

impl FilterArgs {
    pub fn selection(&self) -> FilterSelection {
        let base = self.day.map(FilterSelection::for_day).unwrap_or_default();
        FilterSelection {
            campaign: self.campaign.clone().unwrap_or_default(),
            lang: self.lang.clone().unwrap_or_default(),
            edit_type: self.edit_type.clone().unwrap_or_default(),
            country: self.country.clone().unwrap_or_default(),
            from_date: self.from.or(base.from_date),
            to_date: self.to.or(base.to_date),
            search_text: self.search.clone().unwrap_or_default(),
        }
    }
}

/// Settings every command handler needs.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub output: OutputMode,
    pub config: ProjectConfig,
    pub today: NaiveDate,
}

impl RunContext {
    pub fn current_year(&self) -> i32 {
        self.today.year()
    }
}

/// A source failure with a stable error code.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no contributions source: pass --input, --url, or --demo, or set [source] url")]
    Missing,
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },
    #[error(transparent)]
    Load(#[from] LoadError),
}

impl SourceError {
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Load(LoadError::Decode(_)) => ErrorCode::PayloadDecodeFailed,
            Self::Missing | Self::Fetch { .. } | Self::Load(LoadError::Io { .. }) => {
                ErrorCode::SourceUnavailable
            }
        }
    }
}

/// Application state threaded through a command: the loaded records, the
/// active filter selection, and the calendar navigator.
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub records: Vec<ContributionRecord>,
    pub selection: FilterSelection,
    pub navigator: Navigator,
}

impl DashboardState {
    /// Load records for this run and start at the current year.
    pub fn load(source: &SourceArgs, ctx: &RunContext) -> Result<Self> {
        let records = timing::timed("load", || load_records(source, ctx))?;
        Ok(Self {
            records,
            selection: FilterSelection::default(),
            navigator: Navigator::new(ctx.current_year()),
        })
    }

    #[must_use]
    pub fn with_selection(mut self, selection: FilterSelection) -> Self {
        self.selection = selection;
        self
    }

    /// Filter and aggregate with the current selection.
    pub fn outcome(&self) -> FilterOutcome<'_> {
        timing::timed("aggregate", || evaluate(&self.records, &self.selection))
    }

    /// Calendar for the navigator's year, always over the full record set.
    pub fn calendar(&self) -> CalendarController {
        timing::timed("calendar.build", || {
            CalendarController::new(self.navigator, &self.records)
        })
    }
}

/// Resolve the configured source, falling back to sample records when
/// enabled.
pub fn load_records(source: &SourceArgs, ctx: &RunContext) -> Result<Vec<ContributionRecord>> {
    if let Some(user) = source.demo.as_deref() {
        info!(user, "generating demo history");
        return Ok(sample::synthetic_history(
            user,
            SyntheticRange::Trailing { today: ctx.today },
            &[],
        ));
    }

    let fallback = source.fallback || ctx.config.source.fallback;
    match load_from(source, &ctx.config) {
        Ok(records) => Ok(records),
        Err(err) if fallback => {
            warn!(%err, "contributions unavailable, using sample records");
            Ok(sample::fallback_records())
        }
        Err(err) => Err(err.into()),
    }
}

fn load_from(
    source: &SourceArgs,
    config: &ProjectConfig,
) -> Result<Vec<ContributionRecord>, SourceError> {
    if let Some(path) = source.input.as_deref() {
        return read_input(path);
    }

    let url = source.url.as_deref().or(config.source.url.as_deref());
    match url {
        Some(url) => fetch(url),
        None => Err(SourceError::Missing),
    }
}

fn read_input(path: &Path) -> Result<Vec<ContributionRecord>, SourceError> {
    let records = if path == Path::new("-") {
        source::load_reader(io::stdin().lock())?
    } else {
        source::load_path(path)?
    };
    Ok(records)
}

/// One GET, no retries.
fn fetch(url: &str) -> Result<Vec<ContributionRecord>, SourceError> {
    info!(url, "fetching contributions");
    let fetch_error = |message: String| SourceError::Fetch {
        url: url.to_string(),
        message,
    };

    let response = ureq::AgentBuilder::new()
        .timeout(FETCH_TIMEOUT)
        .build()
        .get(url)
        .set("Accept", "application/json")
        .set("User-Agent", "contrib-cli")
        .call()
        .map_err(|err| fetch_error(err.to_string()))?;

    let body = response
        .into_string()
        .map_err(|err| fetch_error(err.to_string()))?;

    Ok(source::decode_payload(&body)?)
}

/// Print the reversed-range notice. The command still renders an empty
/// result and exits successfully.
pub fn report_invalid_range(outcome: &FilterOutcome<'_>, output: OutputMode) -> Result<()> {
    if let Some(err) = outcome.invalid_range() {
        render_error(
            output,
            &CliError::from_code(ErrorCode::InvalidDateRange, err.to_string()),
        )
        .context("failed to write range notice")?;
    }
    Ok(())
}
