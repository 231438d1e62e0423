//! `contrib summary`: summary cards and chart series for a filter state.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use contrib_core::series::CountSeries;
use contrib_core::{FilterSelection, Summary};
use serde::Serialize;

use super::common::{DashboardState, FilterArgs, RunContext, SourceArgs, report_invalid_range};
use crate::output::{bar, pretty_kv, pretty_section, render_mode};

const BAR_WIDTH: usize = 30;

/// Arguments for `contrib summary`.
#[derive(Args, Debug, Default)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SummaryReport<'a> {
    selection: &'a FilterSelection,
    #[serde(skip_serializing_if = "Option::is_none")]
    invalid_range: Option<String>,
    summary: &'a Summary,
    series_by_month: &'a CountSeries,
    series_by_campaign: &'a CountSeries,
    series_by_edit_type: &'a CountSeries,
}

/// Execute `contrib summary`.
pub fn run_summary(args: &SummaryArgs, source: &SourceArgs, ctx: &RunContext) -> Result<()> {
    let state = DashboardState::load(source, ctx)?.with_selection(args.filter.selection());
    let outcome = state.outcome();
    report_invalid_range(&outcome, ctx.output)?;

    let invalid_range = outcome.invalid_range().map(ToString::to_string);
    let result = outcome.into_result();
    let report = SummaryReport {
        selection: &state.selection,
        invalid_range,
        summary: &result.summary,
        series_by_month: &result.series_by_month,
        series_by_campaign: &result.series_by_campaign,
        series_by_edit_type: &result.series_by_edit_type,
    };

    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn render_text(report: &SummaryReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let summary = report.summary;
    writeln!(w, "total\t{}", summary.total)?;
    writeln!(w, "campaigns\t{}", summary.distinct_campaigns)?;
    writeln!(w, "first\t{}", summary.first_date.as_deref().unwrap_or("-"))?;
    writeln!(w, "last\t{}", summary.last_date.as_deref().unwrap_or("-"))?;
    for (key, _, series) in series_list(report) {
        for (label, count) in series.iter() {
            writeln!(w, "{key}\t{label}\t{count}")?;
        }
    }
    Ok(())
}

fn render_pretty(report: &SummaryReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let summary = report.summary;
    pretty_section(w, "Summary")?;
    pretty_kv(w, "Total edits", summary.total.to_string())?;
    pretty_kv(w, "Campaigns", summary.distinct_campaigns.to_string())?;
    pretty_kv(w, "First edit", summary.first_date.as_deref().unwrap_or("-"))?;
    pretty_kv(w, "Last edit", summary.last_date.as_deref().unwrap_or("-"))?;

    if summary.total == 0 {
        writeln!(w)?;
        writeln!(w, "No contributions match the current filters.")?;
        return Ok(());
    }

    for (key, heading, series) in series_list(report) {
        writeln!(w)?;
        pretty_section(w, heading)?;
        let rows = if key == "month" {
            series.sorted_by_key()
        } else {
            series.sorted_by_count()
        };
        let max = rows.iter().map(|(_, count)| *count).max().unwrap_or(0);
        let label_width = rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        for (label, count) in rows {
            let label = if label.is_empty() { "(none)" } else { label };
            writeln!(
                w,
                "{label:<label_width$}  {count:>5}  {}",
                bar(count, max, BAR_WIDTH)
            )?;
        }
    }
    Ok(())
}

/// `(text key, pretty heading, series)` for each chart.
fn series_list<'a>(report: &SummaryReport<'a>) -> [(&'static str, &'static str, &'a CountSeries); 3] {
    [
        ("month", "By month", report.series_by_month),
        ("campaign", "By campaign", report.series_by_campaign),
        ("edit_type", "By edit type", report.series_by_edit_type),
    ]
}
