//! `contrib table`: sorted, paginated rows of the filtered set.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use contrib_core::table::{SortDirection, SortKey, TablePage, TableView};
use serde::Serialize;

use super::common::{DashboardState, FilterArgs, RunContext, SourceArgs, report_invalid_range};
use crate::output::{pretty_rule, render_mode};

/// Arguments for `contrib table`.
#[derive(Args, Debug, Default)]
pub struct TableArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Column to sort by: date, campaign, file, edit_type, country, lang.
    #[arg(long, default_value_t = SortKey::Date)]
    pub sort: SortKey,

    /// Sort ascending (default is descending).
    #[arg(long, conflicts_with = "desc")]
    pub asc: bool,

    /// Sort descending.
    #[arg(long)]
    pub desc: bool,

    /// 1-based page number; pages past the end show the last page.
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (defaults to `[table] page_size`).
    #[arg(long, value_name = "N")]
    pub page_size: Option<usize>,
}

impl TableArgs {
    fn view(&self, default_page_size: usize) -> TableView {
        TableView {
            sort_key: self.sort,
            direction: if self.asc {
                SortDirection::Ascending
            } else {
                SortDirection::Descending
            },
            page: self.page,
            page_size: self.page_size.unwrap_or(default_page_size),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TableReport<'a> {
    view: TableView,
    #[serde(flatten)]
    page: TablePage<'a>,
}

/// Execute `contrib table`.
pub fn run_table(args: &TableArgs, source: &SourceArgs, ctx: &RunContext) -> Result<()> {
    let state = DashboardState::load(source, ctx)?.with_selection(args.filter.selection());
    let outcome = state.outcome();
    report_invalid_range(&outcome, ctx.output)?;

    let view = args.view(ctx.config.table.page_size);
    let result = outcome.into_result();
    let report = TableReport {
        view,
        page: view.page(&result.filtered),
    };

    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn render_text(report: &TableReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    for row in &report.page.rows {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            row.date, row.campaign, row.file, row.edit_type, row.country, row.lang
        )?;
    }
    Ok(())
}

fn render_pretty(report: &TableReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let page = &report.page;
    if page.rows.is_empty() {
        writeln!(w, "No contributions match the current filters.")?;
        return Ok(());
    }

    let campaign_width = column_width("Campaign", page.rows.iter().map(|r| r.campaign.as_str()));
    let file_width = column_width("File", page.rows.iter().map(|r| r.file.as_str()));
    writeln!(
        w,
        "{:<10}  {:<campaign_width$}  {:<file_width$}  {:<10}  {:<7}  Lang",
        "Date", "Campaign", "File", "Type", "Country"
    )?;
    pretty_rule(w)?;
    for row in &page.rows {
        writeln!(
            w,
            "{:<10}  {:<campaign_width$}  {:<file_width$}  {:<10}  {:<7}  {}",
            row.date, row.campaign, row.file, row.edit_type, row.country, row.lang
        )?;
    }
    writeln!(w)?;
    writeln!(
        w,
        "Page {} of {} ({} rows, sorted by {} {})",
        page.page,
        page.total_pages,
        page.total_rows,
        report.view.sort_key,
        match report.view.direction {
            SortDirection::Ascending => "ascending",
            SortDirection::Descending => "descending",
        }
    )
}

fn column_width<'a>(heading: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(heading.len()))
        .max()
        .unwrap_or(0)
}
