//! `contrib calendar`: the 53-week activity heatmap.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use contrib_core::calendar::{CalendarGrid, DAYS_PER_WEEK, Intensity, WEEKS};
use contrib_core::navigation::{Direction, Navigator};
use serde::Serialize;
use tracing::debug;

use super::common::{DashboardState, RunContext, SourceArgs};
use crate::output::{pretty_rule, render_mode};

const ROW_LABELS: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Arguments for `contrib calendar`.
#[derive(Args, Debug, Default)]
pub struct CalendarArgs {
    /// Reference year (defaults to the current year; future years clamp to it).
    #[arg(long)]
    pub year: Option<i32>,

    /// Step this many years back from the starting year.
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub back: u32,

    /// Step this many years forward; stops at the current year.
    #[arg(long, value_name = "N", default_value_t = 0)]
    pub forward: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CalendarReport<'a> {
    current_year: i32,
    can_go_forward: bool,
    navigable_years: Vec<i32>,
    active_days: usize,
    grid: &'a CalendarGrid,
}

/// Execute `contrib calendar`.
pub fn run_calendar(args: &CalendarArgs, source: &SourceArgs, ctx: &RunContext) -> Result<()> {
    let mut state = DashboardState::load(source, ctx)?;
    let current_year = ctx.current_year();
    state.navigator = Navigator::at(args.year.unwrap_or(current_year), current_year);

    let mut controller = state.calendar();
    let steps = std::iter::repeat_n(Direction::Back, args.back as usize)
        .chain(std::iter::repeat_n(Direction::Forward, args.forward as usize));
    for direction in steps {
        if !controller.navigate(direction, &state.records) {
            debug!(?direction, "navigation had no effect");
        }
    }
    state.navigator = *controller.navigator();

    let grid = controller.grid();
    let report = CalendarReport {
        current_year,
        can_go_forward: state.navigator.can_go_forward(),
        navigable_years: state.navigator.years(ctx.config.calendar.year_list_len),
        active_days: grid.active_days(),
        grid,
    };

    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn render_text(report: &CalendarReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let grid = report.grid;
    writeln!(w, "year\t{}", grid.reference_year)?;
    writeln!(w, "total\t{}", grid.year_total)?;
    writeln!(w, "active_days\t{}", report.active_days)?;
    for span in &grid.month_spans {
        writeln!(
            w,
            "span\t{}\t{}\t{}",
            span.label, span.start_week_index, span.end_week_index
        )?;
    }
    for cell in grid.cells().filter(|cell| cell.count > 0) {
        if let Some(date) = cell.date {
            writeln!(w, "day\t{date}\t{}\t{}", cell.count, cell.level.level())?;
        }
    }
    Ok(())
}

fn render_pretty(report: &CalendarReport<'_>, w: &mut dyn Write) -> io::Result<()> {
    let grid = report.grid;
    writeln!(
        w,
        "{} contributions in {} ({} active days)",
        grid.year_total, grid.reference_year, report.active_days
    )?;
    pretty_rule(w)?;

    writeln!(w, "    {}", month_header(grid))?;
    for (row, label) in ROW_LABELS.iter().enumerate() {
        let cells: String = grid
            .weeks
            .iter()
            .map(|week| {
                let cell = &week.days[row];
                if cell.is_padding() { ' ' } else { glyph(cell.level) }
            })
            .collect();
        writeln!(w, "{label} {cells}")?;
    }

    let legend: String = [
        Intensity::None,
        Intensity::Low,
        Intensity::Medium,
        Intensity::High,
        Intensity::Max,
    ]
    .into_iter()
    .map(glyph)
    .collect();
    writeln!(w)?;
    writeln!(w, "Less {legend} More")?;

    let years: Vec<String> = report
        .navigable_years
        .iter()
        .map(|year| {
            if *year == grid.reference_year {
                format!("[{year}]")
            } else {
                year.to_string()
            }
        })
        .collect();
    writeln!(w, "Years: {}", years.join(" "))?;
    if report.can_go_forward {
        writeln!(w, "Use --forward 1 for the next year.")?;
    }
    Ok(())
}

/// Month labels placed over their first week column.
fn month_header(grid: &CalendarGrid) -> String {
    let mut header = vec![' '; WEEKS + 3];
    for span in &grid.month_spans {
        let start = span.start_week_index;
        if header[start..start + 3].iter().any(|c| *c != ' ') {
            continue;
        }
        for (offset, ch) in span.label.chars().enumerate() {
            header[start + offset] = ch;
        }
    }
    header.into_iter().collect::<String>().trim_end().to_string()
}

const fn glyph(level: Intensity) -> char {
    match level {
        Intensity::None => '·',
        Intensity::Low => '░',
        Intensity::Medium => '▒',
        Intensity::High => '▓',
        Intensity::Max => '█',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contrib_core::build_grid;
    use contrib_core::sample::fallback_records;

    fn render(grid: &CalendarGrid, f: fn(&CalendarReport<'_>, &mut dyn Write) -> io::Result<()>) -> String {
        let report = CalendarReport {
            current_year: 2026,
            can_go_forward: true,
            navigable_years: Navigator::at(2024, 2026).years(5),
            active_days: grid.active_days(),
            grid,
        };
        let mut buf = Vec::new();
        f(&report, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn month_header_starts_with_january() {
        let grid = build_grid(&[], 2024);
        let header = month_header(&grid);
        assert!(header.starts_with("Jan"));
        assert!(header.contains("Dec"));
    }

    #[test]
    fn pretty_has_seven_rows_of_53_columns() {
        let grid = build_grid(&fallback_records(), 2024);
        let text = render(&grid, render_pretty);
        let rows: Vec<&str> = text
            .lines()
            .filter(|line| ROW_LABELS.iter().any(|label| line.starts_with(label)))
            .collect();
        assert_eq!(rows.len(), DAYS_PER_WEEK);
        for row in rows {
            assert_eq!(row.chars().count(), 4 + WEEKS);
        }
        assert!(text.contains("[2024]"));
    }

    #[test]
    fn text_lists_active_days() {
        let grid = build_grid(&fallback_records(), 2024);
        let text = render(&grid, render_text);
        assert!(text.contains("year\t2024\n"));
        assert!(text.contains("total\t100\n"));
        // 100 records over nine months: 12 on 2024-01-01, level 4.
        assert!(text.contains("day\t2024-01-01\t12\t4\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with("span\t")).count(), 12);
    }
}
