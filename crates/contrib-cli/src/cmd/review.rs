//! `contrib review`: year-in-review totals.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use contrib_core::review::{YearReview, year_review};

use super::common::{DashboardState, RunContext, SourceArgs};
use crate::output::{bar, pretty_kv, pretty_section, render_mode};

const BAR_WIDTH: usize = 30;

/// Arguments for `contrib review`.
#[derive(Args, Debug, Default)]
pub struct ReviewArgs {
    /// Year to review (defaults to the current year).
    #[arg(long)]
    pub year: Option<i32>,

    /// Length of the top-campaigns list (defaults to `[review] top_campaigns`).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Execute `contrib review`.
pub fn run_review(args: &ReviewArgs, source: &SourceArgs, ctx: &RunContext) -> Result<()> {
    let state = DashboardState::load(source, ctx)?;
    let year = args.year.unwrap_or_else(|| ctx.current_year());
    let top = args.top.unwrap_or(ctx.config.review.top_campaigns);
    let review = year_review(&state.records, year, top);
    render_mode(ctx.output, &review, render_text, render_pretty)
}

fn render_text(review: &YearReview, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "year\t{}", review.year)?;
    writeln!(w, "total\t{}", review.total_edits)?;
    writeln!(w, "depicts\t{}", review.depicts_edits)?;
    writeln!(w, "captions\t{}", review.caption_edits)?;
    writeln!(w, "campaigns\t{}", review.campaigns_count)?;
    writeln!(w, "languages\t{}", review.languages_count)?;
    writeln!(w, "caption_chars\t{}", review.estimated_caption_chars)?;
    for campaign in &review.top_campaigns {
        writeln!(w, "top\t{}\t{}", campaign.name, campaign.edits)?;
    }
    Ok(())
}

fn render_pretty(review: &YearReview, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("{} in review", review.year))?;
    pretty_kv(w, "Total edits", review.total_edits.to_string())?;
    pretty_kv(w, "Depicts added", review.depicts_edits.to_string())?;
    pretty_kv(w, "Captions written", review.caption_edits.to_string())?;
    pretty_kv(w, "Campaigns", review.campaigns_count.to_string())?;
    pretty_kv(w, "Languages", review.languages_count.to_string())?;
    pretty_kv(
        w,
        "Caption text",
        format!("~{} characters", review.estimated_caption_chars),
    )?;

    if review.top_campaigns.is_empty() {
        writeln!(w)?;
        writeln!(w, "No contributions in {}.", review.year)?;
        return Ok(());
    }

    writeln!(w)?;
    pretty_section(w, "Top campaigns")?;
    let max = review
        .top_campaigns
        .iter()
        .map(|c| c.edits)
        .max()
        .unwrap_or(0);
    let width = review
        .top_campaigns
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);
    for campaign in &review.top_campaigns {
        writeln!(
            w,
            "{:<width$}  {:>5}  {}",
            campaign.name,
            campaign.edits,
            bar(
                usize::try_from(campaign.edits).unwrap_or(usize::MAX),
                usize::try_from(max).unwrap_or(usize::MAX),
                BAR_WIDTH
            )
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contrib_core::sample::fallback_records;

    fn render(year: i32, f: fn(&YearReview, &mut dyn Write) -> io::Result<()>) -> String {
        let review = year_review(&fallback_records(), year, 6);
        let mut buf = Vec::new();
        f(&review, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn text_reports_totals_and_top_campaigns() {
        let text = render(2024, render_text);
        assert!(text.contains("total\t100\n"));
        assert!(text.contains("captions\t50\n"));
        assert!(text.contains("caption_chars\t2500\n"));
        assert!(text.contains("top\tBirds\t50\n"));
    }

    #[test]
    fn empty_year_says_so() {
        let text = render(2019, render_pretty);
        assert!(text.contains("2019 in review"));
        assert!(text.contains("No contributions in 2019."));
    }
}
