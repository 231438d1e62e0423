//! `contrib facets`: selector option lists from the full record set.

use std::io::{self, Write};

use anyhow::Result;
use clap::Args;
use contrib_core::facets::{FacetOptions, facet_options};

use super::common::{DashboardState, RunContext, SourceArgs};
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `contrib facets`.
#[derive(Args, Debug, Default)]
pub struct FacetsArgs {}

/// Execute `contrib facets`.
pub fn run_facets(_args: &FacetsArgs, source: &SourceArgs, ctx: &RunContext) -> Result<()> {
    let state = DashboardState::load(source, ctx)?;
    let options = facet_options(&state.records);
    render_mode(ctx.output, &options, render_text, render_pretty)
}

fn facet_lists(options: &FacetOptions) -> [(&'static str, &'static str, &[String]); 4] {
    [
        ("campaign", "Campaigns", options.campaigns.as_slice()),
        ("lang", "Languages", options.languages.as_slice()),
        ("edit_type", "Edit types", options.edit_types.as_slice()),
        ("country", "Countries", options.countries.as_slice()),
    ]
}

fn render_text(options: &FacetOptions, w: &mut dyn Write) -> io::Result<()> {
    for (key, _, values) in facet_lists(options) {
        for value in values {
            writeln!(w, "{key}\t{value}")?;
        }
    }
    Ok(())
}

fn render_pretty(options: &FacetOptions, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Filter options")?;
    for (_, heading, values) in facet_lists(options) {
        let listed = if values.is_empty() {
            "-".to_string()
        } else {
            values.join(", ")
        };
        pretty_kv(w, heading, listed)?;
    }
    Ok(())
}
