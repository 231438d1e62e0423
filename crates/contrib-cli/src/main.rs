#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use cmd::common::{RunContext, SourceArgs, SourceError};
use contrib_core::config;
use contrib_core::error::ErrorCode;
use contrib_core::timing;
use output::{CliError, OutputMode};
use std::env;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "contrib: contribution history dashboard",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit command timing report to stderr.
    #[arg(long, global = true)]
    timing: bool,

    /// Output format (defaults to pretty on a terminal, text when piped).
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(flatten)]
    source: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn flag_format(&self) -> Option<&'static str> {
        output::flag_format(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Dashboard",
        about = "Summary cards and chart series",
        long_about = "Filter the contributions and print the summary cards with the by-month, by-campaign and by-edit-type series.",
        after_help = "EXAMPLES:\n    # Everything in the payload\n    contrib summary --input contributions.json\n\n    # One campaign in the first half of 2024\n    contrib summary --campaign Birds --from 2024-01-01 --to 2024-06-30\n\n    # The day behind a calendar cell\n    contrib summary --day 2024-06-15 --format json"
    )]
    Summary(cmd::summary::SummaryArgs),

    #[command(
        next_help_heading = "Dashboard",
        about = "53-week activity calendar",
        long_about = "Render the activity heatmap for one calendar year. Filters never apply to the calendar.",
        after_help = "EXAMPLES:\n    # The current year\n    contrib calendar --input contributions.json\n\n    # Two years back\n    contrib calendar --back 2\n\n    # A specific year as JSON\n    contrib calendar --year 2024 --format json"
    )]
    Calendar(cmd::calendar::CalendarArgs),

    #[command(
        next_help_heading = "Dashboard",
        about = "Sorted, paginated contribution rows",
        long_about = "List the filtered contributions as table rows, newest first by default.",
        after_help = "EXAMPLES:\n    # First page, newest first\n    contrib table --input contributions.json\n\n    # Third page sorted by file name\n    contrib table --sort file --asc --page 3\n\n    # Search file names\n    contrib table --search sunset"
    )]
    Table(cmd::table::TableArgs),

    #[command(
        next_help_heading = "Dashboard",
        about = "Filter option lists",
        long_about = "Print the distinct campaigns, languages, edit types and countries in the payload.",
        after_help = "EXAMPLES:\n    # Options as JSON\n    contrib facets --input contributions.json --format json"
    )]
    Facets(cmd::facets::FacetsArgs),

    #[command(
        next_help_heading = "Dashboard",
        about = "Year in review",
        long_about = "Totals, caption estimate and top campaigns for one calendar year.",
        after_help = "EXAMPLES:\n    # The current year\n    contrib review --input contributions.json\n\n    # A demo history for 2025 with ten campaigns listed\n    contrib review --demo alice --year 2025 --top 10"
    )]
    Review(cmd::review::ReviewArgs),

    #[command(
        next_help_heading = "Setup",
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n    # Bash\n    contrib completions bash > ~/.local/share/bash-completion/completions/contrib\n\n    # Zsh\n    contrib completions zsh > ~/.zfunc/_contrib"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env("CONTRIB_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "contrib=debug,info"
        } else if quiet {
            "error"
        } else {
            "contrib=info,warn"
        })
    });

    let format = env::var("CONTRIB_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Stable code for a command failure.
fn error_code(err: &anyhow::Error) -> ErrorCode {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<SourceError>())
        .map_or(ErrorCode::InternalUnexpected, SourceError::code)
}

fn report_timing() -> anyhow::Result<()> {
    let report = timing::collect_report();
    if report.is_empty() {
        eprintln!("timing report: no samples recorded");
    } else {
        eprintln!("timing report:");
        eprintln!("{}", report.display_table());
        eprintln!("timing report (json):");
        eprintln!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let timing_enabled = cli.timing || timing::timing_enabled_from_env();
    timing::set_timing_enabled(timing_enabled);
    timing::clear_timings();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let project_root = env::current_dir()?;
    let effective = match config::resolve_config(&project_root, cli.flag_format()) {
        Ok(effective) => effective,
        Err(err) => {
            let output = output::resolve_without_config(cli.format, cli.json);
            output::render_error(
                output,
                &CliError::from_code(ErrorCode::ConfigParseError, format!("{err:#}")),
            )?;
            std::process::exit(1);
        }
    };
    debug!(output = %effective.resolved_output, "resolved output mode");

    let ctx = RunContext {
        output: OutputMode::from_name(&effective.resolved_output),
        config: effective.project,
        today: chrono::Local::now().date_naive(),
    };
    let source = &cli.source;

    let command_result = match cli.command {
        Commands::Summary(ref args) => timing::timed("cmd.summary", || {
            cmd::summary::run_summary(args, source, &ctx)
        }),
        Commands::Calendar(ref args) => timing::timed("cmd.calendar", || {
            cmd::calendar::run_calendar(args, source, &ctx)
        }),
        Commands::Table(ref args) => {
            timing::timed("cmd.table", || cmd::table::run_table(args, source, &ctx))
        }
        Commands::Facets(ref args) => {
            timing::timed("cmd.facets", || cmd::facets::run_facets(args, source, &ctx))
        }
        Commands::Review(ref args) => {
            timing::timed("cmd.review", || cmd::review::run_review(args, source, &ctx))
        }
        Commands::Completions(ref args) => timing::timed("cmd.completions", || {
            let mut command = Cli::command();
            cmd::completions::run_completions(args, &mut command)
        }),
    };

    if timing_enabled {
        report_timing()?;
    }

    if let Err(err) = command_result {
        let code = error_code(&err);
        output::render_error(ctx.output, &CliError::from_code(code, format!("{err:#}")))?;
        std::process::exit(1);
    }
    Ok(())
}
