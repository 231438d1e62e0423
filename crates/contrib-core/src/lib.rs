//! contrib-core: contribution-history dashboard engine.
//!
//! Pure transformations from a list of [`ContributionRecord`]s to the
//! structures a dashboard renders:
//!
//! - [`filter`] turns a [`FilterSelection`] into a [`Predicate`];
//! - [`aggregate`] derives summary scalars and chart series;
//! - [`calendar`] lays out the 53-week activity grid for a reference year;
//! - [`navigation`] moves that reference year and rebuilds the grid.
//!
//! Supporting modules cover the table view, facet option lists, the year in
//! review, and record sources.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` types in the engine, `anyhow::Result` at the
//!   config boundary.
//! - **Logging**: `tracing` macros; entry points are `#[instrument]`ed at
//!   debug level with record slices skipped.

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod error;
pub mod facets;
pub mod filter;
pub mod model;
pub mod navigation;
pub mod review;
pub mod sample;
pub mod series;
pub mod source;
pub mod table;
pub mod timing;

pub use aggregate::{AggregationResult, FilterOutcome, Summary, aggregate, evaluate};
pub use calendar::{CalendarGrid, DayCell, Intensity, MonthSpan, WeekColumn, build_grid};
pub use filter::{FilterSelection, InvalidRange, Predicate};
pub use model::ContributionRecord;
pub use navigation::{CalendarController, Direction, Navigator};
pub use series::CountSeries;
