pub mod calendar;
pub mod common;
pub mod completions;
pub mod facets;
pub mod review;
pub mod summary;
pub mod table;
