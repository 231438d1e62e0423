//! Reference-year navigation for the activity calendar.
//!
//! The current calendar year is injected rather than read from the clock so
//! navigation is deterministic under test; the CLI passes `Local::now()`.

use serde::Serialize;
use tracing::debug;

use crate::calendar::{self, CalendarGrid};
use crate::model::ContributionRecord;

/// Default length of the navigable-years list.
pub const DEFAULT_YEAR_LIST_LEN: usize = 5;

/// One step backwards or forwards in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Back,
    Forward,
}

impl Direction {
    #[must_use]
    pub const fn delta(self) -> i32 {
        match self {
            Self::Back => -1,
            Self::Forward => 1,
        }
    }
}

/// Only `-1` and `+1` are directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("navigation step must be -1 or +1, got {0}")]
pub struct InvalidDirection(pub i8);

impl TryFrom<i8> for Direction {
    type Error = InvalidDirection;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Self::Back),
            1 => Ok(Self::Forward),
            other => Err(InvalidDirection(other)),
        }
    }
}

/// Tracks the calendar's reference year.
///
/// Invariant: `reference_year <= current_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Navigator {
    reference_year: i32,
    current_year: i32,
}

impl Navigator {
    /// Start at the current year.
    #[must_use]
    pub const fn new(current_year: i32) -> Self {
        Self {
            reference_year: current_year,
            current_year,
        }
    }

    /// Start at `year`, clamped so the window never lies in the future.
    #[must_use]
    pub fn at(year: i32, current_year: i32) -> Self {
        Self {
            reference_year: year.min(current_year),
            current_year,
        }
    }

    #[must_use]
    pub const fn reference_year(&self) -> i32 {
        self.reference_year
    }

    #[must_use]
    pub const fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Whether a forward step would change the reference year.
    #[must_use]
    pub const fn can_go_forward(&self) -> bool {
        self.reference_year < self.current_year
    }

    /// Move one year and return the new reference year.
    ///
    /// Forward at the current year is a no-op. Backwards has no lower bound.
    pub fn navigate(&mut self, direction: Direction) -> i32 {
        match direction {
            Direction::Forward if !self.can_go_forward() => {
                debug!(year = self.reference_year, "already at current year");
            }
            _ => {
                self.reference_year = self.reference_year.saturating_add(direction.delta());
            }
        }
        self.reference_year
    }

    /// Jump back to the current calendar year.
    pub const fn reset(&mut self) -> i32 {
        self.reference_year = self.current_year;
        self.reference_year
    }

    /// Rolling list of `len` navigable years ending at the current year,
    /// newest first.
    #[must_use]
    pub fn years(&self, len: usize) -> Vec<i32> {
        (0..len)
            .map_while(|back| i32::try_from(back).ok())
            .map(|back| self.current_year.saturating_sub(back))
            .collect()
    }
}

/// A navigator paired with the grid for its reference year.
///
/// Each year change rebuilds the grid from scratch; a refused forward step
/// leaves the existing grid untouched.
#[derive(Debug, Clone)]
pub struct CalendarController {
    navigator: Navigator,
    grid: CalendarGrid,
}

impl CalendarController {
    #[must_use]
    pub fn new(navigator: Navigator, records: &[ContributionRecord]) -> Self {
        let grid = calendar::build_grid(records, navigator.reference_year());
        Self { navigator, grid }
    }

    #[must_use]
    pub const fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    #[must_use]
    pub const fn grid(&self) -> &CalendarGrid {
        &self.grid
    }

    /// Step one year; returns `true` when the grid was rebuilt.
    pub fn navigate(&mut self, direction: Direction, records: &[ContributionRecord]) -> bool {
        let before = self.navigator.reference_year();
        let after = self.navigator.navigate(direction);
        if before == after {
            return false;
        }
        self.grid = calendar::build_grid(records, after);
        true
    }

    /// Return to the current year; returns `true` when the grid was rebuilt.
    pub fn reset(&mut self, records: &[ContributionRecord]) -> bool {
        let before = self.navigator.reference_year();
        let after = self.navigator.reset();
        if before == after {
            return false;
        }
        self.grid = calendar::build_grid(records, after);
        true
    }

    /// Consume the controller, keeping the final grid.
    #[must_use]
    pub fn into_grid(self) -> CalendarGrid {
        self.grid
    }
}
