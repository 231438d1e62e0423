use chrono::Days;
use contrib_core::calendar::{DAYS_PER_WEEK, WEEKS, build_grid};
use contrib_core::navigation::{Direction, Navigator};
use proptest::prelude::*;

use generators::*;

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    #[test]
    fn grid_is_always_53_by_7(records in arb_records(), year in 1900_i32..2100) {
        let grid = build_grid(&records, year);
        prop_assert_eq!(grid.weeks.len(), WEEKS);
        prop_assert_eq!(grid.cells().count(), WEEKS * DAYS_PER_WEEK);
    }

    #[test]
    fn dense_year_counts_every_record(
        (year, records) in (1990_i32..2036).prop_flat_map(|y| (Just(y), arb_records_in_year(y))),
    ) {
        let grid = build_grid(&records, year);
        prop_assert_eq!(grid.year_total, records.len() as u64);
        prop_assert!(grid.max_count() as usize <= records.len());
    }

    #[test]
    fn cells_plus_overflow_conserve_year_total(
        year in 1990_i32..2036,
        records in arb_records(),
    ) {
        let grid = build_grid(&records, year);
        let window = grid.window;
        let last_cell = window
            .grid_start()
            .checked_add_days(Days::new((WEEKS * DAYS_PER_WEEK - 1) as u64))
            .expect("grid end is representable");

        let in_window = records
            .iter()
            .filter_map(contrib_core::ContributionRecord::day)
            .filter(|day| window.contains(*day))
            .count() as u64;
        let off_grid = records
            .iter()
            .filter_map(contrib_core::ContributionRecord::day)
            .filter(|day| window.contains(*day) && *day > last_cell)
            .count() as u64;
        let on_grid: u64 = grid
            .cells()
            .filter(|cell| !cell.is_padding())
            .map(|cell| u64::from(cell.count))
            .sum();

        prop_assert_eq!(grid.year_total, in_window);
        prop_assert_eq!(on_grid + off_grid, grid.year_total);
    }

    #[test]
    fn padding_cells_are_empty(records in arb_records(), year in 1990_i32..2036) {
        let grid = build_grid(&records, year);
        for cell in grid.cells().filter(|cell| cell.is_padding()) {
            prop_assert_eq!(cell.count, 0);
            prop_assert_eq!(cell.level.level(), 0);
        }
    }

    #[test]
    fn month_spans_are_contiguous(year in -3000_i32..3000) {
        let grid = build_grid(&[], year);
        let spans = &grid.month_spans;

        prop_assert_eq!(spans.len(), 12);
        prop_assert_eq!(spans[0].start_week_index, 0);
        prop_assert_eq!(spans[spans.len() - 1].end_week_index, WEEKS);
        for pair in spans.windows(2) {
            prop_assert_eq!(pair[0].end_week_index, pair[1].start_week_index);
            prop_assert!(pair[0].width() > 0);
            prop_assert_eq!(pair[0].month + 1, pair[1].month);
        }
    }

    #[test]
    fn grid_build_is_deterministic(records in arb_records(), year in 1990_i32..2036) {
        let snapshot = records.clone();
        let first = build_grid(&records, year);
        let second = build_grid(&records, year);
        prop_assert_eq!(first, second);
        prop_assert_eq!(records, snapshot);
    }

    #[test]
    fn navigation_never_passes_current_year(
        current in 1990_i32..2100,
        steps in prop::collection::vec(prop::bool::ANY, 0..40),
    ) {
        let mut nav = Navigator::new(current);
        for forward in steps {
            let direction = if forward { Direction::Forward } else { Direction::Back };
            let year = nav.navigate(direction);
            prop_assert!(year <= current);
        }
        prop_assert_eq!(nav.reset(), current);
    }
}
