//! Engine throughput over synthetic histories.
//!
//! Run with:
//! ```sh
//! cargo bench --bench engine
//! ```

use contrib_core::calendar::build_grid;
use contrib_core::filter::FilterSelection;
use contrib_core::model::ContributionRecord;
use contrib_core::sample::{SyntheticRange, synthetic_history};
use contrib_core::{aggregate, evaluate, filter};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

#[derive(Clone, Copy, Debug)]
struct Tier {
    name: &'static str,
    users: usize,
}

const TIERS: [Tier; 3] = [
    Tier { name: "S", users: 10 },
    Tier { name: "M", users: 100 },
    Tier { name: "L", users: 1_000 },
];

/// Concatenate demo histories for `users` distinct usernames across 2024.
fn corpus(users: usize) -> Vec<ContributionRecord> {
    (0..users)
        .flat_map(|i| synthetic_history(&format!("user-{i}"), SyntheticRange::Year(2024), &[]))
        .collect()
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine");

    for tier in TIERS {
        let records = corpus(tier.users);
        group.throughput(Throughput::Elements(records.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("aggregate.all", tier.name),
            &records,
            |b, records| {
                let predicate = filter::Predicate::accept_all();
                b.iter(|| black_box(aggregate(records, &predicate)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("aggregate.filtered", tier.name),
            &records,
            |b, records| {
                let selection = FilterSelection {
                    edit_type: "depicts".to_string(),
                    search_text: "file_1".to_string(),
                    ..FilterSelection::default()
                };
                b.iter(|| black_box(evaluate(records, &selection)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("calendar.build", tier.name),
            &records,
            |b, records| b.iter(|| black_box(build_grid(records, 2024))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_engine);
criterion_main!(benches);
