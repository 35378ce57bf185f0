use criterion::{Criterion, black_box, criterion_group, criterion_main};

use steeltally::engine::normalize::normalize;
use steeltally::engine::ranking::{average_ranking, best_time_ranking, steel_ranking};
use steeltally::sheet::{Cell, Slot, TimeSheet, rounds};

/// A fully populated sheet: `count` shooters with all 60 cells committed.
fn make_full_sheet(count: usize) -> (Vec<String>, TimeSheet) {
    let shooters: Vec<String> = (0..count).map(|i| format!("shooter-{i:03}")).collect();
    let mut sheet = TimeSheet::default();
    for (i, name) in shooters.iter().enumerate() {
        for round in rounds() {
            for (s, slot) in Slot::ALL.into_iter().enumerate() {
                let total = 4.0 + ((i * 7 + round as usize * 3 + s) % 40) as f64 / 4.0;
                sheet = sheet.with_cell(
                    name,
                    round,
                    slot,
                    Cell {
                        input: format!("{total}"),
                        total: Some(total),
                        editable: false,
                    },
                );
            }
        }
    }
    (shooters, sheet)
}

fn bench_normalize(c: &mut Criterion) {
    let raw = "  12..5++3.x4.  +9,8+.25.. ";
    c.bench_function("normalize (messy input)", |b| {
        b.iter(|| normalize(black_box(raw)))
    });
}

fn bench_rankings(c: &mut Criterion) {
    let (shooters, sheet) = make_full_sheet(50);

    c.bench_function("steel_ranking (50 shooters, full sheet)", |b| {
        b.iter(|| steel_ranking(black_box(&shooters), black_box(&sheet)))
    });
    c.bench_function("average_ranking (50 shooters, full sheet)", |b| {
        b.iter(|| average_ranking(black_box(&shooters), black_box(&sheet)))
    });
    c.bench_function("best_time_ranking (50 shooters, full sheet)", |b| {
        b.iter(|| best_time_ranking(black_box(&shooters), black_box(&sheet)))
    });
}

criterion_group!(benches, bench_normalize, bench_rankings);
criterion_main!(benches);
