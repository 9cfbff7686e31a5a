//! Benchmarks for the leveling and streak hot paths.
//!
//! Note: the crate is a binary without a library target, so these benchmarks
//! exercise the same arithmetic shapes standalone rather than importing the
//! store directly.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn xp_for_level(level: u32) -> f64 {
    (100.0 * 1.5f64.powi(level as i32 - 1)).floor()
}

fn bench_level_up_loop(c: &mut Criterion) {
    c.bench_function("level_up_loop_10k_xp", |b| {
        b.iter(|| {
            let mut remaining = black_box(10_000.0f64);
            let mut level = 1u32;
            let mut threshold = xp_for_level(level);
            while remaining >= threshold {
                remaining -= threshold;
                level += 1;
                threshold = xp_for_level(level);
            }
            (level, remaining)
        })
    });
}

fn bench_streak_day_diff(c: &mut Criterion) {
    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let dates: Vec<NaiveDate> = (0..365)
        .map(|offset| today - chrono::Duration::days(offset))
        .collect();
    c.bench_function("streak_day_diff_365", |b| {
        b.iter(|| {
            dates
                .iter()
                .filter(|date| (today - **date).num_days() <= 1)
                .count()
        })
    });
}

fn bench_progress_xp(c: &mut Criterion) {
    c.bench_function("progress_xp_1k_entries", |b| {
        b.iter(|| {
            (1..=1000)
                .map(|value| {
                    let value = black_box(value as f64);
                    let target = 10.0;
                    let base = ((value / target) * 100.0).floor();
                    let bonus = if value > target {
                        ((value - target) * 10.0).floor()
                    } else {
                        0.0
                    };
                    base + bonus
                })
                .sum::<f64>()
        })
    });
}

criterion_group!(
    benches,
    bench_level_up_loop,
    bench_streak_day_diff,
    bench_progress_xp
);
criterion_main!(benches);
