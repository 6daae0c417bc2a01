use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use chrono::NaiveDate;

use kcalrs::tables::{default_cardio_table, default_training_table};
use kcalrs::{
    calculate_bmr, calculate_breakdown, calculate_weight_trend, parse_step_range, sparkline_points,
    summarize, ActivityMultipliers, BreakdownInput, CardioIntensity, CardioSession, Gender,
    SparklineOptions, TrainingProfile, UserData, UserProfile, WeightEntry,
};

/// Performance benchmarks for the expenditure engine
///
/// These benchmarks cover the hot paths with varying dataset sizes:
/// token parsing, breakdown composition, and weight-trend analysis.

fn bench_step_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Step Parsing");

    for token in ["14k", "<10k", "10k-12k", ">20k", "8000 to 12000"] {
        group.bench_with_input(
            BenchmarkId::new("parse_step_range", token),
            &token,
            |b, token| {
                b.iter(|| black_box(parse_step_range(token)));
            },
        );
    }

    group.finish();
}

fn bench_breakdown(c: &mut Criterion) {
    let cardio_table = default_cardio_table();
    let training_table = default_training_table();

    let mut group = c.benchmark_group("Daily Breakdown");

    // Scale by the number of logged cardio sessions
    for &sessions in &[1usize, 4, 16] {
        let user_data = create_benchmark_user(sessions);
        let bmr = calculate_bmr(&user_data.profile);

        group.throughput(Throughput::Elements(sessions as u64));
        group.bench_with_input(
            BenchmarkId::new("calculate_breakdown", sessions),
            &user_data,
            |b, user_data| {
                b.iter(|| {
                    black_box(calculate_breakdown(&BreakdownInput {
                        steps_token: "10k-12k",
                        is_training_day: true,
                        user_data,
                        bmr,
                        cardio_table: &cardio_table,
                        training_table: &training_table,
                    }))
                });
            },
        );
    }

    group.finish();
}

fn bench_trend_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("Trend Analysis");

    for &days in &[30usize, 90, 365] {
        let entries = create_entry_series(days);

        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(
            BenchmarkId::new("calculate_weight_trend", days),
            &entries,
            |b, entries| {
                b.iter(|| black_box(calculate_weight_trend(entries, 30)));
            },
        );

        group.bench_with_input(
            BenchmarkId::new("summarize", days),
            &entries,
            |b, entries| {
                b.iter(|| black_box(summarize(entries)));
            },
        );
    }

    group.finish();
}

fn bench_sparkline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Sparkline Geometry");
    let options = SparklineOptions {
        limit: 365,
        ..Default::default()
    };

    for &days in &[30usize, 365] {
        let entries = create_entry_series(days);

        group.throughput(Throughput::Elements(days as u64));
        group.bench_with_input(
            BenchmarkId::new("sparkline_points", days),
            &entries,
            |b, entries| {
                b.iter(|| black_box(sparkline_points(entries, &options)));
            },
        );
    }

    group.finish();
}

fn bench_entry_serialization(c: &mut Criterion) {
    let mut group = c.benchmark_group("Entry Serialization");

    for &count in &[100usize, 1000] {
        let entries = create_entry_series(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(
            BenchmarkId::new("json_serialize", count),
            &entries,
            |b, entries| {
                b.iter(|| {
                    let _ = serde_json::to_string(entries);
                });
            },
        );

        let json = serde_json::to_string(&entries).unwrap();
        group.bench_with_input(
            BenchmarkId::new("json_deserialize", count),
            &json,
            |b, json| {
                b.iter(|| {
                    let _: Result<Vec<WeightEntry>, _> = serde_json::from_str(json);
                });
            },
        );
    }

    group.finish();
}

// Helper functions for benchmarks

fn create_benchmark_user(cardio_sessions: usize) -> UserData {
    let kinds = ["running", "cycling", "swimming", "rowing"];

    UserData {
        profile: UserProfile {
            age: 25.0,
            weight_kg: 80.0,
            height_cm: 180.0,
            gender: Gender::Male,
        },
        activity: ActivityMultipliers::default(),
        training: Some(TrainingProfile {
            kind: "strength".to_string(),
            duration_hours: 1.5,
        }),
        cardio_sessions: (0..cardio_sessions)
            .map(|i| CardioSession {
                kind: kinds[i % kinds.len()].to_string(),
                duration_min: 20.0 + (i % 5) as f64 * 10.0,
                intensity: Some(match i % 3 {
                    0 => CardioIntensity::Light,
                    1 => CardioIntensity::Moderate,
                    _ => CardioIntensity::Vigorous,
                }),
                avg_heart_rate: None,
            })
            .collect(),
    }
}

fn create_entry_series(days: usize) -> Vec<WeightEntry> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

    (0..days)
        .map(|day| {
            let date = start + chrono::Duration::days(day as i64);
            let weight = 82.0 + (day as f64 * 0.2).sin() * 1.5 - day as f64 * 0.01;
            WeightEntry::new(date.format("%Y-%m-%d").to_string(), weight)
        })
        .collect()
}

// Define benchmark groups
criterion_group!(
    benches,
    bench_step_parsing,
    bench_breakdown,
    bench_trend_analysis,
    bench_sparkline,
    bench_entry_serialization
);

criterion_main!(benches);
