//! Performance benchmarks for the money-funnel engine.
//!
//! The calculators are re-run on every slider movement, so a single funnel
//! should stay in the low microseconds:
//! - Employee funnel: < 5μs mean
//! - Sole-trader funnel: < 10μs mean
//! - POST /calculate round trip: < 100μs mean
//! - Batch of 1000 requests: < 100ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::str::FromStr;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use fickpengar::api::{create_router, AppState};
use fickpengar::calculation::{calculate_employee, calculate_entrepreneur};
use fickpengar::config::ConfigLoader;
use fickpengar::export::{Statement, StatementOptions};
use fickpengar::models::TaskDetails;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/sweden").expect("Failed to load config");
    AppState::new(config)
}

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn calculate_body(mode: &str, hours: &str) -> String {
    serde_json::json!({
        "mode": mode,
        "task": { "task_name": "Snöskottning", "rate": "312.50", "hours": hours }
    })
    .to_string()
}

/// Benchmark: both calculators called directly.
fn bench_calculators(c: &mut Criterion) {
    let task = TaskDetails::new("Snöskottning", dec("312.50"), dec("2.75"));

    c.bench_function("employee_funnel", |b| {
        b.iter(|| black_box(calculate_employee(black_box(&task), None)))
    });

    c.bench_function("entrepreneur_funnel", |b| {
        b.iter(|| black_box(calculate_entrepreneur(black_box(&task), None)))
    });
}

/// Benchmark: statement rendering of a sole-trader result.
fn bench_statement(c: &mut Criterion) {
    let task = TaskDetails::new("Snöskottning", dec("312.50"), dec("2.75"));
    let result = calculate_entrepreneur(&task, None).expect("Failed to calculate");
    let options = StatementOptions::default();

    c.bench_function("statement_render", |b| {
        b.iter(|| black_box(Statement::build(black_box(&result), &options).to_string()))
    });
}

/// Benchmark: single POST /calculate request per mode.
///
/// Target: < 100μs mean
fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());

    let mut group = c.benchmark_group("calculate_endpoint");

    for mode in ["employee", "entrepreneur"] {
        let body = calculate_body(mode, "2.75");

        group.bench_with_input(BenchmarkId::new("mode", mode), &body, |b, body| {
            b.to_async(&rt).iter(|| async {
                let router = router.clone();
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                black_box(response)
            })
        });
    }

    group.finish();
}

/// Benchmark: Batch of 1000 requests alternating between modes.
///
/// Target: < 100ms mean
fn bench_batch_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();

    // Vary hours so every request is distinct
    let requests: Vec<String> = (0..1000)
        .map(|i| {
            let mode = if i % 2 == 0 { "employee" } else { "entrepreneur" };
            calculate_body(mode, &format!("{}.{:02}", 1 + i % 8, i % 100))
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(1000));
    // Reduce sample size for large batches to keep benchmark time reasonable
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(1000);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_calculators,
    bench_statement,
    bench_calculate_endpoint,
    bench_batch_1000,
);
criterion_main!(benches);
