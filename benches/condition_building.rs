use chrono::NaiveDate;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use qcond::filter::{PlaceholderContext, QueryEngine};
use qcond::operators::OperatorCatalog;
use qcond::parser::QueryParser;
use qcond::sql::{SqlBackend, SqlDialect};
use std::hint::black_box;
use std::time::Duration;

// Generate an OR of `leaves` mixed-type comparisons
fn generate_query(leaves: usize) -> String {
    let children: Vec<String> = (0..leaves)
        .map(|i| match i % 4 {
            0 => format!(
                r#"{{"type":"StringQuery","column":"name{i}","operator":"startsWith","value":"Person{i}"}}"#
            ),
            1 => format!(
                r#"{{"type":"NumericQuery","column":"value{i}","operator":"greaterThan","value":{}}}"#,
                i * 100
            ),
            2 => format!(
                r#"{{"type":"DateQuery","column":"due{i}","operator":"daysBefore","value":{i}}}"#
            ),
            _ => format!(
                r#"{{"type":"DateQuery","column":"created{i}","operator":"equals","value":"[today]"}}"#
            ),
        })
        .collect();
    format!(r#"{{"type":"OrQuery","children":[{}]}}"#, children.join(","))
}

fn context() -> PlaceholderContext {
    PlaceholderContext::new("bench-user", NaiveDate::from_ymd_opt(2025, 8, 21).unwrap())
}

fn bench_discovery(c: &mut Criterion) {
    c.bench_function("catalog_discovery", |b| {
        b.iter(|| black_box(OperatorCatalog::builtin().unwrap()));
    });
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    let parser = QueryParser::new();

    for size in [1, 10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        let query = generate_query(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(parser.parse(black_box(&query)).unwrap()));
        });
    }

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    let engine = QueryEngine::builtin(SqlBackend::new(SqlDialect::Postgres)).unwrap();
    let ctx = context();

    for size in [1, 10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        let query = generate_query(*size);

        group.bench_with_input(BenchmarkId::new("condition", size), size, |b, _| {
            b.iter(|| black_box(engine.compile(black_box(&query), &ctx).unwrap()));
        });

        group.bench_with_input(BenchmarkId::new("render", size), size, |b, _| {
            b.iter(|| black_box(engine.render(black_box(&query), &ctx).unwrap()));
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_discovery, bench_parse, bench_compile
}
criterion_main!(benches);
