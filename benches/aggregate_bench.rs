//! Benchmarks for loading, aggregation and chart markup
//!
//! Run with: cargo bench

use chrono::NaiveDate;
use crashviz::aggregate::{by_condition, by_month, Filter};
use crashviz::chart::{BarChart, BarChartConfig, LineChart, LineChartConfig};
use crashviz::dataset::{DatasetLoader, Record};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

const CONDITIONS: [&str; 6] = ["Clear", "Rain", "Cloudy", "Fog", "Snow", "Sleet, Hail"];
const GENDERS: [&str; 4] = ["Male", "Female", "Not Reported", "Unknown"];

fn create_test_records(count: usize) -> Vec<Record> {
    let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
    (0..count)
        .map(|i| {
            Record::new(
                CONDITIONS[i % CONDITIONS.len()],
                (i % 4) as u32,
                start.checked_add_days(chrono::Days::new((i % 730) as u64)),
                GENDERS[i % GENDERS.len()],
            )
        })
        .collect()
}

fn create_test_csv(count: usize) -> String {
    let mut csv = String::from("Atmospheric_Condition,Fatalities_in_Crash,Crash_Date,Gender\n");
    for record in create_test_records(count) {
        let date = record.crash_date.map(|d| d.to_string()).unwrap_or_default();
        csv.push_str(&format!(
            "\"{}\",{},{},{}\n",
            record.atmospheric_condition, record.fatalities_in_crash, date, record.gender
        ));
    }
    csv
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for size in [1_000, 10_000] {
        let csv = create_test_csv(size);
        let loader = DatasetLoader::new();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("parse_{}", size), |b| {
            b.iter(|| loader.load_str(black_box(&csv)).unwrap())
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in [1_000, 10_000, 100_000] {
        let records = create_test_records(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("by_condition_{}", size), |b| {
            b.iter(|| by_condition(black_box(&records)))
        });

        group.bench_function(format!("by_month_{}", size), |b| {
            b.iter(|| by_month(black_box(&records)))
        });
    }

    group.finish();
}

fn bench_charts(c: &mut Criterion) {
    let records = create_test_records(10_000);

    c.bench_function("bar_svg_10000", |b| {
        b.iter(|| BarChart::from_records(black_box(&records), BarChartConfig::default()).to_svg().to_string())
    });

    c.bench_function("line_svg_all_10000", |b| {
        b.iter(|| {
            LineChart::build(black_box(&records), &Filter::All, LineChartConfig::default())
                .to_svg()
                .to_string()
        })
    });
}

criterion_group!(benches, bench_load, bench_aggregate, bench_charts);
criterion_main!(benches);
