use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meteo_datasets::models::{MetricValues, ObservationRow, RawObservation};
use meteo_datasets::processors::{Aggregator, MovingAverage};

// Create monthly observations for several stations over a span of years
fn create_observations(station_count: usize, years: i32) -> Vec<ObservationRow> {
    let mut rows = Vec::with_capacity(station_count * years as usize * 12);

    for station_id in 0..station_count {
        for year in 2000..2000 + years {
            for month in 1..=12 {
                let base = 5.0 + month as f64 + station_id as f64 * 0.3;
                let raw = RawObservation {
                    station: format!("STATION-{}", station_id),
                    year_month: year * 100 + month,
                    // every seventh month has no mean temperature
                    tmm: if month % 7 == 0 { None } else { Some(base) },
                    txab: Some(base + 9.0),
                    txmin: Some(base - 6.0),
                    nbjtx25: Some(if (6..=8).contains(&month) { 5.0 } else { 0.0 }),
                    rr: Some(40.0 + month as f64),
                    rrab: Some(12.0),
                };
                if let Ok(row) = ObservationRow::from_raw(raw) {
                    rows.push(row);
                }
            }
        }
    }

    rows
}

fn benchmark_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");

    for station_count in [1, 10, 50].iter() {
        let rows = create_observations(*station_count, 30);

        group.bench_with_input(
            BenchmarkId::new("yearly", station_count),
            &rows,
            |b, rows| b.iter(|| Aggregator::yearly(black_box(rows))),
        );

        group.bench_with_input(
            BenchmarkId::new("monthly", station_count),
            &rows,
            |b, rows| b.iter(|| Aggregator::monthly(black_box(rows))),
        );
    }

    group.finish();
}

fn benchmark_moving_average(c: &mut Criterion) {
    let mut group = c.benchmark_group("moving_average");
    let moving_average = MovingAverage::default();

    for station_count in [1, 10, 50].iter() {
        let monthly = Aggregator::monthly(&create_observations(*station_count, 30));

        group.bench_with_input(
            BenchmarkId::new("monthly_rows", monthly.len()),
            &monthly,
            |b, monthly| {
                b.iter(|| {
                    let mut rows = monthly.clone();
                    moving_average.apply(black_box(&mut rows));
                    rows
                })
            },
        );
    }

    group.finish();
}

fn benchmark_metric_access(c: &mut Criterion) {
    let values = MetricValues {
        tmm: Some(12.3),
        txab: Some(31.0),
        txmin: Some(-4.2),
        nbjtx25: Some(8.0),
        rr: Some(640.5),
        rrab: Some(38.1),
    };

    c.bench_function("metric_access", |b| {
        b.iter(|| {
            meteo_datasets::models::Metric::ALL
                .iter()
                .filter_map(|m| black_box(&values).get(*m))
                .sum::<f64>()
        })
    });
}

criterion_group!(
    benches,
    benchmark_aggregation,
    benchmark_moving_average,
    benchmark_metric_access
);
criterion_main!(benches);
