use crate::models::{Metric, MetricValues, MonthlySummary, ObservationRow, YearlySummary};
use crate::utils::constants::ROUND_DIGITS;
use crate::utils::round_to;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateOp {
    Mean,
    Max,
    Min,
    Sum,
}

/// Operator applied to each metric within a group.
pub const AGGREGATION_SPEC: [(Metric, AggregateOp); 6] = [
    (Metric::MeanTemperature, AggregateOp::Mean),
    (Metric::MaxTemperature, AggregateOp::Max),
    (Metric::MinTemperature, AggregateOp::Min),
    (Metric::HotDays, AggregateOp::Sum),
    (Metric::Precipitation, AggregateOp::Sum),
    (Metric::MaxPrecipitation, AggregateOp::Max),
];

/// The only aggregate rounded (to [`ROUND_DIGITS`]); the others keep full precision.
pub const ROUNDED_METRIC: Metric = Metric::MeanTemperature;

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    sum: f64,
    count: usize,
    min: Option<f64>,
    max: Option<f64>,
}

impl Accumulator {
    fn push(&mut self, value: Option<f64>) {
        // Missing values are skipped
        let Some(v) = value else {
            return;
        };
        self.sum += v;
        self.count += 1;
        self.min = Some(self.min.map_or(v, |m| m.min(v)));
        self.max = Some(self.max.map_or(v, |m| m.max(v)));
    }

    fn finish(&self, op: AggregateOp) -> Option<f64> {
        match op {
            AggregateOp::Sum => Some(self.sum),
            AggregateOp::Mean if self.count > 0 => Some(self.sum / self.count as f64),
            AggregateOp::Mean => None,
            AggregateOp::Max => self.max,
            AggregateOp::Min => self.min,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct GroupAccumulator {
    metrics: [Accumulator; AGGREGATION_SPEC.len()],
}

impl GroupAccumulator {
    fn push(&mut self, values: &MetricValues) {
        for (acc, (metric, _)) in self.metrics.iter_mut().zip(AGGREGATION_SPEC) {
            acc.push(values.get(metric));
        }
    }

    fn finish(&self) -> MetricValues {
        let mut out = MetricValues::default();
        for (acc, (metric, op)) in self.metrics.iter().zip(AGGREGATION_SPEC) {
            let mut value = acc.finish(op);
            if metric == ROUNDED_METRIC {
                value = value.map(|v| round_to(v, ROUND_DIGITS));
            }
            out.set(metric, value);
        }
        out
    }
}

/// Groups observation rows per period and station.
///
/// Output is sorted by group key. Only keys present in the input produce rows.
pub struct Aggregator;

impl Aggregator {
    /// One row per (year, station).
    pub fn yearly(rows: &[ObservationRow]) -> Vec<YearlySummary> {
        let mut groups: BTreeMap<(i32, &str), GroupAccumulator> = BTreeMap::new();
        for row in rows {
            groups
                .entry((row.year, row.station.as_str()))
                .or_default()
                .push(&row.metrics);
        }

        groups
            .into_iter()
            .map(|((year, station), acc)| YearlySummary::new(year, station.to_string(), acc.finish()))
            .collect()
    }

    /// One row per (year, month, month name, station).
    pub fn monthly(rows: &[ObservationRow]) -> Vec<MonthlySummary> {
        let mut groups: BTreeMap<(i32, u32, &str, &str), GroupAccumulator> = BTreeMap::new();
        for row in rows {
            groups
                .entry((row.year, row.month, row.month_name, row.station.as_str()))
                .or_default()
                .push(&row.metrics);
        }

        groups
            .into_iter()
            .map(|((year, month, month_name, station), acc)| {
                MonthlySummary::new(
                    year,
                    month,
                    month_name.to_string(),
                    station.to_string(),
                    acc.finish(),
                )
            })
            .collect()
    }
}
