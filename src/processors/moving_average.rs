use crate::error::{ProcessingError, Result};
use crate::models::{Metric, SummaryRow};
use crate::utils::constants::{MOVING_AVERAGE_MIN_PERIODS, MOVING_AVERAGE_WINDOW, ROUND_DIGITS};
use crate::utils::round_to;
use std::collections::VecDeque;

/// Trailing moving average of one metric, computed per station in chronological order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovingAverage {
    metric: Metric,
    window: usize,
    min_periods: usize,
    round_digits: u32,
}

impl MovingAverage {
    /// Requires `1 <= min_periods <= window`.
    pub fn new(metric: Metric, window: usize, min_periods: usize) -> Result<Self> {
        if min_periods == 0 || min_periods > window {
            return Err(ProcessingError::Config(format!(
                "Moving average needs 1 <= min_periods <= window, got min_periods={} window={}",
                min_periods, window
            )));
        }

        Ok(Self {
            metric,
            window,
            min_periods,
            round_digits: ROUND_DIGITS,
        })
    }

    pub fn with_round_digits(mut self, round_digits: u32) -> Self {
        self.round_digits = round_digits;
        self
    }

    pub fn metric(&self) -> Metric {
        self.metric
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn min_periods(&self) -> usize {
        self.min_periods
    }

    /// Output column name, e.g. `TMM_ma5`.
    pub fn column_name(&self) -> String {
        format!("{}_ma{}", self.metric.column(), self.window)
    }

    /// Sort `rows` by (station, period) and fill in the moving average of every row.
    ///
    /// Rows are recomputed from scratch; any previous value is overwritten.
    pub fn apply<T: SummaryRow>(&self, rows: &mut [T]) {
        rows.sort_by(|a, b| {
            a.station()
                .cmp(b.station())
                .then_with(|| a.period().cmp(&b.period()))
        });

        let mut window: VecDeque<Option<f64>> = VecDeque::with_capacity(self.window);
        let mut current_station: Option<String> = None;

        for row in rows.iter_mut() {
            if current_station.as_deref() != Some(row.station()) {
                window.clear();
                current_station = Some(row.station().to_string());
            }

            window.push_back(row.metrics().get(self.metric));
            if window.len() > self.window {
                window.pop_front();
            }

            row.set_moving_average(self.window_mean(&window));
        }
    }

    fn window_mean(&self, window: &VecDeque<Option<f64>>) -> Option<f64> {
        let (sum, count) = window
            .iter()
            .flatten()
            .fold((0.0_f64, 0usize), |(sum, count), v| (sum + v, count + 1));

        if count < self.min_periods {
            None
        } else {
            Some(round_to(sum / count as f64, self.round_digits))
        }
    }
}

impl Default for MovingAverage {
    fn default() -> Self {
        Self {
            metric: Metric::MeanTemperature,
            window: MOVING_AVERAGE_WINDOW,
            min_periods: MOVING_AVERAGE_MIN_PERIODS,
            round_digits: ROUND_DIGITS,
        }
    }
}
