use serde::{Deserialize, Serialize};

use crate::models::MetricValues;

/// Shared view over yearly and monthly summary rows.
pub trait SummaryRow {
    fn station(&self) -> &str;

    /// Chronological position within a station; month is 0 for yearly rows.
    fn period(&self) -> (i32, u32);

    fn metrics(&self) -> &MetricValues;

    fn moving_average(&self) -> Option<f64>;

    fn set_moving_average(&mut self, value: Option<f64>);

    fn set_city(&mut self, city: &str);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlySummary {
    pub year: i32,
    pub station: String,
    pub metrics: MetricValues,
    pub moving_average: Option<f64>,
    pub city: String,
}

impl YearlySummary {
    pub fn new(year: i32, station: String, metrics: MetricValues) -> Self {
        Self {
            year,
            station,
            metrics,
            moving_average: None,
            city: String::new(),
        }
    }
}

impl SummaryRow for YearlySummary {
    fn station(&self) -> &str {
        &self.station
    }

    fn period(&self) -> (i32, u32) {
        (self.year, 0)
    }

    fn metrics(&self) -> &MetricValues {
        &self.metrics
    }

    fn moving_average(&self) -> Option<f64> {
        self.moving_average
    }

    fn set_moving_average(&mut self, value: Option<f64>) {
        self.moving_average = value;
    }

    fn set_city(&mut self, city: &str) {
        self.city = city.to_string();
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub station: String,
    pub metrics: MetricValues,
    pub moving_average: Option<f64>,
    pub city: String,
}

impl MonthlySummary {
    pub fn new(
        year: i32,
        month: u32,
        month_name: String,
        station: String,
        metrics: MetricValues,
    ) -> Self {
        Self {
            year,
            month,
            month_name,
            station,
            metrics,
            moving_average: None,
            city: String::new(),
        }
    }
}

impl SummaryRow for MonthlySummary {
    fn station(&self) -> &str {
        &self.station
    }

    fn period(&self) -> (i32, u32) {
        (self.year, self.month)
    }

    fn metrics(&self) -> &MetricValues {
        &self.metrics
    }

    fn moving_average(&self) -> Option<f64> {
        self.moving_average
    }

    fn set_moving_average(&mut self, value: Option<f64>) {
        self.moving_average = value;
    }

    fn set_city(&mut self, city: &str) {
        self.city = city.to_string();
    }
}
