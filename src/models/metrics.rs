use serde::{Deserialize, Serialize};

use crate::utils::constants::{COL_NBJTX25, COL_RR, COL_RRAB, COL_TMM, COL_TXAB, COL_TXMIN};

/// The six monthly observation fields the pipeline aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Mean temperature (TMM)
    MeanTemperature,
    /// Absolute maximum temperature (TXAB)
    MaxTemperature,
    /// Lowest daily maximum temperature (TXMIN)
    MinTemperature,
    /// Number of days with a maximum above 25°C (NBJTX25)
    HotDays,
    /// Total precipitation (RR)
    Precipitation,
    /// Maximum daily precipitation (RRAB)
    MaxPrecipitation,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Metric::MeanTemperature,
        Metric::MaxTemperature,
        Metric::MinTemperature,
        Metric::HotDays,
        Metric::Precipitation,
        Metric::MaxPrecipitation,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            Metric::MeanTemperature => COL_TMM,
            Metric::MaxTemperature => COL_TXAB,
            Metric::MinTemperature => COL_TXMIN,
            Metric::HotDays => COL_NBJTX25,
            Metric::Precipitation => COL_RR,
            Metric::MaxPrecipitation => COL_RRAB,
        }
    }
}

impl std::fmt::Display for Metric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// One value per [`Metric`]; `None` marks a missing value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricValues {
    pub tmm: Option<f64>,
    pub txab: Option<f64>,
    pub txmin: Option<f64>,
    pub nbjtx25: Option<f64>,
    pub rr: Option<f64>,
    pub rrab: Option<f64>,
}

impl MetricValues {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::MeanTemperature => self.tmm,
            Metric::MaxTemperature => self.txab,
            Metric::MinTemperature => self.txmin,
            Metric::HotDays => self.nbjtx25,
            Metric::Precipitation => self.rr,
            Metric::MaxPrecipitation => self.rrab,
        }
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        let slot = match metric {
            Metric::MeanTemperature => &mut self.tmm,
            Metric::MaxTemperature => &mut self.txab,
            Metric::MinTemperature => &mut self.txmin,
            Metric::HotDays => &mut self.nbjtx25,
            Metric::Precipitation => &mut self.rr,
            Metric::MaxPrecipitation => &mut self.rrab,
        };
        *slot = value;
    }
}
