use serde::{Deserialize, Serialize};

use crate::error::{ProcessingError, Result};
use crate::models::MetricValues;
use crate::utils::constants::MONTH_NAMES;

/// One CSV line as found in a station file. Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawObservation {
    #[serde(rename = "NOM_USUEL")]
    pub station: String,

    #[serde(rename = "AAAAMM")]
    pub year_month: i32,

    #[serde(rename = "TMM")]
    pub tmm: Option<f64>,

    #[serde(rename = "TXAB")]
    pub txab: Option<f64>,

    #[serde(rename = "TXMIN")]
    pub txmin: Option<f64>,

    #[serde(rename = "NBJTX25")]
    pub nbjtx25: Option<f64>,

    #[serde(rename = "RR")]
    pub rr: Option<f64>,

    #[serde(rename = "RRAB")]
    pub rrab: Option<f64>,
}

impl RawObservation {
    pub fn metrics(&self) -> MetricValues {
        MetricValues {
            tmm: self.tmm,
            txab: self.txab,
            txmin: self.txmin,
            nbjtx25: self.nbjtx25,
            rr: self.rr,
            rrab: self.rrab,
        }
    }
}

/// A station observation decorated with its decoded year and month.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow {
    pub station: String,
    pub year_month: i32,
    pub year: i32,
    pub month: u32,
    pub month_name: &'static str,
    pub metrics: MetricValues,
}

impl ObservationRow {
    /// Decode the year-month code. Months outside 1..=12 are rejected.
    pub fn from_raw(raw: RawObservation) -> Result<Self> {
        let (year, month) = split_year_month(raw.year_month);
        let name = month_name(month).ok_or_else(|| ProcessingError::InvalidMonth {
            code: raw.year_month,
            month,
            station: raw.station.clone(),
        })?;
        let metrics = raw.metrics();

        Ok(Self {
            station: raw.station,
            year_month: raw.year_month,
            year,
            month: month as u32,
            month_name: name,
            metrics,
        })
    }
}

/// Split a `year * 100 + month` code into `(year, month)`.
///
/// # Examples
/// ```
/// use meteo_datasets::models::split_year_month;
///
/// assert_eq!(split_year_month(202007), (2020, 7));
/// ```
pub fn split_year_month(code: i32) -> (i32, i32) {
    (code.div_euclid(100), code.rem_euclid(100))
}

/// French month name for months 1 to 12.
pub fn month_name(month: i32) -> Option<&'static str> {
    if (1..=12).contains(&month) {
        Some(MONTH_NAMES[(month - 1) as usize])
    } else {
        None
    }
}
