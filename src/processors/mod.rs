pub mod aggregator;
pub mod moving_average;
pub mod multi_city;

pub use aggregator::{AggregateOp, Aggregator, AGGREGATION_SPEC, ROUNDED_METRIC};
pub use moving_average::MovingAverage;
pub use multi_city::{Datasets, MultiCityProcessor};
