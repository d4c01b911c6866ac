pub mod metrics;
pub mod observation;
pub mod summary;

pub use metrics::{Metric, MetricValues};
pub use observation::{month_name, split_year_month, ObservationRow, RawObservation};
pub use summary::{MonthlySummary, SummaryRow, YearlySummary};
