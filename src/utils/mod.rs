pub mod constants;
pub mod logging;
pub mod numeric;
pub mod progress;

pub use constants::*;
pub use logging::init_logging;
pub use numeric::{parse_delimiter, round_to};
pub use progress::ProgressReporter;
