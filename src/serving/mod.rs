pub mod broadcast;
pub mod dataset_cache;

pub use broadcast::{BroadcastRegistry, BroadcastReport, SubscriberId, Subscription};
pub use dataset_cache::{read_dataset, DatasetCache, DatasetKind, DatasetRecord, WeatherDataService};
