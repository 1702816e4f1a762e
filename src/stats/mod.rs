pub mod extract;
pub mod gate;
mod logger;
mod manager;
pub mod record;

pub use extract::{extract, FOLDER_HIERARCHY_OFFSET};
pub use gate::{FeatureGate, PlatformGate, MIN_SINK_API_LEVEL};
pub use logger::StatsLogger;
pub use manager::{Dispatch, StatsLogManager};
pub use record::{EventRecord, ItemFields, RankingRecord, SnapshotRecord, StatsAtom};
