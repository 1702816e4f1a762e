//! Launcher interaction telemetry.
//!
//! Item events are flattened into fixed-schema records and handed to a
//! [`StatsSink`]. Items inside folders only know their folder's id, so those
//! events are resolved on the [`ModelWorker`], the single thread that owns the
//! launcher's item model.

pub mod commands;
pub mod db;
pub mod models;
pub mod resolver;
pub mod settings;
pub mod sink;
pub mod stats;
mod utils;
pub mod worker;

pub use db::Database;
pub use models::{
    ContainerInfo, EventEnum, FolderInfo, InstanceId, ItemDescription, ItemInfo, ItemKind,
    LauncherEvent, LauncherState,
};
pub use resolver::{BgDataModel, ContainerResolver, LayoutDump, ModelSnapshot, ModelWorker};
pub use settings::{SettingsStore, StatsSettings};
pub use sink::{MemorySink, StatsSink};
pub use stats::{Dispatch, EventRecord, RankingRecord, SnapshotRecord, StatsAtom, StatsLogManager, StatsLogger};

/// Log target of the verbose record dump.
pub const VERBOSE_LOG_TARGET: &str = "StatsLog";

/// Initializes `env_logger` at info level; `RUST_LOG` overrides. With
/// `verbose` set the record dump target is raised to debug regardless of
/// `RUST_LOG`. Safe to call more than once.
pub fn init_logging(verbose: bool) {
    let env_filters = std::env::var(env_logger::DEFAULT_FILTER_ENV).ok();
    let _ = logging_builder(verbose, env_filters.as_deref()).try_init();
}

fn logging_builder(verbose: bool, env_filters: Option<&str>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    if let Some(filters) = env_filters {
        builder.parse_filters(filters);
    }
    if verbose {
        builder.filter_module(VERBOSE_LOG_TARGET, log::LevelFilter::Debug);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata};

    fn dump_enabled(logger: &env_logger::Logger) -> bool {
        let metadata = Metadata::builder()
            .level(Level::Debug)
            .target(VERBOSE_LOG_TARGET)
            .build();
        logger.enabled(&metadata)
    }

    #[test]
    fn verbose_flag_enables_the_record_dump() {
        assert!(dump_enabled(&logging_builder(true, None).build()));
        assert!(!dump_enabled(&logging_builder(false, None).build()));
    }

    #[test]
    fn verbose_flag_wins_over_a_quieter_env_filter() {
        let logger = logging_builder(true, Some("warn")).build();
        assert!(dump_enabled(&logger));

        let other = Metadata::builder()
            .level(Level::Info)
            .target("launchstats_lib::db")
            .build();
        assert!(!logger.enabled(&other));
    }

    #[test]
    fn other_targets_stay_at_info() {
        let logger = logging_builder(true, None).build();
        let debug = Metadata::builder()
            .level(Level::Debug)
            .target("launchstats_lib::resolver")
            .build();
        assert!(!logger.enabled(&debug));
    }
}
