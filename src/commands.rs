//! Bodies of the `launchstats` subcommands, kept out of `main` so they run
//! against any database and output stream.

use std::{fs, io::Write, path::Path, sync::Arc};

use anyhow::{Context, Result};

use crate::{
    BgDataModel, Database, InstanceId, LayoutDump, ModelWorker, StatsLogManager, StatsSettings,
};

const ENABLE_LOGS: bool = true;

use crate::log_info;

pub fn load_layout(path: &Path) -> Result<BgDataModel> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read layout dump {}", path.display()))?;
    let dump: LayoutDump = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse layout dump {}", path.display()))?;
    Ok(BgDataModel::from(dump))
}

/// Logs one snapshot of the layout at `layout` and waits until every record
/// is stored. Returns the snapshot's correlation id.
pub async fn snapshot(
    settings: &StatsSettings,
    database: &Database,
    layout: &Path,
) -> Result<InstanceId> {
    let worker = ModelWorker::start(load_layout(layout)?)?;
    let manager = StatsLogManager::from_settings(
        settings,
        Arc::new(database.clone()),
        Arc::new(worker.clone()),
    );

    let instance_id = manager.log_snapshot();
    worker.flush().await?;
    database.flush().await?;

    let written = database.snapshot_records(instance_id.id()).await?.len();
    log_info!(
        "Snapshot {instance_id} wrote {written} records to {}",
        database.path().display()
    );
    Ok(instance_id)
}

/// Writes the newest `limit` events as JSON lines.
pub async fn print_events(database: &Database, limit: usize, out: &mut impl Write) -> Result<()> {
    for event in database.recent_events(limit).await? {
        writeln!(out, "{}", serde_json::to_string(&event)?)?;
    }
    Ok(())
}

/// Writes every stored record of one snapshot as JSON lines.
pub async fn print_records(
    database: &Database,
    instance_id: i32,
    out: &mut impl Write,
) -> Result<()> {
    for record in database.snapshot_records(instance_id).await? {
        writeln!(out, "{}", serde_json::to_string(&record)?)?;
    }
    Ok(())
}
