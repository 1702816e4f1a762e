use anyhow::{bail, Context, Result};
use rusqlite::Connection;

/// Schema scripts in version order. A database at `user_version` N has had
/// every script up to and including N applied.
const MIGRATIONS: &[(i32, &str, &str)] = &[(
    1,
    "launcher_events, launcher_snapshots and ranking_selected tables",
    include_str!("schemas/schema_v1.sql"),
)];

fn current_version() -> i32 {
    MIGRATIONS.last().map_or(0, |(version, ..)| *version)
}

pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let stored: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read stats schema version")?;
    let target = current_version();

    if stored > target {
        bail!("stats database is at schema {stored}, this build knows up to {target}");
    }

    let pending: Vec<_> = MIGRATIONS
        .iter()
        .filter(|(version, ..)| *version > stored)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open stats schema transaction")?;
    for (version, creates, sql) in pending {
        tx.execute_batch(sql)
            .with_context(|| format!("schema {version}: failed to create {creates}"))?;
    }
    tx.pragma_update(None, "user_version", target)
        .context("failed to record stats schema version")?;
    tx.commit().context("failed to commit stats schema")?;

    Ok(())
}
