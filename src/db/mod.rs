use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::Connection;

mod helpers;
mod migrations;
mod repositories;

pub use repositories::Stored;

use migrations::run_migrations;

use crate::{sink::StatsSink, stats::StatsAtom, worker::SerialWorker};

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info, log_warn};

/// SQLite-backed stats sink. The connection lives on its own thread; writes
/// are queued and never block the logging caller.
#[derive(Clone)]
pub struct Database {
    worker: SerialWorker<Connection>,
    db_path: Arc<PathBuf>,
}

impl Database {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create database directory {}", parent.display())
                })?;
            }
        }

        let path_for_thread = db_path.clone();
        let worker = SerialWorker::spawn("launchstats-db", move || {
            let mut conn =
                Connection::open(&path_for_thread).context("failed to open SQLite database")?;

            if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                log_warn!("Failed to enable WAL mode: {err}");
            }

            run_migrations(&mut conn).context("failed to run database migrations")?;
            Ok(conn)
        })?;

        log_info!("Database initialized at {}", db_path.as_path().display());

        Ok(Self {
            worker,
            db_path: Arc::new(db_path),
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        self.worker.execute(task).await
    }

    /// Resolves once every queued write has been applied.
    pub async fn flush(&self) -> Result<()> {
        self.worker.flush().await
    }
}

impl StatsSink for Database {
    fn write(&self, atom: StatsAtom) {
        let logged_at = Utc::now();
        self.worker.submit(move |conn| {
            if let Err(err) = repositories::insert_atom(conn, &atom, logged_at) {
                log_error!("failed to persist stats atom: {err:?}");
            }
        });
    }
}
