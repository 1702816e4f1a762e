//! Serialized access to the launcher model.
//!
//! Item and folder collections are mutated by the owning application. Reads
//! that need them (resolving a folder id, walking the layout) are queued on
//! the same single worker that applies those mutations, and each read gets a
//! shallow snapshot taken right before it runs.

mod model;

pub use model::{BgDataModel, LayoutDump, ModelSnapshot};

use anyhow::Result;

use crate::worker::SerialWorker;

const ENABLE_LOGS: bool = true;

use crate::log_info;

/// A read against the model, run on the resolver's worker.
pub type ResolverTask = Box<dyn FnOnce(&ModelSnapshot) + Send + 'static>;

/// FIFO queue with exactly one worker. `enqueue` never blocks and never
/// fails; every enqueued task eventually runs.
pub trait ContainerResolver: Send + Sync {
    fn enqueue(&self, task: ResolverTask);
}

/// Owns the [`BgDataModel`] on a dedicated thread.
#[derive(Clone)]
pub struct ModelWorker {
    worker: SerialWorker<BgDataModel>,
}

impl ModelWorker {
    pub fn start(model: BgDataModel) -> Result<Self> {
        let items = model.item_count();
        let worker = SerialWorker::spawn("launchstats-model", move || Ok(model))?;
        log_info!("Model worker started with {items} items");
        Ok(Self { worker })
    }

    /// Queues a mutation of the model, ordered with every resolver task.
    pub fn enqueue_update<F>(&self, update: F)
    where
        F: FnOnce(&mut BgDataModel) + Send + 'static,
    {
        self.worker.submit(update);
    }

    /// Runs `read` on the worker against a fresh snapshot and returns its result.
    pub async fn read<F, T>(&self, read: F) -> Result<T>
    where
        F: FnOnce(&ModelSnapshot) -> T + Send + 'static,
        T: Send + 'static,
    {
        self.worker
            .execute(move |model| Ok(read(&ModelSnapshot::capture(model))))
            .await
    }

    /// Resolves once everything queued so far has run.
    pub async fn flush(&self) -> Result<()> {
        self.worker.flush().await
    }
}

impl ContainerResolver for ModelWorker {
    fn enqueue(&self, task: ResolverTask) {
        self.worker.submit(move |model| {
            let snapshot = ModelSnapshot::capture(model);
            task(&snapshot);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{container_id, FolderInfo};
    use std::sync::{Arc, Mutex};

    #[tokio::test]
    async fn update_queued_before_task_is_visible_to_it() {
        let worker = ModelWorker::start(BgDataModel::new()).unwrap();
        let seen = Arc::new(Mutex::new(None));

        worker.enqueue_update(|model| model.put_folder(FolderInfo::new(3, container_id::DESKTOP)));
        let seen_in_task = Arc::clone(&seen);
        worker.enqueue(Box::new(move |snapshot| {
            *seen_in_task.lock().unwrap() = Some(snapshot.folder(3).is_some());
        }));
        worker.flush().await.unwrap();

        assert_eq!(*seen.lock().unwrap(), Some(true));
    }

    #[tokio::test]
    async fn tasks_run_in_fifo_order() {
        let worker = ModelWorker::start(BgDataModel::new()).unwrap();
        let order = Arc::new(Mutex::new(Vec::new()));
        for i in 0..20 {
            let order = Arc::clone(&order);
            worker.enqueue(Box::new(move |_| order.lock().unwrap().push(i)));
        }
        worker.flush().await.unwrap();

        assert_eq!(*order.lock().unwrap(), (0..20).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn read_returns_snapshot_values() {
        let mut model = BgDataModel::new();
        model.put_folder(FolderInfo::new(1, container_id::HOTSEAT));
        let worker = ModelWorker::start(model).unwrap();

        let count = worker.read(|snapshot| snapshot.folders.len()).await.unwrap();
        assert_eq!(count, 1);
    }
}
