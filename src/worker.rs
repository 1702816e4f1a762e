use std::{
    panic::{self, AssertUnwindSafe},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use tokio::sync::oneshot;

const ENABLE_LOGS: bool = true;

use crate::{log_error, log_info};

type Task<S> = Box<dyn FnOnce(&mut S) + Send + 'static>;

enum Command<S> {
    Execute(Task<S>),
    Shutdown,
}

struct WorkerInner<S> {
    name: String,
    sender: mpsc::Sender<Command<S>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl<S> Drop for WorkerInner<S> {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(Command::Shutdown) {
                log_error!("Failed to send shutdown to {} thread: {err}", self.name);
            }
            // The last handle can be released by a task running on the worker itself.
            if handle.thread().id() == thread::current().id() {
                return;
            }
            if let Err(join_err) = handle.join() {
                log_error!("Failed to join {} thread: {join_err:?}", self.name);
            }
        }
    }
}

/// A single dedicated thread that owns `S` and runs submitted closures against
/// it one at a time, in submission order.
///
/// The state is built on the worker thread by the `init` closure passed to
/// [`SerialWorker::spawn`], so `S` itself never crosses threads.
pub struct SerialWorker<S> {
    inner: Arc<WorkerInner<S>>,
}

impl<S> Clone for SerialWorker<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: 'static> SerialWorker<S> {
    /// Spawns the worker thread and waits until `init` has produced the state.
    pub fn spawn<F>(name: &str, init: F) -> Result<Self>
    where
        F: FnOnce() -> Result<S> + Send + 'static,
    {
        let (command_tx, command_rx) = mpsc::channel::<Command<S>>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<()>>();
        let thread_name = name.to_string();

        let worker = thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                let mut state = match init() {
                    Ok(state) => state,
                    Err(err) => {
                        let _ = ready_tx.send(Err(err));
                        return;
                    }
                };

                if ready_tx.send(Ok(())).is_err() {
                    log_error!("{thread_name} initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        Command::Execute(task) => {
                            let outcome = panic::catch_unwind(AssertUnwindSafe(|| task(&mut state)));
                            if outcome.is_err() {
                                log_error!("{thread_name} task panicked; continuing with next task");
                            }
                        }
                        Command::Shutdown => break,
                    }
                }

                log_info!("{thread_name} thread shutting down");
            })
            .with_context(|| format!("failed to spawn {name} worker thread"))?;

        ready_rx
            .recv()
            .with_context(|| format!("{name} worker exited before signaling readiness"))??;

        Ok(Self {
            inner: Arc::new(WorkerInner {
                name: name.to_string(),
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
        })
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Queues `task` without waiting for it. Returns `false` if the worker has
    /// already shut down; the failure is logged, never raised.
    pub fn submit<F>(&self, task: F) -> bool
    where
        F: FnOnce(&mut S) + Send + 'static,
    {
        match self.inner.sender.send(Command::Execute(Box::new(task))) {
            Ok(()) => true,
            Err(err) => {
                log_error!("failed to send task to {} thread: {err}", self.inner.name);
                false
            }
        }
    }

    /// Queues `task` and waits for its result.
    pub async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut S) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let (reply_tx, reply_rx) = oneshot::channel();
        let name = self.inner.name.clone();

        let sent = self.submit(move |state| {
            let result = task(state);
            if reply_tx.send(result).is_err() {
                log_error!("{name} caller dropped before receiving result");
            }
        });
        if !sent {
            return Err(anyhow!("{} thread is not running", self.inner.name));
        }

        reply_rx
            .await
            .map_err(|_| anyhow!("{} thread dropped the task before replying", self.inner.name))?
    }

    /// Resolves once every task submitted before this call has run.
    pub async fn flush(&self) -> Result<()> {
        self.execute(|_| Ok(())).await
    }
}
