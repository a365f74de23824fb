//! A serial, single-worker job queue.
use std::panic::{self, AssertUnwindSafe};
use std::sync::PoisonError;

use tracing::{debug, error, trace};

use crate::sync::mpsc::{self, Sender};
use crate::sync::{thread, Mutex};

/// Name given to every dispatcher worker thread.
pub(crate) const WORKER_THREAD_NAME: &str = "syncol-map-dispatch";

/// A unit of work submitted to a [`Dispatcher`].
pub(crate) type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs submitted jobs one at a time, in submission order, on a dedicated
/// background thread.
///
/// The worker thread is started by the first call to
/// [`submit`](Dispatcher::submit) and exits once the dispatcher has been
/// dropped and every queued job has run. Submitting never blocks on the jobs
/// themselves.
///
/// A job that panics is caught and logged, and the worker moves on to the
/// next job in the queue.
pub(crate) struct Dispatcher {
    sender: Mutex<Option<Sender<Job>>>,
}

impl Dispatcher {
    /// Creates a dispatcher. No thread is started until a job is submitted.
    pub fn new() -> Self {
        Self {
            sender: Mutex::new(None),
        }
    }

    /// Queues a job behind every previously submitted job.
    ///
    /// Jobs may submit further jobs to the same dispatcher. If no worker
    /// thread can be started the job is logged and dropped.
    pub fn submit(&self, job: Job) {
        let mut sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        if sender.is_none() {
            match spawn_worker() {
                Some(tx) => *sender = Some(tx),
                None => {
                    drop(sender);
                    error!("no dispatcher worker available; dropping job");
                    return;
                }
            }
        }
        if let Some(tx) = sender.as_ref() {
            // The worker holds the receiver until every sender is gone, so
            // this only fails if the worker itself died.
            if tx.send(job).is_err() {
                *sender = None;
                drop(sender);
                error!("dispatcher worker exited; dropping job");
                return;
            }
            trace!("queued job on dispatcher");
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn spawn_worker() -> Option<Sender<Job>> {
    let (tx, rx) = mpsc::channel::<Job>();
    let spawned = thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || {
            debug!("dispatcher worker started");
            while let Ok(job) = rx.recv() {
                run(job);
            }
            debug!("dispatcher worker stopped");
        });
    match spawned {
        Ok(_) => Some(tx),
        Err(err) => {
            error!(%err, "failed to spawn dispatcher worker");
            None
        }
    }
}

fn run(job: Job) {
    if panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
        error!("dispatched job panicked");
    }
}
