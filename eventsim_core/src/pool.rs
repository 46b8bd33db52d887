//! Worker Pool - fixed-size thread pool with one result handle per submission.
//!
//! # Architecture
//!
//! ```text
//!   producer ──submit──► WorkQueue (Mutex + Condvar + VecDeque)
//!                            │          │          │
//!                        worker #0  worker #1 … worker #N-1
//!                            │          │          │
//!                            └──── Resolver::resolve ────► ResultHandle
//! ```
//!
//! With zero workers the pool spawns nothing and [`WorkerPool::submit`] runs
//! the job on the caller's thread before returning.
//!
//! Jobs run outside the queue lock. A panicking job is caught and delivered
//! as [`TaskError::Panicked`], so every handle resolves exactly once.

use crate::handle::ResultHandle;
use crate::queue::WorkQueue;
use eventsim_env::{SimError, TaskError};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, error, Dispatch};

/// Upper bound on worker threads accepted by [`WorkerPool::new`].
pub const MAX_WORKERS: usize = 1024;

type Job = Box<dyn FnOnce() + Send + 'static>;

/// Summary of a pool's lifetime, returned by [`WorkerPool::drain`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrainReport {
    /// Worker threads joined during the drain
    pub workers_joined: usize,

    /// Jobs accepted by `submit`
    pub tasks_submitted: u64,

    /// Jobs run to completion (inline + on workers)
    pub tasks_executed: u64,

    /// Jobs run on the caller's thread (zero-worker mode)
    pub executed_inline: u64,

    /// Jobs still queued after the drain (always zero)
    pub queue_remaining: usize,

    /// Jobs executed by each worker, indexed by worker number
    pub per_worker: Vec<u64>,
}

/// Fixed-size pool of worker threads.
pub struct WorkerPool {
    queue: Arc<WorkQueue<Job>>,
    workers: Vec<JoinHandle<u64>>,
    worker_count: usize,
    submitted: u64,
    executed_inline: u64,
}

impl WorkerPool {
    /// Creates a pool and starts `worker_count` threads.
    ///
    /// `worker_count == 0` selects inline mode: no thread is started.
    /// Counts above [`MAX_WORKERS`] are rejected before any thread starts.
    /// Workers log through the subscriber that is current on the calling
    /// thread.
    pub fn new(worker_count: usize) -> Result<Self, SimError> {
        if worker_count > MAX_WORKERS {
            return Err(SimError::WorkerSpawn(format!(
                "{} workers requested, limit is {}",
                worker_count, MAX_WORKERS
            )));
        }

        let dispatch = tracing::dispatcher::get_default(Dispatch::clone);
        let mut pool = Self {
            queue: Arc::new(WorkQueue::new()),
            workers: Vec::with_capacity(worker_count),
            worker_count,
            submitted: 0,
            executed_inline: 0,
        };

        for index in 0..worker_count {
            let queue = Arc::clone(&pool.queue);
            let dispatch = dispatch.clone();
            // On failure `pool` is dropped here, which joins the threads
            // that did start.
            let handle = thread::Builder::new()
                .name(format!("eventsim-worker-{}", index))
                .spawn(move || {
                    tracing::dispatcher::with_default(&dispatch, || worker_loop(index, queue))
                })
                .map_err(|e| SimError::WorkerSpawn(e.to_string()))?;
            pool.workers.push(handle);
        }

        debug!(workers = worker_count, "Worker pool started");
        Ok(pool)
    }

    /// Returns the number of worker threads this pool was created with.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// Returns true if jobs run on the caller's thread.
    pub fn is_inline(&self) -> bool {
        self.worker_count == 0
    }

    /// Returns the number of jobs waiting for a worker.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Submits a job and returns the handle its result will be delivered to.
    ///
    /// In inline mode the job has already run when this returns.
    pub fn submit<T, F>(&mut self, job: F) -> Result<ResultHandle<T>, SimError>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        let (handle, resolver) = ResultHandle::pair();
        let wrapped = move || resolver.resolve(run_guarded(job));

        if self.is_inline() {
            wrapped();
            self.executed_inline += 1;
        } else {
            self.queue.push(Box::new(wrapped))?;
        }

        self.submitted += 1;
        Ok(handle)
    }

    /// Stops accepting work, waits for the queue to empty and joins every
    /// worker.
    ///
    /// Consumes the pool: nothing can be submitted after a drain.
    pub fn drain(mut self) -> DrainReport {
        self.shutdown()
    }

    fn shutdown(&mut self) -> DrainReport {
        self.queue.close();

        let workers = std::mem::take(&mut self.workers);
        let workers_joined = workers.len();
        let per_worker: Vec<u64> = workers
            .into_iter()
            .enumerate()
            .map(|(index, worker)| {
                worker.join().unwrap_or_else(|_| {
                    error!(worker = index, "Worker thread panicked outside a job");
                    0
                })
            })
            .collect();

        let report = DrainReport {
            workers_joined,
            tasks_submitted: self.submitted,
            tasks_executed: self.executed_inline + per_worker.iter().sum::<u64>(),
            executed_inline: self.executed_inline,
            queue_remaining: self.queue.len(),
            per_worker,
        };

        debug!(
            workers = report.workers_joined,
            executed = report.tasks_executed,
            "Worker pool drained"
        );
        report
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        if !self.workers.is_empty() {
            self.shutdown();
        }
    }
}

fn worker_loop(index: usize, queue: Arc<WorkQueue<Job>>) -> u64 {
    let mut executed = 0u64;

    while let Some(job) = queue.pop_blocking() {
        job();
        executed += 1;
        debug!(worker = index, executed, "Worker finished job");
    }

    debug!(worker = index, executed, "Worker exiting");
    executed
}

fn run_guarded<T>(job: impl FnOnce() -> T) -> Result<T, TaskError> {
    panic::catch_unwind(AssertUnwindSafe(job))
        .map_err(|payload| TaskError::Panicked(panic_message(payload.as_ref())))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
