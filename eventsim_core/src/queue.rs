//! Shared FIFO of pending jobs.
//!
//! One mutex guards the deque and the closed flag; one condition variable
//! wakes consumers. The lock only ever covers queue bookkeeping, never job
//! execution.

use eventsim_env::SimError;
use std::collections::VecDeque;
use std::sync::{Condvar, Mutex, MutexGuard};

struct QueueState<J> {
    jobs: VecDeque<J>,
    closed: bool,
}

/// Unbounded single-producer / multi-consumer FIFO queue.
pub struct WorkQueue<J> {
    state: Mutex<QueueState<J>>,
    available: Condvar,
}

impl<J> WorkQueue<J> {
    /// Creates an empty, open queue.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                jobs: VecDeque::new(),
                closed: false,
            }),
            available: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<J>> {
        // Jobs never run under this lock, so a poisoned guard still holds
        // consistent bookkeeping.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends a job and wakes one waiting consumer.
    ///
    /// Fails with [`SimError::QueueShutdown`] once the queue was closed.
    pub fn push(&self, job: J) -> Result<(), SimError> {
        {
            let mut state = self.lock();
            if state.closed {
                return Err(SimError::QueueShutdown);
            }
            state.jobs.push_back(job);
        }
        self.available.notify_one();
        Ok(())
    }

    /// Removes the oldest job, blocking while the queue is empty and open.
    ///
    /// Returns `None` only when the queue is closed and fully drained.
    pub fn pop_blocking(&self) -> Option<J> {
        let mut state = self.lock();
        loop {
            if let Some(job) = state.jobs.pop_front() {
                return Some(job);
            }
            if state.closed {
                return None;
            }
            state = self
                .available
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    /// Stops accepting jobs and wakes every waiting consumer.
    ///
    /// Jobs already queued are still handed out by [`WorkQueue::pop_blocking`].
    pub fn close(&self) {
        self.lock().closed = true;
        self.available.notify_all();
    }

    /// Returns the number of queued jobs.
    pub fn len(&self) -> usize {
        self.lock().jobs.len()
    }

    /// Returns true if no job is queued.
    pub fn is_empty(&self) -> bool {
        self.lock().jobs.is_empty()
    }

    /// Returns true once [`WorkQueue::close`] was called.
    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }
}

impl<J> Default for WorkQueue<J> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let queue = WorkQueue::new();
        for i in 0..5 {
            queue.push(i).unwrap();
        }
        assert_eq!(queue.len(), 5);

        queue.close();
        let drained: Vec<i32> = std::iter::from_fn(|| queue.pop_blocking()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_push_after_close_rejected() {
        let queue = WorkQueue::new();
        queue.close();

        assert!(queue.is_closed());
        assert_eq!(queue.push(1), Err(SimError::QueueShutdown));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_close_wakes_blocked_consumers() {
        let queue: Arc<WorkQueue<u32>> = Arc::new(WorkQueue::new());

        let consumers: Vec<_> = (0..4)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || queue.pop_blocking())
            })
            .collect();

        queue.close();

        for consumer in consumers {
            assert_eq!(consumer.join().unwrap(), None);
        }
    }

    #[test]
    fn test_consumers_take_every_job_once() {
        let queue: Arc<WorkQueue<u32>> = Arc::new(WorkQueue::new());

        let consumers: Vec<_> = (0..3)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    let mut taken = Vec::new();
                    while let Some(job) = queue.pop_blocking() {
                        taken.push(job);
                    }
                    taken
                })
            })
            .collect();

        for i in 0..300 {
            queue.push(i).unwrap();
        }
        queue.close();

        let mut all: Vec<u32> = consumers
            .into_iter()
            .flat_map(|c| c.join().unwrap())
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..300).collect::<Vec<_>>());
    }
}
