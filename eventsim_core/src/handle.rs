//! One-shot result handles.
//!
//! Every submission to the pool produces a [`ResultHandle`] for the caller and
//! a [`Resolver`] that travels with the task. The resolver is consumed when it
//! delivers a value, so a task can resolve its handle at most once. If the
//! resolver is dropped without a value the handle resolves to
//! [`TaskError::Abandoned`], so waiting on a handle always terminates.

use crossbeam::channel::{self, Receiver, Sender, TryRecvError};
use eventsim_env::TaskError;

/// Caller side of a one-shot cell.
#[derive(Debug)]
pub struct ResultHandle<T> {
    rx: Receiver<Result<T, TaskError>>,
}

/// Producer side of a one-shot cell.
#[derive(Debug)]
pub struct Resolver<T> {
    tx: Sender<Result<T, TaskError>>,
}

impl<T> ResultHandle<T> {
    /// Creates a connected handle/resolver pair.
    pub fn pair() -> (ResultHandle<T>, Resolver<T>) {
        let (tx, rx) = channel::bounded(1);
        (ResultHandle { rx }, Resolver { tx })
    }

    /// Blocks until the task has resolved and returns its result.
    pub fn wait(self) -> Result<T, TaskError> {
        self.rx.recv().unwrap_or(Err(TaskError::Abandoned))
    }

    /// Takes the result if it is already available.
    ///
    /// Returns `None` while the task is still pending. After a value has been
    /// taken further calls report [`TaskError::Abandoned`].
    pub fn try_take(&mut self) -> Option<Result<T, TaskError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(TaskError::Abandoned)),
        }
    }

    /// Returns true once a delivered result is waiting to be read.
    pub fn is_ready(&self) -> bool {
        !self.rx.is_empty()
    }
}

impl<T> Resolver<T> {
    /// Delivers the task's result, consuming the resolver.
    pub fn resolve(self, result: Result<T, TaskError>) {
        // Capacity is one and this is the only send, so it never blocks. A
        // dropped handle just means nobody is interested in the result.
        let _ = self.tx.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_resolve_then_wait() {
        let (handle, resolver) = ResultHandle::pair();
        resolver.resolve(Ok("done".to_string()));
        assert_eq!(handle.wait(), Ok("done".to_string()));
    }

    #[test]
    fn test_wait_across_threads() {
        let (handle, resolver) = ResultHandle::<u64>::pair();

        let producer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(10));
            resolver.resolve(Ok(99));
        });

        assert_eq!(handle.wait(), Ok(99));
        producer.join().unwrap();
    }

    #[test]
    fn test_dropped_resolver_abandons_handle() {
        let (handle, resolver) = ResultHandle::<String>::pair();
        drop(resolver);
        assert_eq!(handle.wait(), Err(TaskError::Abandoned));
    }

    #[test]
    fn test_try_take_pending_then_ready() {
        let (mut handle, resolver) = ResultHandle::<u8>::pair();
        assert!(!handle.is_ready());
        assert!(handle.try_take().is_none());

        resolver.resolve(Err(TaskError::Panicked("oops".into())));
        assert!(handle.is_ready());
        assert_eq!(handle.try_take(), Some(Err(TaskError::Panicked("oops".into()))));

        // Value already taken and the resolver is gone
        assert_eq!(handle.try_take(), Some(Err(TaskError::Abandoned)));
    }

    #[test]
    fn test_resolve_without_listener_does_not_block() {
        let (handle, resolver) = ResultHandle::<u8>::pair();
        drop(handle);
        resolver.resolve(Ok(1));
    }
}
