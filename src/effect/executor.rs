//! Injected scheduling substrate.
//!
//! A [`Scheduler`] accepts type-erased jobs and runs each one exactly once,
//! somewhere. An [`Executor`] is a cheap, cloneable handle to a scheduler;
//! it is what [`Task::run`](super::Task::run) and
//! [`TaskEither::force`](super::TaskEither::force) take, so the place where
//! work happens is always chosen by the caller rather than by an ambient
//! runtime.
//!
//! Two schedulers ship with the crate:
//!
//! - [`InlineScheduler`]: runs the job on the calling thread before
//!   `schedule` returns. Deterministic; intended for tests.
//! - [`TokioScheduler`] (feature `runtime`): submits the job to the tokio
//!   blocking pool. A job may block while it waits on forked branches, so
//!   jobs never occupy async worker threads.
//!
//! # Examples
//!
//! ```rust
//! use taskwell::effect::{Executor, TaskEither};
//!
//! let executor = Executor::inline();
//! let doubled = TaskEither::<String, i32>::succeed(21).map(|x| x * 2);
//! assert_eq!(doubled.to_result(&executor), Ok(42));
//! ```
//!
//! A custom scheduler only needs to run the job once:
//!
//! ```rust
//! use taskwell::effect::{Executor, Job, Scheduler};
//!
//! struct ThreadPerJob;
//!
//! impl Scheduler for ThreadPerJob {
//!     fn schedule(&self, job: Job) {
//!         std::thread::spawn(job);
//!     }
//! }
//!
//! let executor = Executor::new(ThreadPerJob);
//! assert_eq!(executor.scheduler_name(), "custom");
//! ```

use std::fmt;
use std::sync::Arc;

/// A unit of type-erased work handed to a [`Scheduler`].
pub type Job = Box<dyn FnOnce() + Send + 'static>;

/// Runs jobs.
///
/// Implementations must run every accepted job at most once. Dropping a job
/// without running it is allowed; the waiting side then observes
/// [`ExecutionError::Cancelled`](super::ExecutionError::Cancelled).
pub trait Scheduler: Send + Sync {
    /// Accepts `job` for execution.
    fn schedule(&self, job: Job);

    /// A short name used in logs and `Debug` output.
    fn name(&self) -> &'static str {
        "custom"
    }
}

/// Runs every job immediately on the thread that schedules it.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineScheduler;

impl Scheduler for InlineScheduler {
    #[inline]
    fn schedule(&self, job: Job) {
        job();
    }

    fn name(&self) -> &'static str {
        "inline"
    }
}

/// Submits jobs to a tokio runtime's blocking pool.
#[cfg(feature = "runtime")]
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: tokio::runtime::Handle,
}

#[cfg(feature = "runtime")]
impl TokioScheduler {
    /// Schedules onto the runtime behind `handle`.
    pub const fn new(handle: tokio::runtime::Handle) -> Self {
        Self { handle }
    }
}

#[cfg(feature = "runtime")]
impl Scheduler for TokioScheduler {
    fn schedule(&self, job: Job) {
        // The join handle is dropped: completion is reported through the
        // task's own channel.
        drop(self.handle.spawn_blocking(job));
    }

    fn name(&self) -> &'static str {
        "tokio"
    }
}

/// A cloneable handle to a [`Scheduler`].
#[derive(Clone)]
pub struct Executor {
    scheduler: Arc<dyn Scheduler>,
}

impl Executor {
    /// Wraps a custom scheduler.
    pub fn new<S>(scheduler: S) -> Self
    where
        S: Scheduler + 'static,
    {
        Self {
            scheduler: Arc::new(scheduler),
        }
    }

    /// An executor that runs everything on the calling thread.
    pub fn inline() -> Self {
        Self::new(InlineScheduler)
    }

    /// An executor backed by the runtime behind `handle`.
    #[cfg(feature = "runtime")]
    pub fn from_handle(handle: tokio::runtime::Handle) -> Self {
        Self::new(TokioScheduler::new(handle))
    }

    /// An executor backed by the lazily-created global runtime, or by the
    /// current runtime when called from inside one.
    ///
    /// See [`runtime::handle`](super::runtime::handle).
    #[cfg(feature = "runtime")]
    pub fn global() -> Self {
        Self::from_handle(super::runtime::handle())
    }

    /// Submits `job` to the underlying scheduler.
    #[inline]
    pub fn spawn(&self, job: Job) {
        self.scheduler.schedule(job);
    }

    /// The scheduler's name.
    pub fn scheduler_name(&self) -> &'static str {
        self.scheduler.name()
    }
}

#[cfg(feature = "runtime")]
impl Default for Executor {
    fn default() -> Self {
        Self::global()
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Executor")
            .field("scheduler", &self.scheduler.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[rstest]
    fn inline_runs_before_spawn_returns() {
        let counter = Arc::new(AtomicUsize::new(0));
        let job_counter = Arc::clone(&counter);

        Executor::inline().spawn(Box::new(move || {
            job_counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[rstest]
    fn custom_scheduler_is_used() {
        struct Dropping;

        impl Scheduler for Dropping {
            fn schedule(&self, job: Job) {
                drop(job);
            }

            fn name(&self) -> &'static str {
                "dropping"
            }
        }

        let counter = Arc::new(AtomicUsize::new(0));
        let job_counter = Arc::clone(&counter);
        let executor = Executor::new(Dropping);

        executor.spawn(Box::new(move || {
            job_counter.fetch_add(1, Ordering::SeqCst);
        }));

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(executor.scheduler_name(), "dropping");
    }

    #[rstest]
    fn debug_shows_scheduler_name() {
        assert_eq!(
            format!("{:?}", Executor::inline()),
            "Executor { scheduler: \"inline\" }"
        );
    }

    #[cfg(feature = "runtime")]
    #[rstest]
    fn global_executor_runs_on_another_thread() {
        use std::sync::mpsc;

        let (sender, receiver) = mpsc::channel();
        let caller = std::thread::current().id();

        Executor::global().spawn(Box::new(move || {
            sender.send(std::thread::current().id()).unwrap();
        }));

        let worker = receiver.recv().unwrap();
        assert_ne!(worker, caller);
    }

    #[cfg(feature = "runtime")]
    #[rstest]
    #[tokio::test(flavor = "current_thread")]
    async fn global_inside_runtime_uses_current_runtime() {
        let executor = Executor::global();
        let (sender, receiver) = tokio::sync::oneshot::channel();

        executor.spawn(Box::new(move || {
            sender.send(7).unwrap();
        }));

        assert_eq!(receiver.await.unwrap(), 7);
        assert_eq!(executor.scheduler_name(), "tokio");
    }
}
