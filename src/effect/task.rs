//! `Task` - a deferred unit of work.
//!
//! A `Task<A>` describes a computation producing an `A` but does not run it.
//! Running happens only through [`Task::schedule`] (which hands one job to an
//! [`Executor`] and returns a [`Pending`] handle) or the blocking shortcuts
//! [`Task::run`] and [`Task::try_run`] built on it.
//!
//! Nothing is memoized: every schedule runs the body again. Because every
//! entry point takes `self`, a given `Task` value can be scheduled at most
//! once.
//!
//! Combinators extend the task's program instead of wrapping it in another
//! job. The whole program then runs inside the single job `schedule`
//! submits, one step after another, with constant stack use however long
//! the chain is. Only [`Task::map2`] and [`Task::join_all`] submit extra
//! jobs, one per branch, so that independent work can run concurrently.
//!
//! # Examples
//!
//! ```rust
//! use taskwell::effect::{Executor, Task};
//!
//! let task = Task::pure(10).fmap(|x| x * 2).flat_map(|x| Task::pure(x + 1));
//! assert_eq!(task.run(&Executor::inline()), 21);
//! ```
//!
//! # Deferral
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use taskwell::effect::{Executor, Task};
//!
//! let executed = Arc::new(AtomicBool::new(false));
//! let flag = Arc::clone(&executed);
//! let task = Task::new(move || {
//!     flag.store(true, Ordering::SeqCst);
//!     42
//! });
//!
//! assert!(!executed.load(Ordering::SeqCst));
//! assert_eq!(task.run(&Executor::inline()), 42);
//! assert!(executed.load(Ordering::SeqCst));
//! ```

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::ready;
use pin_project_lite::pin_project;

use super::interpreter::{self, Step, unerase};
use super::{ExecutionError, Executor};

/// What a job reports back: its value, or the payload of its panic.
type Outcome<A> = std::thread::Result<A>;

/// A deferred computation producing an `A`.
///
/// # Monad Laws
///
/// 1. **Left Identity**: `Task::pure(a).flat_map(f) == f(a)`
/// 2. **Right Identity**: `m.flat_map(Task::pure) == m`
/// 3. **Associativity**: `m.flat_map(f).flat_map(g) == m.flat_map(|x| f(x).flat_map(g))`
///
/// Equality here means "runs to the same value".
pub struct Task<A> {
    step: Step,
    _value: PhantomData<fn() -> A>,
}

impl<A: Send + 'static> Task<A> {
    fn from_step(step: Step) -> Self {
        Self {
            step,
            _value: PhantomData,
        }
    }

    /// Creates a task from a closure that runs when the task is scheduled.
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() -> A + Send + 'static,
    {
        Self::from_step(Step::suspend(move || Step::done(action())))
    }

    /// Creates a task that yields `value` without doing anything else.
    pub fn pure(value: A) -> Self {
        Self::from_step(Step::done(value))
    }

    /// Creates a task whose program is built only when it runs.
    ///
    /// `build` is called inside the scheduled job, so any work it does to
    /// assemble the task is deferred as well.
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use std::sync::atomic::{AtomicUsize, Ordering};
    /// use taskwell::effect::{Executor, Task};
    ///
    /// let builds = Arc::new(AtomicUsize::new(0));
    /// let counter = Arc::clone(&builds);
    /// let task = Task::defer(move || Task::pure(counter.fetch_add(1, Ordering::SeqCst) + 20));
    ///
    /// assert_eq!(builds.load(Ordering::SeqCst), 0);
    /// assert_eq!(task.run(&Executor::inline()), 20);
    /// assert_eq!(builds.load(Ordering::SeqCst), 1);
    /// ```
    pub fn defer<F>(build: F) -> Self
    where
        F: FnOnce() -> Self + Send + 'static,
    {
        Self::from_step(Step::suspend(move || build().step))
    }

    /// Runs every task, possibly concurrently, and collects the values in
    /// input order.
    ///
    /// Each task is submitted as its own job before any is waited on. A
    /// task that no worker has started by the time it is waited on runs on
    /// the waiting thread instead.
    pub fn join_all<I>(tasks: I) -> Task<Vec<A>>
    where
        I: IntoIterator<Item = Self>,
    {
        let branches = tasks.into_iter().map(|task| task.step).collect();
        Task::from_step(Step::fork(branches, |values| {
            Step::done(values.into_iter().map(unerase::<A>).collect::<Vec<A>>())
        }))
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Submits the task to `executor` as one job and returns a handle to it.
    ///
    /// Panics raised by the task are captured and delivered through the
    /// handle rather than unwinding the worker.
    pub fn schedule(self, executor: &Executor) -> Pending<A> {
        let (sender, receiver) = oneshot::channel::<Outcome<A>>();
        let step = self.step;
        let worker = executor.clone();

        tracing::trace!(scheduler = executor.scheduler_name(), "scheduling task");
        executor.spawn(Box::new(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                unerase::<A>(interpreter::evaluate(step, &worker))
            }));
            if outcome.is_err() {
                tracing::debug!(scheduler = worker.scheduler_name(), "scheduled task panicked");
            }
            if sender.send(outcome).is_err() {
                tracing::trace!("task finished after its handle was dropped");
            } else {
                tracing::trace!(scheduler = worker.scheduler_name(), "task completed");
            }
        }));

        Pending { receiver }
    }

    /// Schedules the task and blocks until it finishes.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::Panicked`] if the task panicked and
    /// [`ExecutionError::Cancelled`] if the scheduler dropped the job.
    pub fn try_run(self, executor: &Executor) -> Result<A, ExecutionError> {
        self.schedule(executor).wait()
    }

    /// Schedules the task and blocks until it finishes.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from the task with its original payload, and panics
    /// if the scheduler dropped the job.
    pub fn run(self, executor: &Executor) -> A {
        self.schedule(executor).join()
    }

    // =========================================================================
    // Combinators
    // =========================================================================

    /// Transforms the value once the task has run.
    pub fn fmap<B, F>(self, function: F) -> Task<B>
    where
        F: FnOnce(A) -> B + Send + 'static,
        B: Send + 'static,
    {
        Task::from_step(
            self.step
                .bind(move |value| Step::done(function(unerase::<A>(value)))),
        )
    }

    /// Runs this task, feeds its value to `function`, then runs the task
    /// `function` returns.
    pub fn flat_map<B, F>(self, function: F) -> Task<B>
    where
        F: FnOnce(A) -> Task<B> + Send + 'static,
        B: Send + 'static,
    {
        Task::from_step(self.step.bind(move |value| function(unerase::<A>(value)).step))
    }

    /// Alias for [`Task::flat_map`].
    pub fn and_then<B, F>(self, function: F) -> Task<B>
    where
        F: FnOnce(A) -> Task<B> + Send + 'static,
        B: Send + 'static,
    {
        self.flat_map(function)
    }

    /// Runs this task for its effects, then `next`.
    pub fn then<B>(self, next: Task<B>) -> Task<B>
    where
        B: Send + 'static,
    {
        self.flat_map(move |_| next)
    }

    /// Runs both tasks, possibly concurrently, then combines the values.
    ///
    /// Both are submitted before either is waited on.
    ///
    /// ```rust
    /// use taskwell::effect::{Executor, Task};
    ///
    /// let total = Task::pure(10).map2(Task::pure(20), |a, b| a + b);
    /// assert_eq!(total.run(&Executor::inline()), 30);
    /// ```
    pub fn map2<B, C, F>(self, other: Task<B>, function: F) -> Task<C>
    where
        F: FnOnce(A, B) -> C + Send + 'static,
        B: Send + 'static,
        C: Send + 'static,
    {
        Task::from_step(Step::fork(vec![self.step, other.step], move |values| {
            let mut values = values.into_iter();
            let (Some(first), Some(second)) = (values.next(), values.next()) else {
                unreachable!("a two-branch fork gathers two values");
            };
            Step::done(function(unerase::<A>(first), unerase::<B>(second)))
        }))
    }

    /// Pairs the values of two tasks.
    pub fn product<B>(self, other: Task<B>) -> Task<(A, B)>
    where
        B: Send + 'static,
    {
        self.map2(other, |a, b| (a, b))
    }
}

impl<A> fmt::Debug for Task<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Task").finish_non_exhaustive()
    }
}

// =============================================================================
// Pending
// =============================================================================

pin_project! {
    /// Handle to a scheduled computation.
    ///
    /// Wait on it from synchronous code with [`Pending::wait`] or
    /// [`Pending::join`], or `.await` it from async code. Dropping the
    /// handle does not cancel the job; its value is discarded.
    #[must_use = "a pending task's value is lost unless it is waited on"]
    pub struct Pending<A> {
        #[pin]
        receiver: oneshot::Receiver<Outcome<A>>,
    }
}

impl<A> Pending<A> {
    /// Blocks the current thread until the job reports back.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError::Panicked`] if the job panicked and
    /// [`ExecutionError::Cancelled`] if it was dropped unrun.
    pub fn wait(self) -> Result<A, ExecutionError> {
        futures::executor::block_on(self)
    }

    /// Blocks until the job reports back and returns its value.
    ///
    /// # Panics
    ///
    /// Re-raises the job's panic with its original payload, and panics if
    /// the job was dropped unrun.
    pub fn join(self) -> A {
        match self.wait() {
            Ok(value) => value,
            Err(ExecutionError::Panicked(payload)) => panic::resume_unwind(payload),
            Err(error @ ExecutionError::Cancelled) => panic!("{error}"),
        }
    }
}

impl<A> Future for Pending<A> {
    type Output = Result<A, ExecutionError>;

    fn poll(self: Pin<&mut Self>, context: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        Poll::Ready(match ready!(this.receiver.poll(context)) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(payload)) => Err(ExecutionError::Panicked(payload)),
            Err(oneshot::Canceled) => {
                tracing::debug!("scheduled task was dropped before completion");
                Err(ExecutionError::Cancelled)
            }
        })
    }
}

impl<A> fmt::Debug for Pending<A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("Pending").finish_non_exhaustive()
    }
}
