//! `TaskEither` - a deferred computation that succeeds or fails.
//!
//! A `TaskEither<E, V>` is a recipe that, when forced, produces either a
//! failure `Left(E)` or a success `Right(V)`. Building one never runs
//! anything; combinators only extend the recipe. The work happens in
//! [`TaskEither::force`] (or one of its siblings), on the [`Executor`]
//! the caller passes in.
//!
//! # Composition
//!
//! - Short-circuiting: [`map`](TaskEither::map), [`chain`](TaskEither::chain),
//!   [`apply`](TaskEither::apply), [`sequence`](TaskEither::sequence).
//!   The first failure wins and later steps are skipped.
//! - Accumulating: [`sequence_accumulating`](TaskEither::sequence_accumulating),
//!   [`validate`](TaskEither::validate). Every element runs and all
//!   failures are collected in input order.
//!
//! # Examples
//!
//! ```rust
//! use taskwell::control::Either;
//! use taskwell::effect::{Executor, TaskEither};
//!
//! let executor = Executor::inline();
//!
//! let tickets = TaskEither::<String, u32>::succeed(2)
//!     .chain(|count| {
//!         TaskEither::from_predicate(count, |count| *count > 0, || "no tickets".to_string())
//!     })
//!     .map(|count| count - 1);
//!
//! assert_eq!(tickets.force(&executor), Either::Right(1));
//! ```
//!
//! # Forcing
//!
//! Every forcing operation takes `self`, so a value can be forced once.
//! Whether a recipe will succeed or fail is only known after forcing it;
//! there is no way to ask beforehand.

mod collection;
mod interop;

use std::fmt;

use crate::control::Either;

use super::{ExecutionError, Executor, Task};

/// A deferred computation yielding `Left(E)` on failure or `Right(V)` on
/// success.
///
/// # Laws
///
/// With equality meaning "forces to the same `Either`":
///
/// 1. **Left Identity**: `TaskEither::succeed(a).chain(f) == f(a)`
/// 2. **Right Identity**: `m.chain(TaskEither::succeed) == m`
/// 3. **Associativity**: `m.chain(f).chain(g) == m.chain(|x| f(x).chain(g))`
/// 4. **Failure absorbs**: `TaskEither::fail(e).chain(f) == TaskEither::fail(e)`
pub struct TaskEither<E, V> {
    task: Task<Either<E, V>>,
}

impl<E, V> TaskEither<E, V>
where
    E: Send + 'static,
    V: Send + 'static,
{
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Creates a computation that succeeds with `value`.
    pub fn succeed(value: V) -> Self {
        Self::from_either(Either::Right(value))
    }

    /// Creates a computation that fails with `error`.
    pub fn fail(error: E) -> Self {
        Self::from_either(Either::Left(error))
    }

    /// Creates a computation that yields an already-known outcome.
    pub fn from_either(either: Either<E, V>) -> Self {
        Self {
            task: Task::pure(either),
        }
    }

    /// Converts a `Result`: `Ok` becomes success, `Err` becomes failure.
    pub fn from_result(result: Result<V, E>) -> Self {
        Self::from_either(result.into())
    }

    /// Converts an `Option`, calling `on_none` to build the failure.
    ///
    /// `on_none` runs here, at construction, and only for `None`.
    pub fn from_option<F>(option: Option<V>, on_none: F) -> Self
    where
        F: FnOnce() -> E,
    {
        match option {
            Some(value) => Self::succeed(value),
            None => Self::fail(on_none()),
        }
    }

    /// Succeeds with `value` when `predicate` holds, otherwise fails with
    /// `on_false()`.
    ///
    /// The predicate is evaluated here, at construction.
    ///
    /// ```rust
    /// use taskwell::control::Either;
    /// use taskwell::effect::{Executor, TaskEither};
    ///
    /// let executor = Executor::inline();
    /// let short = TaskEither::from_predicate(140, |height| *height >= 150, || "height invalid");
    /// assert_eq!(short.force(&executor), Either::Left("height invalid"));
    /// ```
    pub fn from_predicate<P, F>(value: V, predicate: P, on_false: F) -> Self
    where
        P: FnOnce(&V) -> bool,
        F: FnOnce() -> E,
    {
        if predicate(&value) {
            Self::succeed(value)
        } else {
            Self::fail(on_false())
        }
    }

    /// Defers a fallible closure until the computation is forced.
    ///
    /// ```rust
    /// use taskwell::control::Either;
    /// use taskwell::effect::{Executor, TaskEither};
    ///
    /// let parsed = TaskEither::new(|| "170".parse::<u32>());
    /// assert_eq!(parsed.force(&Executor::inline()), Either::Right(170));
    /// ```
    pub fn new<F>(action: F) -> Self
    where
        F: FnOnce() -> Result<V, E> + Send + 'static,
    {
        Self {
            task: Task::new(move || action().into()),
        }
    }

    /// Lifts a [`Task`] whose value counts as success.
    pub fn from_task(task: Task<V>) -> Self {
        Self {
            task: task.fmap(Either::Right),
        }
    }

    /// Lifts a [`Task`] whose value counts as failure.
    pub fn from_task_left(task: Task<E>) -> Self {
        Self {
            task: task.fmap(Either::Left),
        }
    }

    /// Builds the computation only when it is forced.
    ///
    /// `build` runs inside the scheduled job, so anything it calls is
    /// deferred along with the computation it returns.
    pub fn defer<F>(build: F) -> Self
    where
        F: FnOnce() -> Self + Send + 'static,
    {
        Self {
            task: Task::defer(move || build().task),
        }
    }

    /// Unwraps into the underlying [`Task`].
    pub fn into_task(self) -> Task<Either<E, V>> {
        self.task
    }

    // =========================================================================
    // Forcing
    // =========================================================================

    /// Schedules the computation on `executor` and blocks until it has an
    /// outcome.
    ///
    /// # Panics
    ///
    /// A panic inside the computation is re-raised here. Use
    /// [`try_force`](Self::try_force) to receive it as a value instead.
    pub fn force(self, executor: &Executor) -> Either<E, V> {
        self.task.run(executor)
    }

    /// Like [`force`](Self::force), but reports substrate failures.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] if the computation panicked or its job was
    /// dropped by the scheduler.
    pub fn try_force(self, executor: &Executor) -> Result<Either<E, V>, ExecutionError> {
        self.task.try_run(executor)
    }

    /// Schedules the computation and awaits its outcome without blocking
    /// the calling task.
    ///
    /// Scheduling happens on first poll.
    ///
    /// # Errors
    ///
    /// Returns [`ExecutionError`] if the computation panicked or its job was
    /// dropped by the scheduler.
    pub async fn force_async(self, executor: &Executor) -> Result<Either<E, V>, ExecutionError> {
        self.task.schedule(executor).await
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Transforms a success; failures pass through untouched and `function`
    /// is not called.
    pub fn map<R, F>(self, function: F) -> TaskEither<E, R>
    where
        F: FnOnce(V) -> R + Send + 'static,
        R: Send + 'static,
    {
        TaskEither {
            task: self.task.fmap(move |either| either.map_right(function)),
        }
    }

    /// Transforms a failure; successes pass through untouched.
    pub fn map_left<E2, F>(self, function: F) -> TaskEither<E2, V>
    where
        F: FnOnce(E) -> E2 + Send + 'static,
        E2: Send + 'static,
    {
        TaskEither {
            task: self.task.fmap(move |either| either.map_left(function)),
        }
    }

    /// Transforms whichever side the outcome lands on.
    pub fn bimap<E2, R, F, G>(self, on_failure: F, on_success: G) -> TaskEither<E2, R>
    where
        F: FnOnce(E) -> E2 + Send + 'static,
        G: FnOnce(V) -> R + Send + 'static,
        E2: Send + 'static,
        R: Send + 'static,
    {
        TaskEither {
            task: self
                .task
                .fmap(move |either| either.bimap(on_failure, on_success)),
        }
    }

    /// Continues with the computation `function` builds from a success.
    ///
    /// On failure `function` is never called and the failure is the result.
    pub fn chain<R, F>(self, function: F) -> TaskEither<E, R>
    where
        F: FnOnce(V) -> TaskEither<E, R> + Send + 'static,
        R: Send + 'static,
    {
        TaskEither {
            task: self.task.flat_map(move |either| match either {
                Either::Right(value) => function(value).task,
                Either::Left(error) => Task::pure(Either::Left(error)),
            }),
        }
    }

    /// Alias for [`TaskEither::chain`].
    #[inline]
    pub fn flat_map<R, F>(self, function: F) -> TaskEither<E, R>
    where
        F: FnOnce(V) -> TaskEither<E, R> + Send + 'static,
        R: Send + 'static,
    {
        self.chain(function)
    }

    /// Alias for [`TaskEither::chain`].
    #[inline]
    pub fn and_then<R, F>(self, function: F) -> TaskEither<E, R>
    where
        F: FnOnce(V) -> TaskEither<E, R> + Send + 'static,
        R: Send + 'static,
    {
        self.chain(function)
    }

    /// Recovers from a failure with the computation `handler` builds.
    ///
    /// ```rust
    /// use taskwell::control::Either;
    /// use taskwell::effect::{Executor, TaskEither};
    ///
    /// let recovered = TaskEither::<&str, u32>::fail("closed")
    ///     .or_else(|_| TaskEither::<String, u32>::succeed(0));
    /// assert_eq!(recovered.force(&Executor::inline()), Either::Right(0));
    /// ```
    pub fn or_else<E2, F>(self, handler: F) -> TaskEither<E2, V>
    where
        F: FnOnce(E) -> TaskEither<E2, V> + Send + 'static,
        E2: Send + 'static,
    {
        TaskEither {
            task: self.task.flat_map(move |either| match either {
                Either::Right(value) => Task::pure(Either::Right(value)),
                Either::Left(error) => handler(error).task,
            }),
        }
    }

    /// Collapses both outcomes into a plain [`Task`].
    pub fn fold<R, F, G>(self, on_failure: F, on_success: G) -> Task<R>
    where
        F: FnOnce(E) -> R + Send + 'static,
        G: FnOnce(V) -> R + Send + 'static,
        R: Send + 'static,
    {
        self.task
            .fmap(move |either| either.fold(on_failure, on_success))
    }

    /// Runs both computations, possibly concurrently, and combines their
    /// successes.
    ///
    /// Both sides always run. When both fail, the failure of `self` is kept.
    pub fn map2<W, R, F>(self, other: TaskEither<E, W>, function: F) -> TaskEither<E, R>
    where
        F: FnOnce(V, W) -> R + Send + 'static,
        W: Send + 'static,
        R: Send + 'static,
    {
        TaskEither {
            task: self.task.map2(other.task, move |first, second| match (first, second) {
                (Either::Right(left_value), Either::Right(right_value)) => {
                    Either::Right(function(left_value, right_value))
                }
                (Either::Left(error), _) | (Either::Right(_), Either::Left(error)) => {
                    Either::Left(error)
                }
            }),
        }
    }

    /// Pairs the successes of two computations.
    pub fn product<W>(self, other: TaskEither<E, W>) -> TaskEither<E, (V, W)>
    where
        W: Send + 'static,
    {
        self.map2(other, |value, other_value| (value, other_value))
    }
}

impl<E, F> TaskEither<E, F>
where
    E: Send + 'static,
    F: Send + 'static,
{
    /// Applies a deferred function to a deferred value.
    ///
    /// Both sides are submitted before either is waited on, so they may run
    /// concurrently. When both fail, the function side's failure is kept.
    ///
    /// ```rust
    /// use taskwell::control::Either;
    /// use taskwell::effect::{Executor, TaskEither};
    ///
    /// let executor = Executor::inline();
    /// let add_one = TaskEither::<String, _>::succeed(|x: i32| x + 1);
    /// assert_eq!(add_one.apply(TaskEither::succeed(41)).force(&executor), Either::Right(42));
    ///
    /// let broken = TaskEither::<String, fn(i32) -> i32>::fail("no function".to_string());
    /// let missing = TaskEither::<String, i32>::fail("no value".to_string());
    /// assert_eq!(broken.apply(missing).force(&executor), Either::Left("no function".to_string()));
    /// ```
    pub fn apply<V, R>(self, value: TaskEither<E, V>) -> TaskEither<E, R>
    where
        F: FnOnce(V) -> R,
        V: Send + 'static,
        R: Send + 'static,
    {
        self.map2(value, |function, value| function(value))
    }
}

impl<E, V> From<Result<V, E>> for TaskEither<E, V>
where
    E: Send + 'static,
    V: Send + 'static,
{
    fn from(result: Result<V, E>) -> Self {
        Self::from_result(result)
    }
}

impl<E, V> From<Either<E, V>> for TaskEither<E, V>
where
    E: Send + 'static,
    V: Send + 'static,
{
    fn from(either: Either<E, V>) -> Self {
        Self::from_either(either)
    }
}

impl<E, V> fmt::Debug for TaskEither<E, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_struct("TaskEither").finish_non_exhaustive()
    }
}
