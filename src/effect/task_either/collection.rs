//! Collection combinators: sequencing and validation.

use std::vec;

use crate::control::Either;
use crate::effect::Task;

use super::TaskEither;

impl<E, V> TaskEither<E, V>
where
    E: Send + 'static,
    V: Send + 'static,
{
    /// Forces `items` one after another and collects their successes.
    ///
    /// Stops at the first failure; computations after it are never
    /// scheduled. An empty input succeeds with an empty `Vec`.
    ///
    /// ```rust
    /// use taskwell::control::Either;
    /// use taskwell::effect::{Executor, TaskEither};
    ///
    /// let executor = Executor::inline();
    /// let all = TaskEither::<&str, i32>::sequence(vec![
    ///     TaskEither::succeed(1),
    ///     TaskEither::fail("e1"),
    ///     TaskEither::fail("e2"),
    /// ]);
    /// assert_eq!(all.force(&executor), Either::Left("e1"));
    /// ```
    pub fn sequence<I>(items: I) -> TaskEither<E, Vec<V>>
    where
        I: IntoIterator<Item = Self>,
    {
        let items: Vec<Self> = items.into_iter().collect();
        let capacity = items.len();
        sequence_from(items.into_iter(), Vec::with_capacity(capacity))
    }

    /// Builds a computation per element with `function` and sequences them.
    ///
    /// `function` is called lazily, one element at a time, while forcing.
    /// After a failure the remaining elements are not visited.
    pub fn traverse<A, I, F>(items: I, function: F) -> TaskEither<E, Vec<V>>
    where
        I: IntoIterator<Item = A>,
        A: Send + 'static,
        F: FnMut(A) -> Self + Send + 'static,
    {
        let items: Vec<A> = items.into_iter().collect();
        TaskEither::defer(move || {
            let capacity = items.len();
            traverse_from(items.into_iter(), function, Vec::with_capacity(capacity))
        })
    }

    /// Forces every computation in `items` and collects all failures.
    ///
    /// All elements are submitted to the executor before any is waited on,
    /// so they may run concurrently. The result is
    /// `Left` with every failure in input order if at least one failed,
    /// otherwise `Right` with every success in input order.
    ///
    /// ```rust
    /// use taskwell::control::Either;
    /// use taskwell::effect::{Executor, TaskEither};
    ///
    /// let executor = Executor::inline();
    /// let all = TaskEither::<&str, i32>::sequence_accumulating(vec![
    ///     TaskEither::succeed(1),
    ///     TaskEither::fail("e1"),
    ///     TaskEither::fail("e2"),
    /// ]);
    /// assert_eq!(all.force(&executor), Either::Left(vec!["e1", "e2"]));
    /// ```
    pub fn sequence_accumulating<I>(items: I) -> TaskEither<Vec<E>, Vec<V>>
    where
        I: IntoIterator<Item = Self>,
    {
        let outcomes = Task::join_all(items.into_iter().map(|item| item.task));
        TaskEither {
            task: outcomes.fmap(partition),
        }
    }

    /// Checks `value` against every validator and keeps it if all pass.
    ///
    /// Validators are called when the result is forced, each receiving a
    /// reference to `value`. Every check runs; the failure lists all
    /// validator errors in validator order. An empty validator list always
    /// succeeds.
    ///
    /// ```rust
    /// use taskwell::control::Either;
    /// use taskwell::effect::{Executor, TaskEither};
    ///
    /// fn positive(x: &i32) -> TaskEither<&'static str, ()> {
    ///     TaskEither::from_predicate((), |_| *x > 0, || "must be positive")
    /// }
    ///
    /// fn even(x: &i32) -> TaskEither<&'static str, ()> {
    ///     TaskEither::from_predicate((), |_| x % 2 == 0, || "not even")
    /// }
    ///
    /// let executor = Executor::inline();
    /// let checks: [fn(&i32) -> TaskEither<&'static str, ()>; 2] = [positive, even];
    /// assert_eq!(TaskEither::validate(4, checks).force(&executor), Either::Right(4));
    /// assert_eq!(
    ///     TaskEither::validate(-3, checks).force(&executor),
    ///     Either::Left(vec!["must be positive", "not even"]),
    /// );
    /// ```
    pub fn validate<W, F, I>(value: V, validators: I) -> TaskEither<Vec<E>, V>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(&V) -> TaskEither<E, W> + Send + 'static,
        W: Send + 'static,
    {
        let validators: Vec<F> = validators.into_iter().collect();
        TaskEither::defer(move || {
            let checks: Vec<TaskEither<E, W>> = validators
                .into_iter()
                .map(|validator| validator(&value))
                .collect();
            TaskEither::sequence_accumulating(checks).map(move |_| value)
        })
    }

    /// Checks `value` against a single validator.
    ///
    /// A failure is wrapped in a one-element list so the shape matches
    /// [`validate`](Self::validate).
    pub fn validate_one<W, F>(value: V, validator: F) -> TaskEither<Vec<E>, V>
    where
        F: FnOnce(&V) -> TaskEither<E, W> + Send + 'static,
        W: Send + 'static,
    {
        TaskEither::defer(move || {
            let check = validator(&value);
            check.bimap(|error| vec![error], move |_| value)
        })
    }
}

/// Continues a short-circuiting sequence with the items left in `items`.
fn sequence_from<E, V>(
    mut items: vec::IntoIter<TaskEither<E, V>>,
    mut values: Vec<V>,
) -> TaskEither<E, Vec<V>>
where
    E: Send + 'static,
    V: Send + 'static,
{
    match items.next() {
        None => TaskEither::succeed(values),
        Some(item) => item.chain(move |value| {
            values.push(value);
            sequence_from(items, values)
        }),
    }
}

fn traverse_from<A, E, V, F>(
    mut items: vec::IntoIter<A>,
    mut function: F,
    mut values: Vec<V>,
) -> TaskEither<E, Vec<V>>
where
    A: Send + 'static,
    E: Send + 'static,
    V: Send + 'static,
    F: FnMut(A) -> TaskEither<E, V> + Send + 'static,
{
    match items.next() {
        None => TaskEither::succeed(values),
        Some(item) => function(item).chain(move |value| {
            values.push(value);
            traverse_from(items, function, values)
        }),
    }
}

/// Splits outcomes into all failures, or all successes when none failed.
fn partition<E, V>(outcomes: Vec<Either<E, V>>) -> Either<Vec<E>, Vec<V>> {
    let mut errors = Vec::new();
    let mut values = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        match outcome {
            Either::Right(value) => values.push(value),
            Either::Left(error) => errors.push(error),
        }
    }

    if errors.is_empty() {
        Either::Right(values)
    } else {
        tracing::trace!(failures = errors.len(), "accumulated failures");
        Either::Left(errors)
    }
}
