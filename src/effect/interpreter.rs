//! Type-erased program steps and the loop that runs them.
//!
//! A [`Task`](super::Task) is a typed wrapper around a [`Step`]. Running a
//! step walks it with an explicit continuation stack, so neither chain depth
//! nor nesting grows the call stack. Combinators never schedule anything on
//! their own: the whole program runs inside the one job its top-level
//! schedule submits, and only [`Step::Fork`] hands extra work to the
//! [`Executor`].
//!
//! # Forked branches
//!
//! Each branch of a fork is submitted as its own job, but the step itself
//! sits in a shared slot. Whoever takes it out first runs it: the job when
//! the scheduler gets to it, or the waiter when it reaches a branch that no
//! job has started yet. A waiter therefore only ever blocks on a branch that
//! is actively running somewhere else, and a bounded blocking pool cannot
//! fill up with threads that wait on queued work.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use futures::channel::oneshot;
use parking_lot::Mutex;

use super::{ExecutionError, Executor};

/// A value whose type is only known to the typed wrapper that built it.
pub(crate) type Erased = Box<dyn Any + Send>;

type Continuation = Box<dyn FnOnce(Erased) -> Step + Send>;
type Gather = Box<dyn FnOnce(Vec<Erased>) -> Step + Send>;

/// One node of a deferred program.
pub(crate) enum Step {
    /// A finished value.
    Done(Erased),
    /// Work that runs when the interpreter reaches it.
    Suspend(Box<dyn FnOnce() -> Step + Send>),
    /// Runs the inner step, then feeds its value to the continuation.
    Bind(Box<Step>, Continuation),
    /// Runs every branch, possibly concurrently, then gathers the values in
    /// branch order.
    Fork(Vec<Step>, Gather),
}

impl Step {
    pub(crate) fn done<A: Send + 'static>(value: A) -> Self {
        Self::Done(Box::new(value))
    }

    pub(crate) fn suspend<F>(thunk: F) -> Self
    where
        F: FnOnce() -> Self + Send + 'static,
    {
        Self::Suspend(Box::new(thunk))
    }

    pub(crate) fn bind<F>(self, continuation: F) -> Self
    where
        F: FnOnce(Erased) -> Self + Send + 'static,
    {
        Self::Bind(Box::new(self), Box::new(continuation))
    }

    pub(crate) fn fork<F>(branches: Vec<Self>, gather: F) -> Self
    where
        F: FnOnce(Vec<Erased>) -> Self + Send + 'static,
    {
        Self::Fork(branches, Box::new(gather))
    }
}

/// Recovers the concrete value of an erased one.
///
/// Typed wrappers only pair a step with continuations built for that step's
/// value type, so a mismatch is a bug in this crate.
pub(crate) fn unerase<A: 'static>(value: Erased) -> A {
    *value
        .downcast::<A>()
        .expect("Type mismatch in task continuation")
}

/// Runs `step` to completion on the current thread.
pub(crate) fn evaluate(step: Step, executor: &Executor) -> Erased {
    let mut continuations: Vec<Continuation> = Vec::new();
    let mut current = step;

    loop {
        current = match current {
            Step::Done(value) => match continuations.pop() {
                Some(continuation) => continuation(value),
                None => return value,
            },
            Step::Suspend(thunk) => thunk(),
            Step::Bind(inner, continuation) => {
                continuations.push(continuation);
                *inner
            }
            Step::Fork(branches, gather) => gather(fork_all(branches, executor)),
        };
    }
}

fn fork_all(branches: Vec<Step>, executor: &Executor) -> Vec<Erased> {
    tracing::trace!(
        branches = branches.len(),
        scheduler = executor.scheduler_name(),
        "forking branches"
    );
    // Every branch is submitted before any is waited on.
    let forked: Vec<Branch> = branches
        .into_iter()
        .map(|step| Branch::spawn(step, executor))
        .collect();
    forked
        .into_iter()
        .map(|branch| branch.join(executor))
        .collect()
}

/// A forked step, claimable by its job or by its waiter.
struct Branch {
    slot: Arc<Mutex<Option<Step>>>,
    receiver: oneshot::Receiver<thread::Result<Erased>>,
}

impl Branch {
    fn spawn(step: Step, executor: &Executor) -> Self {
        let slot = Arc::new(Mutex::new(Some(step)));
        let claim = Arc::clone(&slot);
        let (sender, receiver) = oneshot::channel();
        let worker = executor.clone();

        executor.spawn(Box::new(move || {
            let Some(step) = claim.lock().take() else {
                tracing::trace!("branch already run by its waiter");
                return;
            };
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| evaluate(step, &worker)));
            if sender.send(outcome).is_err() {
                tracing::trace!("branch finished after its waiter left");
            }
        }));

        Self { slot, receiver }
    }

    fn join(self, executor: &Executor) -> Erased {
        let unclaimed = self.slot.lock().take();
        if let Some(step) = unclaimed {
            return evaluate(step, executor);
        }

        match futures::executor::block_on(self.receiver) {
            Ok(Ok(value)) => value,
            Ok(Err(payload)) => panic::resume_unwind(payload),
            Err(oneshot::Canceled) => panic!("{}", ExecutionError::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{Job, Scheduler};
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Discarding;

    impl Scheduler for Discarding {
        fn schedule(&self, job: Job) {
            drop(job);
        }
    }

    fn add_one(step: Step) -> Step {
        step.bind(|value| Step::done(unerase::<u64>(value) + 1))
    }

    #[rstest]
    fn deep_bind_chain_runs_in_constant_stack() {
        let mut step = Step::done(0_u64);
        for _ in 0..100_000 {
            step = add_one(step);
        }
        let value = evaluate(step, &Executor::inline());
        assert_eq!(unerase::<u64>(value), 100_000);
    }

    #[rstest]
    fn right_nested_binds_run_in_constant_stack() {
        fn countdown(remaining: u64) -> Step {
            if remaining == 0 {
                Step::done(0_u64)
            } else {
                Step::suspend(move || countdown(remaining - 1))
                    .bind(|value| Step::done(unerase::<u64>(value) + 1))
            }
        }

        let value = evaluate(countdown(50_000), &Executor::inline());
        assert_eq!(unerase::<u64>(value), 50_000);
    }

    #[rstest]
    fn fork_gathers_in_branch_order() {
        let branches = (1..=5_u64).map(Step::done).collect();
        let step = Step::fork(branches, |values| {
            Step::done(values.into_iter().map(unerase::<u64>).collect::<Vec<_>>())
        });
        let value = evaluate(step, &Executor::inline());
        assert_eq!(unerase::<Vec<u64>>(value), vec![1, 2, 3, 4, 5]);
    }

    #[rstest]
    fn waiter_runs_branches_no_job_picked_up() {
        let runs = Arc::new(AtomicUsize::new(0));
        let branches = (0..3)
            .map(|_| {
                let counter = Arc::clone(&runs);
                Step::suspend(move || Step::done(counter.fetch_add(1, Ordering::SeqCst)))
            })
            .collect();
        let step = Step::fork(branches, |values| Step::done(values.len()));

        let value = evaluate(step, &Executor::new(Discarding));
        assert_eq!(unerase::<usize>(value), 3);
        assert_eq!(runs.load(Ordering::SeqCst), 3);
    }

    #[rstest]
    #[should_panic(expected = "Type mismatch")]
    fn mismatched_continuation_is_a_bug() {
        unerase::<String>(Box::new(1_u8));
    }
}
