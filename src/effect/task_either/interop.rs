//! Conversions between `TaskEither` and panicking or `Result`-returning code.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::control::Either;
use crate::effect::{Executor, Fault, Task};

use super::TaskEither;

impl<V> TaskEither<Fault, V>
where
    V: Send + 'static,
{
    /// Runs `function` right away and captures a panic as a [`Fault`].
    ///
    /// The call happens here, at construction, not when the result is
    /// forced. Use [`attempt`](Self::attempt) to defer it.
    ///
    /// Only a `&str` or `String` panic message survives the conversion.
    /// Any other payload, such as one raised with
    /// [`panic_any`](std::panic::panic_any), becomes
    /// `Fault("Unknown panic")`; use [`from_try_with`](TaskEither::from_try_with)
    /// to recover it.
    ///
    /// ```rust
    /// use taskwell::control::Either;
    /// use taskwell::effect::{Executor, Fault, TaskEither};
    ///
    /// fn divide(dividend: i32, divisor: i32) -> i32 {
    ///     if divisor == 0 {
    ///         panic!("division by zero");
    ///     }
    ///     dividend / divisor
    /// }
    ///
    /// let executor = Executor::inline();
    /// let quotient = TaskEither::from_try(|| divide(10, 0));
    /// assert_eq!(quotient.force(&executor), Either::Left(Fault::new("division by zero")));
    /// ```
    pub fn from_try<F>(function: F) -> Self
    where
        F: FnOnce() -> V,
    {
        match panic::catch_unwind(AssertUnwindSafe(function)) {
            Ok(value) => Self::succeed(value),
            Err(payload) => {
                let fault = Fault::from_panic(payload.as_ref());
                tracing::debug!(panic = fault.message(), "captured panic as failure");
                Self::fail(fault)
            }
        }
    }

    /// Like [`from_try`](Self::from_try), but `function` runs when the
    /// computation is forced.
    pub fn attempt<F>(function: F) -> Self
    where
        F: FnOnce() -> V + Send + 'static,
    {
        Self {
            task: Task::new(move || match panic::catch_unwind(AssertUnwindSafe(function)) {
                Ok(value) => Either::Right(value),
                Err(payload) => Either::Left(Fault::from_panic(payload.as_ref())),
            }),
        }
    }
}

impl<E, V> TaskEither<E, V>
where
    E: Send + 'static,
    V: Send + 'static,
{
    /// Runs `function` right away and turns a panic into a failure with
    /// `on_panic`, which receives the raw payload.
    ///
    /// ```rust
    /// use std::panic;
    /// use taskwell::control::Either;
    /// use taskwell::effect::{Executor, TaskEither};
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct RideJammed(u32);
    ///
    /// let boarding = TaskEither::from_try_with(
    ///     || -> u32 { panic::panic_any(RideJammed(4)) },
    ///     |payload| *payload.downcast::<RideJammed>().unwrap(),
    /// );
    /// assert_eq!(boarding.force(&Executor::inline()), Either::Left(RideJammed(4)));
    /// ```
    pub fn from_try_with<F, H>(function: F, on_panic: H) -> Self
    where
        F: FnOnce() -> V,
        H: FnOnce(Box<dyn Any + Send>) -> E,
    {
        match panic::catch_unwind(AssertUnwindSafe(function)) {
            Ok(value) => Self::succeed(value),
            Err(payload) => {
                tracing::debug!("captured panic payload as failure");
                Self::fail(on_panic(payload))
            }
        }
    }

    /// Forces the computation and converts the outcome to a `Result`.
    ///
    /// # Errors
    ///
    /// Returns `Err(e)` when the computation fails with `e`.
    ///
    /// # Panics
    ///
    /// Re-raises a panic from inside the computation.
    pub fn to_result(self, executor: &Executor) -> Result<V, E> {
        self.force(executor).into()
    }

    /// Forces the computation and returns its success.
    ///
    /// # Panics
    ///
    /// On failure, panics with the failure value itself as the payload, so
    /// a surrounding [`catch_unwind`](std::panic::catch_unwind) can downcast
    /// it back to `E`.
    ///
    /// ```rust
    /// use std::panic;
    /// use taskwell::effect::{Executor, TaskEither};
    ///
    /// let executor = Executor::inline();
    /// let payload = panic::catch_unwind(|| {
    ///     TaskEither::<String, u32>::fail("ride closed".to_string())
    ///         .to_unwrapped_or_raise(&Executor::inline())
    /// })
    /// .unwrap_err();
    /// assert_eq!(payload.downcast_ref::<String>().unwrap(), "ride closed");
    /// assert_eq!(TaskEither::<String, u32>::succeed(3).to_unwrapped_or_raise(&executor), 3);
    /// ```
    pub fn to_unwrapped_or_raise(self, executor: &Executor) -> V {
        match self.force(executor) {
            Either::Right(value) => value,
            Either::Left(error) => panic::panic_any(error),
        }
    }
}
