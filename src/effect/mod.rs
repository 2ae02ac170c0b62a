//! Deferred computations and the machinery that runs them.
//!
//! # Deferred Values
//!
//! - [`Task`]: a deferred unit of work producing a value
//! - [`TaskEither`]: a deferred computation that succeeds or fails
//!
//! Neither does anything when built. Work starts only when a value is
//! forced on an [`Executor`], the injected scheduling substrate.
//!
//! ```rust
//! use taskwell::control::Either;
//! use taskwell::effect::{Executor, TaskEither};
//!
//! let executor = Executor::inline();
//! let checked = TaskEither::<String, u32>::succeed(170)
//!     .chain(|height| {
//!         TaskEither::from_predicate(height, |h| *h >= 150, || "height invalid".to_string())
//!     })
//!     .map(|height| height / 10);
//!
//! assert_eq!(checked.force(&executor), Either::Right(17));
//! ```
//!
//! # Schedulers
//!
//! - [`InlineScheduler`]: runs jobs on the calling thread (tests)
//! - [`TokioScheduler`]: runs jobs on a tokio blocking pool (feature `runtime`)
//!
//! # Pipeline Blocks
//!
//! The [`task_either!`](crate::task_either) macro writes dependent
//! `TaskEither` steps and guards top to bottom.

// =============================================================================
// Errors
// =============================================================================

mod error;

pub use error::{ExecutionError, Fault};

// =============================================================================
// Scheduling
// =============================================================================

mod executor;

pub use executor::{Executor, InlineScheduler, Job, Scheduler};

#[cfg(feature = "runtime")]
pub use executor::TokioScheduler;

#[cfg(feature = "runtime")]
pub mod runtime;

// =============================================================================
// Deferred Values
// =============================================================================

mod interpreter;
mod task;
mod task_either;

pub use task::{Pending, Task};
pub use task_either::TaskEither;

// =============================================================================
// Pipeline Blocks
// =============================================================================

mod task_either_macro;
