//! # taskwell
//!
//! Deferred asynchronous computations that succeed or fail, with
//! short-circuiting and error-accumulating combinators.
//!
//! ## Overview
//!
//! - **Either**: the success/failure sum type (`Left` = failure, `Right` = success)
//! - **Task**: a deferred unit of work, scheduled through an injected executor
//! - **`TaskEither`**: a deferred `Either` with `map`, `chain`, `apply`,
//!   `sequence`, `sequence_accumulating` and `validate`
//! - **Executors**: an inline scheduler for deterministic tests and a tokio
//!   blocking-pool scheduler for real concurrency
//!
//! ## Feature Flags
//!
//! - `typeclass`: `Identity`, `Foldable` and `TypeConstructor`
//! - `control`: the `Either` type
//! - `effect`: `Task`, `TaskEither`, executors and the `task_either!` macro
//! - `runtime`: the tokio-backed scheduler and global runtime
//! - `serde`: `Serialize`/`Deserialize` for data types
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use taskwell::prelude::*;
//!
//! let executor = Executor::inline();
//! let validated = TaskEither::validate_one(170_u32, |height: &u32| {
//!     TaskEither::from_predicate((), |_| *height >= 150, || "height invalid")
//! });
//! assert_eq!(validated.force(&executor), Either::Right(170));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use taskwell::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "typeclass")]
    pub use crate::typeclass::*;

    #[cfg(feature = "control")]
    pub use crate::control::*;

    #[cfg(feature = "effect")]
    pub use crate::effect::*;

    #[cfg(feature = "effect")]
    pub use crate::task_either;
}

#[cfg(feature = "typeclass")]
pub mod typeclass;

#[cfg(feature = "control")]
pub mod control;

#[cfg(feature = "effect")]
pub mod effect;
