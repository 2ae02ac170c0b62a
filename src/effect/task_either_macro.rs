//! `task_either!` - statement blocks for `TaskEither` pipelines.
//!
//! Dependent `TaskEither` steps written as nested `chain` closures drift to
//! the right, and guards end up as `from_predicate` calls whose value is
//! thrown away. `task_either!` writes the same pipeline as a list of
//! statements:
//!
//! | Statement                          | Meaning                                              |
//! |------------------------------------|------------------------------------------------------|
//! | `bind pattern = computation;`      | continue with the success of `computation`            |
//! | `let pattern = expression;`        | plain binding                                        |
//! | `ensure condition, error;`         | fail with `error` unless `condition` holds           |
//! | `yield expression`                 | final step: succeed with `expression`                |
//! | `computation`                      | final step: any `TaskEither` with the block's types  |
//!
//! Nothing runs while the block is evaluated except plain `let` bindings
//! and guards that come before the first `bind`; everything after a `bind`
//! runs when the result is forced. A failing `bind` or `ensure` skips every
//! later statement.
//!
//! # Examples
//!
//! ```rust
//! use taskwell::control::Either;
//! use taskwell::effect::{Executor, TaskEither};
//! use taskwell::task_either;
//!
//! #[derive(Debug, PartialEq)]
//! struct Boarding {
//!     height: u32,
//!     tickets_left: u32,
//! }
//!
//! fn measure(height: u32) -> TaskEither<String, u32> {
//!     TaskEither::succeed(height)
//! }
//!
//! fn board(height: u32, tickets: u32) -> TaskEither<String, Boarding> {
//!     task_either! {
//!         bind measured = measure(height);
//!         ensure measured >= 150, "height invalid".to_string();
//!         ensure tickets > 0, "not enough tickets".to_string();
//!         let tickets_left = tickets - 1;
//!         yield Boarding { height: measured, tickets_left }
//!     }
//! }
//!
//! let executor = Executor::inline();
//! assert_eq!(
//!     board(170, 2).force(&executor),
//!     Either::Right(Boarding { height: 170, tickets_left: 1 })
//! );
//! assert_eq!(board(140, 2).force(&executor), Either::Left("height invalid".to_string()));
//! ```

/// Writes a `TaskEither` pipeline as a block of statements.
///
/// ```text
/// task_either! {
///     bind pattern = computation;   // TaskEither::chain
///     let pattern = expression;     // plain let
///     ensure condition, error;      // guard
///     yield value                   // TaskEither::succeed(value)
/// }
/// ```
///
/// A bare expression is also accepted as the last statement and must be a
/// `TaskEither` with the block's types. Guards and `let` bindings before the
/// first `bind` run immediately; everything else runs when forced.
#[macro_export]
macro_rules! task_either {
    (yield $value:expr) => {
        $crate::effect::TaskEither::succeed($value)
    };

    (bind $pattern:pat_param = $computation:expr ; $($rest:tt)+) => {
        $crate::effect::TaskEither::chain($computation, move |$pattern| {
            $crate::task_either!($($rest)+)
        })
    };

    (let $pattern:pat_param = $value:expr ; $($rest:tt)+) => {{
        let $pattern = $value;
        $crate::task_either!($($rest)+)
    }};

    (ensure $condition:expr, $error:expr ; $($rest:tt)+) => {
        if $condition {
            $crate::task_either!($($rest)+)
        } else {
            $crate::effect::TaskEither::fail($error)
        }
    };

    ($computation:expr) => {
        $computation
    };
}
