//! Control structures.
//!
//! - [`Either`]: the success/failure sum type (`Left` = failure,
//!   `Right` = success)
//!
//! # Examples
//!
//! ```rust
//! use taskwell::control::Either;
//!
//! let checked: Either<String, u32> = Ok::<u32, String>(2).into();
//! assert_eq!(checked.map_right(|tickets| tickets - 1), Either::Right(1));
//! ```

mod either;

pub use either::Either;
