//! Either type - the success/failure sum type forced recipes resolve to.
//!
//! `Either<L, R>` is exactly one of `Left(L)` or `Right(R)`. Throughout this
//! crate `Left` carries a failure and `Right` carries a success; this is the
//! value [`TaskEither::force`](crate::effect::TaskEither::force) returns.
//! The tag never changes once a value is built.
//!
//! # Examples
//!
//! ```rust
//! use taskwell::control::Either;
//!
//! let admitted: Either<String, u32> = Either::Right(170);
//! let message = admitted.fold(
//!     |reason| format!("rejected: {reason}"),
//!     |height| format!("admitted at {height}cm"),
//! );
//! assert_eq!(message, "admitted at 170cm");
//! ```

use std::fmt;

use crate::typeclass::{Foldable, TypeConstructor};

/// A value that is either a failure (`Left`) or a success (`Right`).
///
/// Ordering compares the tag first (`Left < Right`), then the payload.
///
/// # Examples
///
/// ```rust
/// use taskwell::control::Either;
///
/// let success: Either<String, i32> = Either::Right(21);
/// assert_eq!(success.map_right(|x| x * 2), Either::Right(42));
///
/// let failure: Either<String, i32> = Either::Left("no tickets".to_string());
/// assert_eq!(failure.clone().map_right(|x| x * 2), failure);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Either<L, R> {
    /// The failure variant.
    Left(L),
    /// The success variant.
    Right(R),
}

impl<L, R> Either<L, R> {
    // =========================================================================
    // Type Checking
    // =========================================================================

    /// Returns `true` for `Left`.
    #[inline]
    pub const fn is_left(&self) -> bool {
        matches!(self, Self::Left(_))
    }

    /// Returns `true` for `Right`.
    #[inline]
    pub const fn is_right(&self) -> bool {
        matches!(self, Self::Right(_))
    }

    // =========================================================================
    // Value Extraction
    // =========================================================================

    /// Returns the left value, if any.
    #[inline]
    pub fn left(self) -> Option<L> {
        match self {
            Self::Left(value) => Some(value),
            Self::Right(_) => None,
        }
    }

    /// Returns the right value, if any.
    #[inline]
    pub fn right(self) -> Option<R> {
        match self {
            Self::Left(_) => None,
            Self::Right(value) => Some(value),
        }
    }

    /// Borrows both sides as an `Either` of references.
    #[inline]
    pub const fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Returns the left value.
    ///
    /// # Panics
    ///
    /// Panics on a `Right` value.
    #[inline]
    pub fn unwrap_left(self) -> L {
        match self {
            Self::Left(value) => value,
            Self::Right(_) => panic!("called `Either::unwrap_left()` on a `Right` value"),
        }
    }

    /// Returns the right value.
    ///
    /// # Panics
    ///
    /// Panics on a `Left` value.
    #[inline]
    pub fn unwrap_right(self) -> R {
        match self {
            Self::Left(_) => panic!("called `Either::unwrap_right()` on a `Left` value"),
            Self::Right(value) => value,
        }
    }

    // =========================================================================
    // Mapping Operations
    // =========================================================================

    /// Transforms the failure, leaving a success untouched.
    #[inline]
    pub fn map_left<T, F>(self, function: F) -> Either<T, R>
    where
        F: FnOnce(L) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(function(value)),
            Self::Right(value) => Either::Right(value),
        }
    }

    /// Transforms the success, leaving a failure untouched.
    #[inline]
    pub fn map_right<T, F>(self, function: F) -> Either<L, T>
    where
        F: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => Either::Right(function(value)),
        }
    }

    /// Transforms whichever side is present.
    ///
    /// ```rust
    /// use taskwell::control::Either;
    ///
    /// let failure: Either<&str, i32> = Either::Left("closed");
    /// assert_eq!(failure.bimap(str::len, |x| x + 1), Either::Left(6));
    /// ```
    #[inline]
    pub fn bimap<T, U, F, G>(self, left_function: F, right_function: G) -> Either<T, U>
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> U,
    {
        match self {
            Self::Left(value) => Either::Left(left_function(value)),
            Self::Right(value) => Either::Right(right_function(value)),
        }
    }

    /// Chains a computation on the success side; a failure short-circuits.
    ///
    /// ```rust
    /// use taskwell::control::Either;
    ///
    /// let halve = |x: i32| if x % 2 == 0 { Either::Right(x / 2) } else { Either::Left("odd") };
    /// assert_eq!(Either::Right(8).flat_map(halve), Either::Right(4));
    /// assert_eq!(Either::Right(3).flat_map(halve), Either::Left("odd"));
    /// ```
    #[inline]
    pub fn flat_map<T, F>(self, function: F) -> Either<L, T>
    where
        F: FnOnce(R) -> Either<L, T>,
    {
        match self {
            Self::Left(value) => Either::Left(value),
            Self::Right(value) => function(value),
        }
    }

    // =========================================================================
    // Fold Operation
    // =========================================================================

    /// Case analysis: applies `left_function` to a failure or
    /// `right_function` to a success.
    #[inline]
    pub fn fold<T, F, G>(self, left_function: F, right_function: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Self::Left(value) => left_function(value),
            Self::Right(value) => right_function(value),
        }
    }

    /// Exchanges the two sides.
    #[inline]
    pub fn swap(self) -> Either<R, L> {
        match self {
            Self::Left(value) => Either::Right(value),
            Self::Right(value) => Either::Left(value),
        }
    }
}

impl<L, R: Default> Either<L, R> {
    /// Returns the success, or `R::default()` for a failure.
    #[inline]
    pub fn right_or_default(self) -> R {
        match self {
            Self::Left(_) => R::default(),
            Self::Right(value) => value,
        }
    }
}

impl<L: fmt::Debug, R: fmt::Debug> fmt::Debug for Either<L, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left(value) => formatter.debug_tuple("Left").field(value).finish(),
            Self::Right(value) => formatter.debug_tuple("Right").field(value).finish(),
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    /// `Ok(r)` becomes `Right(r)`, `Err(l)` becomes `Left(l)`.
    #[inline]
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(value) => Self::Right(value),
            Err(error) => Self::Left(error),
        }
    }
}

impl<L, R> From<Either<L, R>> for Result<R, L> {
    /// `Right(r)` becomes `Ok(r)`, `Left(l)` becomes `Err(l)`.
    #[inline]
    fn from(either: Either<L, R>) -> Self {
        match either {
            Either::Left(value) => Err(value),
            Either::Right(value) => Ok(value),
        }
    }
}

impl<L, R> TypeConstructor for Either<L, R> {
    type Inner = R;
    type WithType<B> = Either<L, B>;
}

impl<L, R> Foldable for Either<L, R> {
    fn fold_left<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(B, R) -> B,
    {
        match self {
            Self::Left(_) => init,
            Self::Right(element) => function(init, element),
        }
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(R, B) -> B,
    {
        match self {
            Self::Left(_) => init,
            Self::Right(element) => function(element, init),
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_left()
    }

    #[inline]
    fn length(&self) -> usize {
        usize::from(self.is_right())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn left_is_failure_side() {
        let value: Either<&str, i32> = Either::Left("height invalid");
        assert!(value.is_left());
        assert_eq!(value.left(), Some("height invalid"));
        assert_eq!(value.right(), None);
    }

    #[rstest]
    fn map_right_skips_failure() {
        let value: Either<&str, i32> = Either::Left("closed");
        let mut called = false;
        let mapped = value.map_right(|x| {
            called = true;
            x + 1
        });
        assert_eq!(mapped, Either::Left("closed"));
        assert!(!called);
    }

    #[rstest]
    fn swap_exchanges_sides() {
        let value: Either<i32, &str> = Either::Left(3);
        assert_eq!(value.swap(), Either::Right(3));
    }

    #[rstest]
    #[case(Ok(42), Either::Right(42))]
    #[case(Err("boom"), Either::Left("boom"))]
    fn result_conversion_round_trips(
        #[case] result: Result<i32, &'static str>,
        #[case] expected: Either<&'static str, i32>,
    ) {
        let either: Either<&str, i32> = result.into();
        assert_eq!(either, expected);
        let back: Result<i32, &str> = either.into();
        assert_eq!(back, result);
    }

    #[rstest]
    fn ordering_puts_left_first() {
        let failure: Either<i32, i32> = Either::Left(100);
        let success: Either<i32, i32> = Either::Right(0);
        assert!(failure < success);
    }

    #[rstest]
    fn foldable_counts_only_success() {
        let failure: Either<&str, i32> = Either::Left("no");
        let success: Either<&str, i32> = Either::Right(5);
        assert_eq!(failure.length(), 0);
        assert_eq!(success.to_list(), vec![5]);
    }

    #[rstest]
    fn right_or_default_falls_back() {
        let failure: Either<&str, Vec<i32>> = Either::Left("no");
        assert_eq!(failure.right_or_default(), Vec::<i32>::new());
    }

    #[rstest]
    fn debug_names_variant() {
        let success: Either<&str, i32> = Either::Right(1);
        assert_eq!(format!("{success:?}"), "Right(1)");
    }
}
