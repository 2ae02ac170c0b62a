//! Foldable type class - reducing a structure to a summary value.
//!
//! Every type here holds zero or more elements of its `Inner` type.
//! `fold_left` and `fold_right` are required; the remaining queries are
//! derived from them.
//!
//! For a success/failure structure only the success side is an element:
//! `Ok(5)` and `Either::Right(5)` hold one element, `Err(_)` and
//! `Either::Left(_)` hold none.
//!
//! # Examples
//!
//! ```rust
//! use taskwell::typeclass::Foldable;
//!
//! let heights = vec![150, 170, 190];
//! assert_eq!(heights.clone().fold_left(0, |total, height| total + height), 510);
//! assert!(heights.exists(|height| *height > 180));
//!
//! let missing: Option<i32> = None;
//! assert_eq!(missing.fold_left(7, |total, height| total + height), 7);
//! ```

use super::higher::TypeConstructor;
use super::identity::Identity;

/// A structure whose elements can be folded into a single value.
///
/// # Laws
///
/// `fa.fold_left(init, f) == fa.to_list().into_iter().fold(init, f)`
pub trait Foldable: TypeConstructor {
    /// Folds from the first element to the last.
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, Self::Inner) -> B;

    /// Folds from the last element to the first.
    ///
    /// ```rust
    /// use taskwell::typeclass::Foldable;
    ///
    /// let joined = vec![1, 2, 3].fold_right(String::new(), |element, accumulator| {
    ///     format!("{element}{accumulator}")
    /// });
    /// assert_eq!(joined, "123");
    /// ```
    fn fold_right<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(Self::Inner, B) -> B;

    /// Returns `true` when there are no elements.
    fn is_empty(&self) -> bool
    where
        Self: Clone,
    {
        self.clone().fold_left(true, |_, _| false)
    }

    /// Counts the elements.
    fn length(&self) -> usize
    where
        Self: Clone,
    {
        self.clone().fold_left(0, |count, _| count + 1)
    }

    /// Collects the elements in fold order.
    fn to_list(self) -> Vec<Self::Inner>
    where
        Self: Sized,
    {
        self.fold_left(Vec::new(), |mut accumulator, element| {
            accumulator.push(element);
            accumulator
        })
    }

    /// Returns the first element matching `predicate`.
    fn find<P>(self, mut predicate: P) -> Option<Self::Inner>
    where
        P: FnMut(&Self::Inner) -> bool,
        Self: Sized,
    {
        self.fold_left(None, |found, element| {
            if found.is_some() {
                found
            } else if predicate(&element) {
                Some(element)
            } else {
                None
            }
        })
    }

    /// Returns `true` if any element matches `predicate`.
    fn exists<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Inner) -> bool,
        Self: Clone,
    {
        self.clone().find(|element| predicate(element)).is_some()
    }

    /// Returns `true` if every element matches `predicate`; vacuously true
    /// when empty.
    fn for_all<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Inner) -> bool,
        Self: Clone,
    {
        !self.exists(|element| !predicate(element))
    }
}

impl<A> Foldable for Option<A> {
    fn fold_left<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(B, A) -> B,
    {
        match self {
            Some(element) => function(init, element),
            None => init,
        }
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(A, B) -> B,
    {
        match self {
            Some(element) => function(element, init),
            None => init,
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_none()
    }

    #[inline]
    fn length(&self) -> usize {
        usize::from(self.is_some())
    }
}

impl<T, E> Foldable for Result<T, E> {
    fn fold_left<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        match self {
            Ok(element) => function(init, element),
            Err(_) => init,
        }
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(T, B) -> B,
    {
        match self {
            Ok(element) => function(element, init),
            Err(_) => init,
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.is_err()
    }

    #[inline]
    fn length(&self) -> usize {
        usize::from(self.is_ok())
    }
}

impl<T> Foldable for Vec<T> {
    fn fold_left<B, F>(self, init: B, function: F) -> B
    where
        F: FnMut(B, T) -> B,
    {
        self.into_iter().fold(init, function)
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(T, B) -> B,
    {
        self.into_iter()
            .rev()
            .fold(init, |accumulator, element| function(element, accumulator))
    }

    #[inline]
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }

    #[inline]
    fn length(&self) -> usize {
        self.len()
    }

    #[inline]
    fn to_list(self) -> Self {
        self
    }
}

impl<A> Foldable for Identity<A> {
    fn fold_left<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(B, A) -> B,
    {
        function(init, self.0)
    }

    fn fold_right<B, F>(self, init: B, mut function: F) -> B
    where
        F: FnMut(A, B) -> B,
    {
        function(self.0, init)
    }

    #[inline]
    fn is_empty(&self) -> bool {
        false
    }

    #[inline]
    fn length(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(5), 15)]
    #[case(None, 10)]
    fn option_fold_left_adds_present_element(#[case] value: Option<i32>, #[case] expected: i32) {
        assert_eq!(value.fold_left(10, |total, element| total + element), expected);
    }

    #[rstest]
    fn option_length_counts_presence() {
        assert_eq!(Some(5).length(), 1);
        assert_eq!(None::<i32>.length(), 0);
    }

    #[rstest]
    fn result_error_side_is_not_an_element() {
        let failed: Result<i32, &str> = Err("too short");
        assert!(failed.is_empty());
        assert_eq!(failed.to_list(), Vec::<i32>::new());
    }

    #[rstest]
    fn result_ok_side_is_folded() {
        let passed: Result<i32, &str> = Ok(170);
        assert_eq!(passed.fold_right(0, |element, total| element + total), 170);
    }

    #[rstest]
    fn vec_fold_right_visits_last_first() {
        let visited = vec![1, 2, 3].fold_right(Vec::new(), |element, mut seen| {
            seen.push(element);
            seen
        });
        assert_eq!(visited, vec![3, 2, 1]);
    }

    #[rstest]
    fn vec_find_returns_first_match() {
        assert_eq!(vec![1, 4, 6].find(|element| element % 2 == 0), Some(4));
    }

    #[rstest]
    fn vec_for_all_on_empty_is_true() {
        let empty: Vec<i32> = Vec::new();
        assert!(empty.for_all(|element| *element > 100));
    }

    #[rstest]
    fn identity_always_has_one_element() {
        let wrapped = Identity(9);
        assert_eq!(wrapped.length(), 1);
        assert!(!wrapped.is_empty());
        assert_eq!(wrapped.to_list(), vec![9]);
    }
}
