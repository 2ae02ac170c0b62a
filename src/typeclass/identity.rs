//! `Identity` - a wrapper that adds no effect at all.
//!
//! `Identity` is the trivial monad: `map` applies the function, `flat_map`
//! applies it and unwraps. It is handy as a baseline when comparing the
//! behaviour of effectful types such as
//! [`TaskEither`](crate::effect::TaskEither) against plain values.

use super::TypeConstructor;

/// Wraps a single value without adding any behaviour.
///
/// Equality and ordering are those of the wrapped value.
///
/// # Examples
///
/// ```rust
/// use taskwell::typeclass::Identity;
///
/// let wrapped = Identity::new(20).map(|x| x + 1).flat_map(|x| Identity(x * 2));
/// assert_eq!(wrapped.into_inner(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identity<A>(pub A);

impl<A> Identity<A> {
    /// Wraps `value`.
    #[inline]
    pub const fn new(value: A) -> Self {
        Self(value)
    }

    /// Consumes the wrapper and returns the value.
    #[inline]
    pub fn into_inner(self) -> A {
        self.0
    }

    /// Borrows the wrapped value.
    #[inline]
    pub const fn as_inner(&self) -> &A {
        &self.0
    }

    /// Applies `function` to the wrapped value.
    #[inline]
    pub fn map<B, F>(self, function: F) -> Identity<B>
    where
        F: FnOnce(A) -> B,
    {
        Identity(function(self.0))
    }

    /// Applies `function` and flattens the result.
    #[inline]
    pub fn flat_map<B, F>(self, function: F) -> Identity<B>
    where
        F: FnOnce(A) -> Identity<B>,
    {
        function(self.0)
    }
}

impl<A> TypeConstructor for Identity<A> {
    type Inner = A;
    type WithType<B> = Identity<B>;
}

impl<A> From<A> for Identity<A> {
    fn from(value: A) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn identity_into_inner_returns_value() {
        let wrapped = Identity::new(String::from("ride"));
        assert_eq!(wrapped.into_inner(), "ride");
    }

    #[rstest]
    fn identity_as_inner_borrows() {
        let wrapped = Identity::new(vec![1, 2, 3]);
        assert_eq!(wrapped.as_inner(), &vec![1, 2, 3]);
    }

    #[rstest]
    fn identity_map_applies_function() {
        assert_eq!(Identity(21).map(|x| x * 2), Identity(42));
    }

    #[rstest]
    fn identity_flat_map_left_identity() {
        let function = |x: i32| Identity(x + 1);
        assert_eq!(Identity(1).flat_map(function), function(1));
    }

    #[rstest]
    fn identity_ordering_follows_inner_value() {
        assert!(Identity(1) < Identity(2));
        assert_eq!(Identity(3).max(Identity(7)), Identity(7));
    }

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i32::MAX)]
    fn identity_from_preserves_value(#[case] value: i32) {
        let wrapped: Identity<i32> = value.into();
        assert_eq!(wrapped.into_inner(), value);
    }
}
