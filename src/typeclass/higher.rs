//! Higher-kinded type emulation through generic associated types.
//!
//! Rust cannot abstract over `Option<_>` or `Either<L, _>` as type
//! constructors directly. [`TypeConstructor`] records the type a constructor
//! is currently applied to (`Inner`) and how to re-apply it to another type
//! (`WithType<B>`), which is enough for [`Foldable`](super::Foldable) to name
//! its element type.
//!
//! # Example
//!
//! ```rust
//! use taskwell::typeclass::TypeConstructor;
//!
//! // A height check keeps the container but swaps the element for a verdict.
//! type Verdicts = <Vec<u32> as TypeConstructor>::WithType<bool>;
//!
//! let verdicts: Verdicts = vec![170, 140].into_iter().map(|h| h >= 150).collect();
//! assert_eq!(verdicts, vec![true, false]);
//! ```

/// A type constructor applied to some type.
///
/// # Laws
///
/// `<F as TypeConstructor>::WithType<F::Inner>` is `F` itself.
pub trait TypeConstructor {
    /// The type the constructor is currently applied to.
    type Inner;

    /// The same constructor applied to `B`.
    type WithType<B>: TypeConstructor<Inner = B>;
}

impl<A> TypeConstructor for Option<A> {
    type Inner = A;
    type WithType<B> = Option<B>;
}

impl<T, E> TypeConstructor for Result<T, E> {
    type Inner = T;
    type WithType<B> = Result<B, E>;
}

impl<T> TypeConstructor for Vec<T> {
    type Inner = T;
    type WithType<B> = Vec<B>;
}
