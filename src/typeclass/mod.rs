//! Type class traits and foundation types.
//!
//! - [`TypeConstructor`]: higher-kinded type emulation via GATs
//! - [`Foldable`]: folding structures into summary values
//! - [`Identity`]: the effect-free wrapper
//!
//! Equality and ordering are the standard `PartialEq`/`Eq`/`PartialOrd`/`Ord`
//! traits, derived on every data type in this crate.
//!
//! # Examples
//!
//! ```rust
//! use taskwell::typeclass::{Foldable, Identity};
//!
//! assert_eq!(Identity(3).to_list(), vec![3]);
//! assert_eq!(Some(4).fold_left(1, |total, element| total * element), 4);
//! ```

mod foldable;
mod higher;
mod identity;

pub use foldable::Foldable;
pub use higher::TypeConstructor;
pub use identity::Identity;
