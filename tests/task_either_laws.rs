#![cfg(feature = "effect")]
//! Property-based tests for `TaskEither` laws.
//!
//! Two recipes are equal when forcing them yields the same `Either`.
//! Laws are checked on the inline executor so every run is deterministic.

use proptest::prelude::*;
use taskwell::control::Either;
use taskwell::effect::{Executor, TaskEither};

fn force<V: Send + 'static>(computation: TaskEither<String, V>) -> Either<String, V> {
    computation.force(&Executor::inline())
}

fn outcome() -> impl Strategy<Value = Either<String, i32>> {
    prop_oneof![
        any::<i32>().prop_map(Either::<String, i32>::Right),
        "[a-z]{1,8}".prop_map(Either::<String, i32>::Left),
    ]
}

fn halve(n: i32) -> TaskEither<String, i32> {
    TaskEither::from_predicate(n, |n| n % 2 == 0, || format!("{n} is odd")).map(|n| n / 2)
}

fn bump(n: i32) -> TaskEither<String, i32> {
    TaskEither::succeed(n.wrapping_add(1))
}

// =============================================================================
// Monad Laws
// =============================================================================

proptest! {
    /// Left Identity Law: succeed(a).chain(f) == f(a)
    #[test]
    fn prop_left_identity(value: i32) {
        prop_assert_eq!(force(TaskEither::succeed(value).chain(halve)), force(halve(value)));
    }

    /// Right Identity Law: m.chain(succeed) == m
    #[test]
    fn prop_right_identity(either in outcome()) {
        let chained = TaskEither::from_either(either.clone()).chain(TaskEither::succeed);
        prop_assert_eq!(force(chained), either);
    }

    /// Associativity Law: m.chain(f).chain(g) == m.chain(|x| f(x).chain(g))
    #[test]
    fn prop_associativity(either in outcome()) {
        let left = TaskEither::from_either(either.clone()).chain(halve).chain(bump);
        let right = TaskEither::from_either(either).chain(|x| halve(x).chain(bump));
        prop_assert_eq!(force(left), force(right));
    }

    /// A failure absorbs every later chain step.
    #[test]
    fn prop_failure_absorbs_chain(error in "[a-z]{1,8}") {
        let chained = TaskEither::<String, i32>::fail(error.clone()).chain(halve);
        prop_assert_eq!(force(chained), Either::Left(error));
    }
}

// =============================================================================
// Functor Laws
// =============================================================================

proptest! {
    /// Functor Identity Law: map(id) == id
    #[test]
    fn prop_functor_identity(either in outcome()) {
        let mapped = TaskEither::from_either(either.clone()).map(|x| x);
        prop_assert_eq!(force(mapped), either);
    }

    /// Functor Composition Law: map(g . f) == map(f).map(g)
    #[test]
    fn prop_functor_composition(either in outcome()) {
        let f = |x: i32| x.wrapping_mul(3);
        let g = |x: i32| x.wrapping_sub(7);

        let composed = TaskEither::from_either(either.clone()).map(move |x| g(f(x)));
        let sequential = TaskEither::from_either(either).map(f).map(g);
        prop_assert_eq!(force(composed), force(sequential));
    }

    /// map(f) == chain(succeed . f)
    #[test]
    fn prop_map_agrees_with_chain(either in outcome()) {
        let f = |x: i32| x.wrapping_add(11);

        let mapped = TaskEither::from_either(either.clone()).map(f);
        let chained = TaskEither::from_either(either).chain(move |x| TaskEither::succeed(f(x)));
        prop_assert_eq!(force(mapped), force(chained));
    }
}

// =============================================================================
// Applicative Laws
// =============================================================================

proptest! {
    /// Identity: succeed(id).apply(v) == v
    #[test]
    fn prop_applicative_identity(either in outcome()) {
        let applied = TaskEither::succeed(|x: i32| x).apply(TaskEither::from_either(either.clone()));
        prop_assert_eq!(force(applied), either);
    }

    /// Homomorphism: succeed(f).apply(succeed(x)) == succeed(f(x))
    #[test]
    fn prop_applicative_homomorphism(value: i32) {
        let f = |x: i32| x.wrapping_mul(5);
        let applied = TaskEither::<String, _>::succeed(f).apply(TaskEither::succeed(value));
        prop_assert_eq!(force(applied), Either::Right(f(value)));
    }

    /// When both sides fail, the function side's failure is reported.
    #[test]
    fn prop_apply_prefers_function_failure(
        function_error in "[a-z]{1,8}",
        value_error in "[A-Z]{1,8}",
    ) {
        let function = TaskEither::<String, fn(i32) -> i32>::fail(function_error.clone());
        let applied = function.apply(TaskEither::fail(value_error));
        prop_assert_eq!(force(applied), Either::Left(function_error));
    }
}

// =============================================================================
// Sequencing Laws
// =============================================================================

proptest! {
    /// sequence of successes collects every value in order.
    #[test]
    fn prop_sequence_of_successes(values in prop::collection::vec(any::<i32>(), 0..16)) {
        let all = TaskEither::sequence(values.iter().copied().map(TaskEither::succeed));
        prop_assert_eq!(force(all), Either::Right(values));
    }

    /// sequence reports the first failure; sequence_accumulating reports all.
    #[test]
    fn prop_sequence_variants_agree_on_failures(
        outcomes in prop::collection::vec(outcome(), 0..16),
    ) {
        let failures: Vec<String> = outcomes.iter().filter_map(|o| o.clone().left()).collect();
        let successes: Vec<i32> = outcomes.iter().filter_map(|o| o.clone().right()).collect();

        let short = TaskEither::sequence(outcomes.iter().cloned().map(TaskEither::from_either));
        let accumulated = TaskEither::sequence_accumulating(
            outcomes.into_iter().map(TaskEither::<String, i32>::from_either),
        )
        .force(&Executor::inline());

        match failures.first() {
            None => {
                prop_assert_eq!(force(short), Either::Right(successes.clone()));
                prop_assert_eq!(accumulated, Either::Right(successes));
            }
            Some(first) => {
                prop_assert_eq!(force(short), Either::Left(first.clone()));
                prop_assert_eq!(accumulated, Either::Left(failures));
            }
        }
    }
}
