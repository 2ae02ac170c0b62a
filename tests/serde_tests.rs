#![cfg(feature = "serde")]

//! Integration tests for serde support in taskwell.
//!
//! Forced outcomes and the values they carry must survive a JSON round
//! trip so they can be logged or sent elsewhere after forcing.

use rstest::rstest;
use taskwell::control::Either;
use taskwell::effect::{Executor, Fault, TaskEither};
use taskwell::typeclass::Identity;

// =============================================================================
// Either
// =============================================================================

#[rstest]
fn test_either_json_roundtrip() {
    let left: Either<String, i32> = Either::Left("error".to_string());
    let right: Either<String, i32> = Either::Right(42);

    let left_json = serde_json::to_string(&left).unwrap();
    let right_json = serde_json::to_string(&right).unwrap();

    assert_eq!(left_json, r#"{"Left":"error"}"#);
    assert_eq!(right_json, r#"{"Right":42}"#);

    let restored_left: Either<String, i32> = serde_json::from_str(&left_json).unwrap();
    let restored_right: Either<String, i32> = serde_json::from_str(&right_json).unwrap();

    assert_eq!(left, restored_left);
    assert_eq!(right, restored_right);
}

#[rstest]
fn test_forced_validation_outcome_serializes() {
    let validated = TaskEither::validate_one(140_u32, |height: &u32| {
        TaskEither::from_predicate((), |_| *height >= 150, || "height invalid".to_string())
    })
    .force(&Executor::inline());

    let json = serde_json::to_string(&validated).unwrap();
    assert_eq!(json, r#"{"Left":["height invalid"]}"#);
}

// =============================================================================
// Fault
// =============================================================================

#[rstest]
fn test_fault_json_roundtrip() {
    let caught = TaskEither::from_try(|| -> i32 { panic!("division by zero") })
        .force(&Executor::inline());

    let json = serde_json::to_string(&caught).unwrap();
    assert_eq!(json, r#"{"Left":{"message":"division by zero"}}"#);

    let restored: Either<Fault, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, caught);
}

// =============================================================================
// Identity
// =============================================================================

#[rstest]
fn test_identity_is_transparent() {
    let json = serde_json::to_string(&Identity(5)).unwrap();
    let restored: Identity<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, Identity(5));
}

// =============================================================================
// RuntimeConfig
// =============================================================================

#[cfg(feature = "runtime")]
#[rstest]
fn test_runtime_config_fills_missing_fields_with_defaults() {
    use taskwell::effect::runtime::{DEFAULT_THREAD_NAME, RuntimeConfig};

    let config: RuntimeConfig = serde_json::from_str(r#"{"worker_threads": 2}"#).unwrap();
    assert_eq!(config.worker_threads, 2);
    assert_eq!(config.thread_name, DEFAULT_THREAD_NAME);
    assert_eq!(config, RuntimeConfig::default().with_worker_threads(2));
}
