// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

use slotbook_audit::ExecutionContext;

use super::helpers::{context, trainee};
use crate::retry::run_with_retry;
use crate::{PersistenceError, RetryPolicy};

const fn instant_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_delay: Duration::ZERO,
        multiplier: 2,
        max_delay: Duration::ZERO,
    }
}

#[test]
fn test_default_policy_values() {
    let policy: RetryPolicy = RetryPolicy::default();

    assert_eq!(policy.max_attempts, 5);
    assert_eq!(policy.initial_delay, Duration::from_millis(10));
    assert_eq!(policy.multiplier, 2);
    assert_eq!(policy.max_delay, Duration::from_millis(200));
}

#[test]
fn test_delay_grows_and_caps() {
    let policy: RetryPolicy = RetryPolicy::default();

    assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(10));
    assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(20));
    assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(40));
    assert_eq!(policy.delay_for_attempt(6), Duration::from_millis(200));
    assert_eq!(policy.delay_for_attempt(60), Duration::from_millis(200));
}

#[test]
fn test_busy_attempts_are_retried_until_success() {
    let mut ctx: ExecutionContext = context(&trainee("alice"));
    let mut calls: u32 = 0;

    let result: Result<u32, PersistenceError> =
        run_with_retry(&instant_policy(5), &mut ctx, "test", || {
            calls += 1;
            if calls < 3 {
                Err(PersistenceError::Busy(String::from("database is locked")))
            } else {
                Ok(calls)
            }
        });

    assert_eq!(result, Ok(3));
    assert_eq!(ctx.performance().attempts, 3);
}

#[test]
fn test_exhausted_retries_become_conflict() {
    let mut ctx: ExecutionContext = context(&trainee("alice"));

    let result: Result<(), PersistenceError> =
        run_with_retry(&instant_policy(3), &mut ctx, "test", || {
            Err(PersistenceError::Busy(String::from("database is locked")))
        });

    assert_eq!(result, Err(PersistenceError::Conflict { attempts: 3 }));
    assert_eq!(ctx.performance().attempts, 3);
}

#[test]
fn test_other_errors_are_not_retried() {
    let mut ctx: ExecutionContext = context(&trainee("alice"));
    let mut calls: u32 = 0;

    let result: Result<(), PersistenceError> =
        run_with_retry(&instant_policy(5), &mut ctx, "test", || {
            calls += 1;
            Err(PersistenceError::InvalidInput(String::from("bad")))
        });

    assert!(matches!(result, Err(PersistenceError::InvalidInput(_))));
    assert_eq!(calls, 1);
}

#[test]
fn test_no_retry_policy_makes_single_attempt() {
    let mut ctx: ExecutionContext = context(&trainee("alice"));

    let result: Result<(), PersistenceError> =
        run_with_retry(&RetryPolicy::no_retry(), &mut ctx, "test", || {
            Err(PersistenceError::Busy(String::from("database is busy")))
        });

    assert_eq!(result, Err(PersistenceError::Conflict { attempts: 1 }));
}
