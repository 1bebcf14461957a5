// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook::CoreError;
use slotbook_domain::{BookingId, DomainError, TrainingDayId};
use slotbook_persistence::PersistenceError;
use time::{Date, Month};

use crate::{ApiError, translate_domain_error, translate_persistence_error};

fn date() -> Date {
    Date::from_calendar_date(2026, Month::January, 7).unwrap()
}

#[test]
fn test_day_full_names_the_date() {
    let err: ApiError = translate_domain_error(DomainError::DayFull {
        training_day_id: TrainingDayId::new(3),
        date: date(),
    });

    assert_eq!(err.kind(), "capacity");
    assert!(matches!(
        err,
        ApiError::CapacityExhausted {
            training_day_id: 3,
            ..
        }
    ));
    assert!(err.to_string().contains("2026-01-07"));
}

#[test]
fn test_validation_errors_are_rule_violations() {
    let cases: Vec<DomainError> = vec![
        DomainError::InsufficientHours {
            total_hours: 6,
            required_hours: 7,
        },
        DomainError::DuplicateModule {
            module: String::from("Airway Management"),
            first_date: date(),
            second_date: date(),
        },
        DomainError::AlreadyConfirmed,
        DomainError::InvalidTrainingDay {
            training_day_id: TrainingDayId::new(1),
            reason: String::from("gap day"),
        },
    ];

    for case in cases {
        assert_eq!(translate_domain_error(case).kind(), "validation");
    }
}

#[test]
fn test_booking_not_found_maps_to_not_found() {
    let err: ApiError = translate_domain_error(DomainError::BookingNotFound {
        booking_id: BookingId::new(9),
    });

    assert_eq!(err.kind(), "not_found");
}

#[test]
fn test_conflict_maps_to_busy() {
    let err: ApiError = translate_persistence_error(PersistenceError::Conflict { attempts: 5 });

    assert_eq!(err, ApiError::Busy { attempts: 5 });
    assert_eq!(err.kind(), "conflict");
    assert!(err.to_string().contains("try again"));
}

#[test]
fn test_rejection_unwraps_to_domain_message() {
    let err: ApiError = translate_persistence_error(PersistenceError::Rejected(
        CoreError::DomainViolation(DomainError::InsufficientHours {
            total_hours: 6,
            required_hours: 7,
        }),
    ));

    assert_eq!(
        err.to_string(),
        "Minimum required hours not met: selected 6 of 7"
    );
}

#[test]
fn test_database_failures_are_internal() {
    let err: ApiError =
        translate_persistence_error(PersistenceError::DatabaseError(String::from("disk I/O")));

    assert_eq!(err.kind(), "internal");
}
