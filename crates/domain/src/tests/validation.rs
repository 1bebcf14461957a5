// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{full_week, gap_day, ids, teaching_day};
use crate::{
    DomainError, MAX_SELECTION_DAYS, TrainingDayId, validate_selection, validate_selection_size,
    validate_slot_addition,
};

#[test]
fn test_full_week_is_accepted() {
    let days = full_week();
    assert_eq!(validate_selection(&days, &ids(&days)), Ok(()));
}

#[test]
fn test_empty_selection_is_rejected() {
    let days = full_week();
    let result = validate_selection(&days, &[]);
    assert!(matches!(
        result,
        Err(DomainError::InvalidSelection {
            training_day_id: None,
            ..
        })
    ));
}

#[test]
fn test_unknown_day_is_rejected() {
    let days = full_week();
    let mut requested = ids(&days);
    requested.push(TrainingDayId::new(99));

    let result = validate_selection(&days, &requested);
    assert!(matches!(
        result,
        Err(DomainError::InvalidSelection {
            training_day_id: Some(id),
            ..
        }) if id == TrainingDayId::new(99)
    ));
}

#[test]
fn test_repeated_day_is_rejected() {
    let days = full_week();
    let mut requested = ids(&days);
    requested.push(TrainingDayId::new(1));

    assert!(matches!(
        validate_selection(&days, &requested),
        Err(DomainError::InvalidSelection { .. })
    ));
}

#[test]
fn test_inactive_day_is_rejected_before_hours() {
    let mut days = full_week();
    days[6].is_active = false;
    let requested = ids(&days[..3]);
    let mut with_inactive = requested;
    with_inactive.push(days[6].training_day_id);

    // Existence and activity are checked before the hour threshold.
    assert!(matches!(
        validate_selection(&days, &with_inactive),
        Err(DomainError::InvalidSelection { .. })
    ));
}

#[test]
fn test_six_of_seven_is_insufficient() {
    let days = full_week();
    let result = validate_selection(&days, &ids(&days[..6]));
    assert_eq!(
        result,
        Err(DomainError::InsufficientHours {
            total_hours: 6,
            required_hours: 7,
        })
    );
}

#[test]
fn test_duplicate_module_names_module_and_dates() {
    let mut days = full_week();
    // Second Assessment day, one cycle later.
    days.push(teaching_day(20, 2, 10));
    let first_date = days[1].date;
    let second_date = days[7].date;

    let result = validate_selection(&days, &ids(&days));
    assert_eq!(
        result,
        Err(DomainError::DuplicateModule {
            module: String::from("Assessment"),
            first_date,
            second_date,
        })
    );
}

#[test]
fn test_gap_day_is_rejected_after_other_checks() {
    let mut days = full_week();
    days.push(gap_day(8, 7));

    assert!(matches!(
        validate_selection(&days, &ids(&days)),
        Err(DomainError::InvalidSelection {
            training_day_id: Some(id),
            ..
        }) if id == TrainingDayId::new(8)
    ));
}

#[test]
fn test_gap_day_short_of_hours_reports_hours() {
    let mut days = full_week();
    days.truncate(6);
    days.push(gap_day(8, 7));

    // Hours are checked before gap days.
    assert!(matches!(
        validate_selection(&days, &ids(&days)),
        Err(DomainError::InsufficientHours { total_hours: 6, .. })
    ));
}

#[test]
fn test_slot_addition_accepts_new_module() {
    let held = vec![teaching_day(1, 1, 0)];
    assert_eq!(validate_slot_addition(&teaching_day(2, 2, 1), &held), Ok(()));
}

#[test]
fn test_slot_addition_rejects_held_module() {
    let held = vec![teaching_day(1, 1, 0)];
    let result = validate_slot_addition(&teaching_day(10, 1, 9), &held);
    assert!(matches!(
        result,
        Err(DomainError::ModuleAlreadySelected { ref module, .. }) if module == "Introduction to OSCE"
    ));
}

#[test]
fn test_slot_addition_rejects_gap_and_inactive_days() {
    assert!(matches!(
        validate_slot_addition(&gap_day(8, 7), &[]),
        Err(DomainError::InvalidTrainingDay { .. })
    ));

    let mut inactive = teaching_day(3, 3, 2);
    inactive.is_active = false;
    assert!(matches!(
        validate_slot_addition(&inactive, &[]),
        Err(DomainError::InvalidTrainingDay { .. })
    ));
}

#[test]
fn test_selection_size_is_bounded() {
    let largest: Vec<TrainingDayId> = (1..=64).map(TrainingDayId::new).collect();
    let too_many: Vec<TrainingDayId> = (1..=65).map(TrainingDayId::new).collect();

    assert_eq!(MAX_SELECTION_DAYS, 64);
    assert_eq!(validate_selection_size(&largest), Ok(()));
    assert!(matches!(
        validate_selection_size(&too_many),
        Err(DomainError::InvalidSelection {
            training_day_id: None,
            ..
        })
    ));
}

#[test]
fn test_oversized_selection_is_rejected_before_lookup() {
    let days = full_week();
    let mut requested = ids(&days);
    requested.extend((100..158).map(TrainingDayId::new));

    let err = validate_selection(&days, &requested).unwrap_err();

    assert_eq!(
        err.to_string(),
        "Invalid training day selection: 65 training days selected, at most 64 allowed"
    );
}
