// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook_domain::{DayOccupancy, Module, TrainingDay, TrainingDayId, UserId};

use super::helpers::{context, first_week, offset, seeded, trainee, week_start};
use crate::{MAX_CALENDAR_SPAN_DAYS, Persistence, PersistenceError, SeedSummary};

#[test]
fn test_seed_creates_curriculum_and_month_of_days() {
    let persistence: Persistence = Persistence::new_in_memory().unwrap();

    let summary: SeedSummary = persistence.seed_curriculum(week_start(), 1, 4).unwrap();

    // January 5 to February 5, exclusive.
    assert_eq!(summary.modules, 7);
    assert_eq!(summary.days_inserted, 31);
    assert_eq!(summary.days_skipped, 0);

    let modules: Vec<Module> = persistence.list_modules().unwrap();
    let orders: Vec<u8> = modules.iter().map(|m| m.order).collect();
    assert_eq!(orders, vec![1, 2, 3, 4, 5, 6, 7]);
    assert!(modules.iter().all(|m| m.duration_hours == 1));
}

#[test]
fn test_seed_is_idempotent() {
    let persistence: Persistence = seeded(4);

    let again: SeedSummary = persistence.seed_curriculum(week_start(), 1, 9).unwrap();

    assert_eq!(again.days_inserted, 0);
    assert_eq!(again.days_skipped, 31);
    assert_eq!(persistence.list_modules().unwrap().len(), 7);
    let day: DayOccupancy = persistence
        .get_calendar(offset(0), offset(0))
        .unwrap()
        .remove(0);
    assert_eq!(day.training_day.capacity, 4);
}

#[test]
fn test_calendar_lists_days_in_order_with_gap_days() {
    let persistence: Persistence = seeded(4);

    let calendar: Vec<DayOccupancy> = persistence.get_calendar(offset(0), offset(9)).unwrap();

    assert_eq!(calendar.len(), 10);
    assert!(calendar.windows(2).all(|w| w[0].training_day.date < w[1].training_day.date));
    for (i, day) in calendar.iter().enumerate() {
        let is_gap: bool = i == 7 || i == 8;
        assert_eq!(day.training_day.is_gap_day, is_gap, "day {i}");
        assert_eq!(day.training_day.module.is_none(), is_gap, "day {i}");
    }
    assert_eq!(
        calendar[9].training_day.module.as_ref().map(|m| m.order),
        Some(1)
    );
}

#[test]
fn test_calendar_reports_confirmed_occupancy() {
    let persistence: Persistence = seeded(2);
    let alice: UserId = trainee("alice");
    persistence
        .submit(&mut context(&alice), &alice, first_week(&persistence))
        .unwrap();

    let calendar: Vec<DayOccupancy> = persistence.get_calendar(offset(0), offset(7)).unwrap();

    for day in &calendar[..7] {
        assert_eq!(day.confirmed_count, 1);
        assert_eq!(day.remaining_seats(), 1);
        assert!(day.is_available());
    }
    assert_eq!(calendar[7].confirmed_count, 0);
}

#[test]
fn test_calendar_rejects_inverted_range() {
    let persistence: Persistence = seeded(2);

    let result = persistence.get_calendar(offset(5), offset(0));

    assert!(matches!(result, Err(PersistenceError::InvalidInput(_))));
}

#[test]
fn test_calendar_rejects_overlong_range() {
    let persistence: Persistence = seeded(2);

    assert!(
        persistence
            .get_calendar(offset(0), offset(MAX_CALENDAR_SPAN_DAYS))
            .is_ok()
    );
    assert!(matches!(
        persistence.get_calendar(offset(0), offset(MAX_CALENDAR_SPAN_DAYS + 1)),
        Err(PersistenceError::InvalidInput(_))
    ));
}

#[test]
fn test_update_training_day_edits_capacity_and_active_flag() {
    let persistence: Persistence = seeded(2);
    let day_id: TrainingDayId = first_week(&persistence)[0];

    let updated: TrainingDay = persistence
        .update_training_day(day_id, Some(5), Some(false))
        .unwrap();

    assert_eq!(updated.capacity, 5);
    assert!(!updated.is_active);

    let unchanged: TrainingDay = persistence.update_training_day(day_id, None, None).unwrap();
    assert_eq!(unchanged, updated);
}

#[test]
fn test_update_unknown_training_day_is_not_found() {
    let persistence: Persistence = seeded(2);

    let result = persistence.update_training_day(TrainingDayId::new(77_777), Some(1), None);

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_capacity_may_drop_below_occupancy() {
    let persistence: Persistence = seeded(2);
    let alice: UserId = trainee("alice");
    let bob: UserId = trainee("bob");
    let week: Vec<TrainingDayId> = first_week(&persistence);
    persistence.submit(&mut context(&alice), &alice, week.clone()).unwrap();
    persistence.submit(&mut context(&bob), &bob, week.clone()).unwrap();

    persistence.update_training_day(week[0], Some(1), None).unwrap();

    let day: DayOccupancy = persistence
        .get_calendar(offset(0), offset(0))
        .unwrap()
        .remove(0);
    assert_eq!(day.confirmed_count, 2);
    assert_eq!(day.remaining_seats(), 0);
    assert!(persistence.get_active_booking(&bob).unwrap().is_some());
}
