// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook::CoreError;
use slotbook_audit::{Actor, ExecutionContext, RequestMeta};
use slotbook_domain::{DomainError, TrainingDayId, UserId};
use time::{Date, Duration, Month};

use crate::{AllocationOutcome, Persistence, PersistenceError};

/// Monday, January 5, 2026. The seeded cycle starts here, so offsets
/// 0..=6 teach modules 1..=7 and offsets 7 and 8 are gap days.
pub fn week_start() -> Date {
    Date::from_calendar_date(2026, Month::January, 5).expect("Valid test date")
}

pub fn offset(days: i64) -> Date {
    week_start() + Duration::days(days)
}

/// An in-memory store seeded with one month of the default curriculum.
pub fn seeded(capacity: u32) -> Persistence {
    let persistence: Persistence = Persistence::new_in_memory().expect("In-memory database");
    persistence
        .seed_curriculum(week_start(), 1, capacity)
        .expect("Seed curriculum");
    persistence
}

pub fn days_between(persistence: &Persistence, from: i64, to: i64) -> Vec<TrainingDayId> {
    persistence
        .get_calendar(offset(from), offset(to))
        .expect("Calendar read")
        .into_iter()
        .map(|d| d.training_day.training_day_id)
        .collect()
}

/// One day of each module, capacity as seeded.
pub fn first_week(persistence: &Persistence) -> Vec<TrainingDayId> {
    days_between(persistence, 0, 6)
}

/// The second day of each module.
pub fn second_week(persistence: &Persistence) -> Vec<TrainingDayId> {
    days_between(persistence, 9, 15)
}

pub fn gap_day(persistence: &Persistence) -> TrainingDayId {
    days_between(persistence, 7, 7)[0]
}

pub fn trainee(name: &str) -> UserId {
    UserId::new(name)
}

pub fn context(user_id: &UserId) -> ExecutionContext {
    ExecutionContext::new(RequestMeta::new("POST", "/booking"), Actor::trainee(user_id))
}

/// Unwraps a rule rejection, panicking on anything else.
pub fn rejection(result: Result<AllocationOutcome, PersistenceError>) -> DomainError {
    match result {
        Err(PersistenceError::Rejected(CoreError::DomainViolation(err))) => err,
        other => panic!("expected a rule rejection, got {other:?}"),
    }
}

pub fn event_names(context: &ExecutionContext) -> Vec<String> {
    context.events().iter().map(|e| e.name.clone()).collect()
}
