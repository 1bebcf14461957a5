// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use slotbook_audit::{Actor, ExecutionContext, RequestMeta};
use slotbook_domain::UserId;
use slotbook_persistence::Persistence;
use time::{Date, Month};

use crate::{CalendarQuery, calendar};

/// Monday, January 5, 2026. Offsets 0..=6 teach modules 1..=7.
pub fn create_test_start_date() -> Date {
    Date::from_calendar_date(2026, Month::January, 5).expect("Valid test date")
}

pub fn create_test_persistence(capacity: u32) -> Persistence {
    let persistence: Persistence = Persistence::new_in_memory().expect("In-memory database");
    persistence
        .seed_curriculum(create_test_start_date(), 1, capacity)
        .expect("Seed curriculum");
    persistence
}

pub fn query(from: &str, to: &str) -> CalendarQuery {
    CalendarQuery {
        from: from.to_string(),
        to: to.to_string(),
    }
}

/// Identifiers of the first seven teaching days.
pub fn first_week_ids(persistence: &Persistence) -> Vec<i64> {
    calendar(persistence, &query("2026-01-05", "2026-01-11"))
        .expect("Calendar read")
        .days
        .into_iter()
        .map(|d| d.id)
        .collect()
}

pub fn create_test_trainee(name: &str) -> UserId {
    UserId::new(name)
}

pub fn create_test_context(user_id: &UserId) -> ExecutionContext {
    ExecutionContext::new(
        RequestMeta::new("POST", "/booking/submit"),
        Actor::trainee(user_id),
    )
}
