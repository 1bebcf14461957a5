// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::AllocationSnapshot;
use slotbook_domain::{
    Booking, BookingId, BookingStatus, DEFAULT_MODULES, DayOccupancy, Module, ModuleId,
    TrainingDay, TrainingDayId, UserId, total_hours,
};
use time::{Date, Duration, Month};

pub fn create_test_user() -> UserId {
    UserId::new("trainee-1")
}

pub fn create_test_day(id: i64, order: u8, capacity: u32) -> TrainingDay {
    let start: Date = Date::from_calendar_date(2026, Month::March, 2).unwrap();
    TrainingDay {
        training_day_id: TrainingDayId::new(id),
        date: start + Duration::days(id),
        module: Some(Module::new(
            ModuleId::new(i64::from(order)),
            DEFAULT_MODULES[usize::from(order) - 1].to_string(),
            order,
            1,
        )),
        is_gap_day: false,
        is_active: true,
        capacity,
    }
}

/// Seven days, one per module, ids 1..=7, each with `capacity` seats.
pub fn create_test_week(capacity: u32) -> Vec<TrainingDay> {
    (1..=7u8)
        .map(|order| create_test_day(i64::from(order), order, capacity))
        .collect()
}

pub fn ids(days: &[TrainingDay]) -> Vec<TrainingDayId> {
    days.iter().map(|d| d.training_day_id).collect()
}

pub fn occupancy(days: &[TrainingDay], confirmed_count: u32) -> Vec<DayOccupancy> {
    days.iter()
        .map(|d| DayOccupancy::new(d.clone(), confirmed_count))
        .collect()
}

pub fn create_test_booking(status: BookingStatus, slots: Vec<TrainingDay>) -> Booking {
    Booking {
        booking_id: BookingId::new(1),
        user_id: create_test_user(),
        status,
        total_hours: total_hours(&slots),
        created_at: String::from("2026-03-01T09:00:00Z"),
        updated_at: String::from("2026-03-01T09:00:00Z"),
        slots,
    }
}

pub fn snapshot(occupancy: Vec<DayOccupancy>, booking: Option<Booking>) -> AllocationSnapshot {
    AllocationSnapshot::new(create_test_user(), occupancy, booking)
}
