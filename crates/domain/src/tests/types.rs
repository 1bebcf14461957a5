// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{base_date, full_week, gap_day, teaching_day};
use crate::{
    Booking, BookingId, BookingStatus, DomainError, TrainingDayId, UserId, format_date,
    parse_date, total_hours,
};

#[test]
fn test_user_id_round_trips_raw_value() {
    let user: UserId = UserId::new("trainee-42");
    assert_eq!(user.value(), "trainee-42");
    assert_eq!(user.to_string(), "trainee-42");
}

#[test]
fn test_numeric_ids_serialize_transparently() {
    let id: TrainingDayId = TrainingDayId::new(17);
    assert_eq!(serde_json::to_string(&id).unwrap(), "17");
}

#[test]
fn test_parse_and_format_date() {
    let date = parse_date("2026-03-02").unwrap();
    assert_eq!(date, base_date());
    assert_eq!(format_date(date), "2026-03-02");
}

#[test]
fn test_parse_date_rejects_garbage() {
    let result = parse_date("02/03/2026");
    assert!(matches!(
        result,
        Err(DomainError::DateParseError { ref date_string, .. }) if date_string == "02/03/2026"
    ));
}

#[test]
fn test_gap_day_credits_no_hours() {
    let gap = gap_day(9, 7);
    assert_eq!(gap.credited_hours(), 0);
    assert_eq!(gap.module_id(), None);
}

#[test]
fn test_total_hours_sums_module_durations() {
    let mut days = full_week();
    days.push(gap_day(8, 7));
    assert_eq!(total_hours(&days), 7);
}

#[test]
fn test_booking_holds() {
    let booking = Booking {
        booking_id: BookingId::new(1),
        user_id: UserId::new("u1"),
        status: BookingStatus::Draft,
        total_hours: 1,
        created_at: String::from("2026-03-01T00:00:00Z"),
        updated_at: String::from("2026-03-01T00:00:00Z"),
        slots: vec![teaching_day(3, 3, 2)],
    };

    assert!(booking.holds(TrainingDayId::new(3)));
    assert!(!booking.holds(TrainingDayId::new(4)));
    assert_eq!(booking.held_day_ids(), vec![TrainingDayId::new(3)]);
    assert_eq!(booking.slot_count(), 1);
}
