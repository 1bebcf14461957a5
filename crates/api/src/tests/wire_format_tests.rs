// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::{Value, json};

use crate::{CalendarDayInfo, ModuleInfo, SubmitRequest};

#[test]
fn test_submit_request_uses_camel_case() {
    let request: SubmitRequest =
        serde_json::from_value(json!({ "trainingDayIds": [1, 2, 3] })).unwrap();

    assert_eq!(request.training_day_ids, vec![1, 2, 3]);
}

#[test]
fn test_calendar_day_wire_shape() {
    let day: CalendarDayInfo = CalendarDayInfo {
        id: 4,
        date: String::from("2026-01-08"),
        is_gap_day: false,
        is_active: true,
        capacity: 10,
        confirmed_count: 3,
        remaining_seats: 7,
        is_available: true,
        module: Some(ModuleInfo {
            id: 4,
            name: String::from("Implementation"),
            order: 4,
            duration_hours: 1,
        }),
    };

    let value: Value = serde_json::to_value(&day).unwrap();

    assert_eq!(value["isGapDay"], json!(false));
    assert_eq!(value["confirmedCount"], json!(3));
    assert_eq!(value["remainingSeats"], json!(7));
    assert_eq!(value["module"]["durationHours"], json!(1));
}
