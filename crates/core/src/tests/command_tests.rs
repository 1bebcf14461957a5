// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Command;
use slotbook_domain::{BookingId, TrainingDayId};

#[test]
fn test_requested_day_ids_per_command() {
    let submit: Command = Command::Submit {
        training_day_ids: vec![TrainingDayId::new(3), TrainingDayId::new(1)],
    };
    assert_eq!(
        submit.requested_day_ids(),
        vec![TrainingDayId::new(3), TrainingDayId::new(1)]
    );

    let add: Command = Command::AddSlot {
        training_day_id: TrainingDayId::new(5),
    };
    assert_eq!(add.requested_day_ids(), vec![TrainingDayId::new(5)]);

    let confirm: Command = Command::Confirm {
        booking_id: BookingId::new(2),
    };
    assert!(confirm.requested_day_ids().is_empty());
}

#[test]
fn test_command_names() {
    let remove: Command = Command::RemoveSlot {
        training_day_id: TrainingDayId::new(1),
    };
    assert_eq!(remove.name(), "remove_slot");
}
