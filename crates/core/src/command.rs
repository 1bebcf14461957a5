// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook_domain::{BookingId, TrainingDayId};

/// A command represents trainee intent as data only.
///
/// Commands are the only way to request booking changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the trainee's slot set and confirm it in one step.
    Submit {
        /// The requested days, in the order the trainee listed them.
        training_day_ids: Vec<TrainingDayId>,
    },
    /// Add one day to the trainee's booking, creating a draft if needed.
    AddSlot {
        /// The day to add.
        training_day_id: TrainingDayId,
    },
    /// Remove one day from the trainee's booking.
    RemoveSlot {
        /// The day to remove.
        training_day_id: TrainingDayId,
    },
    /// Confirm the trainee's draft booking as it stands.
    Confirm {
        /// The booking to confirm. Must be the trainee's active booking.
        booking_id: BookingId,
    },
}

impl Command {
    /// The training days whose occupancy the command needs to see.
    ///
    /// `Confirm` works on the held days, which only the store knows, so it
    /// returns an empty list.
    #[must_use]
    pub fn requested_day_ids(&self) -> Vec<TrainingDayId> {
        match self {
            Self::Submit { training_day_ids } => training_day_ids.clone(),
            Self::AddSlot { training_day_id } => vec![*training_day_id],
            Self::RemoveSlot { .. } | Self::Confirm { .. } => Vec::new(),
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Submit { .. } => "submit",
            Self::AddSlot { .. } => "add_slot",
            Self::RemoveSlot { .. } => "remove_slot",
            Self::Confirm { .. } => "confirm",
        }
    }
}
