// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use slotbook_audit::Action;
use slotbook_domain::{Booking, BookingId, BookingStatus, DayOccupancy, TrainingDayId, UserId};

/// Everything a transition may look at, read under the write lock.
///
/// Occupancy counts exclude the trainee's own booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationSnapshot {
    /// The acting trainee.
    pub user_id: UserId,
    /// Loaded days relevant to the command. Identifiers that did not
    /// resolve to a stored day are simply absent.
    pub occupancy: Vec<DayOccupancy>,
    /// The trainee's active booking, with its held days.
    pub active_booking: Option<Booking>,
}

impl AllocationSnapshot {
    /// Creates a new snapshot.
    #[must_use]
    pub const fn new(
        user_id: UserId,
        occupancy: Vec<DayOccupancy>,
        active_booking: Option<Booking>,
    ) -> Self {
        Self {
            user_id,
            occupancy,
            active_booking,
        }
    }

    /// Looks up the loaded occupancy for a day.
    #[must_use]
    pub fn occupancy_for(&self, training_day_id: TrainingDayId) -> Option<&DayOccupancy> {
        self.occupancy
            .iter()
            .find(|o| o.training_day.training_day_id == training_day_id)
    }
}

/// Which booking row a transition writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingTarget {
    /// The trainee's existing active booking.
    Existing(BookingId),
    /// A booking that must be inserted.
    New,
}

/// The slot rows a transition writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotChange {
    /// Delete every held slot and insert these.
    Replace(Vec<TrainingDayId>),
    /// Insert one slot.
    Insert(TrainingDayId),
    /// Delete one slot.
    Delete(TrainingDayId),
    /// Leave slots as they are.
    Keep,
}

/// The result of a successful state transition.
///
/// Transitions are atomic: the store applies all of it or none of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The booking row to write.
    pub target: BookingTarget,
    /// Slot rows to write.
    pub slot_change: SlotChange,
    /// Status after the transition.
    pub status: BookingStatus,
    /// Hours credited after the transition.
    pub total_hours: u32,
    /// Slots held after the transition.
    pub remaining_slots: usize,
    /// The business action to record once committed.
    pub action: Action,
}

/// Outcome of applying a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Something must be written.
    Changed(TransitionResult),
    /// Nothing to write; reports the booking as it stands.
    Unchanged {
        /// The active booking, if any.
        booking_id: Option<BookingId>,
        /// Current status (`Draft` when there is no booking).
        status: BookingStatus,
        /// Current credited hours.
        total_hours: u32,
        /// Current slot count.
        remaining_slots: usize,
    },
}
