// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{AllocationSnapshot, BookingTarget, SlotChange, Transition, TransitionResult};
use slotbook_audit::Action;
use slotbook_domain::{
    Booking, BookingId, BookingStatus, DayOccupancy, DomainError, TrainingDay, TrainingDayId,
    check_capacity, check_slot_capacity, total_hours, validate_selection, validate_slot_addition,
};

/// Applies a command to a snapshot, producing the writes to perform.
///
/// This function is pure: it decides, the caller writes. The snapshot must
/// have been read inside the same write-locked transaction the result is
/// applied in.
///
/// # Errors
///
/// Returns an error if the command violates a domain rule. Nothing has been
/// written when this happens.
pub fn apply(snapshot: &AllocationSnapshot, command: Command) -> Result<Transition, CoreError> {
    match command {
        Command::Submit { training_day_ids } => submit(snapshot, &training_day_ids),
        Command::AddSlot { training_day_id } => add_slot(snapshot, training_day_id),
        Command::RemoveSlot { training_day_id } => Ok(remove_slot(snapshot, training_day_id)),
        Command::Confirm { booking_id } => confirm(snapshot, booking_id),
    }
}

fn target_of(booking: Option<&Booking>) -> BookingTarget {
    booking.map_or(BookingTarget::New, |b| BookingTarget::Existing(b.booking_id))
}

/// Loaded occupancy for the given ids, in the given order.
fn in_request_order(snapshot: &AllocationSnapshot, ids: &[TrainingDayId]) -> Vec<DayOccupancy> {
    ids.iter()
        .filter_map(|id| snapshot.occupancy_for(*id).cloned())
        .collect()
}

fn submit(
    snapshot: &AllocationSnapshot,
    training_day_ids: &[TrainingDayId],
) -> Result<Transition, CoreError> {
    let occupancy: Vec<DayOccupancy> = in_request_order(snapshot, training_day_ids);
    let days: Vec<TrainingDay> = occupancy.iter().map(|o| o.training_day.clone()).collect();

    validate_selection(&days, training_day_ids)?;
    check_capacity(&occupancy)?;

    Ok(Transition::Changed(TransitionResult {
        target: target_of(snapshot.active_booking.as_ref()),
        slot_change: SlotChange::Replace(training_day_ids.to_vec()),
        status: BookingStatus::Confirmed,
        total_hours: total_hours(&days),
        remaining_slots: training_day_ids.len(),
        action: Action::BookingConfirmed,
    }))
}

fn add_slot(
    snapshot: &AllocationSnapshot,
    training_day_id: TrainingDayId,
) -> Result<Transition, CoreError> {
    let Some(occupancy) = snapshot.occupancy_for(training_day_id) else {
        return Err(CoreError::DomainViolation(DomainError::InvalidTrainingDay {
            training_day_id,
            reason: String::from("unknown training day"),
        }));
    };

    let booking: Option<&Booking> = snapshot.active_booking.as_ref();
    let held: &[TrainingDay] = booking.map(|b| b.slots.as_slice()).unwrap_or_default();

    validate_slot_addition(&occupancy.training_day, held)?;
    check_slot_capacity(occupancy)?;

    // Adding never confirms; a confirmed booking stays confirmed.
    let status: BookingStatus = booking.map_or(BookingStatus::Draft, |b| b.status);
    let hours: u32 = total_hours(held) + occupancy.training_day.credited_hours();

    Ok(Transition::Changed(TransitionResult {
        target: target_of(booking),
        slot_change: SlotChange::Insert(training_day_id),
        status,
        total_hours: hours,
        remaining_slots: held.len() + 1,
        action: Action::SlotAdded,
    }))
}

fn remove_slot(snapshot: &AllocationSnapshot, training_day_id: TrainingDayId) -> Transition {
    let Some(booking) = snapshot.active_booking.as_ref() else {
        return Transition::Unchanged {
            booking_id: None,
            status: BookingStatus::Draft,
            total_hours: 0,
            remaining_slots: 0,
        };
    };

    if !booking.holds(training_day_id) {
        return Transition::Unchanged {
            booking_id: Some(booking.booking_id),
            status: booking.status,
            total_hours: total_hours(&booking.slots),
            remaining_slots: booking.slot_count(),
        };
    }

    let remaining: Vec<TrainingDay> = booking
        .slots
        .iter()
        .filter(|d| d.training_day_id != training_day_id)
        .cloned()
        .collect();
    let hours: u32 = total_hours(&remaining);

    Transition::Changed(TransitionResult {
        target: BookingTarget::Existing(booking.booking_id),
        slot_change: SlotChange::Delete(training_day_id),
        status: booking.status.after_removal(hours),
        total_hours: hours,
        remaining_slots: remaining.len(),
        action: Action::SlotRemoved,
    })
}

fn confirm(snapshot: &AllocationSnapshot, booking_id: BookingId) -> Result<Transition, CoreError> {
    let booking: &Booking = snapshot
        .active_booking
        .as_ref()
        .filter(|b| b.booking_id == booking_id && b.user_id == snapshot.user_id)
        .ok_or(DomainError::BookingNotFound { booking_id })?;

    if booking.status == BookingStatus::Confirmed {
        return Err(CoreError::DomainViolation(DomainError::AlreadyConfirmed));
    }

    let held_ids: Vec<TrainingDayId> = booking.held_day_ids();
    let occupancy: Vec<DayOccupancy> = in_request_order(snapshot, &held_ids);
    let days: Vec<TrainingDay> = occupancy.iter().map(|o| o.training_day.clone()).collect();

    validate_selection(&days, &held_ids)?;
    check_capacity(&occupancy)?;

    let hours: u32 = total_hours(&days);
    let status: BookingStatus = booking.status.confirm(hours)?;

    Ok(Transition::Changed(TransitionResult {
        target: BookingTarget::Existing(booking.booking_id),
        slot_change: SlotChange::Keep,
        status,
        total_hours: hours,
        remaining_slots: held_ids.len(),
        action: Action::BookingConfirmed,
    }))
}
