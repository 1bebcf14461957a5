// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for booking operations and read views.
//!
//! Handlers are synchronous. They translate DTOs into domain values, call
//! the persistence layer, and translate the result back. Every failure of a
//! write operation is recorded on the execution context before it is
//! returned.

use slotbook_audit::ExecutionContext;
use slotbook_domain::{
    Booking, BookingId, DayOccupancy, Module, TrainingDay, TrainingDayId, UserId, format_date,
    parse_date,
};
use slotbook_persistence::{AllocationOutcome, Persistence, PersistenceError};
use time::Date;
use tracing::{debug, error};

use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{
    AddSlotRequest, BookingResponse, BookingSummaryResponse, CalendarDayInfo, CalendarQuery,
    CalendarResponse, ConfirmRequest, ModuleInfo, MyBookingResponse, RemoveSlotResponse, SlotInfo,
    SubmitRequest,
};

/// Records a failed operation on the context and translates it.
fn reject(context: &mut ExecutionContext, stage: &str, err: PersistenceError) -> ApiError {
    context.record_error(stage, &err);
    let api_error: ApiError = translate_persistence_error(err);
    if matches!(api_error, ApiError::Internal { .. }) {
        error!(stage, error = %api_error, "Operation failed");
    } else {
        debug!(stage, kind = api_error.kind(), error = %api_error, "Operation rejected");
    }
    api_error
}

fn committed_booking(outcome: AllocationOutcome, stage: &str) -> Result<Booking, ApiError> {
    outcome.booking.ok_or_else(|| ApiError::Internal {
        message: format!("{stage} committed without a booking"),
    })
}

fn module_info(module: &Module) -> ModuleInfo {
    ModuleInfo {
        id: module.module_id.value(),
        name: module.name.clone(),
        order: module.order,
        duration_hours: module.duration_hours,
    }
}

fn slot_info(day: &TrainingDay) -> SlotInfo {
    SlotInfo {
        training_day_id: day.training_day_id.value(),
        date: format_date(day.date),
        module: day.module.as_ref().map(module_info),
    }
}

fn booking_response(booking: &Booking) -> BookingResponse {
    BookingResponse {
        booking_id: booking.booking_id.value(),
        status: booking.status.as_str().to_string(),
        total_hours: booking.total_hours,
        created_at: booking.created_at.clone(),
        updated_at: booking.updated_at.clone(),
        slots: booking.slots.iter().map(slot_info).collect(),
    }
}

fn booking_summary(booking: &Booking) -> BookingSummaryResponse {
    BookingSummaryResponse {
        booking_id: booking.booking_id.value(),
        total_hours: booking.total_hours,
        status: booking.status.as_str().to_string(),
    }
}

fn calendar_day(occupancy: &DayOccupancy) -> CalendarDayInfo {
    let day: &TrainingDay = &occupancy.training_day;
    CalendarDayInfo {
        id: day.training_day_id.value(),
        date: format_date(day.date),
        is_gap_day: day.is_gap_day,
        is_active: day.is_active,
        capacity: day.capacity,
        confirmed_count: occupancy.confirmed_count,
        remaining_seats: occupancy.remaining_seats(),
        is_available: occupancy.is_available(),
        module: day.module.as_ref().map(module_info),
    }
}

fn parse_range_bound(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|e| match translate_domain_error(e) {
        ApiError::InvalidInput { message, .. } => ApiError::InvalidInput {
            field: field.to_string(),
            message,
        },
        other => other,
    })
}

/// Replaces the trainee's slot set and confirms it.
///
/// # Errors
///
/// Returns an error if a booking rule rejects the selection, a day is full,
/// or the store stays busy.
pub fn submit(
    persistence: &Persistence,
    context: &mut ExecutionContext,
    user_id: &UserId,
    request: &SubmitRequest,
) -> Result<BookingSummaryResponse, ApiError> {
    let training_day_ids: Vec<TrainingDayId> = request
        .training_day_ids
        .iter()
        .copied()
        .map(TrainingDayId::new)
        .collect();

    let outcome: AllocationOutcome = persistence
        .submit(context, user_id, training_day_ids)
        .map_err(|e| reject(context, "submit", e))?;
    let booking: Booking = committed_booking(outcome, "submit")?;
    Ok(booking_summary(&booking))
}

/// Adds one training day to the trainee's booking.
///
/// # Errors
///
/// Returns an error if the day cannot be added or the store stays busy.
pub fn add_slot(
    persistence: &Persistence,
    context: &mut ExecutionContext,
    user_id: &UserId,
    request: &AddSlotRequest,
) -> Result<BookingResponse, ApiError> {
    let outcome: AllocationOutcome = persistence
        .add_slot(context, user_id, TrainingDayId::new(request.training_day_id))
        .map_err(|e| reject(context, "add_slot", e))?;
    let booking: Booking = committed_booking(outcome, "add_slot")?;
    Ok(booking_response(&booking))
}

/// Removes one training day from the trainee's booking.
///
/// Removing a day that is not held succeeds without changes.
///
/// # Errors
///
/// Returns an error only if the store fails or stays busy.
pub fn remove_slot(
    persistence: &Persistence,
    context: &mut ExecutionContext,
    user_id: &UserId,
    training_day_id: i64,
) -> Result<RemoveSlotResponse, ApiError> {
    let outcome: AllocationOutcome = persistence
        .remove_slot(context, user_id, TrainingDayId::new(training_day_id))
        .map_err(|e| reject(context, "remove_slot", e))?;
    Ok(RemoveSlotResponse {
        remaining: outcome.remaining_slots(),
        status: outcome.status().as_str().to_string(),
    })
}

/// Confirms the trainee's draft booking.
///
/// # Errors
///
/// Returns an error if the booking is not the caller's, is already
/// confirmed, fails validation, holds a day that filled up, or the store
/// stays busy.
pub fn confirm(
    persistence: &Persistence,
    context: &mut ExecutionContext,
    user_id: &UserId,
    request: &ConfirmRequest,
) -> Result<BookingSummaryResponse, ApiError> {
    let outcome: AllocationOutcome = persistence
        .confirm_booking(context, user_id, BookingId::new(request.booking_id))
        .map_err(|e| reject(context, "confirm", e))?;
    let booking: Booking = committed_booking(outcome, "confirm")?;
    Ok(booking_summary(&booking))
}

/// Returns the trainee's active booking, if any.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub fn my_booking(persistence: &Persistence, user_id: &UserId) -> Result<MyBookingResponse, ApiError> {
    let booking: Option<Booking> = persistence
        .get_active_booking(user_id)
        .map_err(translate_persistence_error)?;
    Ok(MyBookingResponse {
        booking: booking.as_ref().map(booking_response),
    })
}

/// Returns the calendar for an inclusive date range.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if a date does not parse, the range is
/// inverted, or it is too long.
pub fn calendar(persistence: &Persistence, query: &CalendarQuery) -> Result<CalendarResponse, ApiError> {
    let from: Date = parse_range_bound("from", &query.from)?;
    let to: Date = parse_range_bound("to", &query.to)?;

    let days: Vec<DayOccupancy> = persistence
        .get_calendar(from, to)
        .map_err(translate_persistence_error)?;
    Ok(CalendarResponse {
        days: days.iter().map(calendar_day).collect(),
    })
}
