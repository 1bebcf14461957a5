// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Field names are camelCase on the wire. Dates are `YYYY-MM-DD` strings.

/// API request to replace the trainee's slot set and confirm it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// The requested training days.
    pub training_day_ids: Vec<i64>,
}

/// API request to add one training day to the trainee's booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSlotRequest {
    /// The training day to add.
    pub training_day_id: i64,
}

/// API request to confirm the trainee's draft booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    /// The booking to confirm.
    pub booking_id: i64,
}

/// Query parameters for the calendar read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalendarQuery {
    /// First date, inclusive.
    pub from: String,
    /// Last date, inclusive.
    pub to: String,
}

/// API response for a submission or confirmation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummaryResponse {
    /// The booking identifier.
    pub booking_id: i64,
    /// Hours credited by the held days.
    pub total_hours: u32,
    /// The booking status.
    pub status: String,
}

/// API response for a slot removal.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSlotResponse {
    /// Number of days still held.
    pub remaining: usize,
    /// The booking status after the removal.
    pub status: String,
}

/// A curriculum module.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleInfo {
    /// The module identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Position in the curriculum.
    pub order: u8,
    /// Hours credited per day.
    pub duration_hours: u32,
}

/// A day held by a booking.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotInfo {
    /// The training day identifier.
    pub training_day_id: i64,
    /// The date.
    pub date: String,
    /// The module taught that day.
    pub module: Option<ModuleInfo>,
}

/// A trainee's booking with its held days.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    /// The booking identifier.
    pub booking_id: i64,
    /// The booking status.
    pub status: String,
    /// Hours credited by the held days.
    pub total_hours: u32,
    /// Creation timestamp.
    pub created_at: String,
    /// Last modification timestamp.
    pub updated_at: String,
    /// Held days, ordered by date.
    pub slots: Vec<SlotInfo>,
}

/// API response for the trainee's booking read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MyBookingResponse {
    /// The active booking, or `null`.
    pub booking: Option<BookingResponse>,
}

/// One day of the calendar.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDayInfo {
    /// The training day identifier.
    pub id: i64,
    /// The date.
    pub date: String,
    /// Whether nothing is taught that day.
    pub is_gap_day: bool,
    /// Whether the day is open for booking.
    pub is_active: bool,
    /// Seats offered.
    pub capacity: u32,
    /// Seats held by confirmed bookings.
    pub confirmed_count: u32,
    /// Seats still free.
    pub remaining_seats: u32,
    /// Whether a trainee could book this day now.
    pub is_available: bool,
    /// The module taught, or `null` for gap days.
    pub module: Option<ModuleInfo>,
}

/// API response for the calendar read.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalendarResponse {
    /// Days in the range, ordered by date.
    pub days: Vec<CalendarDayInfo>,
}
