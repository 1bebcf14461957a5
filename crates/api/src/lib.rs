// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for Slotbook.
//!
//! This crate defines the request and response contract, resolves the
//! trainee identity forwarded by the identity provider, and translates
//! every lower-layer error into an [`ApiError`]. It does not speak HTTP;
//! the server crate maps these results onto routes and status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod identity;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{add_slot, calendar, confirm, my_booking, remove_slot, submit};
pub use identity::{IdentityError, MAX_USER_ID_LENGTH, USER_ID_HEADER, resolve_trainee};
pub use request_response::{
    AddSlotRequest, BookingResponse, BookingSummaryResponse, CalendarDayInfo, CalendarQuery,
    CalendarResponse, ConfirmRequest, ModuleInfo, MyBookingResponse, RemoveSlotResponse, SlotInfo,
    SubmitRequest,
};
