// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use slotbook::CoreError;
use slotbook_domain::DomainError;
use slotbook_persistence::PersistenceError;

use crate::identity::IdentityError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The caller's identity could not be established.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// A booking rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested day has no seat left. The caller may choose other days.
    CapacityExhausted {
        /// The full training day.
        training_day_id: i64,
        /// A human-readable description naming the date.
        message: String,
    },
    /// The booking store stayed busy through every retry.
    Busy {
        /// Attempts made before giving up.
        attempts: u32,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Stable error kind reported to clients.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "unauthorized",
            Self::DomainRuleViolation { .. } => "validation",
            Self::CapacityExhausted { .. } => "capacity",
            Self::Busy { .. } => "conflict",
            Self::InvalidInput { .. } => "invalid_input",
            Self::ResourceNotFound { .. } => "not_found",
            Self::Internal { .. } => "internal",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::DomainRuleViolation { message, .. } | Self::CapacityExhausted { message, .. } => {
                write!(f, "{message}")
            }
            Self::Busy { attempts } => {
                write!(
                    f,
                    "Booking is busy, try again (gave up after {attempts} attempts)"
                )
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        Self::AuthenticationFailed {
            reason: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidSelection { .. } => ApiError::DomainRuleViolation {
            rule: String::from("valid_selection"),
            message,
        },
        DomainError::InsufficientHours { .. } => ApiError::DomainRuleViolation {
            rule: String::from("minimum_hours"),
            message,
        },
        DomainError::DuplicateModule { .. } => ApiError::DomainRuleViolation {
            rule: String::from("unique_module"),
            message,
        },
        DomainError::ModuleAlreadySelected { .. } => ApiError::DomainRuleViolation {
            rule: String::from("module_already_selected"),
            message,
        },
        DomainError::InvalidTrainingDay { .. } => ApiError::DomainRuleViolation {
            rule: String::from("bookable_day"),
            message,
        },
        DomainError::AlreadyConfirmed => ApiError::DomainRuleViolation {
            rule: String::from("already_confirmed"),
            message,
        },
        DomainError::DayFull {
            training_day_id, ..
        }
        | DomainError::CapacityFull {
            training_day_id, ..
        } => ApiError::CapacityExhausted {
            training_day_id: training_day_id.value(),
            message,
        },
        DomainError::BookingNotFound { .. } => ApiError::ResourceNotFound {
            resource_type: String::from("Booking"),
            message,
        },
        DomainError::DateParseError { .. } | DomainError::DateArithmeticOverflow { .. } => {
            ApiError::InvalidInput {
                field: String::from("date"),
                message,
            }
        }
        DomainError::InvalidSchedule(_) => ApiError::InvalidInput {
            field: String::from("schedule"),
            message,
        },
        DomainError::InvalidBookingStatus { .. } => ApiError::Internal { message },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Database details are kept out of client messages.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::Rejected(core_err) => translate_core_error(core_err),
        PersistenceError::Conflict { attempts } => ApiError::Busy { attempts },
        PersistenceError::InvalidInput(message) => ApiError::InvalidInput {
            field: String::from("range"),
            message,
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        other => ApiError::Internal {
            message: format!("booking store failure: {other}"),
        },
    }
}
