// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Trainee identity resolution.
//!
//! Authentication happens upstream. The identity provider forwards the
//! authenticated trainee in a request header and this module only checks
//! that the value is usable as a key.

use slotbook_domain::UserId;
use thiserror::Error;

/// Header carrying the authenticated trainee.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Longest accepted trainee identifier.
pub const MAX_USER_ID_LENGTH: usize = 128;

/// Identity errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// No identity was forwarded.
    #[error("missing {USER_ID_HEADER} header")]
    Missing,

    /// The identity is empty or whitespace.
    #[error("{USER_ID_HEADER} header is empty")]
    Empty,

    /// The identity is longer than allowed.
    #[error("{USER_ID_HEADER} header exceeds {max_length} characters")]
    TooLong { max_length: usize },

    /// The identity contains control characters.
    #[error("{USER_ID_HEADER} header contains control characters")]
    ControlCharacter,
}

/// Resolves the trainee from the forwarded header value.
///
/// Surrounding whitespace is trimmed.
///
/// # Errors
///
/// Returns an `IdentityError` if the value is missing, empty, too long, or
/// contains control characters.
pub fn resolve_trainee(header: Option<&str>) -> Result<UserId, IdentityError> {
    let raw: &str = header.ok_or(IdentityError::Missing)?.trim();

    if raw.is_empty() {
        return Err(IdentityError::Empty);
    }
    if raw.chars().count() > MAX_USER_ID_LENGTH {
        return Err(IdentityError::TooLong {
            max_length: MAX_USER_ID_LENGTH,
        });
    }
    if raw.chars().any(char::is_control) {
        return Err(IdentityError::ControlCharacter);
    }

    Ok(UserId::new(raw))
}
