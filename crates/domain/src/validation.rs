// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{TrainingDay, TrainingDayId, total_hours};
use std::collections::{HashMap, HashSet};

/// Hours a booking must credit before it can be confirmed.
pub const REQUIRED_HOURS: u32 = 7;

/// Longest selection accepted for validation.
///
/// A passing selection holds one day per module, so longer requests can
/// never succeed. Shorter ones still get the precise rule violation.
pub const MAX_SELECTION_DAYS: usize = 64;

/// Checks that a requested selection is neither empty nor longer than
/// [`MAX_SELECTION_DAYS`].
///
/// Runs before any day is loaded, so oversized requests never reach the
/// store.
///
/// # Errors
///
/// Returns `InvalidSelection` if the request is empty or too long.
pub fn validate_selection_size(requested_ids: &[TrainingDayId]) -> Result<(), DomainError> {
    if requested_ids.is_empty() {
        return Err(DomainError::InvalidSelection {
            reason: String::from("no training days were selected"),
            training_day_id: None,
        });
    }
    if requested_ids.len() > MAX_SELECTION_DAYS {
        return Err(DomainError::InvalidSelection {
            reason: format!(
                "{} training days selected, at most {MAX_SELECTION_DAYS} allowed",
                requested_ids.len()
            ),
            training_day_id: None,
        });
    }
    Ok(())
}

/// Validates a proposed set of training days for a full submission.
///
/// `days` is the snapshot loaded for `requested_ids`; an identifier
/// without a matching loaded day is treated as unknown. Checks run in a
/// fixed order and the first failure is returned:
///
/// 1. the request is not empty nor longer than [`MAX_SELECTION_DAYS`], and
///    every identifier resolves to an active day and appears once
/// 2. the resolved days credit at least [`REQUIRED_HOURS`]
/// 3. no two resolved days teach the same module
/// 4. no resolved day is a gap day
///
/// # Errors
///
/// Returns `InvalidSelection`, `InsufficientHours` or `DuplicateModule`.
pub fn validate_selection(
    days: &[TrainingDay],
    requested_ids: &[TrainingDayId],
) -> Result<(), DomainError> {
    validate_selection_size(requested_ids)?;

    let by_id: HashMap<TrainingDayId, &TrainingDay> =
        days.iter().map(|d| (d.training_day_id, d)).collect();

    let mut seen: HashSet<TrainingDayId> = HashSet::with_capacity(requested_ids.len());
    let mut resolved: Vec<TrainingDay> = Vec::with_capacity(requested_ids.len());
    for id in requested_ids {
        if !seen.insert(*id) {
            return Err(DomainError::InvalidSelection {
                reason: String::from("training day selected more than once"),
                training_day_id: Some(*id),
            });
        }
        let Some(day) = by_id.get(id) else {
            return Err(DomainError::InvalidSelection {
                reason: String::from("unknown training day"),
                training_day_id: Some(*id),
            });
        };
        if !day.is_active {
            return Err(DomainError::InvalidSelection {
                reason: format!("training day on {} is not active", day.date),
                training_day_id: Some(*id),
            });
        }
        resolved.push((*day).clone());
    }

    let hours: u32 = total_hours(&resolved);
    if hours < REQUIRED_HOURS {
        return Err(DomainError::InsufficientHours {
            total_hours: hours,
            required_hours: REQUIRED_HOURS,
        });
    }

    let mut first_by_module: HashMap<_, &TrainingDay> = HashMap::new();
    for day in &resolved {
        let Some(module) = &day.module else {
            continue;
        };
        if let Some(first) = first_by_module.insert(module.module_id, day) {
            return Err(DomainError::DuplicateModule {
                module: module.name.clone(),
                first_date: first.date.min(day.date),
                second_date: first.date.max(day.date),
            });
        }
    }

    if let Some(gap) = resolved.iter().find(|d| d.is_gap_day || d.module.is_none()) {
        return Err(DomainError::InvalidSelection {
            reason: format!("{} is a gap day", gap.date),
            training_day_id: Some(gap.training_day_id),
        });
    }

    Ok(())
}

/// Validates adding a single training day to a set of held days.
///
/// # Errors
///
/// - `DomainError::InvalidTrainingDay` if the day is inactive, a gap day,
///   or has no module
/// - `DomainError::ModuleAlreadySelected` if a held day teaches the same
///   module
pub fn validate_slot_addition(day: &TrainingDay, held: &[TrainingDay]) -> Result<(), DomainError> {
    if !day.is_active {
        return Err(DomainError::InvalidTrainingDay {
            training_day_id: day.training_day_id,
            reason: format!("training day on {} is not active", day.date),
        });
    }
    let Some(module) = day.module.as_ref().filter(|_| !day.is_gap_day) else {
        return Err(DomainError::InvalidTrainingDay {
            training_day_id: day.training_day_id,
            reason: format!("{} is a gap day", day.date),
        });
    };

    if let Some(clash) = held
        .iter()
        .find(|h| h.module_id() == Some(module.module_id))
    {
        return Err(DomainError::ModuleAlreadySelected {
            module: module.name.clone(),
            held_date: clash.date,
        });
    }

    Ok(())
}
