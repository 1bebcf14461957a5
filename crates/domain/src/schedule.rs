// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Training calendar generation.
//!
//! The calendar repeats a cycle of one teaching day per module, in
//! curriculum order, followed by [`GAP_DAYS`] non-teaching days. The
//! cycle is anchored at the schedule start date.

use crate::error::DomainError;
use time::{Date, Duration, Month};

/// Non-teaching days closing each cycle.
pub const GAP_DAYS: u8 = 2;

/// Hours credited per day for the default curriculum.
pub const DEFAULT_MODULE_HOURS: u32 = 1;

/// Default curriculum, in teaching order.
pub const DEFAULT_MODULES: [&str; 7] = [
    "Introduction to OSCE",
    "Assessment",
    "Planning",
    "Implementation",
    "Evaluation",
    "Clinical Skills",
    "Professional Values & Review",
];

/// One generated calendar entry, not yet persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedDay {
    /// The calendar date.
    pub date: Date,
    /// Curriculum position of the module taught, `None` on gap days.
    pub module_order: Option<u8>,
    /// Seats offered.
    pub capacity: u32,
}

impl PlannedDay {
    /// Whether this entry is a non-teaching day.
    #[must_use]
    pub const fn is_gap_day(&self) -> bool {
        self.module_order.is_none()
    }
}

/// Generates one entry per date in `[start, end_exclusive)`.
///
/// # Errors
///
/// Returns `DomainError::InvalidSchedule` if `module_count` is zero or
/// does not fit a curriculum order, and `DateArithmeticOverflow` if the
/// range runs past the representable calendar.
pub fn generate_schedule(
    start: Date,
    end_exclusive: Date,
    module_count: usize,
    capacity: u32,
) -> Result<Vec<PlannedDay>, DomainError> {
    let modules: u8 = u8::try_from(module_count)
        .ok()
        .filter(|n| *n > 0 && *n <= u8::MAX - GAP_DAYS)
        .ok_or_else(|| {
            DomainError::InvalidSchedule(format!(
                "module count {module_count} is not a usable curriculum size"
            ))
        })?;
    let cycle_len: i64 = i64::from(modules) + i64::from(GAP_DAYS);

    let mut days: Vec<PlannedDay> = Vec::new();
    let mut current: Date = start;
    while current < end_exclusive {
        let offset: i64 = (current - start).whole_days();
        let position: i64 = offset.rem_euclid(cycle_len);
        let module_order: Option<u8> = if position < i64::from(modules) {
            // position < modules <= u8::MAX, the conversion cannot fail
            u8::try_from(position).ok().map(|p| p + 1)
        } else {
            None
        };
        days.push(PlannedDay {
            date: current,
            module_order,
            capacity,
        });
        current = current
            .checked_add(Duration::days(1))
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("advancing past {current}"),
            })?;
    }
    Ok(days)
}

/// Adds whole calendar months to a date, clamping to the month's last day.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the result is out of
/// range.
pub fn add_months(date: Date, months: u32) -> Result<Date, DomainError> {
    let overflow = || DomainError::DateArithmeticOverflow {
        operation: format!("adding {months} months to {date}"),
    };

    let zero_based: i64 = i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1;
    let target: i64 = zero_based + i64::from(months);
    let year: i32 = i32::try_from(target.div_euclid(12)).map_err(|_| overflow())?;
    let month_number: u8 = u8::try_from(target.rem_euclid(12) + 1).map_err(|_| overflow())?;
    let month: Month = Month::try_from(month_number).map_err(|_| overflow())?;

    let mut day: u8 = date.day();
    loop {
        if let Ok(result) = Date::from_calendar_date(year, month, day) {
            return Ok(result);
        }
        if day <= 28 {
            return Err(overflow());
        }
        day -= 1;
    }
}
