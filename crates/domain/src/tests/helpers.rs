// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DEFAULT_MODULES, Module, ModuleId, TrainingDay, TrainingDayId};
use time::{Date, Duration, Month};

pub fn base_date() -> Date {
    Date::from_calendar_date(2026, Month::March, 2).unwrap()
}

pub fn module(order: u8) -> Module {
    Module::new(
        ModuleId::new(i64::from(order)),
        DEFAULT_MODULES[usize::from(order) - 1].to_string(),
        order,
        1,
    )
}

/// A teaching day `offset` days after the base date.
pub fn teaching_day(id: i64, order: u8, offset: i64) -> TrainingDay {
    TrainingDay {
        training_day_id: TrainingDayId::new(id),
        date: base_date() + Duration::days(offset),
        module: Some(module(order)),
        is_gap_day: false,
        is_active: true,
        capacity: 10,
    }
}

pub fn gap_day(id: i64, offset: i64) -> TrainingDay {
    TrainingDay {
        training_day_id: TrainingDayId::new(id),
        date: base_date() + Duration::days(offset),
        module: None,
        is_gap_day: true,
        is_active: true,
        capacity: 10,
    }
}

/// Seven consecutive days, one per module, ids 1..=7.
pub fn full_week() -> Vec<TrainingDay> {
    (1..=7u8)
        .map(|order| teaching_day(i64::from(order), order, i64::from(order) - 1))
        .collect()
}

pub fn ids(days: &[TrainingDay]) -> Vec<TrainingDayId> {
    days.iter().map(|d| d.training_day_id).collect()
}
