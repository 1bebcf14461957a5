// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side operations.
//!
//! None of these open a transaction; they are composed inside the
//! caller's write-locked transaction.

pub mod bookings;
pub mod schedule;
