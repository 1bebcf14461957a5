// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side queries.
//!
//! Every function takes a plain connection; callers decide whether the
//! read happens inside the write-locked allocation transaction.

pub mod bookings;
pub mod ledger;
pub mod schedule;
