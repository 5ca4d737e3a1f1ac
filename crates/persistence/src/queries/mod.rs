// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `vessel_calls`: the berth schedule
//! - `directory`: agencies and ships
//! - `users`: users and sessions

pub mod directory;
pub mod users;
pub mod vessel_calls;
