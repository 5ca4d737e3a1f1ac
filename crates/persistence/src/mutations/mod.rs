// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! Inserts read the assigned id back through `RETURNING`.
//!
//! - `vessel_calls`: schedule rows, including derived timestamp write-back
//! - `directory`: agencies and ships
//! - `users`: users and sessions

pub mod directory;
pub mod users;
pub mod vessel_calls;
