// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod timestamp;

use crate::{VesselCall, parse_day_month_time};
use time::PrimitiveDateTime;

pub const TEST_YEAR: i32 = 2026;

/// Parses `DD/MM HH:mm` in the test year.
pub fn at(text: &str) -> PrimitiveDateTime {
    parse_day_month_time(text, TEST_YEAR).unwrap()
}

pub fn create_test_call(id: i64, vessel: &str, eta: &str, operation_time: &str) -> VesselCall {
    VesselCall::with_id(
        id,
        String::from(vessel),
        180.0,
        String::from(operation_time),
        Some(at(eta)),
        None,
        String::from("General cargo"),
    )
}
