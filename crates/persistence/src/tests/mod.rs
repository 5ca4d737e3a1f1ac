// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod directory_tests;
mod initialization_tests;
mod user_tests;
mod vessel_call_tests;

use portcall::NewVesselCall;
use portcall_domain::{Agency, CargoKind, RecordStatus, parse_day_month_time};
use time::PrimitiveDateTime;

pub fn at(text: &str) -> PrimitiveDateTime {
    parse_day_month_time(text, 2026).expect("Valid test timestamp")
}

pub fn create_test_new_call(vessel: &str, eta: &str, operation_time: &str) -> NewVesselCall {
    NewVesselCall {
        vessel: String::from(vessel),
        loa: 199.9,
        operation_time: String::from(operation_time),
        eta: Some(at(eta)),
        cargo: String::from("Clinker"),
    }
}

pub fn create_test_agency(name: &str) -> Agency {
    Agency::new(
        String::from(name),
        CargoKind::RawMaterial,
        String::from("+52 229 000 0000"),
        format!("{}@agency.test", name.to_lowercase()),
        RecordStatus::Active,
    )
}
