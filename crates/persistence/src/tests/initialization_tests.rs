// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use crate::Persistence;
use crate::tests::create_test_new_call;

#[test]
fn test_persistence_initialization() {
    let result = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.create_vessel_call(&create_test_new_call("ISOLDE", "01/01 08:00", "02:00"))
        .unwrap();

    assert_eq!(db1.list_vessel_calls().unwrap().len(), 1);
    assert!(
        db2.list_vessel_calls().unwrap().is_empty(),
        "db2 should not see db1's rows"
    );
}
