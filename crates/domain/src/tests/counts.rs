// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::TenderCounts;

#[test]
fn test_normalized_floors_negative_fields_at_zero() {
    let counts: TenderCounts = TenderCounts::new(-5, 3, -1).normalized();
    assert_eq!(counts, TenderCounts::new(0, 3, 0));
}

#[test]
fn test_normalized_leaves_non_negative_fields_unchanged() {
    let counts: TenderCounts = TenderCounts::new(12, 9, 3);
    assert_eq!(counts.normalized(), counts);
}

#[test]
fn test_normalized_applies_no_upper_bound() {
    let counts: TenderCounts = TenderCounts::new(i64::MAX, i64::MAX, 0).normalized();
    assert_eq!(counts.total, i64::MAX);
    assert_eq!(counts.open, i64::MAX);
}

#[test]
fn test_consistency_is_reported_not_enforced() {
    assert!(TenderCounts::new(12, 9, 3).is_consistent());

    let inconsistent: TenderCounts = TenderCounts::new(10, 9, 3).normalized();
    assert!(!inconsistent.is_consistent());
    assert_eq!(inconsistent.total, 10);
}

#[test]
fn test_zero_is_default() {
    assert_eq!(TenderCounts::default(), TenderCounts::ZERO);
}
