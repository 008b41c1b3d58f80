// src/tests/guidrecord_tests.rs

//! tests for `guidrecord.rs`

#![allow(non_snake_case)]

use crate::data::guidrecord::{GuidAccumulator, GuidRecord};
use crate::tests::common::{GUID_A, GUID_B};

#[test]
fn test_GuidAccumulator_new() {
    let accumulator = GuidAccumulator::new();
    assert!(accumulator.is_empty());
    assert_eq!(accumulator.len(), 0);
    assert_eq!(accumulator.count_total(), 0);
    assert_eq!(accumulator.results().count(), 0);
}

#[test]
fn test_GuidAccumulator_record() {
    let mut accumulator = GuidAccumulator::new();
    accumulator.record(GUID_A, 5);
    accumulator.record(GUID_B, 50);
    accumulator.record(GUID_A, 100);

    assert_eq!(accumulator.len(), 2);
    assert_eq!(accumulator.count_total(), 3);
    let record_a: &GuidRecord = accumulator.get(&GUID_A).unwrap();
    assert_eq!(record_a.count, 2);
    assert_eq!(record_a.first_offset, 5, "first_offset must not change");
    let record_b: &GuidRecord = accumulator.get(&GUID_B).unwrap();
    assert_eq!(record_b.count, 1);
    assert_eq!(record_b.first_offset, 50);
    assert_eq!(accumulator.results().map(|record| record.count).sum::<u64>(), 3);
}

#[test]
fn test_GuidAccumulator_into_results() {
    let mut accumulator = GuidAccumulator::new();
    for offset in 0..10 {
        accumulator.record(GUID_B, offset);
    }
    accumulator.record(GUID_A, 10);
    let mut records = accumulator.into_results();
    records.sort_by_key(|record| record.id);

    assert_eq!(
        records,
        vec![
            GuidRecord {
                id: GUID_B,
                count: 10,
                first_offset: 0
            },
            GuidRecord {
                id: GUID_A,
                count: 1,
                first_offset: 10
            },
        ]
    );
}

#[test]
fn test_GuidRecord_debug() {
    let record = GuidRecord::new(GUID_A, 7);
    let text = format!("{:?}", record);
    assert!(text.contains("a864f394-c94e-4727-8eeb-89223e3096af"), "{}", text);
    assert!(text.contains("count: 1"), "{}", text);
}
