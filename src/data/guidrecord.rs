// src/data/guidrecord.rs

//! Implements [`GuidRecord`] and the per-scan [`GuidAccumulator`].
//!
//! [`GuidRecord`]: self::GuidRecord
//! [`GuidAccumulator`]: self::GuidAccumulator

use crate::common::{CharOffset, Count};
use crate::data::guid::GuidId;

use std::collections::hash_map::{Entry, Values};
use std::collections::HashMap;
use std::fmt;

#[allow(unused_imports)]
use ::si_trace_print::{defn, defo, defx, defñ};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GuidRecord
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One distinct GUID found in a file and how many times it was found.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct GuidRecord {
    /// The canonical 128-bit value.
    pub id: GuidId,
    /// Count of occurrences, always `1` or more.
    pub count: Count,
    /// Offset in decoded `char`s of the first character of the first
    /// occurrence.
    pub first_offset: CharOffset,
}

impl GuidRecord {
    pub const fn new(id: GuidId, first_offset: CharOffset) -> GuidRecord {
        GuidRecord {
            id,
            count: 1,
            first_offset,
        }
    }
}

impl fmt::Debug for GuidRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GuidRecord")
            .field("id", &format_args!("{}", self.id))
            .field("count", &self.count)
            .field("first_offset", &self.first_offset)
            .finish()
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// GuidAccumulator
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Map of each distinct GUID to its record.
pub type MapGuidRecord = HashMap<GuidId, GuidRecord>;

/// Per-file occurrence counts of GUIDs.
///
/// One `GuidAccumulator` exists per file scan. It is created when the scan
/// starts and consumed when the scan's results are returned. There is no
/// shared or static state between accumulators.
#[derive(Default)]
pub struct GuidAccumulator {
    records: MapGuidRecord,
    /// Total count of `record` calls.
    count_total: Count,
}

impl fmt::Debug for GuidAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("GuidAccumulator")
            .field("distinct", &self.records.len())
            .field("count_total", &self.count_total)
            .finish()
    }
}

impl GuidAccumulator {
    pub fn new() -> GuidAccumulator {
        GuidAccumulator::default()
    }

    /// Record one occurrence of `id` found at `offset`.
    ///
    /// An unseen `id` gets a new record with count `1`. A seen `id` has its
    /// count incremented; its `first_offset` is unchanged.
    pub fn record(&mut self, id: GuidId, offset: CharOffset) {
        self.count_total += 1;
        match self.records.entry(id) {
            Entry::Occupied(mut entry) => {
                entry.get_mut().count += 1;
                defñ!("{} count {}", id, entry.get().count);
            }
            Entry::Vacant(entry) => {
                defñ!("{} new at offset {}", id, offset);
                entry.insert(GuidRecord::new(id, offset));
            }
        }
    }

    /// All records, in no particular order.
    pub fn results(&self) -> Values<'_, GuidId, GuidRecord> {
        self.records.values()
    }

    /// Consume `self` and return all records, in no particular order.
    pub fn into_results(self) -> Vec<GuidRecord> {
        self.records.into_values().collect()
    }

    pub fn get(&self, id: &GuidId) -> Option<&GuidRecord> {
        self.records.get(id)
    }

    /// Count of distinct GUIDs.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Count of all occurrences of all GUIDs.
    pub const fn count_total(&self) -> Count {
        self.count_total
    }
}
