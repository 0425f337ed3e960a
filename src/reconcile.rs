//! # Carrier String Reconciliation
//!
//! Identity-then-value merge of requested carrier-string records against the
//! persisted list. The output preserves the relative order of untouched and
//! updated records; new records are appended in request order. Results are
//! deterministic regardless of map or set iteration order elsewhere.

use crate::model::CarrierStringEntry;
use crate::request::CarrierStringInput;

/// Merge requested carrier-string records into the persisted list.
///
/// For each requested record, in request order:
/// 1. a matching persisted identity overwrites that record's value in place;
/// 2. otherwise a matching value leaves the persisted record unchanged;
/// 3. otherwise a new identity-less record is appended.
///
/// A final pass drops later records whose value duplicates an earlier one,
/// so the merged list never holds two records with the same resolved value.
pub fn reconcile_carrier_strings(
    existing: &[CarrierStringEntry],
    requested: &[CarrierStringInput],
) -> Vec<CarrierStringEntry> {
    let mut merged: Vec<CarrierStringEntry> = existing.to_vec();

    for record in requested {
        if let Some(id) = record.id {
            if let Some(entry) = merged
                .iter_mut()
                .find(|entry| entry.id == Some(id))
            {
                entry.value = record.value.clone();
                continue;
            }
        }
        if merged.iter().any(|entry| entry.value == record.value) {
            continue;
        }
        merged.push(CarrierStringEntry::new(record.value.clone()));
    }

    dedup_by_value(merged)
}

fn dedup_by_value(entries: Vec<CarrierStringEntry>) -> Vec<CarrierStringEntry> {
    let mut seen: Vec<String> = Vec::with_capacity(entries.len());
    let mut result = Vec::with_capacity(entries.len());
    for entry in entries {
        if seen.contains(&entry.value) {
            continue;
        }
        seen.push(entry.value.clone());
        result.push(entry);
    }
    result
}
