//! Diagnostic aggregation: dedup by code, then a fixed order.

use std::collections::HashSet;

use crate::domain::{Decision, Warning};

/// Merge warnings. Entries from `phase` win over same-code entries from
/// `existing`; inside one list the first occurrence wins. The result is
/// ordered by descending severity, then by code.
pub fn merge_warnings(existing: Vec<Warning>, phase: Vec<Warning>) -> Vec<Warning> {
    let mut merged = dedup_by(phase.into_iter().chain(existing), |w| w.code.clone());
    merged.sort_by(|a, b| {
        b.severity
            .rank()
            .cmp(&a.severity.rank())
            .then_with(|| a.code.cmp(&b.code))
    });
    merged
}

/// Merge decisions with the same precedence as [`merge_warnings`], ordered
/// by code.
pub fn merge_decisions(existing: Vec<Decision>, phase: Vec<Decision>) -> Vec<Decision> {
    let mut merged = dedup_by(phase.into_iter().chain(existing), |d| d.code.clone());
    merged.sort_by(|a, b| a.code.cmp(&b.code));
    merged
}

fn dedup_by<T>(items: impl Iterator<Item = T>, key: impl Fn(&T) -> String) -> Vec<T> {
    let mut seen = HashSet::new();
    items.filter(|item| seen.insert(key(item))).collect()
}
