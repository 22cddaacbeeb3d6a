//! Alphabetical ordering of block entries.
//!
//! Only *eligible* entries move. Everything else (ignored declarations,
//! variables unless `sort_variables` is on, comments, nested rules and
//! at-rules) stays at its index, and the eligible entries are stably sorted
//! into the slots between them. Names compare by code point, so `!345test`
//! sorts before `123test`, which sorts before `Z`, which sorts before `a`.

use std::cmp::Ordering;

use super::{Classification, Entry};
use crate::config::AlphabetizeConfig;

/// Whether an entry takes part in sorting.
pub(crate) fn is_eligible(entry: &Entry, config: &AlphabetizeConfig) -> bool {
    if entry.node.prop().is_none() {
        return false;
    }

    match entry.class {
        Classification::Sortable => true,
        Classification::Variable => config.sort_variables,
        Classification::Ignored => false,
    }
}

/// Ordinal comparison of two property names.
pub fn compare_props(a: &str, b: &str) -> Ordering {
    a.cmp(b)
}

/// Reorder `entries`, moving eligible entries only.
///
/// The sort is stable: entries with equal names keep their relative order.
pub(crate) fn sort_entries(entries: Vec<Entry>, config: &AlphabetizeConfig) -> Vec<Entry> {
    let mut slots = Vec::with_capacity(entries.len());
    let mut movable = vec![];

    for entry in entries {
        if is_eligible(&entry, config) {
            slots.push(None);
            movable.push(entry);
        } else {
            slots.push(Some(entry));
        }
    }

    movable.sort_by(|a, b| compare_props(a.node.prop().unwrap_or(""), b.node.prop().unwrap_or("")));

    let mut movable = movable.into_iter();
    slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| movable.next()))
        .collect()
}
