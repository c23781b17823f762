// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Process-wide identifier allocation
//!
//! Each [`IdCategory`] owns one counter shared by every import in the
//! process, so identifiers never repeat within a run and a second parse of
//! the same text yields fresh identifiers.

use e2k_lite_model::{E2kError, EntityId, IdCategory, Result};
use std::sync::atomic::{AtomicU32, Ordering};

static COUNTERS: [AtomicU32; IdCategory::COUNT] = [const { AtomicU32::new(0) }; IdCategory::COUNT];

/// Handle to the process-wide identifier counters
#[derive(Clone, Copy, Debug, Default)]
pub struct IdAllocator;

impl IdAllocator {
    pub fn new() -> Self {
        IdAllocator
    }

    /// Allocate the next identifier of a category
    ///
    /// Fails once the category's 32-bit counter is exhausted.
    pub fn next(&self, category: IdCategory) -> Result<EntityId> {
        let counter = &COUNTERS[category.slot()];
        let previous = counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1))
            .map_err(|_| E2kError::IdSpaceExhausted(category))?;
        Ok(EntityId::new(category, previous + 1))
    }

    /// Number of identifiers handed out so far for a category
    pub fn allocated(&self, category: IdCategory) -> u32 {
        COUNTERS[category.slot()].load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_within_category() {
        let ids = IdAllocator::new();
        let a = ids.next(IdCategory::Grid).unwrap();
        let b = ids.next(IdCategory::Grid).unwrap();
        assert_ne!(a, b);
        assert!(b.index > a.index);
        assert_eq!(a.category, IdCategory::Grid);
    }

    #[test]
    fn test_ids_unique_across_threads() {
        use std::collections::HashSet;
        use std::thread;

        let handles: Vec<_> = (0..4)
            .map(|_| {
                thread::spawn(|| {
                    let ids = IdAllocator::new();
                    (0..100)
                        .map(|_| ids.next(IdCategory::Element).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "duplicate id {id}");
            }
        }
        assert_eq!(seen.len(), 400);
    }
}
