//! Process-wide memoization cache for solved subproblems.
//!
//! Keyed by a SHA-256 fingerprint of `(min_length, max_length, demand)`, so
//! identical subproblems encountered via different recursion paths (or
//! different windows across separate jobs) are only solved once.

use dashmap::DashMap;
use sha2::{Digest, Sha256};
use shiftsplit_core::{Shift, ShiftsplitError};

/// Fixed-size fingerprint identifying a subproblem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey([u8; 32]);

impl CacheKey {
    /// Fingerprint a subproblem from its processed demand vector and bounds.
    ///
    /// Field order is fixed (`min_length`, `max_length`, then demand values
    /// in sequence) so the same subproblem always hashes identically.
    pub fn fingerprint(demand: &[u32], min_length: u32, max_length: u32) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(min_length.to_le_bytes());
        hasher.update(max_length.to_le_bytes());
        for value in demand {
            hasher.update(value.to_le_bytes());
        }
        let digest = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&digest);
        Self(bytes)
    }
}

/// A process-shared, thread-safe associative store of solved subproblems.
///
/// An injected dependency, not a global singleton: construct one per
/// process (or one per test) and pass it by reference into `Decompose` and
/// `Splitter`.
#[derive(Debug, Default)]
pub struct Cache {
    entries: DashMap<CacheKey, Vec<Shift>>,
}

impl Cache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Look up a subproblem. Misses (including any hypothetical backing
    /// store failure) are reported as `None`; callers always recompute on a
    /// miss, so there is nothing further to propagate.
    pub fn get(&self, key: &CacheKey) -> Option<Vec<Shift>> {
        self.entries.get(key).map(|entry| entry.clone())
    }

    /// Store the solved shift list for a subproblem. Rejects empty shift
    /// lists: a non-zero demand subproblem that "solved" to no shifts is a
    /// bug, not a cacheable result.
    pub fn set(&self, key: CacheKey, shifts: Vec<Shift>) -> Result<(), ShiftsplitError> {
        if shifts.is_empty() {
            return Err(ShiftsplitError::EmptyCacheWrite);
        }
        self.entries.insert(key, shifts);
        Ok(())
    }

    /// Drop every entry. Test affordance only.
    pub fn flush(&self) {
        self.entries.clear();
    }
}
