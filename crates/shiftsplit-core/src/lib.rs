//! # shiftsplit-core
//!
//! Domain model, configuration, and error types for the shiftsplit shift
//! decomposition engine.
//!
//! This crate provides:
//! - Domain types: `Shift`, `DayShift`, `WeekDemand`
//! - Runtime configuration: `Config`, `Environment`
//! - The shared error type `ShiftsplitError`
//!
//! The search algorithm itself (windowing, branch-and-bound, memoization)
//! lives in `shiftsplit-solver`, which depends on this crate for its
//! vocabulary.
//!
//! ## Example
//!
//! ```rust
//! use shiftsplit_core::{Shift, WeekDemand};
//!
//! let week = WeekDemand::new(vec![vec![0, 1, 2, 1, 0]]).unwrap();
//! assert_eq!(week.day_length(), 5);
//!
//! let shift = Shift::new(1, 3);
//! assert_eq!(shift.end(), 4);
//! ```

pub mod config;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Shift types
// ============================================================================

/// A single shift: starts at `start` and covers `[start, start + length)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Shift {
    pub start: u32,
    pub length: u32,
}

impl Shift {
    pub const fn new(start: u32, length: u32) -> Self {
        Self { start, length }
    }

    /// First bucket not covered by this shift.
    pub const fn end(&self) -> u32 {
        self.start + self.length
    }
}

/// A shift re-projected onto a specific day of the week, as returned by
/// `Splitter::get_shifts`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayShift {
    pub day: u32,
    pub start: u32,
    pub length: u32,
}

// ============================================================================
// Weekly demand
// ============================================================================

/// A week's worth of per-bucket staffing demand: `D` days of `B` buckets
/// each, all days the same length.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekDemand {
    days: Vec<Vec<u32>>,
}

impl WeekDemand {
    /// Validate that every day has the same length and build a `WeekDemand`.
    pub fn new(days: Vec<Vec<u32>>) -> Result<Self, ShiftsplitError> {
        if let Some(first) = days.first() {
            let expected = first.len();
            for (day, row) in days.iter().enumerate() {
                if row.len() != expected {
                    return Err(ShiftsplitError::UnequalDayLength {
                        expected,
                        actual: row.len(),
                        day,
                    });
                }
            }
        }
        Ok(Self { days })
    }

    pub fn week_length(&self) -> usize {
        self.days.len()
    }

    pub fn day_length(&self) -> usize {
        self.days.first().map_or(0, Vec::len)
    }

    pub fn days(&self) -> &[Vec<u32>] {
        &self.days
    }

    /// Flatten into row-major order: `flat[day * day_length + bucket]`.
    pub fn flatten(&self) -> Vec<u32> {
        self.days.iter().flatten().copied().collect()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Errors surfaced by the shiftsplit engine.
///
/// Variants are classified in the design doc as user-input errors
/// (`UnequalDayLength`), programmer errors (everything else public), and
/// internal-only rollback signals (`MinLengthViolated`, never escapes the
/// splitter).
#[derive(Debug, Error)]
pub enum ShiftsplitError {
    #[error("week demand rows have unequal length: day {day} has {actual} buckets, expected {expected}")]
    UnequalDayLength {
        expected: usize,
        actual: usize,
        day: usize,
    },

    #[error("heuristic seed failed to meet demand (edge smoothing bug or corrupted input)")]
    InfeasibleHeuristic,

    #[error("shift out of bounds: start {start} length {length} exceeds demand length {demand_len}")]
    ShiftOutOfBounds {
        start: u32,
        length: u32,
        demand_len: usize,
    },

    #[error("attempted to cache an empty shift list")]
    EmptyCacheWrite,

    #[error("calculate() was already invoked on this instance")]
    AlreadyCalculated,

    #[error("recursive window split would violate the minimum shift length")]
    MinLengthViolated,
}
