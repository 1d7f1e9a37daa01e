//! Flattens a weekly demand matrix, partitions it into independent
//! contiguous windows (honoring circular wrap and 24/7 demand), and solves
//! each window with a [`crate::decompose::Decompose`].

use shiftsplit_core::config::Config;
use shiftsplit_core::{DayShift, ShiftsplitError, WeekDemand};

use crate::cache::Cache;
use crate::decompose::Decompose;

/// Monotone state machine: `calculate()` walks `Fresh -> Windowed -> Solved`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Fresh,
    Windowed,
    Solved,
}

/// Splits a week of demand into windows and solves each independently.
pub struct Splitter {
    flat_demand: Vec<u32>,
    day_length: usize,
    week_length: usize,
    min_length: u32,
    max_length: u32,
    windows: Vec<(usize, usize)>,
    shifts: Vec<DayShift>,
    state: State,
}

impl Splitter {
    pub fn new(week_demand: &WeekDemand, min_length: u32, max_length: u32) -> Self {
        Self {
            flat_demand: week_demand.flatten(),
            day_length: week_demand.day_length(),
            week_length: week_demand.week_length(),
            min_length,
            max_length,
            windows: Vec::new(),
            shifts: Vec::new(),
            state: State::Fresh,
        }
    }

    /// Generate windows, then solve each through `Decompose`.
    pub fn calculate(&mut self, cache: &Cache, config: &Config) -> Result<(), ShiftsplitError> {
        self.generate_windows();
        self.state = State::Windowed;
        self.solve_windows(cache, config)?;
        self.state = State::Solved;
        Ok(())
    }

    /// Day-projected shifts: `day = flat_start / day_length`,
    /// `start = flat_start mod day_length`.
    pub fn get_shifts(&self) -> &[DayShift] {
        debug_assert_eq!(self.state, State::Solved);
        &self.shifts
    }

    pub fn windows(&self) -> &[(usize, usize)] {
        &self.windows
    }

    // ------------------------------------------------------------------
    // Window generation
    // ------------------------------------------------------------------

    fn generate_windows(&mut self) {
        if self.is_always_open() {
            for i in 0..self.week_length {
                let start = i * self.day_length;
                let end = start + self.day_length;
                self.add_window(start, end, false);
            }
            return;
        }

        let len = self.flat_demand.len();
        for start in 0..len {
            let prev_is_zero = start == 0 || self.flat_demand[start - 1] == 0;
            if self.flat_demand[start] != 0 && prev_is_zero {
                for end in (start + 1)..(len + self.max_length as usize) {
                    let at_end_zero = self.flat_at(end) == 0;
                    let boundary = start == end - 1 || self.flat_at(end - 1) != 0;
                    if at_end_zero && boundary {
                        self.add_window(start, end, false);
                        break;
                    }
                }
            }
        }
    }

    /// Circular read: index `len` wraps to `0`, index `len+k` wraps to `k`.
    /// Plain modulo already gives the right bucket for every index,
    /// including `len-1` itself (which needs no wrapping at all).
    fn flat_at(&self, index: usize) -> u32 {
        let len = self.flat_demand.len();
        self.flat_demand[index % len]
    }

    fn add_window(&mut self, start: usize, end: usize, raise_on_min_length: bool) {
        if let Err(err) = self.try_add_window(start, end, raise_on_min_length) {
            debug_assert!(matches!(err, ShiftsplitError::MinLengthViolated));
        }
    }

    fn try_add_window(
        &mut self,
        start: usize,
        end: usize,
        raise_on_min_length: bool,
    ) -> Result<(), ShiftsplitError> {
        let length = end - start;

        if length < self.min_length as usize {
            if raise_on_min_length {
                return Err(ShiftsplitError::MinLengthViolated);
            }
            if start == 0 {
                tracing::debug!("skipping circular wraparound at beginning of loop");
            } else {
                tracing::info!(start, end, "skipping window shorter than min length");
            }
            return Ok(());
        }

        if length > self.day_length {
            tracing::info!(start, end, "splitting oversized window into subproblems");
            let center = start + (end - start) / 2;
            let checkpoint = self.windows.len();
            let split_ok = self.try_add_window(start, center, true).is_ok()
                && self.try_add_window(center, end, true).is_ok();
            if !split_ok {
                self.windows.truncate(checkpoint);
                self.windows.push((start, end));
            }
            return Ok(());
        }

        self.windows.push((start, end));
        Ok(())
    }

    /// A week is "always open" if no zero bucket appears at or past index
    /// `max_length`: any gap shorter than `max_length` cannot fit a shift
    /// boundary, so it is not treated as a usable window seam.
    fn is_always_open(&self) -> bool {
        for (i, &d) in self.flat_demand.iter().enumerate() {
            if d == 0 && i >= self.max_length as usize {
                return false;
            }
        }
        true
    }

    // ------------------------------------------------------------------
    // Window solving
    // ------------------------------------------------------------------

    fn solve_windows(&mut self, cache: &Cache, config: &Config) -> Result<(), ShiftsplitError> {
        let window_count = self.windows.len();
        for (i, &(start, end)) in self.windows.clone().iter().enumerate() {
            tracing::info!(window = i + 1, of = window_count, start, end, "solving window");

            let demand = self.window_demand(start, end);
            let mut d = Decompose::new(demand, self.min_length, self.max_length, start as u32);
            d.calculate(cache, config)?;

            tracing::info!(efficiency = d.efficiency(None), "window solved");

            for shift in d.get_shifts() {
                self.shifts.push(DayShift {
                    day: self.flat_index_to_day(shift.start as usize) as u32,
                    start: self.flat_index_to_time(shift.start as usize) as u32,
                    length: shift.length,
                });
            }
        }
        Ok(())
    }

    /// Circular demand slice: if `end` wraps past the flattened length,
    /// concatenate the tail with the wrapped head.
    fn window_demand(&self, start: usize, end: usize) -> Vec<u32> {
        let len = self.flat_demand.len();
        if end <= len {
            self.flat_demand[start..end].to_vec()
        } else {
            let mut demand = self.flat_demand[start..].to_vec();
            demand.extend_from_slice(&self.flat_demand[..end % len]);
            demand
        }
    }

    fn flat_index_to_day(&self, index: usize) -> usize {
        if index == 0 {
            0
        } else {
            index / self.day_length
        }
    }

    fn flat_index_to_time(&self, index: usize) -> usize {
        index % self.day_length
    }

    // ------------------------------------------------------------------
    // Validation / reporting
    // ------------------------------------------------------------------

    /// Assert that coverage meets demand everywhere, circularly. Test
    /// affordance.
    pub fn validate(&self) -> Result<(), ShiftsplitError> {
        debug_assert_eq!(self.state, State::Solved);
        let len = self.flat_demand.len();
        let mut coverage = vec![0u32; len];
        for shift in &self.shifts {
            let flat_start = shift.day as usize * self.day_length + shift.start as usize;
            for t in flat_start..flat_start + shift.length as usize {
                coverage[t % len] += 1;
            }
        }
        for (t, (&d, &c)) in self.flat_demand.iter().zip(coverage.iter()).enumerate() {
            if c < d {
                return Err(ShiftsplitError::ShiftOutOfBounds {
                    start: t as u32,
                    length: 0,
                    demand_len: len,
                });
            }
        }
        Ok(())
    }

    /// Overage as a fraction over the whole (circular) flattened week;
    /// `0.0` for all-zero demand, avoiding a divide-by-zero.
    pub fn efficiency(&self) -> f64 {
        debug_assert_eq!(self.state, State::Solved);
        let demand_sum: u64 = self.flat_demand.iter().map(|&d| u64::from(d)).sum();
        if demand_sum == 0 {
            return 0.0;
        }
        let length_sum: u64 = self.shifts.iter().map(|s| u64::from(s.length)).sum();
        (length_sum as f64 / demand_sum as f64) - 1.0
    }
}
