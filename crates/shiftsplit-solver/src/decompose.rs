//! Decomposes a single contiguous demand vector into a shift list via
//! heuristic seeding, DFS branch-and-bound, recursive demand-bifurcation,
//! and memoization.

use std::rc::Rc;
use std::time::Instant;

use shiftsplit_core::config::Config;
use shiftsplit_core::{Shift, ShiftsplitError};

use crate::cache::{Cache, CacheKey};
use crate::shift_collection::ShiftCollection;

/// Solves one windowed demand vector.
///
/// Must be constructed with a demand vector containing at least one
/// non-zero bucket. [`crate::splitter::Splitter`] guarantees this by
/// construction (windows are only ever generated around runs of non-zero
/// demand); an all-zero vector has no minimal shift to seed the search
/// from and is not a supported input.
pub struct Decompose {
    /// Processed demand: trailing/leading zeros dropped, edges smoothed.
    demand: Vec<u32>,
    min_length: u32,
    max_length: u32,
    /// Offset to add back to every shift's `start` so it lines up with the
    /// caller's original (pre-windowing) coordinates.
    window_offset: u32,
    shifts: Vec<Shift>,
    calculated: bool,
}

impl Decompose {
    /// Build a `Decompose` over `demand`, applying edge-smoothing
    /// preprocessing immediately (constructors never fail: all-zero demand
    /// is filtered out upstream by the splitter).
    pub fn new(demand: Vec<u32>, min_length: u32, max_length: u32, window_offset: u32) -> Self {
        let mut instance = Self {
            demand,
            min_length,
            max_length,
            window_offset,
            shifts: Vec::new(),
            calculated: false,
        };
        instance.process_demand();
        instance
    }

    /// Drop trailing and leading zeros (tracking the leading count into
    /// `window_offset`), then smooth both edges so that a shift of length
    /// `min_length` can always close out the vector cleanly.
    fn process_demand(&mut self) {
        while self.demand.last() == Some(&0) {
            self.demand.pop();
        }

        let mut leading = 0u32;
        while self.demand.first() == Some(&0) {
            self.demand.remove(0);
            leading += 1;
        }
        self.window_offset += leading;

        let min_length = self.min_length as usize;

        let mut peak = 0u32;
        for t in 0..min_length.min(self.demand.len()) {
            if self.demand[t] > peak {
                peak = self.demand[t];
            } else if self.demand[t] < peak {
                self.demand[t] = peak;
            }
        }

        let len = self.demand.len();
        let start = len.saturating_sub(min_length + 1);
        let mut peak = 0u32;
        for t in (start..len).rev() {
            if self.demand[t] > peak {
                peak = self.demand[t];
            } else if self.demand[t] < peak {
                self.demand[t] = peak;
            }
        }

        tracing::debug!(leading, demand = ?self.demand, "windowed and edge-smoothed demand");
    }

    pub fn demand(&self) -> &[u32] {
        &self.demand
    }

    pub fn window_offset(&self) -> u32 {
        self.window_offset
    }

    /// Shifts with `start` re-offset into the caller's original coordinates.
    pub fn get_shifts(&self) -> Vec<Shift> {
        self.shifts
            .iter()
            .map(|s| Shift::new(s.start + self.window_offset, s.length))
            .collect()
    }

    /// Overage as a fraction: `0.0` is perfectly optimal.
    pub fn efficiency(&self, shifts: Option<&[Shift]>) -> f64 {
        let shifts = shifts.unwrap_or(&self.shifts);
        let demand_sum: u64 = self.demand.iter().map(|&d| u64::from(d)).sum();
        if demand_sum == 0 {
            return 0.0;
        }
        let length_sum: u64 = shifts.iter().map(|s| u64::from(s.length)).sum();
        (length_sum as f64 / demand_sum as f64) - 1.0
    }

    /// Assert that coverage meets demand everywhere. Test affordance.
    pub fn validate(&self) -> Result<(), ShiftsplitError> {
        let mut coverage = vec![0u32; self.demand.len()];
        for shift in &self.shifts {
            let end = shift.start as usize + shift.length as usize;
            for slot in &mut coverage[shift.start as usize..end] {
                *slot += 1;
            }
        }
        for (t, (&d, &c)) in self.demand.iter().zip(coverage.iter()).enumerate() {
            if c < d {
                return Err(ShiftsplitError::ShiftOutOfBounds {
                    start: t as u32,
                    length: 0,
                    demand_len: self.demand.len(),
                });
            }
        }
        Ok(())
    }

    /// Round a demand vector half up or down elementwise.
    fn split_demand(&self, round_up: bool) -> Vec<u32> {
        self.demand
            .iter()
            .map(|&v| {
                if round_up {
                    v.div_ceil(2)
                } else {
                    v / 2
                }
            })
            .collect()
    }

    /// Solve this subproblem: consult the cache, recurse via bifurcation if
    /// demand is large, or run branch-and-bound search. Populates
    /// `self.shifts`. Errors if called twice on the same instance.
    pub fn calculate(&mut self, cache: &Cache, config: &Config) -> Result<(), ShiftsplitError> {
        if self.calculated {
            return Err(ShiftsplitError::AlreadyCalculated);
        }
        self.calculated = true;

        let key = CacheKey::fingerprint(&self.demand, self.min_length, self.max_length);
        if let Some(cached) = cache.get(&key) {
            tracing::info!("cache hit");
            self.shifts = cached;
            return Ok(());
        }

        let demand_sum: u64 = self.demand.iter().map(|&d| u64::from(d)).sum();
        if demand_sum > config.bifurcation_threshold {
            tracing::info!(
                demand_sum,
                threshold = config.bifurcation_threshold,
                "bifurcating demand"
            );
            let demand_up = self.split_demand(true);
            let demand_low = self.split_demand(false);

            let mut d_up = Decompose::new(demand_up, self.min_length, self.max_length, 0);
            let mut d_low = Decompose::new(demand_low, self.min_length, self.max_length, 0);

            d_up.calculate(cache, config)?;
            d_low.calculate(cache, config)?;

            self.shifts.extend(d_up.get_shifts());
            self.shifts.extend(d_low.get_shifts());

            cache.set(key, self.shifts.clone())?;
            return Ok(());
        }

        self.run_search(config)?;
        cache.set(key, self.shifts.clone())?;
        Ok(())
    }

    /// Greedy heuristic seed: fill the right edge with `min_length` shifts
    /// for `demand[-1]`, then sweep left-to-right adding `min_length`
    /// shifts wherever demand is still unmet.
    fn heuristic_seed(&self) -> Result<ShiftCollection, ShiftsplitError> {
        let demand: Rc<[u32]> = Rc::from(self.demand.clone().into_boxed_slice());
        let mut collection = ShiftCollection::new(self.min_length, self.max_length, demand);

        let len = self.demand.len();
        let length = self.min_length;
        let end_start = len as u32 - length;
        let end_shift = Shift::new(end_start, length);
        for _ in 0..self.demand[len - 1] {
            collection.add_shift(end_shift)?;
        }

        for t in 0..len {
            let delta = collection.demand_minus_coverage(t);
            if delta <= 0 {
                continue;
            }
            let mut start = t as u32;
            if start + length > len as u32 {
                start = len as u32 - length;
            }
            let shift = Shift::new(start, length);
            for _ in 0..delta {
                collection.add_shift(shift)?;
            }
        }

        if !collection.demand_is_met() {
            return Err(ShiftsplitError::InfeasibleHeuristic);
        }
        Ok(collection)
    }

    /// DFS branch-and-bound over shift placements. Long shifts are explored
    /// first by pushing them last onto the LIFO stack (so they pop first),
    /// which biases the search toward fewer, longer shifts among equally
    /// good solutions.
    fn run_search(&mut self, config: &Config) -> Result<(), ShiftsplitError> {
        let seed = self.heuristic_seed()?;

        let mut best_known_coverage = seed.coverage_sum();
        let mut best_known_solution = seed;

        let demand: Rc<[u32]> = Rc::from(self.demand.clone().into_boxed_slice());
        let mut stack = vec![ShiftCollection::new(
            self.min_length,
            self.max_length,
            demand,
        )];

        let start_time = Instant::now();

        while let Some(working) = stack.pop() {
            if start_time.elapsed() > config.calculation_timeout {
                tracing::info!(
                    elapsed_secs = start_time.elapsed().as_secs(),
                    "search exited due to timeout"
                );
                break;
            }

            if working.is_optimal() {
                tracing::info!("found an optimal collection");
                best_known_solution = working;
                break;
            }

            if working.demand_is_met() {
                if working.coverage_sum() < best_known_coverage {
                    best_known_coverage = working.coverage_sum();
                    best_known_solution = working;
                }
                continue;
            }

            if working.best_possible_coverage() >= best_known_coverage {
                continue;
            }

            let Some(t) = working.first_unmet_bucket() else {
                continue;
            };
            let start = t as u32;

            for length in self.min_length..=self.max_length {
                let end = start + length;
                if end as usize > self.demand.len() {
                    continue;
                }
                let mut candidate = working.clone();
                candidate.add_shift(Shift::new(start, length))?;

                if candidate.demand_is_met() {
                    candidate.anneal()?;
                }

                if candidate.best_possible_coverage() < best_known_coverage {
                    stack.push(candidate);
                }
            }
        }

        self.shifts = best_known_solution.shifts().to_vec();
        Ok(())
    }
}
