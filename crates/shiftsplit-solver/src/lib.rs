//! # shiftsplit-solver
//!
//! Branch-and-bound shift decomposition solver.
//!
//! This crate provides:
//! - [`cache::Cache`]: process-wide memoization of solved subproblems
//! - [`shift_collection::ShiftCollection`]: coverage-tracked partial solutions
//! - [`decompose::Decompose`]: per-window heuristic seed + DFS branch-and-bound
//! - [`splitter::Splitter`]: windowing over a full week of demand
//!
//! ## Example
//!
//! ```rust
//! use shiftsplit_core::WeekDemand;
//! use shiftsplit_core::config::{Config, Environment};
//! use shiftsplit_solver::{Cache, Splitter};
//!
//! let week = WeekDemand::new(vec![vec![0, 1, 2, 3, 2, 1, 0, 0]]).unwrap();
//! let cache = Cache::new();
//! let config = Config::for_environment(Environment::Test);
//!
//! let mut splitter = Splitter::new(&week, 2, 4);
//! splitter.calculate(&cache, &config).unwrap();
//! splitter.validate().unwrap();
//! assert!(splitter.efficiency() >= 0.0);
//! ```

pub mod cache;
pub mod decompose;
pub mod shift_collection;
pub mod splitter;

pub use cache::{Cache, CacheKey};
pub use decompose::Decompose;
pub use shift_collection::ShiftCollection;
pub use splitter::Splitter;
