//! Environment-scoped runtime configuration.
//!
//! Mirrors the environment-profile pattern of the upstream Python service:
//! a profile is selected once at process startup (from the `ENV` variable,
//! falling back to `Dev`) and every subsystem reads its knobs from the
//! resulting `Config` rather than from globals.

use std::env;
use std::time::Duration;

/// Deployment profile. Determines timeout and logging defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Prod,
    Stage,
    Dev,
    Test,
}

impl Environment {
    /// Read `ENV` from the process environment, defaulting to `Dev` when
    /// unset or unrecognized.
    pub fn from_env() -> Self {
        match env::var("ENV").as_deref() {
            Ok("prod") => Self::Prod,
            Ok("stage") => Self::Stage,
            Ok("test") => Self::Test,
            _ => Self::Dev,
        }
    }
}

/// Canonical day ordering, Monday first.
pub const DAYS_OF_WEEK: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Runtime knobs consumed by the solver and its adapters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Per-`Decompose` search wall-clock budget.
    pub calculation_timeout: Duration,
    /// Minimum `Σ demand` that triggers recursive bifurcation.
    pub bifurcation_threshold: u64,
    /// Informational bound for adapters querying existing shifts; not
    /// consumed by the core search.
    pub max_shift_length_hours: u32,
}

impl Config {
    /// Build the configuration for a given environment.
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Prod | Environment::Stage => Self {
                calculation_timeout: Duration::from_secs(600),
                bifurcation_threshold: 100,
                max_shift_length_hours: 23,
            },
            Environment::Dev | Environment::Test => Self {
                calculation_timeout: Duration::from_secs(300),
                bifurcation_threshold: 100,
                max_shift_length_hours: 23,
            },
        }
    }

    /// Build the configuration from the `ENV` environment variable.
    pub fn from_env() -> Self {
        Self::for_environment(Environment::from_env())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_environment(Environment::Dev)
    }
}

/// Return the canonical days of week, rotated so that `start_day` comes
/// first. Mirrors `week_day_range` from the upstream `helpers` module.
pub fn week_day_range(start_day: &str) -> Vec<&'static str> {
    let start_index = DAYS_OF_WEEK
        .iter()
        .position(|&d| d == start_day)
        .unwrap_or(0);
    DAYS_OF_WEEK[start_index..]
        .iter()
        .chain(DAYS_OF_WEEK[..start_index].iter())
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env as std_env;

    // These tests mutate the process environment variable `ENV`, so they run
    // serially via a single test that exercises every branch rather than
    // relying on cargo's parallel test runner to interleave safely.
    #[test]
    fn environment_selection_from_env() {
        std_env::set_var("ENV", "prod");
        assert_eq!(Environment::from_env(), Environment::Prod);

        std_env::set_var("ENV", "stage");
        assert_eq!(Environment::from_env(), Environment::Stage);

        std_env::set_var("ENV", "test");
        assert_eq!(Environment::from_env(), Environment::Test);

        std_env::set_var("ENV", "bogus");
        assert_eq!(Environment::from_env(), Environment::Dev);

        std_env::remove_var("ENV");
        assert_eq!(Environment::from_env(), Environment::Dev);
    }

    #[test]
    fn prod_and_stage_get_the_long_timeout() {
        let prod = Config::for_environment(Environment::Prod);
        let stage = Config::for_environment(Environment::Stage);
        assert_eq!(prod.calculation_timeout, Duration::from_secs(600));
        assert_eq!(stage.calculation_timeout, Duration::from_secs(600));
    }

    #[test]
    fn dev_and_test_get_the_short_timeout() {
        let dev = Config::for_environment(Environment::Dev);
        let test = Config::for_environment(Environment::Test);
        assert_eq!(dev.calculation_timeout, Duration::from_secs(300));
        assert_eq!(test.calculation_timeout, Duration::from_secs(300));
    }

    #[test]
    fn week_day_range_rotates() {
        assert_eq!(
            week_day_range("wednesday"),
            vec![
                "wednesday",
                "thursday",
                "friday",
                "saturday",
                "sunday",
                "monday",
                "tuesday"
            ]
        );
    }

    #[test]
    fn week_day_range_defaults_to_monday_start() {
        assert_eq!(week_day_range("monday"), DAYS_OF_WEEK.to_vec());
    }
}
