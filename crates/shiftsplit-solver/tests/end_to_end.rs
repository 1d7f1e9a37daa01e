//! End-to-end scenarios exercising `Splitter` over full weeks.

use shiftsplit_core::config::{Config, Environment};
use shiftsplit_core::WeekDemand;
use shiftsplit_solver::{Cache, Splitter};

fn test_config() -> Config {
    Config::for_environment(Environment::Test)
}

#[test]
fn all_zero_week_needs_no_shifts() {
    let week = WeekDemand::new(vec![vec![0; 24]; 7]).unwrap();
    let cache = Cache::new();
    let cfg = test_config();

    let mut splitter = Splitter::new(&week, 4, 8);
    splitter.calculate(&cache, &cfg).unwrap();
    splitter.validate().unwrap();

    assert!(splitter.get_shifts().is_empty());
    assert_eq!(splitter.efficiency(), 0.0);
}

#[test]
fn bike_shop_week_is_covered_and_reasonably_efficient() {
    let day = vec![
        0, 0, 0, 0, 0, 0, 0, 5, 5, 7, 8, 6, 6, 7, 7, 7, 9, 9, 6, 5, 4, 4, 0, 0,
    ];
    let week = WeekDemand::new(vec![day.clone(); 7]).unwrap();
    let cache = Cache::new();
    let cfg = test_config();

    let mut splitter = Splitter::new(&week, 4, 8);
    splitter.calculate(&cache, &cfg).unwrap();
    splitter.validate().unwrap();

    for shift in splitter.get_shifts() {
        assert!((4..=8).contains(&shift.length));
    }
    assert!(splitter.efficiency() < 0.8);
}

#[test]
fn always_open_week_produces_one_window_per_day() {
    let day = vec![3u32; 24];
    let week = WeekDemand::new(vec![day; 7]).unwrap();
    let cache = Cache::new();
    let cfg = test_config();

    let mut splitter = Splitter::new(&week, 4, 8);
    splitter.calculate(&cache, &cfg).unwrap();
    splitter.validate().unwrap();

    assert_eq!(splitter.windows().len(), 7);
    for shift in splitter.get_shifts() {
        assert!((4..=8).contains(&shift.length));
    }
}

#[test]
fn wrap_around_demand_is_covered_circularly() {
    // Open until 2am every night: demand at the start of the week should be
    // picked up by the wraparound window from the end of the week.
    let day = vec![
        2, 2, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 3, 3, 3, 3, 3,
    ];
    let week = WeekDemand::new(vec![day; 7]).unwrap();
    let cache = Cache::new();
    let cfg = test_config();

    let mut splitter = Splitter::new(&week, 3, 6);
    splitter.calculate(&cache, &cfg).unwrap();
    splitter.validate().unwrap();
}

#[test]
fn repeated_identical_windows_share_the_cache() {
    let day = vec![
        0, 0, 0, 0, 0, 0, 0, 5, 5, 7, 8, 6, 6, 7, 7, 7, 9, 9, 6, 5, 4, 4, 0, 0,
    ];
    let week = WeekDemand::new(vec![day; 7]).unwrap();
    let cache = Cache::new();
    let cfg = test_config();

    let mut splitter = Splitter::new(&week, 4, 8);
    splitter.calculate(&cache, &cfg).unwrap();

    // 7 identical days collapse to a single distinct cache fingerprint.
    assert_eq!(splitter.windows().len(), 7);
}
