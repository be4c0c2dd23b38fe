use chrono::Duration;

use super::common::deadline;
use crate::scoring::decay::{DecayConfig, DecayPolicy};

fn exponential(max_score: u32, lateness: Duration) -> u32 {
    DecayPolicy::Exponential.score(
        &DecayConfig::default(),
        max_score,
        deadline(),
        deadline() + lateness,
    )
}

#[test]
fn full_score_at_or_before_deadline() {
    assert_eq!(exponential(100, Duration::hours(-1)), 100);
    assert_eq!(exponential(100, Duration::zero()), 100);
}

#[test]
fn five_days_late_decays_to_e_minus_one() {
    assert_eq!(exponential(100, Duration::days(5)), 36);
}

#[test]
fn floor_holds_for_arbitrarily_late_submissions() {
    assert_eq!(exponential(100, Duration::days(100)), 30);
    assert_eq!(exponential(100, Duration::days(1000)), 30);
}

#[test]
fn any_lateness_costs_something() {
    let slightly_late = exponential(100, Duration::hours(1));
    assert!(slightly_late < 100);
    assert!(slightly_late >= 30);
}

#[test]
fn decay_is_monotonically_non_increasing() {
    let mut previous = exponential(100, Duration::zero());
    for hours in (0..24 * 30).step_by(6) {
        let current = exponential(100, Duration::hours(hours));
        assert!(
            current <= previous,
            "score increased at +{hours}h: {current} > {previous}"
        );
        previous = current;
    }
}

#[test]
fn linear_policy_interpolates_to_half_over_a_week() {
    let config = DecayConfig::default();
    let linear = |lateness: Duration| {
        DecayPolicy::Linear.score(&config, 100, deadline(), deadline() + lateness)
    };

    assert_eq!(linear(Duration::hours(-1)), 100);
    assert_eq!(linear(Duration::hours(84)), 75);
    assert_eq!(linear(Duration::days(7)), 50);
    assert_eq!(linear(Duration::days(30)), 50);
}

#[test]
fn constants_are_tunable() {
    let strict = DecayConfig {
        floor: 0.5,
        half_life_days: 5.0,
        late_window_days: 7,
    };
    let score =
        DecayPolicy::Exponential.score(&strict, 100, deadline(), deadline() + Duration::days(100));
    assert_eq!(score, 50);
}
