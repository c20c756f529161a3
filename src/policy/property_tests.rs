//! Property-Based Tests for the Freshness Policy
//!
//! Uses proptest to check the interval arithmetic over wide ranges of
//! instants and interval lengths.

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use serde_json::json;

use crate::policy::{FreshnessConfig, FreshnessPolicy, SourceKind};

// == Test Configuration ==
const QUARTER_HOUR_MS: i64 = 900_000;
/// Roughly +/- 200k years, inside chrono's representable range.
const WIDE_RANGE_MS: i64 = 6_000_000_000_000_000;

// == Strategies ==
fn instant_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (-WIDE_RANGE_MS..WIDE_RANGE_MS)
        .prop_map(|ms| DateTime::from_timestamp_millis(ms).expect("in chrono range"))
}

fn kind_strategy() -> impl Strategy<Value = SourceKind> {
    prop_oneof![
        Just(SourceKind::Weather),
        Just(SourceKind::Cat),
        Just(SourceKind::Generic),
    ]
}

/// Any accepted interval, weighted towards lengths that do not divide a day
/// and towards the top of the range.
fn interval_strategy() -> impl Strategy<Value = u64> {
    prop_oneof![
        Just(1u64),
        Just(7),
        Just(420),
        Just(86_401),
        Just(u64::MAX / 1_000),
        1u64..=u64::MAX / 1_000,
    ]
}

fn policy_strategy() -> impl Strategy<Value = FreshnessPolicy> {
    (interval_strategy(), interval_strategy(), interval_strategy()).prop_map(|(w, c, d)| {
        FreshnessPolicy::new(FreshnessConfig::new(w, c, d).expect("non-zero intervals"))
    })
}

fn ms(value: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value).expect("in chrono range")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Property: inside a quarter-hour weather interval the value is fresh and
    // lives exactly until the next boundary.
    #[test]
    fn prop_weather_inside_interval(quarter in -1_000_000i64..1_000_000, offset_s in 1i64..900) {
        let policy = FreshnessPolicy::default();
        let boundary = quarter * QUARTER_HOUR_MS;
        let now = ms(boundary + offset_s * 1_000);

        prop_assert!(policy.is_fresh(SourceKind::Weather, now));
        prop_assert_eq!(
            policy.ttl_seconds(SourceKind::Weather, now),
            (900 - offset_s) as u64
        );
    }

    // Property: an exact boundary is stale and gets a full interval.
    #[test]
    fn prop_weather_boundary(quarter in -1_000_000i64..1_000_000) {
        let policy = FreshnessPolicy::default();
        let now = ms(quarter * QUARTER_HOUR_MS);

        prop_assert!(!policy.is_fresh(SourceKind::Weather, now));
        prop_assert_eq!(policy.ttl_seconds(SourceKind::Weather, now), 900);
    }

    // Property: for any weather interval length, a multiple of the period is
    // a stale boundary with a full TTL, and every later second up to the next
    // boundary is fresh with the remaining time.
    #[test]
    fn prop_weather_any_period(period in 1u64..1_000_000_000, index in -1_000i64..1_000, raw in any::<u64>()) {
        let policy = FreshnessPolicy::new(FreshnessConfig::new(period, 300, 60).expect("non-zero"));
        let boundary = index * period as i64;
        let at_boundary = DateTime::from_timestamp(boundary, 0).expect("in chrono range");

        prop_assert!(!policy.is_fresh(SourceKind::Weather, at_boundary));
        prop_assert_eq!(policy.ttl_seconds(SourceKind::Weather, at_boundary), period);

        let offset = raw % period;
        prop_assume!(offset > 0);
        let inside = DateTime::from_timestamp(boundary + offset as i64, 0).expect("in chrono range");
        prop_assert!(policy.is_fresh(SourceKind::Weather, inside));
        prop_assert_eq!(policy.ttl_seconds(SourceKind::Weather, inside), period - offset);
    }

    // Property: the TTL is never zero and never longer than the interval,
    // for any kind, interval length and instant.
    #[test]
    fn prop_ttl_bounded(policy in policy_strategy(), kind in kind_strategy(), now in instant_strategy()) {
        let ttl = policy.ttl_seconds(kind, now);
        prop_assert!(ttl >= 1, "ttl was {}", ttl);
        prop_assert!(ttl <= policy.config().interval_secs(kind), "ttl {} exceeds interval", ttl);
    }

    // Property: both functions are pure.
    #[test]
    fn prop_idempotent(policy in policy_strategy(), kind in kind_strategy(), now in instant_strategy()) {
        prop_assert_eq!(policy.is_fresh(kind, now), policy.is_fresh(kind, now));
        prop_assert_eq!(policy.ttl_seconds(kind, now), policy.ttl_seconds(kind, now));
    }

    // Property: a value stored at `now` with the computed TTL expires exactly
    // at the next boundary, where the policy reports it stale.
    #[test]
    fn prop_expiry_lands_on_boundary(kind in kind_strategy(), secs in -10_000_000_000i64..10_000_000_000) {
        let policy = FreshnessPolicy::default();
        let now = ms(secs * 1_000);
        let ttl = policy.ttl_seconds(kind, now) as i64;
        let expiry = ms((secs + ttl) * 1_000);

        prop_assert!(!policy.is_fresh(kind, expiry));
    }

    // Property: evaluating with an explicit kind agrees with the two
    // primitive functions.
    #[test]
    fn prop_evaluate_matches_primitives(kind in kind_strategy(), now in instant_strategy()) {
        let policy = FreshnessPolicy::default();
        let decision = policy.evaluate(Some(kind), &json!({"anything": true}), now);

        prop_assert_eq!(decision.fresh, policy.is_fresh(kind, now));
        prop_assert_eq!(decision.ttl_seconds, policy.ttl_seconds(kind, now));
    }

    // Property: payloads of unknown shape are always stale with the default TTL.
    #[test]
    fn prop_unknown_shape_is_stale(key in "[a-z_]{1,16}", value in any::<i64>(), now in instant_strategy()) {
        prop_assume!(key != "current_weather");
        let policy = FreshnessPolicy::default();
        let decision = policy.evaluate(None, &json!({ key: value }), now);

        prop_assert!(!decision.fresh);
        prop_assert_eq!(decision.ttl_seconds, 60);
    }
}
