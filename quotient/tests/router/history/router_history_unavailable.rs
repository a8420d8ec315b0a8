use std::time::Duration;

use quotient::QuotientError;
use quotient_mock::MockBehavior;

use crate::helpers::{NOW, clock, coins, dynamic_builder, mock_builder, mock_quotient};

#[tokio::test]
async fn failing_leg_yields_empty_series() {
    let q = mock_quotient();
    let ratio = q.get_ratio_history("FAIL", "USD", 5).await.unwrap();
    assert!(ratio.is_empty());
    let ratio = q.get_ratio_history("EUR", "FAIL", 5).await.unwrap();
    assert!(ratio.is_empty());
}

#[tokio::test(start_paused = true)]
async fn slow_leg_times_out_to_empty() {
    let clock = clock();
    let q = mock_builder(&clock)
        .provider_timeout(Duration::from_millis(100))
        .build()
        .unwrap();
    let ratio = q.get_ratio_history("SLOW", "USD", 5).await.unwrap();
    assert!(ratio.is_empty());
    // the same pair succeeds once the budget covers the upstream latency
    let patient = mock_builder(&clock).build().unwrap();
    let ratio = patient.get_ratio_history("SLOW", "USD", 5).await.unwrap();
    assert!(!ratio.is_empty());
}

#[tokio::test]
async fn zero_valued_quote_yields_empty_series() {
    let q = mock_quotient();
    let ratio = q.get_ratio_history("BTC", "ZERO", 3).await.unwrap();
    assert!(ratio.is_empty());
}

#[tokio::test]
async fn disjoint_legs_yield_empty_series() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    ctrl.set_catalog_behavior(1, MockBehavior::Return(coins())).await;
    // a chart that ended a year before the unit-currency leg begins
    let stale_ms = (NOW - 365 * 86_400) * 1000;
    ctrl.set_chart_behavior(
        "bitcoin",
        MockBehavior::Return(vec![(stale_ms - 3_600_000, 41_000.0), (stale_ms, 42_000.0)]),
    )
    .await;

    let s = q.get_ratio_history("BTC", "USD", 7).await.unwrap();
    assert!(s.is_empty());
}

#[tokio::test]
async fn empty_upstream_payload_yields_empty_series() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    ctrl.set_catalog_behavior(1, MockBehavior::Return(coins())).await;
    ctrl.set_chart_behavior("ethereum", MockBehavior::Return(vec![]))
        .await;
    ctrl.set_fiat_range_behavior("EUR", MockBehavior::Return(vec![]))
        .await;

    let ratio = q.get_ratio_history("ETH", "USD", 7).await.unwrap();

    assert!(ratio.is_empty());
    let ratio = q.get_ratio_history("USD", "EUR", 7).await.unwrap();
    assert!(ratio.is_empty());
}

#[tokio::test]
async fn configuration_errors_still_propagate() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    ctrl.set_catalog_behavior(1, MockBehavior::Return(coins())).await;
    ctrl.set_chart_behavior(
        "bitcoin",
        MockBehavior::Fail(QuotientError::unsupported("market-chart")),
    )
    .await;

    let err = q.get_ratio_history("BTC", "USD", 7).await.unwrap_err();
    assert_eq!(err, QuotientError::unsupported("market-chart"));
}
