use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use quotient::{Quotient, QuotientError};
use quotient_mock::{MockBehavior, MockConnector};

use crate::helpers::{DAY, FiatOnly, NOW, clock, dynamic_builder, mock_quotient, times};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn fiat_series_has_one_point_per_publication_day() {
    let q = mock_quotient();
    // 2024-02-25 is a Sunday; Monday through Friday remain
    let s = q.try_fetch_fiat_series("eur", 5).await.unwrap();
    let midnight = NOW - 12 * 3600;
    let expected: Vec<i64> = (0..5).map(|i| midnight - (4 - i) * DAY).collect();
    assert_eq!(times(&s), expected);
    for p in s.iter() {
        // one EUR buys a little more than a dollar in the fixture
        assert!(p.value > 1.0 && p.value < 1.12, "{p:?}");
    }
}

#[tokio::test]
async fn unit_currency_is_synthesized_flat() {
    let q = mock_quotient();
    let s = q.try_fetch_fiat_series("USD", 3).await.unwrap();
    assert_eq!(
        times(&s),
        vec![NOW - 3 * DAY, NOW - 2 * DAY, NOW - DAY, NOW]
    );
    assert!(s.iter().all(|p| p.value == 1.0));
}

#[tokio::test]
async fn rates_are_inverted_into_unit_value() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    ctrl.set_fiat_range_behavior("EUR", MockBehavior::Return(vec![(d(2024, 1, 1), 0.9)]))
        .await;

    let s = q.try_fetch_fiat_series("EUR", 30).await.unwrap();
    assert_eq!(s.len(), 1);
    let p = s.first().unwrap();
    assert_eq!(p.time, 1_704_067_200);
    assert!((p.value - 1.0 / 0.9).abs() < 1e-12);
}

#[tokio::test]
async fn non_positive_rate_is_upstream_unavailable() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    ctrl.set_fiat_range_behavior(
        "GBP",
        MockBehavior::Return(vec![(d(2024, 2, 1), 0.8), (d(2024, 2, 2), 0.0)]),
    )
    .await;

    let err = q.try_fetch_fiat_series("GBP", 30).await.unwrap_err();
    assert!(matches!(err, QuotientError::UpstreamUnavailable { .. }));
    assert!(q.fetch_fiat_series("GBP", 30).await.is_empty());
}

#[tokio::test]
async fn crypto_code_is_not_a_fiat_series() {
    let q = mock_quotient();
    let err = q.try_fetch_fiat_series("BTC", 5).await.unwrap_err();
    assert!(matches!(err, QuotientError::InvalidArg(_)));
}

#[tokio::test]
async fn crypto_series_is_in_seconds_and_ends_now() {
    let q = mock_quotient();
    let s = q.try_fetch_crypto_series("bitcoin", 1).await.unwrap();
    assert_eq!(s.len(), 25);
    assert_eq!(s.first().unwrap().time, NOW - DAY);
    assert_eq!(s.last().unwrap().time, NOW);
}

#[tokio::test]
async fn failing_crypto_series_is_empty() {
    let q = mock_quotient();
    let err = q.try_fetch_crypto_series("fail-coin", 3).await.unwrap_err();
    assert!(matches!(err, QuotientError::UpstreamUnavailable { .. }));
    assert!(q.fetch_crypto_series("fail-coin", 3).await.is_empty());
    assert!(q.fetch_crypto_series("no-such-coin", 3).await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn hanging_upstream_times_out_to_empty() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.provider_timeout(Duration::from_secs(1)).build().unwrap();
    ctrl.set_chart_behavior("bitcoin", MockBehavior::Hang).await;

    let err = q.try_fetch_crypto_series("bitcoin", 7).await.unwrap_err();
    match err {
        QuotientError::UpstreamUnavailable { upstream, msg } => {
            assert_eq!(upstream, "dyn");
            assert!(msg.contains("timed out"), "{msg}");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(q.fetch_crypto_series("bitcoin", 7).await.is_empty());
}

#[tokio::test]
async fn missing_role_is_unsupported() {
    let q = Quotient::builder()
        .with_connector(Arc::new(FiatOnly(MockConnector::new())))
        .build()
        .unwrap();
    let err = q.try_fetch_crypto_series("bitcoin", 1).await.unwrap_err();
    assert_eq!(err, QuotientError::unsupported("market-chart"));
    assert!(q.fetch_crypto_series("bitcoin", 1).await.is_empty());
    assert!(!q.fetch_fiat_series("EUR", 10).await.is_empty());
}

#[tokio::test]
async fn window_bounds_are_checked() {
    let q = mock_quotient();
    for days in [0, 3651] {
        let err = q.try_fetch_crypto_series("bitcoin", days).await.unwrap_err();
        assert!(matches!(err, QuotientError::InvalidArg(_)), "days={days}");
    }
}
