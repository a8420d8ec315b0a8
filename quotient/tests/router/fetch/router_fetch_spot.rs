use quotient::QuotientError;
use quotient_mock::MockBehavior;

use crate::helpers::{clock, dynamic_builder, mock_quotient};

#[tokio::test]
async fn spot_values_in_unit_currency() {
    let q = mock_quotient();
    assert_eq!(q.fetch_fiat_spot("usd").await, Some(1.0));
    assert_eq!(q.fetch_crypto_spot("bitcoin").await, Some(42_000.0));
    let eur = q.fetch_fiat_spot("EUR").await.unwrap();
    assert!(eur > 1.0 && eur < 1.12, "{eur}");
}

#[tokio::test]
async fn unavailable_spot_is_none() {
    let q = mock_quotient();
    assert_eq!(q.fetch_crypto_spot("fail-coin").await, None);
    assert_eq!(q.fetch_crypto_spot("no-such-coin").await, None);
    let err = q.try_fetch_crypto_spot("").await.unwrap_err();
    assert!(matches!(err, QuotientError::InvalidArg(_)));
}

#[tokio::test]
async fn malformed_latest_rate_is_upstream_unavailable() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    ctrl.set_fiat_latest_behavior("JPY", MockBehavior::Return(f64::NAN))
        .await;

    let err = q.try_fetch_fiat_spot("JPY").await.unwrap_err();
    assert!(matches!(err, QuotientError::UpstreamUnavailable { .. }));
    assert_eq!(q.fetch_fiat_spot("JPY").await, None);
}
