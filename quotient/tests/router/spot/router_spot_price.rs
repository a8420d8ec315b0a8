use quotient::QuotientError;
use quotient_mock::MockBehavior;

use crate::helpers::{clock, coins, dynamic_builder, mock_quotient};

#[tokio::test]
async fn crypto_cross_rate() {
    let q = mock_quotient();
    let px = q.get_spot_price("btc", "eth").await.unwrap().unwrap();
    assert!((px - 42_000.0 / 2_300.0).abs() < 1e-9);
}

#[tokio::test]
async fn crypto_against_fiat() {
    let q = mock_quotient();
    let usd = q.get_spot_price("BTC", "USD").await.unwrap();
    assert_eq!(usd, Some(42_000.0));
    let eur = q.get_spot_price("BTC", "EUR").await.unwrap().unwrap();
    // 42000 USD at 0.9 EUR per USD, plus the fixture's daily wobble
    assert!(eur > 37_800.0 && eur < 38_100.0, "{eur}");
}

#[tokio::test]
async fn missing_or_zero_leg_is_none() {
    let q = mock_quotient();
    assert_eq!(q.get_spot_price("FAIL", "USD").await.unwrap(), None);
    assert_eq!(q.get_spot_price("USD", "FAIL").await.unwrap(), None);
    assert_eq!(q.get_spot_price("BTC", "ZERO").await.unwrap(), None);
    assert_eq!(q.get_spot_price("ZERO", "BTC").await.unwrap(), Some(0.0));
}

#[tokio::test]
async fn legs_are_priced_concurrently_once_each() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    ctrl.set_catalog_behavior(1, MockBehavior::Return(coins())).await;
    ctrl.set_spot_behavior("bitcoin", MockBehavior::Return(50_000.0))
        .await;
    ctrl.set_fiat_latest_behavior("CHF", MockBehavior::Return(0.8))
        .await;

    let px = q.get_spot_price("BTC", "CHF").await.unwrap().unwrap();
    // 50000 USD / (1 / 0.8 USD per CHF)
    assert!((px - 40_000.0).abs() < 1e-6);
    assert_eq!(ctrl.calls(quotient::Capability::CryptoSpot).await, 1);
    assert_eq!(ctrl.calls(quotient::Capability::FiatSpot).await, 1);
}

#[tokio::test]
async fn unresolved_symbol_is_an_error() {
    let q = mock_quotient();
    let err = q.get_spot_price("NOPE", "USD").await.unwrap_err();
    assert_eq!(err, QuotientError::unresolved("NOPE"));
}
