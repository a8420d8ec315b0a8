use quotient::{Capability, QuotientError};
use quotient_mock::MockBehavior;

use crate::helpers::{clock, coins, dynamic_builder};

#[tokio::test]
async fn cold_catalog_failure_is_catalog_unavailable() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    let outage = MockBehavior::Fail(QuotientError::connector("dyn", "503"));
    ctrl.set_catalog_behavior(1, outage).await;

    let err = q.resolve(["BTC"]).await.unwrap_err();
    assert!(matches!(err, QuotientError::CatalogUnavailable(_)));
}

#[tokio::test]
async fn empty_catalog_counts_as_failure() {
    let clock = clock();
    let (b, _ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();

    let err = q.get_ratio_history("BTC", "USD", 7).await.unwrap_err();
    assert!(matches!(err, QuotientError::CatalogUnavailable(_)));
}

#[tokio::test]
async fn failed_refresh_serves_stale_map_and_backs_off() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    ctrl.set_catalog_behavior(1, MockBehavior::Return(coins())).await;
    q.resolve(["BTC"]).await.unwrap();

    clock.advance(chrono::Duration::seconds(61));
    let outage = MockBehavior::Fail(QuotientError::connector("dyn", "503"));
    ctrl.set_catalog_behavior(1, outage).await;
    let out = q.resolve(["BTC"]).await.unwrap();
    assert_eq!(out["BTC"].resolved_id(), Some("bitcoin"));
    assert_eq!(ctrl.calls(Capability::Catalog).await, 2);

    // within the backoff window nobody asks the upstream again
    clock.advance(chrono::Duration::seconds(10));
    q.resolve(["BTC"]).await.unwrap();
    assert_eq!(ctrl.calls(Capability::Catalog).await, 2);

    clock.advance(chrono::Duration::seconds(25));
    ctrl.set_catalog_behavior(1, MockBehavior::Return(coins())).await;
    q.resolve(["BTC"]).await.unwrap();
    assert_eq!(ctrl.calls(Capability::Catalog).await, 3);
}

#[tokio::test]
async fn fiat_pairs_work_without_a_catalog() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    let outage = MockBehavior::Fail(QuotientError::connector("dyn", "503"));
    ctrl.set_catalog_behavior(1, outage).await;
    ctrl.set_fiat_latest_behavior("EUR", MockBehavior::Return(0.8))
        .await;

    let px = q.get_spot_price("EUR", "USD").await.unwrap().unwrap();
    assert!((px - 1.25).abs() < 1e-12);
    assert_eq!(ctrl.calls(Capability::Catalog).await, 0);
}

#[tokio::test]
async fn unresolved_ticker_in_a_pair_errors() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    ctrl.set_catalog_behavior(1, MockBehavior::Return(coins())).await;

    let err = q.get_ratio_history("NOPE", "USD", 7).await.unwrap_err();
    assert_eq!(err, QuotientError::unresolved("NOPE"));
    let err = q.get_spot_price("BTC", "NOPE").await.unwrap_err();
    assert_eq!(err, QuotientError::unresolved("NOPE"));
    // nothing was priced
    assert_eq!(ctrl.calls(Capability::MarketChart).await, 0);
    assert_eq!(ctrl.calls(Capability::CryptoSpot).await, 0);
}
