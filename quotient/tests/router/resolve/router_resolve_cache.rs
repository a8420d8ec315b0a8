use std::sync::Arc;
use std::time::Duration;

use quotient::{Capability, QuotientConnector, QuotientError};
use quotient_mock::{ManualClock, MockBehavior, MockConnector};

use crate::helpers::{clock, coins, dynamic_builder, entry};

#[tokio::test]
async fn catalog_fetched_once_within_ttl() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.catalog_pages(2).build().unwrap();
    ctrl.set_catalog_behavior(1, MockBehavior::Return(coins())).await;

    q.resolve(["BTC"]).await.unwrap();
    clock.advance(chrono::Duration::seconds(59));
    let out = q.resolve(["ETH", "BTC"]).await.unwrap();

    assert_eq!(out["ETH"].resolved_id(), Some("ethereum"));
    // two pages, one refresh
    assert_eq!(ctrl.calls(Capability::Catalog).await, 2);
}

#[tokio::test]
async fn expired_map_is_refetched_once() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    ctrl.set_catalog_behavior(1, MockBehavior::Return(coins())).await;

    q.resolve(["BTC"]).await.unwrap();
    clock.advance(chrono::Duration::seconds(61));
    let wrapped = vec![entry("wrapped-bitcoin", "btc", Some(1))];
    ctrl.set_catalog_behavior(1, MockBehavior::Return(wrapped)).await;
    let first = q.resolve(["BTC"]).await.unwrap();
    let second = q.resolve(["BTC"]).await.unwrap();

    assert_eq!(first["BTC"].resolved_id(), Some("wrapped-bitcoin"));
    assert_eq!(second, first);
    assert_eq!(ctrl.calls(Capability::Catalog).await, 2);
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_share_one_refresh() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    let slow = MockBehavior::Delayed(Duration::from_millis(200), coins());
    ctrl.set_catalog_behavior(1, slow).await;

    let calls = (0..8).map(|_| q.resolve(["BTC"]));
    let results = futures::future::join_all(calls).await;

    for r in results {
        assert_eq!(r.unwrap()["BTC"].resolved_id(), Some("bitcoin"));
    }
    assert_eq!(ctrl.calls(Capability::Catalog).await, 1);
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_share_a_failed_refresh_without_backoff() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b
        .catalog_retry_backoff(Duration::ZERO)
        .provider_timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    ctrl.set_catalog_behavior(1, MockBehavior::Hang).await;

    let calls = (0..8).map(|_| q.resolve(["BTC"]));
    let results = futures::future::join_all(calls).await;

    for r in results {
        assert!(matches!(r, Err(QuotientError::CatalogUnavailable(_))));
    }
    assert_eq!(ctrl.calls(Capability::Catalog).await, 1);
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_share_one_refresh_of_an_expired_map() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b.build().unwrap();
    ctrl.set_catalog_behavior(1, MockBehavior::Return(coins())).await;
    q.resolve(["BTC"]).await.unwrap();

    clock.advance(chrono::Duration::seconds(61));
    let wrapped = vec![entry("wrapped-bitcoin", "btc", Some(1))];
    let slow = MockBehavior::Delayed(Duration::from_millis(200), wrapped);
    ctrl.set_catalog_behavior(1, slow).await;

    let calls = (0..8).map(|_| q.resolve(["BTC"]));
    let results = futures::future::join_all(calls).await;

    for r in results {
        assert_eq!(r.unwrap()["BTC"].resolved_id(), Some("wrapped-bitcoin"));
    }
    assert_eq!(ctrl.calls(Capability::Catalog).await, 2);
}

#[tokio::test(start_paused = true)]
async fn expired_map_is_served_stale_to_all_callers_of_a_failed_refresh() {
    let clock = clock();
    let (b, ctrl) = dynamic_builder(&clock);
    let q = b
        .catalog_retry_backoff(Duration::ZERO)
        .provider_timeout(Duration::from_secs(1))
        .build()
        .unwrap();
    ctrl.set_catalog_behavior(1, MockBehavior::Return(coins())).await;
    q.resolve(["BTC"]).await.unwrap();

    clock.advance(chrono::Duration::seconds(61));
    ctrl.set_catalog_behavior(1, MockBehavior::Hang).await;

    let calls = (0..8).map(|_| q.resolve(["BTC"]));
    let results = futures::future::join_all(calls).await;

    for r in results {
        assert_eq!(r.unwrap()["BTC"].resolved_id(), Some("bitcoin"));
    }
    assert_eq!(ctrl.calls(Capability::Catalog).await, 2);
}

#[tokio::test]
async fn invalidate_forces_a_refresh() {
    let clock = Arc::new(ManualClock::fixed());
    let mock = Arc::new(MockConnector::with_clock(clock.clone()));
    let q = quotient::Quotient::builder()
        .with_connector(mock.clone() as Arc<dyn QuotientConnector>)
        .clock(clock)
        .catalog_pages(1)
        .build()
        .unwrap();

    q.resolve(["BTC"]).await.unwrap();
    q.resolve(["BTC"]).await.unwrap();
    assert_eq!(mock.catalog_calls(), 1);

    q.invalidate_symbols();
    q.resolve(["BTC"]).await.unwrap();
    assert_eq!(mock.catalog_calls(), 2);
}
