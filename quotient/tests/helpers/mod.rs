use std::sync::Arc;
use std::time::Duration;

use quotient::{CatalogEntry, Quotient, QuotientBuilder, QuotientConnector};
use quotient_mock::{DynamicMockController, DynamicMockConnector, ManualClock, MockConnector};

pub mod fiat_only;

pub use fiat_only::FiatOnly;

/// 2024-03-01T12:00:00Z, the instant `ManualClock::fixed()` starts at.
pub const NOW: i64 = 1_709_294_400;

pub const DAY: i64 = 86_400;

pub fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::fixed())
}

/// Builder wired to the fixture mock and a manual clock.
pub fn mock_builder(clock: &Arc<ManualClock>) -> QuotientBuilder {
    let c: Arc<dyn QuotientConnector> = Arc::new(MockConnector::with_clock(clock.clone()));
    Quotient::builder().with_connector(c).clock(clock.clone())
}

pub fn mock_quotient() -> Quotient {
    mock_builder(&clock()).build().expect("valid config")
}

/// Builder wired to a programmable mock and a manual clock; one catalog page.
pub fn dynamic_builder(clock: &Arc<ManualClock>) -> (QuotientBuilder, DynamicMockController) {
    let (c, ctrl) = DynamicMockConnector::new_with_controller("dyn");
    let b = Quotient::builder()
        .with_connector(c)
        .clock(clock.clone())
        .catalog_pages(1)
        .symbol_ttl(Duration::from_secs(60))
        .catalog_retry_backoff(Duration::from_secs(30));
    (b, ctrl)
}

pub fn entry(id: &str, symbol: &str, rank: Option<u32>) -> CatalogEntry {
    CatalogEntry {
        id: id.into(),
        symbol: symbol.into(),
        name: id.into(),
        market_cap_rank: rank,
    }
}

pub fn coins() -> Vec<CatalogEntry> {
    vec![
        entry("bitcoin", "btc", Some(1)),
        entry("ethereum", "eth", Some(2)),
    ]
}

pub fn times(s: &quotient::Series) -> Vec<i64> {
    s.iter().map(|p| p.time).collect()
}
