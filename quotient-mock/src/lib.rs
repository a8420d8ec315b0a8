//! quotient-mock
//!
//! Offline connectors for tests and demos.
//!
//! - [`MockConnector`] serves every capability from deterministic fixtures.
//! - [`DynamicMockConnector`] defers each call to rules set through a
//!   controller, for failure and timeout scenarios.
//! - [`ManualClock`] drives cache expiry without sleeping.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use quotient_core::connector::{
    CatalogProvider, CryptoSpotProvider, FiatRateProvider, MarketChartProvider, QuotientConnector,
};
use quotient_core::{CatalogEntry, Clock, QuotientError, SystemClock};

mod clock;
mod dynamic;
mod fixtures;

pub use clock::ManualClock;
pub use dynamic::{DynamicMockConnector, DynamicMockController, MockBehavior};

const NAME: &str = "quotient-mock";

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
///
/// Market charts end at the injected clock's "now" so they overlap with
/// series the orchestrator synthesizes from the same clock. The ticker
/// `FAIL` resolves to an asset whose price calls always fail, and `SLOW`
/// to one whose price calls take a few hundred milliseconds.
pub struct MockConnector {
    clock: Arc<dyn Clock>,
    catalog_calls: AtomicUsize,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    /// Mock backed by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Mock whose charts end at `clock.now()`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            catalog_calls: AtomicUsize::new(0),
        }
    }

    /// Number of catalog pages served so far.
    #[must_use]
    pub fn catalog_calls(&self) -> usize {
        self.catalog_calls.load(Ordering::SeqCst)
    }

    async fn maybe_fail_or_delay(id: &str, capability: &'static str) -> Result<(), QuotientError> {
        match id {
            "fail-coin" => Err(QuotientError::connector(
                NAME,
                format!("forced failure: {capability}"),
            )),
            "slow-coin" => {
                // long enough to trip a short provider timeout in tests
                tokio::time::sleep(Duration::from_millis(300)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn check_usd(vs_currency: &str) -> Result<(), QuotientError> {
        if vs_currency.eq_ignore_ascii_case("usd") {
            Ok(())
        } else {
            Err(QuotientError::InvalidArg(format!(
                "mock prices are quoted in USD only, got {vs_currency}"
            )))
        }
    }
}

#[async_trait]
impl QuotientConnector for MockConnector {
    fn name(&self) -> &'static str {
        NAME
    }

    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        Some(self as &dyn CatalogProvider)
    }

    fn as_fiat_rate_provider(&self) -> Option<&dyn FiatRateProvider> {
        Some(self as &dyn FiatRateProvider)
    }

    fn as_market_chart_provider(&self) -> Option<&dyn MarketChartProvider> {
        Some(self as &dyn MarketChartProvider)
    }

    fn as_crypto_spot_provider(&self) -> Option<&dyn CryptoSpotProvider> {
        Some(self as &dyn CryptoSpotProvider)
    }
}

#[async_trait]
impl CatalogProvider for MockConnector {
    async fn catalog_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<CatalogEntry>, QuotientError> {
        self.catalog_calls.fetch_add(1, Ordering::SeqCst);
        Ok(fixtures::catalog::page(page, per_page))
    }
}

#[async_trait]
impl FiatRateProvider for MockConnector {
    async fn daily_rates(
        &self,
        base: &str,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, f64)>, QuotientError> {
        if start > end {
            return Err(QuotientError::InvalidArg(format!(
                "start {start} is after end {end}"
            )));
        }
        let mut out = Vec::new();
        for date in start.iter_days().take_while(|d| *d <= end) {
            if !fixtures::rates::is_publication_day(date) {
                continue;
            }
            let rate = fixtures::rates::rate_on(base, symbol, date)
                .ok_or_else(|| QuotientError::not_found(format!("rate {base}/{symbol}")))?;
            out.push((date, rate));
        }
        Ok(out)
    }

    async fn latest_rate(&self, base: &str, symbol: &str) -> Result<f64, QuotientError> {
        let today = self.clock.now().date_naive();
        fixtures::rates::rate_on(base, symbol, today)
            .ok_or_else(|| QuotientError::not_found(format!("rate {base}/{symbol}")))
    }
}

#[async_trait]
impl MarketChartProvider for MockConnector {
    async fn market_chart(
        &self,
        id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<(i64, f64)>, QuotientError> {
        Self::check_usd(vs_currency)?;
        Self::maybe_fail_or_delay(id, "market-chart").await?;
        let end_ms = self.clock.now().timestamp_millis();
        fixtures::charts::chart(id, end_ms, days)
            .ok_or_else(|| QuotientError::not_found(format!("market chart for {id}")))
    }
}

#[async_trait]
impl CryptoSpotProvider for MockConnector {
    async fn spot_price(&self, id: &str, vs_currency: &str) -> Result<f64, QuotientError> {
        Self::check_usd(vs_currency)?;
        Self::maybe_fail_or_delay(id, "crypto-spot").await?;
        fixtures::charts::spot(id)
            .ok_or_else(|| QuotientError::not_found(format!("spot price for {id}")))
    }
}
