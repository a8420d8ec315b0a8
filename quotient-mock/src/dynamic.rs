use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use quotient_core::connector::{
    CatalogProvider, CryptoSpotProvider, FiatRateProvider, MarketChartProvider, QuotientConnector,
};
use quotient_core::{Capability, CatalogEntry, QuotientError};

/// Instruction for how a method should behave for a given input.
#[derive(Clone, Debug)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Return the provided value after sleeping (tokio time, so pausable).
    Delayed(Duration, T),
    /// Fail immediately with the provided error.
    Fail(QuotientError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

#[derive(Default)]
struct InternalState {
    catalog_rules: HashMap<u32, MockBehavior<Vec<CatalogEntry>>>,
    fiat_range_rules: HashMap<String, MockBehavior<Vec<(NaiveDate, f64)>>>,
    fiat_latest_rules: HashMap<String, MockBehavior<f64>>,
    chart_rules: HashMap<String, MockBehavior<Vec<(i64, f64)>>>,
    spot_rules: HashMap<String, MockBehavior<f64>>,
    calls: HashMap<Capability, usize>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for one catalog page. Pages without a rule are empty.
    pub async fn set_catalog_behavior(&self, page: u32, behavior: MockBehavior<Vec<CatalogEntry>>) {
        let mut guard = self.state.lock().await;
        guard.catalog_rules.insert(page, behavior);
    }

    /// Set the behavior for `daily_rates` calls for a fiat code.
    pub async fn set_fiat_range_behavior(
        &self,
        symbol: &str,
        behavior: MockBehavior<Vec<(NaiveDate, f64)>>,
    ) {
        let mut guard = self.state.lock().await;
        guard.fiat_range_rules.insert(symbol.to_string(), behavior);
    }

    /// Set the behavior for `latest_rate` calls for a fiat code.
    pub async fn set_fiat_latest_behavior(&self, symbol: &str, behavior: MockBehavior<f64>) {
        let mut guard = self.state.lock().await;
        guard.fiat_latest_rules.insert(symbol.to_string(), behavior);
    }

    /// Set the behavior for `market_chart` calls for a catalog id.
    pub async fn set_chart_behavior(&self, id: &str, behavior: MockBehavior<Vec<(i64, f64)>>) {
        let mut guard = self.state.lock().await;
        guard.chart_rules.insert(id.to_string(), behavior);
    }

    /// Set the behavior for `spot_price` calls for a catalog id.
    pub async fn set_spot_behavior(&self, id: &str, behavior: MockBehavior<f64>) {
        let mut guard = self.state.lock().await;
        guard.spot_rules.insert(id.to_string(), behavior);
    }

    /// How many times a capability has been invoked.
    ///
    /// Catalog counts are per page.
    pub async fn calls(&self, capability: Capability) -> usize {
        let guard = self.state.lock().await;
        guard.calls.get(&capability).copied().unwrap_or(0)
    }

    /// Clear all configured behaviors and call counters.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        *guard = InternalState::default();
    }
}

/// A connector that defers all behavior to an external controller.
pub struct DynamicMockConnector {
    name: &'static str,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockConnector {
    /// Create a new dynamic mock connector and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn QuotientConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self { name, state });
        (me as Arc<dyn QuotientConnector>, controller)
    }

    // Count the call and take a behavior snapshot without holding the lock across awaits.
    async fn snapshot<T: Clone>(
        &self,
        capability: Capability,
        pick: impl FnOnce(&InternalState) -> Option<MockBehavior<T>>,
    ) -> Option<MockBehavior<T>> {
        let mut guard = self.state.lock().await;
        *guard.calls.entry(capability).or_insert(0) += 1;
        pick(&guard)
    }
}

async fn play<T>(
    behavior: Option<MockBehavior<T>>,
    capability: Capability,
) -> Result<T, QuotientError> {
    match behavior {
        Some(MockBehavior::Return(v)) => Ok(v),
        Some(MockBehavior::Delayed(d, v)) => {
            tokio::time::sleep(d).await;
            Ok(v)
        }
        Some(MockBehavior::Fail(e)) => Err(e),
        Some(MockBehavior::Hang) => {
            std::future::pending::<()>().await;
            unreachable!()
        }
        None => Err(QuotientError::unsupported(capability.as_str())),
    }
}

#[async_trait]
impl QuotientConnector for DynamicMockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
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
impl CatalogProvider for DynamicMockConnector {
    async fn catalog_page(
        &self,
        page: u32,
        _per_page: u32,
    ) -> Result<Vec<CatalogEntry>, QuotientError> {
        let behavior = self
            .snapshot(Capability::Catalog, |s| s.catalog_rules.get(&page).cloned())
            .await;
        // a page with no rule is past the end of the catalog
        play(
            Some(behavior.unwrap_or(MockBehavior::Return(Vec::new()))),
            Capability::Catalog,
        )
        .await
    }
}

#[async_trait]
impl FiatRateProvider for DynamicMockConnector {
    async fn daily_rates(
        &self,
        _base: &str,
        symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, f64)>, QuotientError> {
        let behavior = self
            .snapshot(Capability::FiatRates, |s| {
                s.fiat_range_rules.get(symbol).cloned()
            })
            .await;
        play(behavior, Capability::FiatRates).await
    }

    async fn latest_rate(&self, _base: &str, symbol: &str) -> Result<f64, QuotientError> {
        let behavior = self
            .snapshot(Capability::FiatSpot, |s| {
                s.fiat_latest_rules.get(symbol).cloned()
            })
            .await;
        play(behavior, Capability::FiatSpot).await
    }
}

#[async_trait]
impl MarketChartProvider for DynamicMockConnector {
    async fn market_chart(
        &self,
        id: &str,
        _vs_currency: &str,
        _days: u32,
    ) -> Result<Vec<(i64, f64)>, QuotientError> {
        let behavior = self
            .snapshot(Capability::MarketChart, |s| s.chart_rules.get(id).cloned())
            .await;
        play(behavior, Capability::MarketChart).await
    }
}

#[async_trait]
impl CryptoSpotProvider for DynamicMockConnector {
    async fn spot_price(&self, id: &str, _vs_currency: &str) -> Result<f64, QuotientError> {
        let behavior = self
            .snapshot(Capability::CryptoSpot, |s| s.spot_rules.get(id).cloned())
            .await;
        play(behavior, Capability::CryptoSpot).await
    }
}
