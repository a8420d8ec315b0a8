use async_trait::async_trait;
use chrono::NaiveDate;

pub use quotient_types::ConnectorKey;
use quotient_types::{CatalogEntry, QuotientError};

/// Focused role trait for connectors that publish the crypto asset catalog.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Fetch one catalog page (1-based) of at most `per_page` entries.
    ///
    /// An empty page means the catalog ended before `page`.
    async fn catalog_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<CatalogEntry>, QuotientError>;
}

/// Focused role trait for connectors that serve daily fiat exchange rates.
///
/// Rates are quoted as "units of `symbol` per one unit of `base`".
#[async_trait]
pub trait FiatRateProvider: Send + Sync {
    /// Fetch daily rates for the inclusive range `[start, end]`.
    ///
    /// Entries may come back in any order; callers sort.
    async fn daily_rates(
        &self,
        base: &str,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, f64)>, QuotientError>;

    /// Fetch the most recent published rate.
    async fn latest_rate(&self, base: &str, symbol: &str) -> Result<f64, QuotientError>;
}

/// Focused role trait for connectors that serve crypto price history.
#[async_trait]
pub trait MarketChartProvider: Send + Sync {
    /// Fetch `(timestamp_ms, price)` pairs for the last `days` days.
    ///
    /// Cadence is chosen by the upstream (sub-hourly to daily).
    async fn market_chart(
        &self,
        id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<(i64, f64)>, QuotientError>;
}

/// Focused role trait for connectors that serve current crypto prices.
#[async_trait]
pub trait CryptoSpotProvider: Send + Sync {
    /// Fetch the current price of `id` expressed in `vs_currency`.
    async fn spot_price(&self, id: &str, vs_currency: &str) -> Result<f64, QuotientError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
#[async_trait]
pub trait QuotientConnector: Send + Sync {
    /// Stable connector name used in logs and error tags.
    fn name(&self) -> &'static str;

    /// Typed key derived from [`name`](Self::name).
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-readable vendor name.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// If implemented, returns a trait object for the crypto catalog.
    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        None
    }

    /// If implemented, returns a trait object for daily fiat rates.
    fn as_fiat_rate_provider(&self) -> Option<&dyn FiatRateProvider> {
        None
    }

    /// If implemented, returns a trait object for crypto market charts.
    fn as_market_chart_provider(&self) -> Option<&dyn MarketChartProvider> {
        None
    }

    /// If implemented, returns a trait object for current crypto prices.
    fn as_crypto_spot_provider(&self) -> Option<&dyn CryptoSpotProvider> {
        None
    }
}
