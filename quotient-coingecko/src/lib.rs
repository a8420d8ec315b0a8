//! quotient-coingecko
//!
//! Public connector that implements `QuotientConnector` on top of the
//! CoinGecko REST API. Exposes the paginated asset catalog, market-chart
//! history, and current prices.
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;

use std::sync::Arc;

use adapter::{CgCharts, CgMarkets, CgSimplePrice, CloneArcAdapters, RealAdapter};
use async_trait::async_trait;
use quotient_core::{
    CatalogEntry, QuotientError,
    connector::{
        CatalogProvider, ConnectorKey, CryptoSpotProvider, MarketChartProvider, QuotientConnector,
    },
};

/// CoinGecko caps `/coins/markets` pages at 250 rows.
pub const MAX_PER_PAGE: u32 = 250;

/// Public connector type. Production users will construct with `CoinGeckoConnector::new_default()`.
pub struct CoinGeckoConnector {
    markets: Arc<dyn CgMarkets>,
    charts: Arc<dyn CgCharts>,
    simple: Arc<dyn CgSimplePrice>,
}

impl CoinGeckoConnector {
    /// Static connector key for logs and error tags.
    pub const KEY: ConnectorKey = ConnectorKey::new(adapter::CONNECTOR);

    /// Build against the public API with a fresh HTTP client.
    ///
    /// # Errors
    /// Returns an error if the default adapter cannot be constructed.
    pub fn new_default() -> Result<Self, QuotientError> {
        let a = RealAdapter::new_default()?;
        Ok(Self::from_adapter(&a))
    }

    /// Build against `base_url` reusing an existing `reqwest::Client`.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `base_url` is not a usable absolute URL.
    pub fn with_base_url(http: reqwest::Client, base_url: &str) -> Result<Self, QuotientError> {
        let a = RealAdapter::with_base_url(http, base_url)?;
        Ok(Self::from_adapter(&a))
    }

    /// Build from any adapter bundle. Accepts a borrowed adapter to avoid unnecessary moves.
    pub fn from_adapter<A: CloneArcAdapters + ?Sized>(adapter: &A) -> Self {
        Self {
            markets: adapter.clone_arc_markets(),
            charts: adapter.clone_arc_charts(),
            simple: adapter.clone_arc_simple_price(),
        }
    }
}

#[async_trait]
impl QuotientConnector for CoinGeckoConnector {
    fn name(&self) -> &'static str {
        adapter::CONNECTOR
    }

    fn vendor(&self) -> &'static str {
        "CoinGecko"
    }

    fn as_catalog_provider(&self) -> Option<&dyn CatalogProvider> {
        Some(self as &dyn CatalogProvider)
    }

    fn as_market_chart_provider(&self) -> Option<&dyn MarketChartProvider> {
        Some(self as &dyn MarketChartProvider)
    }

    fn as_crypto_spot_provider(&self) -> Option<&dyn CryptoSpotProvider> {
        Some(self as &dyn CryptoSpotProvider)
    }
}

#[async_trait]
impl CatalogProvider for CoinGeckoConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "quotient_coingecko::catalog_page",
            skip(self),
            fields(page = page, per_page = per_page),
        )
    )]
    async fn catalog_page(
        &self,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<CatalogEntry>, QuotientError> {
        if page == 0 {
            return Err(QuotientError::InvalidArg(
                "catalog pages are 1-based".into(),
            ));
        }
        if per_page == 0 || per_page > MAX_PER_PAGE {
            return Err(QuotientError::InvalidArg(format!(
                "per_page must be in 1..={MAX_PER_PAGE}, got {per_page}"
            )));
        }
        self.markets.markets(page, per_page).await
    }
}

#[async_trait]
impl MarketChartProvider for CoinGeckoConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "quotient_coingecko::market_chart",
            skip(self),
            fields(id = %id, vs = %vs_currency, days = days),
        )
    )]
    async fn market_chart(
        &self,
        id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<(i64, f64)>, QuotientError> {
        if id.trim().is_empty() {
            return Err(QuotientError::InvalidArg("empty asset id".into()));
        }
        if days == 0 {
            return Err(QuotientError::InvalidArg("days must be positive".into()));
        }
        let points = self.charts.market_chart(id, vs_currency, days).await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(points = points.len(), "fetched market chart");
        Ok(points)
    }
}

#[async_trait]
impl CryptoSpotProvider for CoinGeckoConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "quotient_coingecko::spot_price",
            skip(self),
            fields(id = %id, vs = %vs_currency),
        )
    )]
    async fn spot_price(&self, id: &str, vs_currency: &str) -> Result<f64, QuotientError> {
        if id.trim().is_empty() {
            return Err(QuotientError::InvalidArg("empty asset id".into()));
        }
        self.simple.simple_price(id, vs_currency).await
    }
}
