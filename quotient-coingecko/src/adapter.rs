use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use quotient_core::{CatalogEntry, QuotientError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

pub(crate) const CONNECTOR: &str = "quotient-coingecko";

/// Public API root used by [`RealAdapter::new_default`].
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3/";

/// Catalog abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait CgMarkets: Send + Sync {
    /// Fetch one `/coins/markets` page ordered by market cap.
    async fn markets(&self, page: u32, per_page: u32) -> Result<Vec<CatalogEntry>, QuotientError>;
}

/// Market chart abstraction.
#[async_trait]
pub trait CgCharts: Send + Sync {
    /// Fetch raw `(timestamp_ms, price)` pairs for the last `days` days.
    async fn market_chart(
        &self,
        id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<(i64, f64)>, QuotientError>;
}

/// `/simple/price` abstraction.
#[async_trait]
pub trait CgSimplePrice: Send + Sync {
    /// Fetch the current price of one asset.
    async fn simple_price(&self, id: &str, vs_currency: &str) -> Result<f64, QuotientError>;
}

#[derive(Debug, Deserialize)]
struct MarketRow {
    id: String,
    symbol: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    market_cap_rank: Option<u32>,
}

impl From<MarketRow> for CatalogEntry {
    fn from(r: MarketRow) -> Self {
        Self {
            id: r.id,
            symbol: r.symbol,
            name: r.name,
            market_cap_rank: r.market_cap_rank,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MarketChartBody {
    #[serde(default)]
    prices: Vec<(f64, Option<f64>)>,
}

impl MarketChartBody {
    // Rows with a null price are gaps in the upstream history; they are
    // dropped and counted.
    fn into_points(self) -> (Vec<(i64, f64)>, usize) {
        let total = self.prices.len();
        let points: Vec<(i64, f64)> = self
            .prices
            .into_iter()
            .filter_map(|(ts, px)| {
                let px = px?;
                // upstream sends integral milliseconds as JSON numbers
                #[allow(clippy::cast_possible_truncation)]
                let ts = ts.round() as i64;
                Some((ts, px))
            })
            .collect();
        let gaps = total - points.len();
        (points, gaps)
    }
}

// { "bitcoin": { "usd": 12345.6 } }
type SimplePriceBody = HashMap<String, HashMap<String, f64>>;

/// Real adapter backed by a shared `reqwest::Client`.
/// `reqwest::Client` is `Clone + Send + Sync`, so no external locking is needed.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base: Url,
    api_key: Option<String>,
}

impl RealAdapter {
    /// Adapter for the public API with a fresh HTTP client.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the built-in base URL fails to parse.
    pub fn new_default() -> Result<Self, QuotientError> {
        Self::with_base_url(reqwest::Client::new(), DEFAULT_BASE_URL)
    }

    /// Adapter rooted at `base` (e.g. a proxy or a local mock server).
    ///
    /// # Errors
    /// Returns `InvalidArg` when `base` is not an absolute http(s) URL.
    pub fn with_base_url(http: reqwest::Client, base: &str) -> Result<Self, QuotientError> {
        let base = Url::parse(base)
            .map_err(|e| QuotientError::InvalidArg(format!("invalid base url {base:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(QuotientError::InvalidArg(format!(
                "base url cannot carry paths: {base}"
            )));
        }
        Ok(Self {
            http,
            base,
            api_key: None,
        })
    }

    /// Send a demo API key with every request (`x-cg-demo-api-key`).
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, QuotientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                QuotientError::InvalidArg(format!("base url cannot carry paths: {}", self.base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        what: &str,
    ) -> Result<T, QuotientError> {
        let mut req = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            req = req.header("x-cg-demo-api-key", key);
        }
        let resp = req.send().await.map_err(|e| {
            QuotientError::connector(CONNECTOR, format!("request failed: {what}: {e}"))
        })?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(QuotientError::not_found(what.to_string()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(QuotientError::connector(
                CONNECTOR,
                format!("rate limit: {what}"),
            ));
        }
        if status.is_client_error() || status.is_server_error() {
            return Err(QuotientError::connector(
                CONNECTOR,
                format!("status {}: {what}", status.as_u16()),
            ));
        }
        let body = resp.bytes().await.map_err(|e| {
            QuotientError::connector(CONNECTOR, format!("read body failed: {what}: {e}"))
        })?;
        serde_json::from_slice(&body)
            .map_err(|e| QuotientError::Data(format!("{CONNECTOR}: decode {what}: {e}")))
    }
}

#[async_trait]
impl CgMarkets for RealAdapter {
    async fn markets(&self, page: u32, per_page: u32) -> Result<Vec<CatalogEntry>, QuotientError> {
        let mut url = self.endpoint(&["coins", "markets"])?;
        url.query_pairs_mut()
            .append_pair("vs_currency", "usd")
            .append_pair("order", "market_cap_desc")
            .append_pair("per_page", &per_page.to_string())
            .append_pair("page", &page.to_string());
        let rows: Vec<MarketRow> = self.get_json(url, &format!("markets page {page}")).await?;
        Ok(rows.into_iter().map(CatalogEntry::from).collect())
    }
}

#[async_trait]
impl CgCharts for RealAdapter {
    async fn market_chart(
        &self,
        id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<Vec<(i64, f64)>, QuotientError> {
        let mut url = self.endpoint(&["coins", id, "market_chart"])?;
        url.query_pairs_mut()
            .append_pair("vs_currency", &vs_currency.to_ascii_lowercase())
            .append_pair("days", &days.to_string());
        let what = format!("market chart for {id}");
        let body: MarketChartBody = self.get_json(url, &what).await?;
        let (points, gaps) = body.into_points();
        if gaps > 0 {
            #[cfg(feature = "tracing")]
            tracing::debug!(id = %id, gaps, "skipped chart rows without a price");
        }
        Ok(points)
    }
}

#[async_trait]
impl CgSimplePrice for RealAdapter {
    async fn simple_price(&self, id: &str, vs_currency: &str) -> Result<f64, QuotientError> {
        let vs = vs_currency.to_ascii_lowercase();
        let mut url = self.endpoint(&["simple", "price"])?;
        url.query_pairs_mut()
            .append_pair("ids", id)
            .append_pair("vs_currencies", &vs);
        let what = format!("spot price for {id}");
        let body: SimplePriceBody = self.get_json(url, &what).await?;
        body.get(id)
            .and_then(|prices| prices.get(&vs))
            .copied()
            .ok_or_else(|| QuotientError::not_found(what))
    }
}

/// Adapter that answers every call with `unsupported`.
struct Unsupported;

#[async_trait]
impl CgMarkets for Unsupported {
    async fn markets(
        &self,
        _page: u32,
        _per_page: u32,
    ) -> Result<Vec<CatalogEntry>, QuotientError> {
        Err(QuotientError::unsupported("catalog"))
    }
}

#[async_trait]
impl CgCharts for Unsupported {
    async fn market_chart(
        &self,
        _id: &str,
        _vs_currency: &str,
        _days: u32,
    ) -> Result<Vec<(i64, f64)>, QuotientError> {
        Err(QuotientError::unsupported("market-chart"))
    }
}

#[async_trait]
impl CgSimplePrice for Unsupported {
    async fn simple_price(&self, _id: &str, _vs_currency: &str) -> Result<f64, QuotientError> {
        Err(QuotientError::unsupported("crypto-spot"))
    }
}

/// Hand out shared adapter handles. Unimplemented accessors answer `unsupported`,
/// so tests only override the endpoints they exercise.
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn CgMarkets>`.
    fn clone_arc_markets(&self) -> Arc<dyn CgMarkets> {
        Arc::new(Unsupported)
    }
    /// Clone as `Arc<dyn CgCharts>`.
    fn clone_arc_charts(&self) -> Arc<dyn CgCharts> {
        Arc::new(Unsupported)
    }
    /// Clone as `Arc<dyn CgSimplePrice>`.
    fn clone_arc_simple_price(&self) -> Arc<dyn CgSimplePrice> {
        Arc::new(Unsupported)
    }
}

impl CloneArcAdapters for RealAdapter {
    fn clone_arc_markets(&self) -> Arc<dyn CgMarkets> {
        Arc::new(self.clone()) as Arc<dyn CgMarkets>
    }
    fn clone_arc_charts(&self) -> Arc<dyn CgCharts> {
        Arc::new(self.clone()) as Arc<dyn CgCharts>
    }
    fn clone_arc_simple_price(&self) -> Arc<dyn CgSimplePrice> {
        Arc::new(self.clone()) as Arc<dyn CgSimplePrice>
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn CgMarkets {
    /// Build a `CgMarkets` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn CgMarkets>
    where
        F: Send + Sync + 'static + Fn(u32, u32) -> Result<Vec<CatalogEntry>, QuotientError>,
    {
        struct FnMarkets<F>(F);
        #[async_trait]
        impl<F> CgMarkets for FnMarkets<F>
        where
            F: Send + Sync + 'static + Fn(u32, u32) -> Result<Vec<CatalogEntry>, QuotientError>,
        {
            async fn markets(
                &self,
                page: u32,
                per_page: u32,
            ) -> Result<Vec<CatalogEntry>, QuotientError> {
                (self.0)(page, per_page)
            }
        }
        Arc::new(FnMarkets(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn CgCharts {
    /// Build a `CgCharts` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn CgCharts>
    where
        F: Send
            + Sync
            + 'static
            + Fn(String, String, u32) -> Result<Vec<(i64, f64)>, QuotientError>,
    {
        struct FnCharts<F>(F);
        #[async_trait]
        impl<F> CgCharts for FnCharts<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(String, String, u32) -> Result<Vec<(i64, f64)>, QuotientError>,
        {
            async fn market_chart(
                &self,
                id: &str,
                vs_currency: &str,
                days: u32,
            ) -> Result<Vec<(i64, f64)>, QuotientError> {
                (self.0)(id.to_string(), vs_currency.to_string(), days)
            }
        }
        Arc::new(FnCharts(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn CgSimplePrice {
    /// Build a `CgSimplePrice` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn CgSimplePrice>
    where
        F: Send + Sync + 'static + Fn(String, String) -> Result<f64, QuotientError>,
    {
        struct FnSimple<F>(F);
        #[async_trait]
        impl<F> CgSimplePrice for FnSimple<F>
        where
            F: Send + Sync + 'static + Fn(String, String) -> Result<f64, QuotientError>,
        {
            async fn simple_price(
                &self,
                id: &str,
                vs_currency: &str,
            ) -> Result<f64, QuotientError> {
                (self.0)(id.to_string(), vs_currency.to_string())
            }
        }
        Arc::new(FnSimple(f))
    }
}
