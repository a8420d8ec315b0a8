use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use quotient_core::QuotientError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

pub(crate) const CONNECTOR: &str = "quotient-frankfurter";

/// Public API root used by [`RealAdapter::new_default`].
pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.app/";

const DATE_FMT: &str = "%Y-%m-%d";

/// Time-series abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait FxRange: Send + Sync {
    /// Fetch published rates for `[start, end]`, quoted as units of `symbol` per `base`.
    async fn range(
        &self,
        base: &str,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, f64)>, QuotientError>;
}

/// Latest-rate abstraction.
#[async_trait]
pub trait FxLatest: Send + Sync {
    /// Fetch the most recent published rate.
    async fn latest(&self, base: &str, symbol: &str) -> Result<f64, QuotientError>;
}

// {"amount":1.0,"base":"USD","start_date":"..","end_date":"..","rates":{"2024-01-02":{"EUR":0.91}}}
#[derive(Debug, Deserialize)]
struct RangeBody {
    #[serde(default)]
    rates: BTreeMap<String, HashMap<String, f64>>,
}

// {"amount":1.0,"base":"USD","date":"2024-01-02","rates":{"EUR":0.91}}
#[derive(Debug, Deserialize)]
struct LatestBody {
    #[serde(default)]
    rates: HashMap<String, f64>,
}

/// Real adapter backed by a shared `reqwest::Client`.
#[derive(Clone)]
pub struct RealAdapter {
    http: reqwest::Client,
    base: Url,
}

impl RealAdapter {
    /// Adapter for the public API with a fresh HTTP client.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the built-in base URL fails to parse.
    pub fn new_default() -> Result<Self, QuotientError> {
        Self::with_base_url(reqwest::Client::new(), DEFAULT_BASE_URL)
    }

    /// Adapter rooted at `base` (e.g. a self-hosted instance).
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
        Ok(Self { http, base })
    }

    fn endpoint(&self, segment: &str, base: &str, symbol: &str) -> Result<Url, QuotientError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| {
                QuotientError::InvalidArg(format!("base url cannot carry paths: {}", self.base))
            })?
            .pop_if_empty()
            .push(segment);
        url.query_pairs_mut()
            .append_pair("from", base)
            .append_pair("to", symbol);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        what: &str,
    ) -> Result<T, QuotientError> {
        let resp = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| {
                QuotientError::connector(CONNECTOR, format!("request failed: {what}: {e}"))
            })?;
        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(QuotientError::not_found(what.to_string()));
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
impl FxRange for RealAdapter {
    async fn range(
        &self,
        base: &str,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, f64)>, QuotientError> {
        let span = format!("{}..{}", start.format(DATE_FMT), end.format(DATE_FMT));
        let url = self.endpoint(&span, base, symbol)?;
        let what = format!("rates {base}/{symbol} {span}");
        let body: RangeBody = self.get_json(url, &what).await?;

        let mut out = Vec::with_capacity(body.rates.len());
        for (day, rates) in body.rates {
            let date = NaiveDate::parse_from_str(&day, DATE_FMT).map_err(|e| {
                QuotientError::Data(format!("{CONNECTOR}: bad date key {day:?}: {e}"))
            })?;
            // days that omit the requested symbol are skipped
            if let Some(rate) = rates.get(symbol) {
                out.push((date, *rate));
            }
        }
        Ok(out)
    }
}

#[async_trait]
impl FxLatest for RealAdapter {
    async fn latest(&self, base: &str, symbol: &str) -> Result<f64, QuotientError> {
        let url = self.endpoint("latest", base, symbol)?;
        let what = format!("latest rate {base}/{symbol}");
        let body: LatestBody = self.get_json(url, &what).await?;
        body.rates
            .get(symbol)
            .copied()
            .ok_or_else(|| QuotientError::not_found(what))
    }
}

struct Unsupported;

#[async_trait]
impl FxRange for Unsupported {
    async fn range(
        &self,
        _base: &str,
        _symbol: &str,
        _start: NaiveDate,
        _end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, f64)>, QuotientError> {
        Err(QuotientError::unsupported("fiat-rates"))
    }
}

#[async_trait]
impl FxLatest for Unsupported {
    async fn latest(&self, _base: &str, _symbol: &str) -> Result<f64, QuotientError> {
        Err(QuotientError::unsupported("fiat-spot"))
    }
}

/// Hand out shared adapter handles; defaults answer `unsupported`.
pub trait CloneArcAdapters {
    /// Clone as `Arc<dyn FxRange>`.
    fn clone_arc_range(&self) -> Arc<dyn FxRange> {
        Arc::new(Unsupported)
    }
    /// Clone as `Arc<dyn FxLatest>`.
    fn clone_arc_latest(&self) -> Arc<dyn FxLatest> {
        Arc::new(Unsupported)
    }
}

impl CloneArcAdapters for RealAdapter {
    fn clone_arc_range(&self) -> Arc<dyn FxRange> {
        Arc::new(self.clone()) as Arc<dyn FxRange>
    }
    fn clone_arc_latest(&self) -> Arc<dyn FxLatest> {
        Arc::new(self.clone()) as Arc<dyn FxLatest>
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn FxRange {
    /// Build a `FxRange` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn FxRange>
    where
        F: Send
            + Sync
            + 'static
            + Fn(String, String, NaiveDate, NaiveDate) -> Result<Vec<(NaiveDate, f64)>, QuotientError>,
    {
        struct FnRange<F>(F);
        #[async_trait]
        impl<F> FxRange for FnRange<F>
        where
            F: Send
                + Sync
                + 'static
                + Fn(
                    String,
                    String,
                    NaiveDate,
                    NaiveDate,
                ) -> Result<Vec<(NaiveDate, f64)>, QuotientError>,
        {
            async fn range(
                &self,
                base: &str,
                symbol: &str,
                start: NaiveDate,
                end: NaiveDate,
            ) -> Result<Vec<(NaiveDate, f64)>, QuotientError> {
                (self.0)(base.to_string(), symbol.to_string(), start, end)
            }
        }
        Arc::new(FnRange(f))
    }
}

#[cfg(feature = "test-adapters")]
impl dyn FxLatest {
    /// Build a `FxLatest` from a closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn FxLatest>
    where
        F: Send + Sync + 'static + Fn(String, String) -> Result<f64, QuotientError>,
    {
        struct FnLatest<F>(F);
        #[async_trait]
        impl<F> FxLatest for FnLatest<F>
        where
            F: Send + Sync + 'static + Fn(String, String) -> Result<f64, QuotientError>,
        {
            async fn latest(&self, base: &str, symbol: &str) -> Result<f64, QuotientError> {
                (self.0)(base.to_string(), symbol.to_string())
            }
        }
        Arc::new(FnLatest(f))
    }
}
