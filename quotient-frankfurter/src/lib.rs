//! quotient-frankfurter
//!
//! Public connector that implements `QuotientConnector` on top of the
//! Frankfurter reference-rate API (ECB data, business days only).
#![warn(missing_docs)]

/// Adapter definitions and the production adapter backed by `reqwest`.
pub mod adapter;

use std::sync::Arc;

use adapter::{CloneArcAdapters, FxLatest, FxRange, RealAdapter};
use async_trait::async_trait;
use chrono::NaiveDate;
use quotient_core::{
    QuotientError,
    connector::{ConnectorKey, FiatRateProvider, QuotientConnector},
};

/// Public connector type. Production users construct it with
/// `FrankfurterConnector::new_default()`.
pub struct FrankfurterConnector {
    range: Arc<dyn FxRange>,
    latest: Arc<dyn FxLatest>,
}

impl FrankfurterConnector {
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

    /// Build from any adapter bundle.
    pub fn from_adapter<A: CloneArcAdapters + ?Sized>(adapter: &A) -> Self {
        Self {
            range: adapter.clone_arc_range(),
            latest: adapter.clone_arc_latest(),
        }
    }

    fn check_pair(base: &str, symbol: &str) -> Result<(), QuotientError> {
        for code in [base, symbol] {
            if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_uppercase()) {
                return Err(QuotientError::InvalidArg(format!(
                    "expected a 3-letter uppercase currency code, got {code:?}"
                )));
            }
        }
        if base == symbol {
            return Err(QuotientError::InvalidArg(format!(
                "base and symbol are both {base}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl QuotientConnector for FrankfurterConnector {
    fn name(&self) -> &'static str {
        adapter::CONNECTOR
    }

    fn vendor(&self) -> &'static str {
        "Frankfurter"
    }

    fn as_fiat_rate_provider(&self) -> Option<&dyn FiatRateProvider> {
        Some(self as &dyn FiatRateProvider)
    }
}

#[async_trait]
impl FiatRateProvider for FrankfurterConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "quotient_frankfurter::daily_rates",
            skip(self),
            fields(base = %base, symbol = %symbol, start = %start, end = %end),
        )
    )]
    async fn daily_rates(
        &self,
        base: &str,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<(NaiveDate, f64)>, QuotientError> {
        Self::check_pair(base, symbol)?;
        if start > end {
            return Err(QuotientError::InvalidArg(format!(
                "start {start} is after end {end}"
            )));
        }
        let rates = self.range.range(base, symbol, start, end).await?;
        #[cfg(feature = "tracing")]
        tracing::debug!(days = rates.len(), "fetched daily rates");
        Ok(rates)
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "quotient_frankfurter::latest_rate",
            skip(self),
            fields(base = %base, symbol = %symbol),
        )
    )]
    async fn latest_rate(&self, base: &str, symbol: &str) -> Result<f64, QuotientError> {
        Self::check_pair(base, symbol)?;
        self.latest.latest(base, symbol).await
    }
}
