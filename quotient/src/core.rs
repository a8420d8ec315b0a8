use std::sync::Arc;
use std::time::Duration;

use quotient_core::{
    Capability, Clock, DownsampleConfig, FiatClassifier, QuotientConfig, QuotientConnector,
    QuotientError, SystemClock,
};

use crate::resolver::SymbolCache;

/// Orchestrator that resolves symbols, routes fetches to connectors, and
/// assembles ratio series.
pub struct Quotient {
    pub(crate) connectors: Vec<Arc<dyn QuotientConnector>>,
    pub(crate) cfg: QuotientConfig,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) classifier: FiatClassifier,
    pub(crate) symbols: SymbolCache,
}

/// Builder for constructing a `Quotient` orchestrator with custom configuration.
pub struct QuotientBuilder {
    connectors: Vec<Arc<dyn QuotientConnector>>,
    cfg: QuotientConfig,
    clock: Option<Arc<dyn Clock>>,
}

impl Default for QuotientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuotientBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connectors; register at least one via
    ///   [`with_connector`](Self::with_connector).
    /// - Defaults: USD unit currency, 10s provider timeout, one-hour symbol
    ///   cache over 5 catalog pages of 250, 3h downsampling from 90 days up.
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: QuotientConfig::default(),
            clock: None,
        }
    }

    /// Register a provider connector.
    ///
    /// Behavior and trade-offs:
    /// - Each capability is served by the first registered connector exposing it,
    ///   so registration order decides which upstream wins when roles overlap.
    /// - Duplicates are not deduplicated; avoid registering the same connector twice.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn QuotientConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Replace the whole configuration. Later setters still apply on top.
    #[must_use]
    pub fn config(mut self, cfg: QuotientConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Currency every leg is expressed in before dividing (default `USD`).
    ///
    /// Must also be listed in the fiat symbols; checked at [`build`](Self::build).
    #[must_use]
    pub fn unit_currency(mut self, code: impl Into<String>) -> Self {
        self.cfg.unit_currency = code.into().trim().to_uppercase();
        self
    }

    /// Set the per-provider request timeout.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// How long a built symbol map stays fresh. Must be non-zero.
    #[must_use]
    pub const fn symbol_ttl(mut self, ttl: Duration) -> Self {
        self.cfg.catalog.ttl = ttl;
        self
    }

    /// Pause between catalog refresh attempts after a failure.
    #[must_use]
    pub const fn catalog_retry_backoff(mut self, backoff: Duration) -> Self {
        self.cfg.catalog.retry_backoff = backoff;
        self
    }

    /// Number of catalog pages fetched per refresh.
    #[must_use]
    pub const fn catalog_pages(mut self, pages: u32) -> Self {
        self.cfg.catalog.pages = pages;
        self
    }

    /// Entries per catalog page (1..=250).
    #[must_use]
    pub const fn catalog_per_page(mut self, per_page: u32) -> Self {
        self.cfg.catalog.per_page = per_page;
        self
    }

    /// Downsampling policy for long windows; `None` keeps every point.
    #[must_use]
    pub const fn downsample(mut self, policy: Option<DownsampleConfig>) -> Self {
        self.cfg.downsample = policy;
        self
    }

    /// Largest accepted `days` window.
    #[must_use]
    pub const fn max_days(mut self, days: u32) -> Self {
        self.cfg.max_days = days;
        self
    }

    /// Codes classified as fiat. Defaults to the codes the fiat rate source publishes.
    #[must_use]
    pub fn fiat_symbols<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.cfg.fiat_symbols = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_uppercase())
            .collect();
        self
    }

    /// Inject the clock used for cache freshness and series windows.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Build the `Quotient` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via
    /// [`with_connector`](Self::with_connector) or the configuration is inconsistent.
    pub fn build(self) -> Result<Quotient, QuotientError> {
        if self.connectors.is_empty() {
            return Err(QuotientError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }
        self.cfg.validate()?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        Ok(Quotient {
            classifier: FiatClassifier::new(&self.cfg.fiat_symbols),
            symbols: SymbolCache::new(
                self.cfg.catalog.ttl,
                self.cfg.catalog.retry_backoff,
                Arc::clone(&clock),
            ),
            clock,
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

impl Quotient {
    /// Start building a new `Quotient` instance.
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use quotient::Quotient;
    /// use quotient_coingecko::CoinGeckoConnector;
    /// use quotient_frankfurter::FrankfurterConnector;
    ///
    /// let q = Quotient::builder()
    ///     .with_connector(Arc::new(CoinGeckoConnector::new_default()?))
    ///     .with_connector(Arc::new(FrankfurterConnector::new_default()?))
    ///     .provider_timeout(std::time::Duration::from_secs(5))
    ///     .build()?;
    /// let btc_eur = q.get_ratio_history("BTC", "EUR", 30).await?;
    /// ```
    #[must_use]
    pub fn builder() -> QuotientBuilder {
        QuotientBuilder::new()
    }

    /// Effective configuration.
    #[must_use]
    pub const fn config(&self) -> &QuotientConfig {
        &self.cfg
    }

    /// Drop the cached symbol map; the next crypto lookup refetches the catalog.
    pub fn invalidate_symbols(&self) {
        self.symbols.invalidate();
    }

    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "quotient::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: Duration,
        fut: Fut,
    ) -> Result<T, QuotientError>
    where
        Fut: core::future::Future<Output = Result<T, QuotientError>>,
    {
        (tokio::time::timeout(timeout, fut).await).unwrap_or_else(|_| {
            Err(QuotientError::provider_timeout(
                connector_name,
                capability.as_str(),
            ))
        })
    }

    /// First registered connector exposing the role `pick` selects.
    pub(crate) fn route<'a, P: ?Sized + 'a>(
        &'a self,
        capability: Capability,
        pick: impl Fn(&'a dyn QuotientConnector) -> Option<&'a P>,
    ) -> Result<(&'static str, &'a P), QuotientError> {
        self.connectors
            .iter()
            .find_map(|c| {
                let c: &'a dyn QuotientConnector = c.as_ref();
                pick(c).map(|p| (c.name(), p))
            })
            .ok_or_else(|| QuotientError::unsupported(capability.as_str()))
    }
}
