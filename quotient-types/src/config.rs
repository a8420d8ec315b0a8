//! Configuration types shared by the orchestrator and connectors.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::QuotientError;

/// ISO 4217 codes served by the default fiat rate source.
pub const DEFAULT_FIAT_SYMBOLS: &[&str] = &[
    "AUD", "BGN", "BRL", "CAD", "CHF", "CNY", "CZK", "DKK", "EUR", "GBP", "HKD", "HUF", "IDR",
    "ILS", "INR", "ISK", "JPY", "KRW", "MXN", "MYR", "NOK", "NZD", "PHP", "PLN", "RON", "SEK",
    "SGD", "THB", "TRY", "USD", "ZAR",
];

/// Largest page size the catalog source accepts.
const MAX_CATALOG_PER_PAGE: u32 = 250;

/// Crypto catalog refresh settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogConfig {
    /// How long a built symbol map stays fresh.
    pub ttl: Duration,
    /// Number of catalog pages fetched per refresh.
    pub pages: u32,
    /// Entries per catalog page (1..=250).
    pub per_page: u32,
    /// After a failed refresh, wait this long before asking the upstream
    /// again. A stale map, when one exists, is served in the meantime.
    pub retry_backoff: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            pages: 5,
            per_page: MAX_CATALOG_PER_PAGE,
            retry_backoff: Duration::from_secs(30),
        }
    }
}

/// Point-selection downsampling for long windows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DownsampleConfig {
    /// Requests spanning at least this many days are downsampled.
    pub min_days: u32,
    /// Minimum spacing between kept points, in seconds.
    pub min_spacing_secs: i64,
}

impl Default for DownsampleConfig {
    fn default() -> Self {
        Self {
            min_days: 90,
            min_spacing_secs: 3 * 3600,
        }
    }
}

/// Global configuration for the `Quotient` orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct QuotientConfig {
    /// Currency every leg is expressed in before taking the ratio.
    pub unit_currency: String,
    /// Timeout for individual upstream calls.
    pub provider_timeout: Duration,
    /// Largest accepted `days` window.
    pub max_days: u32,
    /// Catalog refresh behavior for the symbol resolver.
    pub catalog: CatalogConfig,
    /// Downsampling policy; `None` disables it.
    pub downsample: Option<DownsampleConfig>,
    /// Uppercase codes treated as fiat by the classifier.
    pub fiat_symbols: Vec<String>,
}

impl Default for QuotientConfig {
    fn default() -> Self {
        Self {
            unit_currency: "USD".to_string(),
            provider_timeout: Duration::from_secs(10),
            max_days: 3650,
            catalog: CatalogConfig::default(),
            downsample: Some(DownsampleConfig::default()),
            fiat_symbols: DEFAULT_FIAT_SYMBOLS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl QuotientConfig {
    /// Check internal consistency.
    ///
    /// # Errors
    /// Returns `InvalidArg` describing the first offending field.
    pub fn validate(&self) -> Result<(), QuotientError> {
        let unit = &self.unit_currency;
        if !(3..=5).contains(&unit.len()) || !unit.bytes().all(|b| b.is_ascii_uppercase()) {
            return Err(QuotientError::InvalidArg(format!(
                "unit_currency must be 3-5 uppercase letters, got {unit:?}"
            )));
        }
        if !self.fiat_symbols.iter().any(|s| s == unit) {
            return Err(QuotientError::InvalidArg(format!(
                "unit_currency {unit} is not listed in fiat_symbols"
            )));
        }
        if self.provider_timeout.is_zero() {
            return Err(QuotientError::InvalidArg(
                "provider_timeout must be non-zero".into(),
            ));
        }
        if self.max_days == 0 {
            return Err(QuotientError::InvalidArg("max_days must be >= 1".into()));
        }
        if self.catalog.ttl.is_zero() {
            return Err(QuotientError::InvalidArg(
                "catalog.ttl must be non-zero".into(),
            ));
        }
        if self.catalog.pages == 0 {
            return Err(QuotientError::InvalidArg(
                "catalog.pages must be >= 1".into(),
            ));
        }
        if !(1..=MAX_CATALOG_PER_PAGE).contains(&self.catalog.per_page) {
            return Err(QuotientError::InvalidArg(format!(
                "catalog.per_page must be within 1..={MAX_CATALOG_PER_PAGE}, got {}",
                self.catalog.per_page
            )));
        }
        if let Some(ds) = self.downsample
            && ds.min_spacing_secs <= 0
        {
            return Err(QuotientError::InvalidArg(
                "downsample.min_spacing_secs must be positive".into(),
            ));
        }
        Ok(())
    }
}
