use core::fmt;
use serde::{Deserialize, Serialize};

/// Capability labels for routing, errors, and telemetry.
///
/// Connector roles map one-to-one to the first five variants; the last two
/// label orchestrator operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Paginated crypto asset catalog.
    Catalog,
    /// Daily fiat exchange-rate ranges.
    FiatRates,
    /// Latest fiat exchange rate.
    FiatSpot,
    /// Crypto market-chart history.
    MarketChart,
    /// Current crypto price.
    CryptoSpot,

    /// Aligned ratio history between two assets.
    RatioHistory,
    /// Current cross-rate between two assets.
    SpotPrice,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::FiatRates => "fiat-rates",
            Self::FiatSpot => "fiat-spot",
            Self::MarketChart => "market-chart",
            Self::CryptoSpot => "crypto-spot",
            Self::RatioHistory => "ratio-history",
            Self::SpotPrice => "spot-price",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
