use serde::{Deserialize, Serialize};

/// Classified reference to one leg of a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AssetRef {
    /// A fiat currency served by the daily rate source (e.g. "EUR").
    Fiat {
        /// Uppercase ISO currency code.
        symbol: String,
    },
    /// A crypto asset served by the market-chart source.
    Crypto {
        /// Uppercase ticker symbol as requested (e.g. "BTC").
        symbol: String,
        /// Canonical catalog id (e.g. "bitcoin"); `None` when the ticker is unknown.
        resolved_id: Option<String>,
    },
}

impl AssetRef {
    /// Ticker symbol for either variant.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            Self::Fiat { symbol } | Self::Crypto { symbol, .. } => symbol,
        }
    }

    /// True for the fiat variant.
    #[must_use]
    pub const fn is_fiat(&self) -> bool {
        matches!(self, Self::Fiat { .. })
    }

    /// Canonical catalog id for crypto assets that resolved.
    #[must_use]
    pub fn resolved_id(&self) -> Option<&str> {
        match self {
            Self::Fiat { .. } => None,
            Self::Crypto { resolved_id, .. } => resolved_id.as_deref(),
        }
    }
}

/// One row of the crypto asset catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Canonical id used by the market-chart source.
    pub id: String,
    /// Ticker symbol as published by the catalog (any case).
    pub symbol: String,
    /// Human-readable asset name.
    pub name: String,
    /// Market-capitalization rank (1 = largest); `None` when unranked.
    pub market_cap_rank: Option<u32>,
}
