//! Quotient prices one asset in terms of another across fiat and crypto.
//!
//! Overview
//! - Classifies tickers as fiat or crypto and resolves crypto tickers to
//!   catalog ids through a time-bounded symbol cache.
//! - Routes each leg to the first registered connector exposing the needed
//!   role (catalog, market chart, fiat rates, crypto spot).
//! - Expresses both legs in a common unit currency, downsamples long windows,
//!   and divides them with nearest-prior alignment.
//!
//! Key behaviors and trade-offs
//! - Availability over completeness: an upstream outage, timeout, or disjoint
//!   pair of legs yields an empty series (or `None` spot), never an error.
//!   Configuration problems (unknown ticker, missing role, bad window) do error.
//! - Symbol cache: refreshed at most once per TTL even under concurrent load;
//!   a failed refresh keeps serving the previous map and backs off.
//! - Alignment is as-of: each base point divides by the most recent quote
//!   observation at or before it. Values are never interpolated.
//!
//! Examples
//! ```rust,ignore
//! use std::sync::Arc;
//! use quotient::Quotient;
//! use quotient_coingecko::CoinGeckoConnector;
//! use quotient_frankfurter::FrankfurterConnector;
//!
//! let q = Quotient::builder()
//!     .with_connector(Arc::new(CoinGeckoConnector::new_default()?))
//!     .with_connector(Arc::new(FrankfurterConnector::new_default()?))
//!     .build()?;
//!
//! let btc_in_eur = q.get_ratio_history("BTC", "EUR", 30).await?;
//! let eth_per_btc = q.get_spot_price("BTC", "ETH").await?;
//! ```
//!
//! See `demos/examples/` for runnable end-to-end programs.
#![warn(missing_docs)]

pub(crate) mod core;
mod resolver;
mod router;

pub use core::{Quotient, QuotientBuilder};

// Re-export core types for convenience
pub use quotient_core::{
    AsOfIndex, AssetRef, Capability, CatalogConfig, CatalogEntry, Clock, DEFAULT_FIAT_SYMBOLS,
    DownsampleConfig, Point, QuotientConfig, QuotientConnector, QuotientError, Series, SystemClock,
    align, downsample,
};
