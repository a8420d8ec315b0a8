//! Quotient-specific data transfer objects and configuration primitives.
//!
//! Everything here is plain data: price points and series, asset references,
//! catalog rows, the unified error type, and orchestrator configuration. The
//! behavior built on top of these types lives in `quotient-core` and `quotient`.
#![warn(missing_docs)]

mod asset;
mod capability;
mod config;
mod connector;
mod error;
mod series;

pub use asset::{AssetRef, CatalogEntry};
pub use capability::Capability;
pub use config::{CatalogConfig, DEFAULT_FIAT_SYMBOLS, DownsampleConfig, QuotientConfig};
pub use connector::ConnectorKey;
pub use error::QuotientError;
pub use series::{Point, Series};
