//! quotient-core
//!
//! Core traits and utilities shared across the quotient workspace.
//!
//! - `connector`: the `QuotientConnector` trait and its capability role traits.
//! - `clock`: injectable wall clock used by caches and series synthesis.
//! - `symbol`: fiat/crypto classification and the catalog-backed symbol map.
//! - `timeseries`: normalization, downsampling, and nearest-prior alignment.
#![warn(missing_docs)]

/// Injectable wall clock.
pub mod clock;
/// Connector capability traits and the primary `QuotientConnector` interface.
pub mod connector;
/// Ticker normalization, fiat classification, and the symbol map.
pub mod symbol;
/// Time-series utilities for resampling and alignment.
pub mod timeseries;

pub use clock::{Clock, SystemClock};
pub use connector::QuotientConnector;
pub use symbol::{FiatClassifier, SymbolMap, normalize_symbol};
pub use timeseries::align::{AsOfIndex, align, align_checked};
pub use timeseries::resample::downsample;
pub use timeseries::util::{DAY_SECS, daily_flat_series, date_to_timestamp, millis_to_secs};

pub use quotient_types::*;
