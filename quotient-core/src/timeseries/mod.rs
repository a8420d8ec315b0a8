//! Time-series utilities shared by connectors and the orchestrator.
//!
//! Modules include:
//! - `align`: nearest-prior (as-of) join of a numerator and denominator series
//! - `resample`: point-selection downsampling to a minimum spacing
//! - `util`: timestamp conversion and synthesized series
/// Nearest-prior alignment of two series into a ratio series.
pub mod align;
/// Downsampling of dense series.
pub mod resample;
/// Timestamp helpers and synthesized series.
pub mod util;
