use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the quotient workspace.
///
/// Configuration-level failures (`UnresolvedSymbol`, `CatalogUnavailable`,
/// `InvalidArg`, `Unsupported`) propagate to callers. Data availability
/// failures (`UpstreamUnavailable`, `NoOverlap`) are absorbed by the
/// orchestrator and surface as empty results.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuotientError {
    /// The ticker is neither a known fiat code nor present in the crypto catalog.
    #[error("unresolved symbol: {symbol}")]
    UnresolvedSymbol {
        /// Uppercased symbol that failed to resolve.
        symbol: String,
    },

    /// The crypto catalog could not be fetched and no cached copy exists.
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// A rate or market-chart fetch failed or returned an unusable payload.
    #[error("upstream unavailable ({upstream}): {msg}")]
    UpstreamUnavailable {
        /// Capability or source label, e.g. "market-chart".
        upstream: String,
        /// Human-readable cause.
        msg: String,
    },

    /// Numerator and denominator time ranges never overlap.
    #[error("series do not overlap")]
    NoOverlap,

    /// Invalid input argument or configuration.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Issues with the returned or expected data (missing fields, bad values).
    #[error("data issue: {0}")]
    Data(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// A resource could not be found upstream.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "market chart for bitcoin".
        what: String,
    },

    /// No registered connector implements the requested capability.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// Capability label, e.g. "catalog".
        capability: String,
    },

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label.
        capability: String,
    },
}

impl QuotientError {
    /// Helper: build an `UnresolvedSymbol` error.
    pub fn unresolved(symbol: impl Into<String>) -> Self {
        Self::UnresolvedSymbol {
            symbol: symbol.into(),
        }
    }

    /// Helper: build an `UpstreamUnavailable` error.
    pub fn upstream(upstream: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            upstream: upstream.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `Unsupported` error for a capability label.
    pub fn unsupported(capability: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: capability.into(),
        }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// True for failures a caller should surface as a configuration problem
    /// (unknown ticker, no catalog, bad arguments, missing connector).
    #[must_use]
    pub const fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::UnresolvedSymbol { .. }
                | Self::CatalogUnavailable(_)
                | Self::InvalidArg(_)
                | Self::Unsupported { .. }
        )
    }

    /// True for failures that only mean "no data right now".
    #[must_use]
    pub const fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. }
                | Self::NoOverlap
                | Self::Data(_)
                | Self::Connector { .. }
                | Self::NotFound { .. }
                | Self::ProviderTimeout { .. }
        )
    }

    /// Collapse any data-availability failure into `UpstreamUnavailable`
    /// tagged with `upstream`; other errors pass through unchanged.
    #[must_use]
    pub fn into_upstream(self, upstream: &str) -> Self {
        match self {
            e @ (Self::UpstreamUnavailable { .. } | Self::NoOverlap) => e,
            e if e.is_data_unavailable() => Self::upstream(upstream, e.to_string()),
            other => other,
        }
    }
}
