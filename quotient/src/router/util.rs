use quotient_core::{AssetRef, QuotientError};

/// Reject windows outside `1..=max_days`.
pub(crate) fn check_days(days: u32, max_days: u32) -> Result<(), QuotientError> {
    if days == 0 {
        return Err(QuotientError::InvalidArg("days must be >= 1".into()));
    }
    if days > max_days {
        return Err(QuotientError::InvalidArg(format!(
            "days must be <= {max_days}, got {days}"
        )));
    }
    Ok(())
}

/// Turn "no data right now" into the empty value; surface everything else.
///
/// Configuration problems (unknown ticker, missing connector role, bad
/// arguments) still propagate so callers can tell them apart from outages.
pub(crate) fn absorb_unavailable<T: Default>(
    res: Result<T, QuotientError>,
    leg: &str,
) -> Result<T, QuotientError> {
    match res {
        Ok(v) => Ok(v),
        Err(e) if e.is_data_unavailable() => {
            #[cfg(feature = "tracing")]
            tracing::warn!(leg = leg, error = %e, "upstream unavailable; returning empty result");
            #[cfg(not(feature = "tracing"))]
            let _ = leg;
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

/// The catalog id of a crypto leg, or `UnresolvedSymbol`.
pub(crate) fn resolved_id(asset: &AssetRef) -> Result<Option<&str>, QuotientError> {
    match asset {
        AssetRef::Fiat { .. } => Ok(None),
        AssetRef::Crypto {
            resolved_id: Some(id),
            ..
        } => Ok(Some(id.as_str())),
        AssetRef::Crypto { symbol, .. } => Err(QuotientError::unresolved(symbol.clone())),
    }
}
