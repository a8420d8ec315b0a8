use chrono::{DateTime, Utc};
use quotient_core::{AssetRef, QuotientError, Series, align_checked, downsample};

use crate::Quotient;
use crate::router::util::{absorb_unavailable, check_days, resolved_id};

impl Quotient {
    async fn leg_series(
        &self,
        asset: &AssetRef,
        days: u32,
        now: DateTime<Utc>,
    ) -> Result<Series, QuotientError> {
        match resolved_id(asset)? {
            Some(id) => self.crypto_series(id, days).await,
            None => self.fiat_series_at(asset.symbol(), days, now).await,
        }
    }

    /// Historical ratio of `base` to `quote` over the last `days` days.
    ///
    /// Both legs are fetched concurrently in the unit currency, thinned when
    /// the window reaches the downsampling threshold, and divided point by
    /// point using the most recent quote observation at or before each base
    /// timestamp.
    ///
    /// Behavior and trade-offs:
    /// - An unavailable leg (upstream failure, timeout, malformed data) and
    ///   disjoint legs yield `Ok` with an empty series, not an error.
    /// - Output timestamps are the base leg's; values are never interpolated.
    ///
    /// # Errors
    /// `InvalidArg` for `days` outside `1..=max_days` or a malformed symbol,
    /// `UnresolvedSymbol` for a crypto ticker missing from the catalog,
    /// `CatalogUnavailable` when the catalog has never loaded, and
    /// `Unsupported` when no connector serves a needed role.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "quotient::get_ratio_history", skip(self))
    )]
    pub async fn get_ratio_history(
        &self,
        base: &str,
        quote: &str,
        days: u32,
    ) -> Result<Series, QuotientError> {
        check_days(days, self.cfg.max_days)?;
        let (base_ref, quote_ref) = self.resolve_pair(base, quote).await?;
        // reject unresolved tickers before any price request goes out
        resolved_id(&base_ref)?;
        resolved_id(&quote_ref)?;

        // one instant for both legs so synthesized series line up
        let now = self.clock.now();
        let (num, den) = tokio::join!(
            self.leg_series(&base_ref, days, now),
            self.leg_series(&quote_ref, days, now),
        );
        let mut num = absorb_unavailable(num, base_ref.symbol())?;
        let mut den = absorb_unavailable(den, quote_ref.symbol())?;

        if let Some(policy) = self.cfg.downsample
            && days >= policy.min_days
        {
            num = downsample(num, policy.min_spacing_secs);
            den = downsample(den, policy.min_spacing_secs);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(numerator = num.len(), denominator = den.len(), "legs ready");

        absorb_unavailable(align_checked(&num, &den), "ratio")
    }

    pub(crate) async fn resolve_pair(
        &self,
        base: &str,
        quote: &str,
    ) -> Result<(AssetRef, AssetRef), QuotientError> {
        let base = quotient_core::normalize_symbol(base)?;
        let quote = quotient_core::normalize_symbol(quote)?;
        let mut resolved = self.resolve([base.as_str(), quote.as_str()]).await?;
        let base_ref = resolved
            .get(&base)
            .cloned()
            .ok_or_else(|| QuotientError::unresolved(base.clone()))?;
        let quote_ref = resolved
            .remove(&quote)
            .ok_or_else(|| QuotientError::unresolved(quote))?;
        Ok((base_ref, quote_ref))
    }
}
