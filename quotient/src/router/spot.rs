use quotient_core::{AssetRef, QuotientError};

use crate::Quotient;
use crate::router::util::{absorb_unavailable, resolved_id};

impl Quotient {
    async fn leg_spot(&self, asset: &AssetRef) -> Result<Option<f64>, QuotientError> {
        match resolved_id(asset)? {
            Some(id) => self.crypto_spot(id).await.map(Some),
            None => self.fiat_spot(asset.symbol()).await.map(Some),
        }
    }

    /// Current cross-rate: how many units of `quote` one unit of `base` buys.
    ///
    /// Both legs are priced concurrently in the unit currency and divided.
    /// Returns `Ok(None)` when either leg is unavailable or the quote leg is
    /// worth zero.
    ///
    /// # Errors
    /// Same configuration errors as [`get_ratio_history`](Self::get_ratio_history).
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "quotient::get_spot_price", skip(self))
    )]
    pub async fn get_spot_price(
        &self,
        base: &str,
        quote: &str,
    ) -> Result<Option<f64>, QuotientError> {
        let (base_ref, quote_ref) = self.resolve_pair(base, quote).await?;
        resolved_id(&base_ref)?;
        resolved_id(&quote_ref)?;

        let (num, den) = tokio::join!(self.leg_spot(&base_ref), self.leg_spot(&quote_ref));
        let num = absorb_unavailable(num, base_ref.symbol())?;
        let den = absorb_unavailable(den, quote_ref.symbol())?;

        Ok(match (num, den) {
            (Some(n), Some(d)) if d != 0.0 => Some(n / d),
            _ => None,
        })
    }
}
