use chrono::{DateTime, Days, NaiveDate, Utc};
use quotient_core::{
    Capability, Point, QuotientError, Series, daily_flat_series, date_to_timestamp, millis_to_secs,
    normalize_symbol,
};

use crate::Quotient;
use crate::router::util::check_days;

/// Unit-currency value of one `symbol` unit per day, from rates quoted as
/// "units of `symbol` per unit currency".
fn rates_to_series(upstream: &str, rates: Vec<(NaiveDate, f64)>) -> Result<Series, QuotientError> {
    if rates.is_empty() {
        return Err(QuotientError::upstream(
            upstream,
            "no rates published in window",
        ));
    }
    let mut points = Vec::with_capacity(rates.len());
    for (date, rate) in rates {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(QuotientError::upstream(
                upstream,
                format!("invalid rate {rate} on {date}"),
            ));
        }
        points.push(Point::new(date_to_timestamp(date), 1.0 / rate));
    }
    Ok(Series::new(points))
}

fn chart_to_series(upstream: &str, prices: Vec<(i64, f64)>) -> Result<Series, QuotientError> {
    if prices.is_empty() {
        return Err(QuotientError::upstream(upstream, "empty market chart"));
    }
    let mut points = Vec::with_capacity(prices.len());
    for (ms, price) in prices {
        if !price.is_finite() {
            return Err(QuotientError::upstream(
                upstream,
                format!("non-finite price at {ms}"),
            ));
        }
        points.push(Point::new(millis_to_secs(ms), price));
    }
    Ok(Series::new(points))
}

fn check_rate(upstream: &str, rate: f64) -> Result<f64, QuotientError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(QuotientError::upstream(
            upstream,
            format!("invalid rate {rate}"),
        ))
    }
}

impl Quotient {
    fn fiat_symbol(&self, raw: &str) -> Result<String, QuotientError> {
        let symbol = normalize_symbol(raw)?;
        if self.classifier.is_fiat(&symbol) {
            Ok(symbol)
        } else {
            Err(QuotientError::InvalidArg(format!(
                "{symbol} is not a configured fiat currency"
            )))
        }
    }

    pub(crate) async fn fiat_series_at(
        &self,
        symbol: &str,
        days: u32,
        now: DateTime<Utc>,
    ) -> Result<Series, QuotientError> {
        let unit = self.cfg.unit_currency.as_str();
        if symbol == unit {
            return Ok(daily_flat_series(now, days, 1.0));
        }

        let (name, fiat) = self.route(Capability::FiatRates, |c| c.as_fiat_rate_provider())?;
        let end = now.date_naive();
        let start = end
            .checked_sub_days(Days::new(u64::from(days)))
            .ok_or_else(|| QuotientError::InvalidArg(format!("{days} days before {end}")))?;
        let rates = Self::provider_call_with_timeout(
            name,
            Capability::FiatRates,
            self.cfg.provider_timeout,
            fiat.daily_rates(unit, symbol, start, end),
        )
        .await
        .map_err(|e| e.into_upstream(name))?;
        rates_to_series(name, rates)
    }

    pub(crate) async fn crypto_series(&self, id: &str, days: u32) -> Result<Series, QuotientError> {
        let (name, charts) =
            self.route(Capability::MarketChart, |c| c.as_market_chart_provider())?;
        let vs = self.cfg.unit_currency.to_ascii_lowercase();
        let prices = Self::provider_call_with_timeout(
            name,
            Capability::MarketChart,
            self.cfg.provider_timeout,
            charts.market_chart(id, &vs, days),
        )
        .await
        .map_err(|e| e.into_upstream(name))?;
        chart_to_series(name, prices)
    }

    pub(crate) async fn fiat_spot(&self, symbol: &str) -> Result<f64, QuotientError> {
        let unit = self.cfg.unit_currency.as_str();
        if symbol == unit {
            return Ok(1.0);
        }
        let (name, fiat) = self.route(Capability::FiatSpot, |c| c.as_fiat_rate_provider())?;
        let rate = Self::provider_call_with_timeout(
            name,
            Capability::FiatSpot,
            self.cfg.provider_timeout,
            fiat.latest_rate(unit, symbol),
        )
        .await
        .map_err(|e| e.into_upstream(name))?;
        Ok(1.0 / check_rate(name, rate)?)
    }

    pub(crate) async fn crypto_spot(&self, id: &str) -> Result<f64, QuotientError> {
        let (name, spot) = self.route(Capability::CryptoSpot, |c| c.as_crypto_spot_provider())?;
        let vs = self.cfg.unit_currency.to_ascii_lowercase();
        let price = Self::provider_call_with_timeout(
            name,
            Capability::CryptoSpot,
            self.cfg.provider_timeout,
            spot.spot_price(id, &vs),
        )
        .await
        .map_err(|e| e.into_upstream(name))?;
        if price.is_finite() && price >= 0.0 {
            Ok(price)
        } else {
            Err(QuotientError::upstream(
                name,
                format!("invalid price {price}"),
            ))
        }
    }

    /// Daily unit-currency value of one unit of fiat `symbol` over the last `days` days.
    ///
    /// The unit currency itself is synthesized as a flat 1.0 series of
    /// `days + 1` points ending now. Other codes come from the fiat rate
    /// connector, inverted, one point per published day at 00:00 UTC.
    ///
    /// # Errors
    /// `InvalidArg` for a bad window or a code outside the fiat list,
    /// `Unsupported` without a fiat rate connector, and `UpstreamUnavailable`
    /// for failed, timed-out, empty, or malformed upstream responses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "quotient::try_fetch_fiat_series", skip(self))
    )]
    pub async fn try_fetch_fiat_series(
        &self,
        symbol: &str,
        days: u32,
    ) -> Result<Series, QuotientError> {
        check_days(days, self.cfg.max_days)?;
        let symbol = self.fiat_symbol(symbol)?;
        self.fiat_series_at(&symbol, days, self.clock.now()).await
    }

    /// Like [`try_fetch_fiat_series`](Self::try_fetch_fiat_series), but any
    /// failure yields an empty series.
    pub async fn fetch_fiat_series(&self, symbol: &str, days: u32) -> Series {
        self.try_fetch_fiat_series(symbol, days)
            .await
            .unwrap_or_else(|_e| {
                #[cfg(feature = "tracing")]
                tracing::warn!(symbol = symbol, error = %_e, "fiat series unavailable");
                Series::empty()
            })
    }

    /// Unit-currency price history of catalog asset `id` over the last `days` days.
    ///
    /// Cadence is whatever the market-chart connector returns; timestamps
    /// are converted from milliseconds to seconds.
    ///
    /// # Errors
    /// `InvalidArg` for a bad window, `Unsupported` without a market-chart
    /// connector, and `UpstreamUnavailable` for failed, timed-out, empty, or
    /// malformed upstream responses.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "quotient::try_fetch_crypto_series", skip(self))
    )]
    pub async fn try_fetch_crypto_series(
        &self,
        id: &str,
        days: u32,
    ) -> Result<Series, QuotientError> {
        check_days(days, self.cfg.max_days)?;
        if id.trim().is_empty() {
            return Err(QuotientError::InvalidArg("empty asset id".into()));
        }
        self.crypto_series(id, days).await
    }

    /// Like [`try_fetch_crypto_series`](Self::try_fetch_crypto_series), but
    /// any failure yields an empty series.
    pub async fn fetch_crypto_series(&self, id: &str, days: u32) -> Series {
        self.try_fetch_crypto_series(id, days)
            .await
            .unwrap_or_else(|_e| {
                #[cfg(feature = "tracing")]
                tracing::warn!(id = id, error = %_e, "crypto series unavailable");
                Series::empty()
            })
    }

    /// Latest unit-currency value of one unit of fiat `symbol` (1.0 for the unit currency).
    ///
    /// # Errors
    /// As [`try_fetch_fiat_series`](Self::try_fetch_fiat_series).
    pub async fn try_fetch_fiat_spot(&self, symbol: &str) -> Result<f64, QuotientError> {
        let symbol = self.fiat_symbol(symbol)?;
        self.fiat_spot(&symbol).await
    }

    /// Latest fiat value, or `None` when it cannot be fetched.
    pub async fn fetch_fiat_spot(&self, symbol: &str) -> Option<f64> {
        self.try_fetch_fiat_spot(symbol)
            .await
            .inspect_err(|_e| {
                #[cfg(feature = "tracing")]
                tracing::warn!(symbol = symbol, error = %_e, "fiat spot unavailable");
            })
            .ok()
    }

    /// Current unit-currency price of catalog asset `id`.
    ///
    /// # Errors
    /// As [`try_fetch_crypto_series`](Self::try_fetch_crypto_series).
    pub async fn try_fetch_crypto_spot(&self, id: &str) -> Result<f64, QuotientError> {
        if id.trim().is_empty() {
            return Err(QuotientError::InvalidArg("empty asset id".into()));
        }
        self.crypto_spot(id).await
    }

    /// Current crypto price, or `None` when it cannot be fetched.
    pub async fn fetch_crypto_spot(&self, id: &str) -> Option<f64> {
        self.try_fetch_crypto_spot(id)
            .await
            .inspect_err(|_e| {
                #[cfg(feature = "tracing")]
                tracing::warn!(id = id, error = %_e, "crypto spot unavailable");
            })
            .ok()
    }
}
