use std::sync::Arc;

use quotient::{QuotientConnector, QuotientError};

/// Connectors for demos, in registration order.
///
/// With `QUOTIENT_DEMOS_USE_MOCK` set, a single fixture-backed mock serves
/// every role. Otherwise CoinGecko covers crypto and Frankfurter covers fiat.
///
/// # Errors
/// Returns an error if a live connector cannot build its HTTP client.
pub fn get_connectors() -> Result<Vec<Arc<dyn QuotientConnector>>, QuotientError> {
    if std::env::var("QUOTIENT_DEMOS_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        let mock: Arc<dyn QuotientConnector> = Arc::new(quotient_mock::MockConnector::new());
        return Ok(vec![mock]);
    }
    let crypto: Arc<dyn QuotientConnector> =
        Arc::new(quotient_coingecko::CoinGeckoConnector::new_default()?);
    let fiat: Arc<dyn QuotientConnector> =
        Arc::new(quotient_frankfurter::FrankfurterConnector::new_default()?);
    Ok(vec![crypto, fiat])
}

/// Orchestrator over [`get_connectors`] with default settings.
///
/// # Errors
/// Propagates connector construction and configuration errors.
pub fn build_quotient() -> Result<quotient::Quotient, QuotientError> {
    get_connectors()?
        .into_iter()
        .fold(quotient::Quotient::builder(), |b, c| b.with_connector(c))
        .build()
}

/// `YYYY-MM-DD HH:MM` for a unix timestamp in seconds.
#[must_use]
pub fn fmt_ts(ts: i64) -> String {
    match chrono::DateTime::from_timestamp(ts, 0) {
        Some(d) => d.format("%Y-%m-%d %H:%M").to_string(),
        None => ts.to_string(),
    }
}
