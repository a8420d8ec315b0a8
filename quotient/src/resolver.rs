use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use quotient_core::{AssetRef, Capability, Clock, QuotientError, SymbolMap, normalize_symbol};

use crate::Quotient;

#[derive(Debug)]
struct Snapshot {
    map: Arc<SymbolMap>,
    built_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct State {
    current: Option<Arc<Snapshot>>,
    // last failed refresh and its message
    failure: Option<(DateTime<Utc>, String)>,
    // bumped by every completed refresh attempt, success or failure
    generation: u64,
}

impl State {
    fn stale_or_unavailable(&self, msg: &str) -> Result<Arc<SymbolMap>, QuotientError> {
        match &self.current {
            Some(snap) => Ok(Arc::clone(&snap.map)),
            None => Err(QuotientError::CatalogUnavailable(msg.to_string())),
        }
    }
}

enum Lookup {
    Fresh(Arc<SymbolMap>),
    // refresh recently failed; serve this instead of retrying
    BackingOff(Result<Arc<SymbolMap>, QuotientError>),
    // needs a refresh; carries the generation observed
    Refresh(u64),
}

/// Time-bounded cache of the catalog-derived symbol map.
///
/// Readers take a cheap snapshot under a short `RwLock`; refreshes are
/// serialized by an async mutex so concurrent callers that observe an expired
/// map share a single upstream refresh.
pub(crate) struct SymbolCache {
    ttl: Duration,
    retry_backoff: Duration,
    clock: Arc<dyn Clock>,
    state: RwLock<State>,
    refresh: tokio::sync::Mutex<()>,
}

// Whether an event stamped `since` still answers a caller asking at `now`.
// An event at or after `now` always does, even with a zero window.
fn covers(since: DateTime<Utc>, now: DateTime<Utc>, window: Duration) -> bool {
    since >= now || now.signed_duration_since(since).to_std().is_ok_and(|age| age < window)
}

impl SymbolCache {
    pub(crate) fn new(ttl: Duration, retry_backoff: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            ttl,
            retry_backoff,
            clock,
            state: RwLock::new(State::default()),
            refresh: tokio::sync::Mutex::new(()),
        }
    }

    fn lookup(&self, now: DateTime<Utc>) -> Lookup {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(snap) = &state.current
            && covers(snap.built_at, now, self.ttl)
        {
            return Lookup::Fresh(Arc::clone(&snap.map));
        }
        if let Some((failed_at, msg)) = &state.failure
            && covers(*failed_at, now, self.retry_backoff)
        {
            return Lookup::BackingOff(state.stale_or_unavailable(msg));
        }
        Lookup::Refresh(state.generation)
    }

    // Outcome of a refresh that completed after `seen` was observed, if any.
    fn settled_since(&self, seen: u64) -> Option<Result<Arc<SymbolMap>, QuotientError>> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if state.generation == seen {
            return None;
        }
        match (&state.current, &state.failure) {
            (_, Some((_, msg))) => Some(state.stale_or_unavailable(msg)),
            (Some(snap), None) => Some(Ok(Arc::clone(&snap.map))),
            // invalidated since; nothing to share
            (None, None) => None,
        }
    }

    // Completion time of a refresh, never earlier than the instant it started for.
    fn finished_at(&self, started: DateTime<Utc>) -> DateTime<Utc> {
        self.clock.now().max(started)
    }

    fn publish(&self, map: SymbolMap, built_at: DateTime<Utc>) -> Arc<SymbolMap> {
        let map = Arc::new(map);
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.current = Some(Arc::new(Snapshot {
            map: Arc::clone(&map),
            built_at,
        }));
        state.failure = None;
        state.generation += 1;
        map
    }

    fn record_failure(&self, failed_at: DateTime<Utc>, msg: String) -> Option<Arc<SymbolMap>> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.failure = Some((failed_at, msg));
        state.generation += 1;
        state.current.as_ref().map(|snap| Arc::clone(&snap.map))
    }

    /// Current map, refreshing through `load` when it is missing or expired.
    ///
    /// On refresh failure the previous map is served if there is one;
    /// otherwise the failure surfaces as `CatalogUnavailable`. Either way the
    /// upstream is left alone for `retry_backoff`. Callers queued behind an
    /// in-flight refresh take its outcome instead of loading again.
    pub(crate) async fn get_or_refresh<F, Fut>(
        &self,
        now: DateTime<Utc>,
        load: F,
    ) -> Result<Arc<SymbolMap>, QuotientError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<SymbolMap, QuotientError>>,
    {
        let seen = match self.lookup(now) {
            Lookup::Fresh(map) => return Ok(map),
            Lookup::BackingOff(res) => return res,
            Lookup::Refresh(generation) => generation,
        };

        let _flight = self.refresh.lock().await;
        // whoever held the lock before us may have already refreshed
        if let Some(res) = self.settled_since(seen) {
            return res;
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("refreshing symbol map");

        let loaded = load().await;
        let done = self.finished_at(now);
        match loaded {
            Ok(map) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(symbols = map.len(), "symbol map refreshed");
                Ok(self.publish(map, done))
            }
            // a missing catalog role is a wiring problem, not an outage
            Err(e @ QuotientError::Unsupported { .. }) => Err(e),
            Err(e) => {
                let msg = e.to_string();
                match self.record_failure(done, msg.clone()) {
                    Some(stale) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            error = %msg,
                            "catalog refresh failed; serving stale symbol map"
                        );
                        Ok(stale)
                    }
                    None => Err(QuotientError::CatalogUnavailable(msg)),
                }
            }
        }
    }

    /// Forget the cached map and any recorded failure.
    pub(crate) fn invalidate(&self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.current = None;
        state.failure = None;
    }
}

impl Quotient {
    /// Fetch every configured catalog page concurrently and index the result.
    ///
    /// Any page failure fails the whole refresh so a partial catalog never
    /// replaces a complete one.
    async fn load_symbol_map(&self) -> Result<SymbolMap, QuotientError> {
        let (name, catalog) = self.route(Capability::Catalog, |c| c.as_catalog_provider())?;
        let per_page = self.cfg.catalog.per_page;
        let timeout = self.cfg.provider_timeout;

        let tasks = (1..=self.cfg.catalog.pages).map(|page| {
            Self::provider_call_with_timeout(
                name,
                Capability::Catalog,
                timeout,
                catalog.catalog_page(page, per_page),
            )
        });
        let pages = futures::future::join_all(tasks).await;

        let mut entries = Vec::new();
        for page in pages {
            entries.extend(page?);
        }
        let map = SymbolMap::from_entries(entries);
        if map.is_empty() {
            return Err(QuotientError::upstream(name, "catalog returned no entries"));
        }
        Ok(map)
    }

    /// Classify and resolve ticker symbols.
    ///
    /// Symbols are trimmed and uppercased; the returned map is keyed by the
    /// normalized form. Fiat codes never touch the catalog. Crypto tickers
    /// missing from the catalog come back with `resolved_id: None`.
    ///
    /// # Errors
    /// `InvalidArg` for a blank or malformed symbol, `CatalogUnavailable`
    /// when crypto symbols are requested and no catalog has ever been loaded,
    /// `Unsupported` when no connector publishes a catalog.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "quotient::resolve", skip(self, symbols))
    )]
    pub async fn resolve<I, S>(
        &self,
        symbols: I,
    ) -> Result<HashMap<String, AssetRef>, QuotientError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out = HashMap::new();
        let mut crypto = Vec::new();
        for raw in symbols {
            let symbol = normalize_symbol(raw.as_ref())?;
            if self.classifier.is_fiat(&symbol) {
                out.insert(symbol.clone(), AssetRef::Fiat { symbol });
            } else {
                crypto.push(symbol);
            }
        }
        if crypto.is_empty() {
            return Ok(out);
        }

        let map = self
            .symbols
            .get_or_refresh(self.clock.now(), || self.load_symbol_map())
            .await?;
        for symbol in crypto {
            let resolved_id = map.get(&symbol).map(str::to_string);
            out.insert(
                symbol.clone(),
                AssetRef::Crypto {
                    symbol,
                    resolved_id,
                },
            );
        }
        Ok(out)
    }
}
