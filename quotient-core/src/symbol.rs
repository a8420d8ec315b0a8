use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use quotient_types::{CatalogEntry, QuotientError};

/// Trim and uppercase a user-supplied ticker.
///
/// # Errors
/// Returns `InvalidArg` for empty input or input containing whitespace or
/// control characters after trimming.
pub fn normalize_symbol(raw: &str) -> Result<String, QuotientError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(QuotientError::InvalidArg("empty symbol".into()));
    }
    if trimmed.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(QuotientError::InvalidArg(format!(
            "symbol contains whitespace or control characters: {raw:?}"
        )));
    }
    Ok(trimmed.to_uppercase())
}

/// True when `symbol` has the shape of a fiat code: 3 to 5 ASCII uppercase letters.
#[must_use]
pub fn matches_fiat_pattern(symbol: &str) -> bool {
    (3..=5).contains(&symbol.len()) && symbol.bytes().all(|b| b.is_ascii_uppercase())
}

/// Pattern-first fiat classifier.
///
/// The pattern alone also matches most crypto tickers ("BTC", "ETH"), so a
/// symbol is fiat only when it matches the pattern and is listed in the
/// configured set of codes the rate source serves.
#[derive(Debug, Clone)]
pub struct FiatClassifier {
    codes: HashSet<String>,
}

impl FiatClassifier {
    /// Build from a list of uppercase codes. Codes not matching the pattern are ignored.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_uppercase())
            .filter(|c| matches_fiat_pattern(c))
            .collect();
        Self { codes }
    }

    /// Classify an already-normalized symbol.
    #[must_use]
    pub fn is_fiat(&self, symbol: &str) -> bool {
        matches_fiat_pattern(symbol) && self.codes.contains(symbol)
    }
}

#[derive(Debug, Clone)]
struct Slot {
    id: String,
    rank: Option<u32>,
}

impl Slot {
    // Lower rank wins, ranked beats unranked, then the smaller id.
    fn beats(&self, other: &Self) -> bool {
        let by_rank = match (self.rank, other.rank) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_rank.then_with(|| self.id.cmp(&other.id)) == Ordering::Less
    }
}

/// Uppercase ticker → canonical catalog id.
///
/// Built wholesale from a flattened catalog. When several assets share a
/// ticker the best market-cap rank wins, so the outcome does not depend on
/// page order.
#[derive(Debug, Clone, Default)]
pub struct SymbolMap {
    by_symbol: HashMap<String, Slot>,
}

impl SymbolMap {
    /// Index catalog entries by uppercased symbol.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CatalogEntry>,
    {
        let mut by_symbol: HashMap<String, Slot> = HashMap::new();
        for e in entries {
            let symbol = e.symbol.trim().to_uppercase();
            if symbol.is_empty() || e.id.is_empty() {
                continue;
            }
            let candidate = Slot {
                id: e.id,
                rank: e.market_cap_rank,
            };
            match by_symbol.get_mut(&symbol) {
                Some(existing) => {
                    if candidate.beats(existing) {
                        *existing = candidate;
                    }
                }
                None => {
                    by_symbol.insert(symbol, candidate);
                }
            }
        }
        Self { by_symbol }
    }

    /// Canonical id for an uppercase ticker.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.by_symbol.get(symbol).map(|s| s.id.as_str())
    }

    /// Number of distinct tickers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_symbol.len()
    }

    /// True when the catalog produced no usable entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_symbol.is_empty()
    }
}
