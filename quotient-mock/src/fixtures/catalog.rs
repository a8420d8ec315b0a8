use quotient_core::CatalogEntry;

// (id, symbol, name, market_cap_rank)
const ENTRIES: &[(&str, &str, &str, Option<u32>)] = &[
    ("bitcoin", "btc", "Bitcoin", Some(1)),
    ("ethereum", "eth", "Ethereum", Some(2)),
    ("tether", "usdt", "Tether", Some(3)),
    ("solana", "sol", "Solana", Some(5)),
    ("dogecoin", "doge", "Dogecoin", Some(8)),
    ("cardano", "ada", "Cardano", Some(10)),
    ("litecoin", "ltc", "Litecoin", Some(20)),
    // shares a ticker with bitcoin; must lose the tie-break
    ("batcat", "btc", "BatCat", Some(4521)),
    ("zero-coin", "zero", "Zero Coin", None),
    // wired to forced failures and latency in the connector
    ("fail-coin", "fail", "Fail Coin", None),
    ("slow-coin", "slow", "Slow Coin", None),
];

/// One page of the fixture catalog (1-based pages).
pub fn page(page: u32, per_page: u32) -> Vec<CatalogEntry> {
    let per_page = per_page.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(per_page);
    ENTRIES
        .iter()
        .skip(start)
        .take(per_page)
        .map(|&(id, symbol, name, rank)| CatalogEntry {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            market_cap_rank: rank,
        })
        .collect()
}
