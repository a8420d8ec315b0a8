use proptest::prelude::*;

use crate::helpers::{mock_quotient, times};

const SYMBOLS: &[&str] = &["BTC", "ETH", "SOL", "USD", "EUR", "GBP", "JPY"];

fn catalog_id(symbol: &str) -> Option<&'static str> {
    match symbol {
        "BTC" => Some("bitcoin"),
        "ETH" => Some("ethereum"),
        "SOL" => Some("solana"),
        _ => None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 24, .. ProptestConfig::default() })]
    #[test]
    fn ratio_keeps_base_timestamps(
        base in prop::sample::select(SYMBOLS),
        quote in prop::sample::select(SYMBOLS),
        days in 1u32..=120,
    ) {
        tokio_test::block_on(async move {
            let q = mock_quotient();
            let ratio = q.get_ratio_history(base, quote, days).await.unwrap();
            let leg = match catalog_id(base) {
                Some(id) => q.fetch_crypto_series(id, days).await,
                None => q.fetch_fiat_series(base, days).await,
            };

            let out = times(&ratio);
            assert!(out.windows(2).all(|w| w[0] < w[1]));
            // every output instant is one the base leg observed
            let base_times = times(&leg);
            assert!(out.iter().all(|t| base_times.binary_search(t).is_ok()));
            assert!(ratio.iter().all(|p| p.value.is_finite() && p.value > 0.0));
            if base == quote {
                assert!(!ratio.is_empty());
                assert!(ratio.iter().all(|p| p.value == 1.0));
            }
        });
    }
}
