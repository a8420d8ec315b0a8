use quotient::AssetRef;

use crate::helpers::mock_quotient;

#[tokio::test]
async fn fiat_codes_skip_the_catalog() {
    let q = mock_quotient();
    let out = q.resolve(["eur", " USD "]).await.unwrap();
    assert_eq!(
        out.get("EUR"),
        Some(&AssetRef::Fiat {
            symbol: "EUR".into()
        })
    );
    assert!(out.get("USD").is_some_and(AssetRef::is_fiat));
}

#[tokio::test]
async fn duplicate_ticker_goes_to_best_ranked_asset() {
    let q = mock_quotient();
    let out = q.resolve(["btc"]).await.unwrap();
    // the fixture catalog lists a rank-4521 "btc" as well
    assert_eq!(out["BTC"].resolved_id(), Some("bitcoin"));
}

#[tokio::test]
async fn unknown_crypto_ticker_is_unresolved_not_an_error() {
    let q = mock_quotient();
    let out = q.resolve(["NOPE", "ETH"]).await.unwrap();
    assert_eq!(
        out["NOPE"],
        AssetRef::Crypto {
            symbol: "NOPE".into(),
            resolved_id: None
        }
    );
    assert_eq!(out["ETH"].resolved_id(), Some("ethereum"));
}

#[tokio::test]
async fn four_letter_non_fiat_code_is_crypto() {
    let q = mock_quotient();
    let out = q.resolve(["DOGE"]).await.unwrap();
    assert!(!out["DOGE"].is_fiat());
    assert_eq!(out["DOGE"].resolved_id(), Some("dogecoin"));
}

#[tokio::test]
async fn blank_symbol_is_invalid() {
    let q = mock_quotient();
    let err = q.resolve(["  "]).await.unwrap_err();
    assert!(matches!(err, quotient::QuotientError::InvalidArg(_)));
}
