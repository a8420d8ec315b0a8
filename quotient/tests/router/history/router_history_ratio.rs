use crate::helpers::{DAY, NOW, mock_quotient, times};

#[tokio::test]
async fn crypto_over_fiat_uses_base_timestamps() {
    let q = mock_quotient();
    let s = q.get_ratio_history("BTC", "EUR", 30).await.unwrap();

    // hourly bitcoin chart; every point has an earlier EUR fixing
    assert_eq!(s.len(), 30 * 24 + 1);
    assert_eq!(s.first().unwrap().time, NOW - 30 * DAY);
    assert_eq!(s.last().unwrap().time, NOW);
    for p in s.iter() {
        assert!(p.value > 37_000.0 && p.value < 38_600.0, "{p:?}");
    }
}

#[tokio::test]
async fn self_ratio_is_exactly_one() {
    let q = mock_quotient();
    for (sym, len) in [("BTC", 7 * 24 + 1), ("USD", 8)] {
        let s = q.get_ratio_history(sym, sym, 7).await.unwrap();
        assert_eq!(s.len(), len, "{sym}");
        assert!(s.iter().all(|p| p.value == 1.0), "{sym}");
    }
}

#[tokio::test]
async fn unit_currency_against_itself_has_days_plus_one_points() {
    let q = mock_quotient();
    let s = q.get_ratio_history("usd", "USD", 10).await.unwrap();
    let expected: Vec<i64> = (0..=10).map(|i| NOW - (10 - i) * DAY).collect();
    assert_eq!(times(&s), expected);
}

#[tokio::test]
async fn crypto_cross_divides_pointwise() {
    let q = mock_quotient();
    let s = q.get_ratio_history("ETH", "BTC", 3).await.unwrap();
    assert_eq!(s.len(), 3 * 24 + 1);
    let want = 2_300.0 / 42_000.0;
    for p in s.iter() {
        assert!((p.value - want).abs() < 1e-12, "{p:?}");
    }
}

#[tokio::test]
async fn fiat_cross_is_daily() {
    let q = mock_quotient();
    let s = q.get_ratio_history("GBP", "EUR", 14).await.unwrap();
    // weekdays from 2024-02-16 through 2024-03-01
    assert_eq!(s.len(), 11);
    assert!(s.iter().all(|p| p.time.rem_euclid(DAY) == 0));
    for p in s.iter() {
        // GBP is worth 0.9 / 0.8 EUR in the fixture
        assert!((p.value - 1.125).abs() < 1e-9, "{p:?}");
    }
}

#[tokio::test]
async fn fiat_over_crypto_inverts_the_chart() {
    let q = mock_quotient();
    let s = q.get_ratio_history("USD", "BTC", 2).await.unwrap();
    assert_eq!(times(&s), vec![NOW - 2 * DAY, NOW - DAY, NOW]);
    for p in s.iter() {
        assert!((p.value * 42_000.0 - 1.0).abs() < 0.02, "{p:?}");
    }
}
