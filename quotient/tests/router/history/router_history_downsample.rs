use quotient::DownsampleConfig;

use crate::helpers::{clock, mock_builder, mock_quotient};

fn min_gap(s: &quotient::Series) -> i64 {
    s.points()
        .windows(2)
        .map(|w| w[1].time - w[0].time)
        .min()
        .unwrap_or(i64::MAX)
}

#[tokio::test]
async fn long_windows_are_thinned_to_three_hours() {
    let q = mock_quotient();
    let s = q.get_ratio_history("BTC", "USD", 90).await.unwrap();
    // 2161 hourly points thinned to every third hour
    assert_eq!(s.len(), 721);
    assert_eq!(min_gap(&s), 3 * 3600);
}

#[tokio::test]
async fn short_windows_keep_native_cadence() {
    let q = mock_quotient();
    let s = q.get_ratio_history("BTC", "USD", 89).await.unwrap();
    assert_eq!(s.len(), 89 * 24 + 1);
    assert_eq!(min_gap(&s), 3600);
}

#[tokio::test]
async fn policy_is_configurable() {
    let clock = clock();
    let off = mock_builder(&clock).downsample(None).build().unwrap();
    let s = off.get_ratio_history("BTC", "USD", 90).await.unwrap();
    assert_eq!(s.len(), 90 * 24 + 1);

    let eager = mock_builder(&clock)
        .downsample(Some(DownsampleConfig {
            min_days: 1,
            min_spacing_secs: 6 * 3600,
        }))
        .build()
        .unwrap();
    let s = eager.get_ratio_history("ETH", "USD", 2).await.unwrap();
    assert_eq!(s.len(), 9);
    assert_eq!(min_gap(&s), 6 * 3600);
}
