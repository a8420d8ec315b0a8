use quotient_types::{Point, Series};

/// Thin a series so consecutive kept points are at least `min_spacing_secs` apart.
///
/// Greedy forward scan: the first point is always kept; every later point is
/// kept only if it lies at least `min_spacing_secs` after the last *kept*
/// point. The result is a subsequence of the input (no averaging or
/// interpolation).
///
/// Empty input, single-point input, and a non-positive spacing return the
/// input unchanged.
///
/// ```
/// use quotient_core::{downsample, Point, Series};
///
/// let hourly: Series = (0..7).map(|h| Point::new(h * 3600, h as f64)).collect();
/// let thinned = downsample(hourly, 3 * 3600);
/// let times: Vec<i64> = thinned.iter().map(|p| p.time).collect();
/// assert_eq!(times, vec![0, 10_800, 21_600]);
/// ```
#[must_use]
pub fn downsample(series: Series, min_spacing_secs: i64) -> Series {
    if series.len() < 2 || min_spacing_secs <= 0 {
        return series;
    }

    let mut kept: Vec<Point> = Vec::with_capacity(series.len());
    for p in series {
        match kept.last() {
            Some(last) if p.time - last.time < min_spacing_secs => {}
            _ => kept.push(p),
        }
    }
    Series::new(kept)
}
