use quotient_types::{Point, QuotientError, Series};

/// As-of lookup over a sorted series: "latest point at or before `t`".
///
/// Built once per denominator and reused for every numerator query; each
/// lookup is a binary search over the contiguous timestamp column.
#[derive(Debug, Clone)]
pub struct AsOfIndex<'a> {
    times: Vec<i64>,
    points: &'a [Point],
}

impl<'a> AsOfIndex<'a> {
    /// Index the points of `series`.
    #[must_use]
    pub fn new(series: &'a Series) -> Self {
        let points = series.points();
        Self {
            times: points.iter().map(|p| p.time).collect(),
            points,
        }
    }

    /// The point with the greatest timestamp not exceeding `t`.
    #[must_use]
    pub fn at_or_before(&self, t: i64) -> Option<&'a Point> {
        let idx = self.times.partition_point(|&x| x <= t);
        idx.checked_sub(1).map(|i| &self.points[i])
    }

    /// Number of indexed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// True when nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Divide `numerator` by `denominator` using last-observation-carried-forward.
///
/// For every numerator point the denominator point with the greatest
/// timestamp not exceeding it is used. Numerator points are dropped when no
/// such denominator point exists or when it is exactly zero. Values are never
/// synthesized between observations.
///
/// The output keeps the numerator's timestamps and order, so its length never
/// exceeds the numerator's.
///
/// ```
/// use quotient_core::{align, Point, Series};
///
/// let a: Series = vec![Point::new(100, 10.0), Point::new(200, 20.0), Point::new(400, 40.0)].into();
/// let b: Series = vec![Point::new(50, 2.0), Point::new(150, 5.0), Point::new(350, 8.0)].into();
/// let r = align(&a, &b);
/// let got: Vec<(i64, f64)> = r.iter().map(|p| (p.time, p.value)).collect();
/// assert_eq!(got, vec![(100, 5.0), (200, 4.0), (400, 5.0)]);
/// ```
#[must_use]
pub fn align(numerator: &Series, denominator: &Series) -> Series {
    if numerator.is_empty() || denominator.is_empty() {
        return Series::empty();
    }

    let index = AsOfIndex::new(denominator);
    let out: Vec<Point> = numerator
        .iter()
        .filter_map(|p| {
            let d = index.at_or_before(p.time)?;
            if d.value == 0.0 {
                return None;
            }
            Some(Point::new(p.time, p.value / d.value))
        })
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        numerator = numerator.len(),
        denominator = denominator.len(),
        aligned = out.len(),
        "aligned ratio series"
    );

    Series::new(out)
}

/// Like [`align`], but reports `NoOverlap` when both inputs carry data and
/// nothing could be aligned.
///
/// # Errors
/// Returns `QuotientError::NoOverlap` when both series are non-empty and the
/// aligned result is empty.
pub fn align_checked(numerator: &Series, denominator: &Series) -> Result<Series, QuotientError> {
    let out = align(numerator, denominator);
    if out.is_empty() && !numerator.is_empty() && !denominator.is_empty() {
        return Err(QuotientError::NoOverlap);
    }
    Ok(out)
}
