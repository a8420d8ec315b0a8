//! Price points and chronologically ordered series.

use serde::{Deserialize, Serialize};

/// A single observation: unix seconds and a finite value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unix timestamp in seconds.
    pub time: i64,
    /// Observed value (price, rate, or ratio).
    pub value: f64,
}

impl Point {
    /// Construct a point.
    #[must_use]
    pub const fn new(time: i64, value: f64) -> Self {
        Self { time, value }
    }
}

impl From<(i64, f64)> for Point {
    fn from((time, value): (i64, f64)) -> Self {
        Self { time, value }
    }
}

/// Chronologically ordered sequence of [`Point`]s.
///
/// Invariants upheld by every constructor:
/// - `time` strictly increases from one point to the next
/// - every `value` is finite
///
/// An empty series is the "data unavailable" state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Point>", into = "Vec<Point>")]
pub struct Series {
    points: Vec<Point>,
}

impl Series {
    /// Build a series from raw points.
    ///
    /// Points are sorted by time, non-finite values are discarded, and duplicate
    /// timestamps collapse to the last observation in input order.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        let mut points: Vec<Point> = points.into_iter().filter(|p| p.value.is_finite()).collect();
        // stable: equal timestamps keep input order so "last wins" below is well defined
        points.sort_by_key(|p| p.time);

        let mut out: Vec<Point> = Vec::with_capacity(points.len());
        for p in points {
            match out.last_mut() {
                Some(last) if last.time == p.time => *last = p,
                _ => out.push(p),
            }
        }
        Self { points: out }
    }

    /// The empty ("unavailable") series.
    #[must_use]
    pub const fn empty() -> Self {
        Self { points: Vec::new() }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when no data is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Borrow the points in ascending time order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterate over points in ascending time order.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    /// Earliest point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    /// Latest point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Inclusive `(first, last)` timestamps, or `None` when empty.
    #[must_use]
    pub fn time_range(&self) -> Option<(i64, i64)> {
        Some((self.first()?.time, self.last()?.time))
    }

    /// Consume the series and return its points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

impl From<Vec<Point>> for Series {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl From<Series> for Vec<Point> {
    fn from(series: Series) -> Self {
        series.points
    }
}

impl FromIterator<Point> for Series {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl IntoIterator for Series {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
