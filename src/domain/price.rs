//! Hourly close-price history ending at the anchor tweet

use chrono::NaiveDateTime;

/// Upper bound on the series length (10 days of hourly candles)
pub const MAX_PRICE_POINTS: usize = 240;

/// A single hourly close
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub close: f64,
}

impl PricePoint {
    pub fn new(timestamp: NaiveDateTime, close: f64) -> Self {
        Self { timestamp, close }
    }

    fn is_valid(&self) -> bool {
        self.close.is_finite() && self.close > 0.0
    }
}

/// Chronological close prices, all at or before the anchor
///
/// An empty series is a valid result ("no candles"), distinct from a failed fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize raw points: drop invalid closes and points after `anchor`, sort
    /// ascending, keep the newest [`MAX_PRICE_POINTS`].
    pub fn from_points(points: impl IntoIterator<Item = PricePoint>, anchor: NaiveDateTime) -> Self {
        let mut points: Vec<PricePoint> = points
            .into_iter()
            .filter(|p| p.is_valid() && p.timestamp <= anchor)
            .collect();

        points.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        if points.len() > MAX_PRICE_POINTS {
            points.drain(..points.len() - MAX_PRICE_POINTS);
        }

        Self { points }
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}
