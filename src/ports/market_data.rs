//! Price history port

use async_trait::async_trait;
use chrono::NaiveDateTime;

use super::models::PortResult;
use crate::domain::PriceSeries;

/// Source of hourly close prices for a trading pair
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the hourly series for `pair_id` on `chain`, ending at or before `anchor`
    ///
    /// An empty series means the pool had no candles; errors mean the fetch itself failed.
    async fn fetch_price_series(
        &self,
        chain: &str,
        pair_id: &str,
        anchor: NaiveDateTime,
    ) -> PortResult<PriceSeries>;
}
