//! GeckoTerminal OHLCV response types

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::PricePoint;

/// Index of the close price inside an `[ts, open, high, low, close, volume]` entry
const CLOSE_INDEX: usize = 4;

#[derive(Debug, Deserialize)]
pub(crate) struct OhlcvResponse {
    pub data: OhlcvData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OhlcvData {
    pub attributes: OhlcvAttributes,
}

#[derive(Debug, Deserialize)]
pub(crate) struct OhlcvAttributes {
    #[serde(default)]
    pub ohlcv_list: Vec<Vec<Value>>,
}

fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Convert raw OHLCV entries into close-price points
///
/// Entries with fewer than five fields or unreadable values are skipped.
pub fn parse_ohlcv(entries: &[Vec<Value>]) -> Vec<PricePoint> {
    entries
        .iter()
        .filter(|entry| entry.len() > CLOSE_INDEX)
        .filter_map(|entry| {
            let ts = as_f64(&entry[0])? as i64;
            let close = as_f64(&entry[CLOSE_INDEX])?;
            let timestamp = DateTime::from_timestamp(ts, 0)?.naive_utc();
            Some(PricePoint::new(timestamp, close))
        })
        .collect()
}
