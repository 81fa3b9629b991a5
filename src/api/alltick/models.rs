use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::{Sample, Series};

/// Troy ounce in grams, quotes come per ounce
pub const GRAMS_PER_OUNCE: f64 = 31.1034768;

/// Upstream success code in the `ret` field
const RET_OK: i64 = 200;

/// Request body for POST /quote/kline
#[derive(Debug, Clone, Serialize)]
pub struct KlineRequest {
    pub data: KlineQuery,
}

/// Kline query parameters; numbers are sent as strings
#[derive(Debug, Clone, Serialize)]
pub struct KlineQuery {
    pub code: String,
    pub kline_type: String,
    pub kline_timestamp_end: String,
    pub query_kline_num: String,
    pub adjust_type: String,
    #[serde(rename = "isStock")]
    pub is_stock: bool,
}

impl KlineRequest {
    /// Latest `num_points` candles of `kline_type` (1 = one minute)
    pub fn latest(code: &str, num_points: u32, kline_type: u32) -> Self {
        Self {
            data: KlineQuery {
                code: code.to_string(),
                kline_type: kline_type.to_string(),
                kline_timestamp_end: "0".to_string(),
                query_kline_num: num_points.to_string(),
                adjust_type: "0".to_string(),
                is_stock: false,
            },
        }
    }
}

/// Response from POST /quote/kline
#[derive(Debug, Clone, Deserialize)]
pub struct KlineResponse {
    pub ret: i64,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub data: Option<KlineData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct KlineData {
    #[serde(default)]
    pub kline_list: Vec<Candle>,
}

/// One candle; upstream sends numbers as strings, occasionally as numbers
#[derive(Debug, Clone, Deserialize)]
pub struct Candle {
    #[serde(default)]
    pub timestamp: Value,
    #[serde(default)]
    pub close_price: Value,
}

impl Candle {
    pub fn timestamp_seconds(&self) -> Option<i64> {
        match &self.timestamp {
            Value::String(s) => s.trim().parse().ok(),
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn close_price(&self) -> Option<f64> {
        let price = match &self.close_price {
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Number(n) => n.as_f64(),
            _ => None,
        }?;
        price.is_finite().then_some(price)
    }
}

impl KlineResponse {
    /// Validate the envelope and convert candles to a per-gram series.
    ///
    /// Candles without a usable close price are skipped.
    pub fn into_series(self) -> Result<Series, ApiError> {
        if self.ret != RET_OK {
            return Err(ApiError::Upstream {
                ret: self.ret,
                msg: self.msg.unwrap_or_default(),
            });
        }

        let candles = self.data.map(|d| d.kline_list).unwrap_or_default();
        if candles.is_empty() {
            return Err(ApiError::Empty);
        }

        let samples = candles
            .iter()
            .filter_map(|candle| {
                let Some(price) = candle.close_price() else {
                    warn!("Skipping candle with invalid close price: {}", candle.close_price);
                    return None;
                };
                let timestamp_seconds = candle.timestamp_seconds();
                if timestamp_seconds.is_none() {
                    warn!("Candle timestamp could not be parsed: {}", candle.timestamp);
                }
                Some(Sample {
                    price: price / GRAMS_PER_OUNCE,
                    timestamp_seconds,
                })
            })
            .collect();

        Ok(Series::from_samples(samples))
    }
}

/// Error type for price feed operations
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network/request error, including timeouts
    #[error("Request Error: {0}")]
    Request(String),
    /// Non-2xx HTTP status
    #[error("HTTP Error ({0}): {1}")]
    Http(u16, String),
    /// Body was not the expected JSON
    #[error("Deserialization Error: {0}")]
    Deserialization(String),
    /// Upstream answered with a non-success `ret`
    #[error("Upstream Error (ret {ret}): {msg}")]
    Upstream { ret: i64, msg: String },
    /// Success status but no candles
    #[error("Empty kline list")]
    Empty,
}
