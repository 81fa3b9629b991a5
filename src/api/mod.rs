//! Price feeds

use async_trait::async_trait;

use crate::models::Series;

pub mod alltick;

pub use alltick::ApiError;

/// Source of the price series for one refresh
#[async_trait]
pub trait PriceFeed {
    /// Latest `num_points` samples at `kline_type` resolution, oldest first
    async fn fetch(&self, num_points: u32, kline_type: u32) -> Result<Series, ApiError>;
}
