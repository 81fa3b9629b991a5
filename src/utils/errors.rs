use thiserror::Error;

use crate::api::alltick::ApiError;

const NOT_ENOUGH_DATA_MESSAGE: &str = "无法获取足够黄金数据进行比较。";
const SINGLE_POINT_MESSAGE: &str = "仅获取到1个数据点，无法计算变化。";

/// Chart rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid chart size: {0}x{1}")]
    InvalidSize(f64, f64),
    #[error("Chart path has no drawable segments")]
    EmptyPath,
    #[error("PNG encoding failed: {0}")]
    Encoding(String),
    #[error("Placeholder drawing failed: {0}")]
    Placeholder(String),
}

/// Errors that end a refresh cycle in the error widget
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Failed to fetch price series: {0}")]
    Fetch(#[from] ApiError),
    #[error("Not enough samples to compare (got {0}, need 2)")]
    InsufficientSamples(usize),
    #[error("Failed to render chart: {0}")]
    Render(#[from] RenderError),
}

impl WidgetError {
    /// Localized message shown on the error widget
    pub fn user_message(&self) -> &'static str {
        match self {
            WidgetError::InsufficientSamples(1) => SINGLE_POINT_MESSAGE,
            _ => NOT_ENOUGH_DATA_MESSAGE,
        }
    }
}
