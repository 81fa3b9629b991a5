//! Data models for the gold widget
//!
//! Samples and series come in from the price feed, chart and trend models are
//! produced by the services, and the widget model is what the host displays.

pub mod chart;
pub mod color;
pub mod sample;
pub mod trend;
pub mod widget;

// Re-export commonly used types for convenience
pub use chart::{ChartImage, ChartPath, ChartSize, PathCommand, Point2D, SmoothingMode};
pub use color::{Rgb, TrendColor};
pub use sample::{Sample, Series};
pub use trend::{TrendDirection, TrendResult};
pub use widget::{Align, FontWeight, Gradient, ImageElement, TextElement, Widget, WidgetElement};
