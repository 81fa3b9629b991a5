//! Trend models

use serde::Serialize;

use super::color::TrendColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
    Unavailable,
}

/// Comparison of the two newest samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendResult {
    pub direction: TrendDirection,
    /// Percentage with two decimals, e.g. `5.0` for +5.00%
    pub percent_change: f64,
    pub color: TrendColor,
}

impl TrendResult {
    /// Label shown next to the title, e.g. `↑ +5.00%`
    pub fn label(&self) -> String {
        match self.direction {
            TrendDirection::Up => format!("↑ +{:.2}%", self.percent_change),
            TrendDirection::Down => format!("↓ {:.2}%", self.percent_change),
            TrendDirection::Flat => "→ 0.00%".to_string(),
            TrendDirection::Unavailable => "-".to_string(),
        }
    }
}
