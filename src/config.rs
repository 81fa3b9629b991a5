use std::str::FromStr;

use tracing::warn;

use crate::models::{ChartSize, SmoothingMode};

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    /// Custom kline endpoint; `None` uses the public alltick.co one
    pub api_url: Option<String>,
    pub code: String,
    /// Candles fetched per refresh
    pub history_points: u32,
    /// 1 = one minute candles
    pub kline_type: u32,
    pub update_full_minutes: i64,
    pub offset_minutes: i64,
    pub chart_size: ChartSize,
    pub line_width: f64,
    pub output_dir: String,
    pub smoothing: SmoothingMode,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            code: "XAUCNH".to_string(),
            history_points: 50,
            kline_type: 1,
            update_full_minutes: 5,
            offset_minutes: 0,
            chart_size: ChartSize::default(),
            line_width: 5.5,
            output_dir: "widget_out".to_string(),
            smoothing: SmoothingMode::default(),
        }
    }
}

impl WidgetConfig {
    /// Load from process environment; `widget_parameter` (first CLI argument)
    /// takes precedence over `WIDGET_PARAMETER`
    pub fn from_env(widget_parameter: Option<String>) -> Self {
        Self::from_lookup(|key| std::env::var(key).ok(), widget_parameter)
    }

    pub fn from_lookup<F>(lookup: F, widget_parameter: Option<String>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parameter = widget_parameter.or_else(|| lookup("WIDGET_PARAMETER"));

        Self {
            api_url: lookup("ALLTICK_API_URL").or(defaults.api_url),
            code: lookup("GOLD_CODE").unwrap_or(defaults.code),
            history_points: parse_or(&lookup, "HISTORY_POINTS", defaults.history_points),
            kline_type: parse_or(&lookup, "KLINE_TYPE", defaults.kline_type),
            update_full_minutes: parse_or(&lookup, "UPDATE_FULL_MINUTES", defaults.update_full_minutes),
            offset_minutes: parse_or(&lookup, "OFFSET_MINUTES", defaults.offset_minutes),
            chart_size: ChartSize {
                width: parse_or(&lookup, "CHART_WIDTH", defaults.chart_size.width),
                height: parse_or(&lookup, "CHART_HEIGHT", defaults.chart_size.height),
            },
            line_width: parse_or(&lookup, "CHART_LINE_WIDTH", defaults.line_width),
            output_dir: lookup("WIDGET_OUTPUT_DIR").unwrap_or(defaults.output_dir),
            smoothing: SmoothingMode::from_parameter(parameter.as_deref(), defaults.smoothing),
        }
    }
}

impl SmoothingMode {
    /// Resolve the widget parameter: "0" straight, "1" smooth, anything else
    /// falls back to `default`
    pub fn from_parameter(parameter: Option<&str>, default: SmoothingMode) -> Self {
        match parameter.map(str::trim) {
            None | Some("") => default,
            Some("0") => SmoothingMode::Straight,
            Some("1") => SmoothingMode::Smooth,
            Some(other) => {
                warn!("Invalid smoothPath parameter: \"{}\". Using default: {:?}", other, default);
                default
            }
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Invalid value for {}: \"{}\". Using default: {:?}", key, raw, default);
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = WidgetConfig::from_lookup(lookup_from(&[]), None);
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.chart_size, ChartSize { width: 535.0, height: 80.0 });
        assert_eq!(config.smoothing, SmoothingMode::Straight);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = WidgetConfig::from_lookup(
            lookup_from(&[
                ("HISTORY_POINTS", "120"),
                ("CHART_WIDTH", "wide"),
                ("CHART_LINE_WIDTH", "3"),
                ("WIDGET_PARAMETER", "1"),
            ]),
            None,
        );
        assert_eq!(config.history_points, 120);
        assert_eq!(config.api_url, None);
        assert_eq!(config.chart_size.width, 535.0);
        assert_eq!(config.line_width, 3.0);
        assert_eq!(config.smoothing, SmoothingMode::Smooth);
    }

    #[test]
    fn test_custom_endpoint() {
        let config = WidgetConfig::from_lookup(lookup_from(&[("ALLTICK_API_URL", "http://localhost:8080/kline")]), None);
        assert_eq!(config.api_url.as_deref(), Some("http://localhost:8080/kline"));
    }

    #[test]
    fn test_cli_parameter_wins() {
        let config = WidgetConfig::from_lookup(lookup_from(&[("WIDGET_PARAMETER", "1")]), Some("0".to_string()));
        assert_eq!(config.smoothing, SmoothingMode::Straight);
    }

    #[test]
    fn test_smoothing_parameter() {
        let default = SmoothingMode::Straight;
        assert_eq!(SmoothingMode::from_parameter(Some("1"), default), SmoothingMode::Smooth);
        assert_eq!(SmoothingMode::from_parameter(Some(" 0 "), default), SmoothingMode::Straight);
        assert_eq!(SmoothingMode::from_parameter(Some("2"), default), default);
        assert_eq!(SmoothingMode::from_parameter(Some("smooth"), default), default);
        assert_eq!(SmoothingMode::from_parameter(None, default), default);
    }
}
