use tracing::warn;

use crate::models::{Series, TrendColor, TrendDirection, TrendResult};
use crate::utils::errors::WidgetError;

/// Compare the newest sample against the one before it.
///
/// Needs at least two samples. The percentage is rounded to two decimals with
/// `f64::round`, i.e. halves round away from zero. A non-positive previous
/// price yields `Unavailable` rather than an error.
pub fn evaluate_trend(series: &Series) -> Result<TrendResult, WidgetError> {
    let (Some(previous), Some(current)) = (series.previous(), series.current()) else {
        return Err(WidgetError::InsufficientSamples(series.len()));
    };

    if previous.price <= 0.0 {
        warn!(
            "Previous price was zero or invalid ({}), cannot calculate trend",
            previous.price
        );
        return Ok(TrendResult {
            direction: TrendDirection::Unavailable,
            percent_change: 0.0,
            color: TrendColor::Gray,
        });
    }

    let percent_change = (((current.price / previous.price) - 1.0) * 10000.0).round() / 100.0;

    let (direction, color) = if current.price > previous.price {
        (TrendDirection::Up, TrendColor::Red)
    } else if current.price < previous.price {
        (TrendDirection::Down, TrendColor::Green)
    } else {
        (TrendDirection::Flat, TrendColor::Orange)
    };

    Ok(TrendResult {
        direction,
        percent_change,
        color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sample;

    fn pair(previous: f64, current: f64) -> Series {
        Series::from_samples(vec![Sample::new(previous, 0), Sample::new(current, 60)])
    }

    #[test]
    fn test_up() {
        let trend = evaluate_trend(&pair(100.0, 105.0)).unwrap();
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.percent_change, 5.0);
        assert_eq!(trend.color, TrendColor::Red);
        assert_eq!(trend.label(), "↑ +5.00%");
    }

    #[test]
    fn test_down() {
        let trend = evaluate_trend(&pair(100.0, 95.0)).unwrap();
        assert_eq!(trend.direction, TrendDirection::Down);
        assert_eq!(trend.percent_change, -5.0);
        assert_eq!(trend.color, TrendColor::Green);
        assert_eq!(trend.label(), "↓ -5.00%");
    }

    #[test]
    fn test_flat() {
        let trend = evaluate_trend(&pair(100.0, 100.0)).unwrap();
        assert_eq!(trend.direction, TrendDirection::Flat);
        assert_eq!(trend.percent_change, 0.0);
        assert_eq!(trend.color, TrendColor::Orange);
        assert_eq!(trend.label(), "→ 0.00%");
    }

    #[test]
    fn test_invalid_previous_price() {
        for previous in [0.0, -3.0] {
            let trend = evaluate_trend(&pair(previous, 105.0)).unwrap();
            assert_eq!(trend.direction, TrendDirection::Unavailable);
            assert_eq!(trend.percent_change, 0.0);
            assert_eq!(trend.color, TrendColor::Gray);
            assert_eq!(trend.label(), "-");
        }
    }

    #[test]
    fn test_only_last_two_samples_count() {
        let series = Series::from_samples(vec![
            Sample::new(50.0, 0),
            Sample::new(200.0, 60),
            Sample::new(202.0, 120),
        ]);
        let trend = evaluate_trend(&series).unwrap();
        assert_eq!(trend.percent_change, 1.0);
    }

    #[test]
    fn test_small_change_rounds_to_two_decimals() {
        // ±0.1234% -> ±0.12%
        assert_eq!(evaluate_trend(&pair(1000.0, 1001.234)).unwrap().percent_change, 0.12);
        assert_eq!(evaluate_trend(&pair(1000.0, 998.766)).unwrap().percent_change, -0.12);
    }

    #[test]
    fn test_insufficient_samples() {
        let one = Series::from_samples(vec![Sample::new(100.0, 0)]);
        assert!(matches!(evaluate_trend(&one), Err(WidgetError::InsufficientSamples(1))));
        assert!(matches!(
            evaluate_trend(&Series::default()),
            Err(WidgetError::InsufficientSamples(0))
        ));
    }
}
