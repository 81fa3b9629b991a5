use crate::models::{ChartPath, ChartSize, PathCommand, Point2D, SmoothingMode};

/// Below this range the series is treated as flat and padded by a fixed amount
const FLAT_RANGE_THRESHOLD: f64 = 0.1;
const FLAT_PADDING: f64 = 0.5;
const RANGE_PADDING_RATIO: f64 = 0.05;

/// Scale raw values into the chart box.
///
/// Larger values plot higher (smaller y). The value range is padded so the
/// line never touches the top or bottom edge, and a flat series is padded by
/// ±0.5 so it still gets a usable height. A single value lands at `x = width`.
pub fn normalize_series(values: &[f64], size: ChartSize) -> Vec<Point2D> {
    if values.is_empty() {
        return Vec::new();
    }

    let mut min_value = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max_value = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut range = max_value - min_value;

    if range < FLAT_RANGE_THRESHOLD {
        min_value -= FLAT_PADDING;
        max_value += FLAT_PADDING;
    } else {
        min_value -= range * RANGE_PADDING_RATIO;
        max_value += range * RANGE_PADDING_RATIO;
    }
    range = max_value - min_value;

    let count = values.len();
    let step = if count > 1 {
        size.width / (count - 1) as f64
    } else {
        0.0
    };

    values
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = if count > 1 { step * i as f64 } else { size.width };
            // an overflowing range (finite values near f64::MAX) has no usable scale
            let y_ratio = if range == 0.0 || !range.is_finite() {
                0.5
            } else {
                (value - min_value) / range
            };
            let y = (size.height - y_ratio * size.height).clamp(0.0, size.height);
            Point2D { x, y }
        })
        .collect()
}

/// Turn chart points into drawing instructions
pub fn build_path(points: &[Point2D], smoothing: SmoothingMode) -> ChartPath {
    let Some(first) = points.first() else {
        return ChartPath::default();
    };

    let mut commands = Vec::with_capacity(points.len());
    commands.push(PathCommand::MoveTo(*first));

    match smoothing {
        SmoothingMode::Straight => {
            commands.extend(points[1..].iter().map(|p| PathCommand::LineTo(*p)));
        }
        SmoothingMode::Smooth => {
            commands.extend(points.windows(2).map(|pair| smooth_segment(&pair[0], &pair[1])));
        }
    }

    ChartPath { commands }
}

/// Cubic segment with horizontal tangents at both ends.
///
/// Control points sit a quarter of the way in from each end on the x axis and
/// keep their endpoint's height, so the curve never leaves the segment's box.
fn smooth_segment(from: &Point2D, to: &Point2D) -> PathCommand {
    let mid = from.midpoint(to);
    PathCommand::CurveTo {
        to: *to,
        cp1: Point2D {
            x: (mid.x + from.x) / 2.0,
            y: from.y,
        },
        cp2: Point2D {
            x: (mid.x + to.x) / 2.0,
            y: to.y,
        },
    }
}
