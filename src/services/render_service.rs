//! Chart rasterization
//!
//! The sparkline is stroked onto a transparent pixmap so it composites onto
//! the widget background. With fewer than two values a small SVG placeholder
//! carrying a centered message is produced instead.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};
use tracing::debug;

use crate::models::{ChartImage, ChartPath, ChartSize, PathCommand, Rgb, SmoothingMode};
use crate::services::chart_service;
use crate::utils::errors::RenderError;

pub const PLACEHOLDER_MESSAGE: &str = "图表数据不足";
const PLACEHOLDER_FONT_SIZE: f64 = 10.0;

/// Normalize, build the path and rasterize it, or fall back to the placeholder
pub fn render_chart(
    values: &[f64],
    size: ChartSize,
    smoothing: SmoothingMode,
    color: Rgb,
    line_width: f64,
) -> Result<ChartImage, RenderError> {
    if values.len() < 2 {
        debug!("Not enough data points for chart drawing ({})", values.len());
        return render_placeholder(size);
    }

    let points = chart_service::normalize_series(values, size);
    let path = chart_service::build_path(&points, smoothing);
    rasterize_path(&path, size, color, line_width)
}

/// Stroke a chart path onto a transparent PNG of the chart's size
pub fn rasterize_path(
    path: &ChartPath,
    size: ChartSize,
    color: Rgb,
    line_width: f64,
) -> Result<ChartImage, RenderError> {
    if path.len() < 2 {
        return Err(RenderError::EmptyPath);
    }

    let (width, height) = pixel_size(size)?;
    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::InvalidSize(size.width, size.height))?;

    let mut builder = PathBuilder::new();
    for command in &path.commands {
        match command {
            PathCommand::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathCommand::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathCommand::CurveTo { to, cp1, cp2 } => builder.cubic_to(
                cp1.x as f32,
                cp1.y as f32,
                cp2.x as f32,
                cp2.y as f32,
                to.x as f32,
                to.y as f32,
            ),
        }
    }
    let skia_path = builder.finish().ok_or(RenderError::EmptyPath)?;

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.0, color.1, color.2, 0xff);
    paint.anti_alias = true;

    let stroke = Stroke {
        width: line_width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    pixmap.stroke_path(&skia_path, &paint, &stroke, Transform::identity(), None);

    let png = pixmap
        .encode_png()
        .map_err(|e| RenderError::Encoding(e.to_string()))?;

    Ok(ChartImage::Chart { png, width, height })
}

/// Transparent SVG with the "not enough chart data" message centered in gray
pub fn render_placeholder(size: ChartSize) -> Result<ChartImage, RenderError> {
    let (width, height) = pixel_size(size)?;
    let mut svg = String::new();

    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        let muted = RGBColor(Rgb::GRAY.0, Rgb::GRAY.1, Rgb::GRAY.2);
        let style = ("sans-serif", PLACEHOLDER_FONT_SIZE)
            .into_font()
            .color(&muted)
            .pos(Pos::new(HPos::Center, VPos::Center));

        root.draw(&Text::new(
            PLACEHOLDER_MESSAGE,
            ((width / 2) as i32, (height / 2) as i32),
            style,
        ))
        .map_err(|e| RenderError::Placeholder(e.to_string()))?;

        root.present()
            .map_err(|e| RenderError::Placeholder(e.to_string()))?;
    }

    Ok(ChartImage::Placeholder { svg, width, height })
}

fn pixel_size(size: ChartSize) -> Result<(u32, u32), RenderError> {
    let valid = |v: f64| v.is_finite() && v >= 1.0 && v <= u32::MAX as f64;
    if !valid(size.width) || !valid(size.height) {
        return Err(RenderError::InvalidSize(size.width, size.height));
    }
    Ok((size.width.ceil() as u32, size.height.ceil() as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(image: &ChartImage) -> Pixmap {
        match image {
            ChartImage::Chart { png, .. } => Pixmap::decode_png(png).expect("valid png"),
            other => panic!("expected chart, got {:?}", other),
        }
    }

    #[test]
    fn test_chart_is_transparent_with_visible_stroke() {
        let values = [562.3, 563.1, 561.8, 564.0];
        for mode in [SmoothingMode::Straight, SmoothingMode::Smooth] {
            let image = render_chart(&values, ChartSize::default(), mode, Rgb::RED, 5.5).unwrap();
            let pixmap = decode(&image);

            assert_eq!((pixmap.width(), pixmap.height()), (535, 80));
            // corner far from the line stays transparent
            assert_eq!(pixmap.pixel(0, 0).map(|p| p.alpha()), Some(0));
            assert!(pixmap.pixels().iter().any(|p| p.alpha() == 0xff));
        }
    }

    #[test]
    fn test_short_series_renders_placeholder() {
        for values in [&[][..], &[100.0][..]] {
            let image = render_chart(values, ChartSize::default(), SmoothingMode::Straight, Rgb::RED, 5.5).unwrap();
            let ChartImage::Placeholder { svg, width, height } = image else {
                panic!("expected placeholder");
            };
            assert!(svg.contains("<svg"));
            assert!(svg.contains(PLACEHOLDER_MESSAGE));
            assert_eq!((width, height), (535, 80));
        }
    }

    #[test]
    fn test_move_only_path_is_rejected() {
        let path = chart_service::build_path(
            &chart_service::normalize_series(&[1.0], ChartSize::default()),
            SmoothingMode::Straight,
        );
        assert!(matches!(
            rasterize_path(&path, ChartSize::default(), Rgb::RED, 5.5),
            Err(RenderError::EmptyPath)
        ));
    }

    #[test]
    fn test_invalid_size() {
        let size = ChartSize { width: 0.0, height: 80.0 };
        assert!(matches!(
            render_chart(&[1.0, 2.0], size, SmoothingMode::Straight, Rgb::RED, 5.5),
            Err(RenderError::InvalidSize(_, _))
        ));
    }
}
