use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::api::PriceFeed;
use crate::config::WidgetConfig;
use crate::models::{
    Align, ChartImage, FontWeight, Gradient, ImageElement, Rgb, Series, TextElement, TrendResult, Widget,
    WidgetElement,
};
use crate::services::{render_service, trend_service};
use crate::utils::{format_shanghai_time, next_refresh, WidgetError};

const TITLE: &str = "黄金 (XAU/CNH)";
const SUBTITLE: &str = "人民币 / 克";
const UPDATE_TIME_UNAVAILABLE: &str = "更新时间: N/A";

const BACKGROUND_START: Rgb = Rgb(0x19, 0x1a, 0x19);
const BACKGROUND_END: Rgb = Rgb(0x0d, 0x0d, 0x0d);
const ERROR_BACKGROUND_START: Rgb = Rgb(0x55, 0x11, 0x11);
const ERROR_BACKGROUND_END: Rgb = Rgb(0x33, 0x00, 0x00);

/// Run one refresh cycle: fetch, compute, render.
///
/// Always returns a displayable widget; failures end up in the error widget.
pub async fn refresh<F>(feed: &F, config: &WidgetConfig, now: DateTime<Utc>) -> Widget
where
    F: PriceFeed + ?Sized,
{
    let mut widget = match build_widget(feed, config).await {
        Ok(widget) => widget,
        Err(e) => {
            error!("Failed to build widget: {}", e);
            error_widget(&e)
        }
    };

    widget.next_refresh = Some(next_refresh(now, config.update_full_minutes, config.offset_minutes));
    widget
}

async fn build_widget<F>(feed: &F, config: &WidgetConfig) -> Result<Widget, WidgetError>
where
    F: PriceFeed + ?Sized,
{
    let series = feed.fetch(config.history_points, config.kline_type).await?;
    let trend = trend_service::evaluate_trend(&series)?;

    info!(
        "Fetched {} samples, trend {:?} ({:+.2}%)",
        series.len(),
        trend.direction,
        trend.percent_change
    );

    Ok(compose_widget(&series, &trend, config))
}

/// Lay out the normal widget for a series with at least one sample
pub fn compose_widget(series: &Series, trend: &TrendResult, config: &WidgetConfig) -> Widget {
    let trend_color = trend.color.rgb();
    let mut widget = Widget::new(Gradient::new(BACKGROUND_START, BACKGROUND_END));

    widget.add_spacer(3.0);

    widget.push(WidgetElement::Row {
        children: vec![
            WidgetElement::Text(TextElement::new(TITLE, Rgb::WHITE, 15.0, FontWeight::Bold)),
            WidgetElement::Spacer { length: None },
            WidgetElement::Text(
                TextElement::new(trend.label(), trend_color, 13.0, FontWeight::Bold)
                    .align(Align::Right)
                    .minimum_scale_factor(0.7),
            ),
        ],
    });

    widget.add_text(TextElement::new(SUBTITLE, Rgb::GRAY, 13.0, FontWeight::Medium));
    widget.add_spacer(17.0);

    match render_service::render_chart(
        &series.prices(),
        config.chart_size,
        config.smoothing,
        trend_color,
        config.line_width,
    ) {
        Ok(image) => widget.push(WidgetElement::Image(image_element(image))),
        Err(e) => {
            error!("Chart rendering failed: {}", e);
            widget.add_text(TextElement::new(
                render_service::PLACEHOLDER_MESSAGE,
                Rgb::GRAY,
                12.0,
                FontWeight::Regular,
            ));
        }
    }

    widget.add_spacer(10.0);

    let price = series.current().map(|s| s.price).unwrap_or_default();
    widget.add_text(
        TextElement::new(format_price(price), trend_color, 46.0, FontWeight::Regular)
            .align(Align::Right)
            .minimum_scale_factor(0.8),
    );

    widget.add_spacer(5.0);
    widget.add_text(
        TextElement::new(update_time_label(series), Rgb::GRAY, 12.0, FontWeight::Regular).align(Align::Right),
    );

    widget
}

/// Minimal widget carrying a localized message on a dark red background
pub fn error_widget(err: &WidgetError) -> Widget {
    let mut widget = Widget::new(Gradient::new(ERROR_BACKGROUND_START, ERROR_BACKGROUND_END));
    widget.add_text(TextElement::new(err.user_message(), Rgb::WHITE, 14.0, FontWeight::Regular));
    widget
}

pub fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

fn update_time_label(series: &Series) -> String {
    let Some(timestamp) = series.current().and_then(|s| s.timestamp_seconds) else {
        warn!("Timestamp missing in current sample");
        return UPDATE_TIME_UNAVAILABLE.to_string();
    };

    match format_shanghai_time(timestamp) {
        Some(time) => format!("更新: {}", time),
        None => {
            warn!("Timestamp out of range: {}", timestamp);
            UPDATE_TIME_UNAVAILABLE.to_string()
        }
    }
}

fn image_element(image: ChartImage) -> ImageElement {
    match image {
        ChartImage::Chart { png, width, height } => ImageElement {
            mime: "image/png".to_string(),
            data: BASE64.encode(png),
            width,
            height,
        },
        ChartImage::Placeholder { svg, width, height } => ImageElement {
            mime: "image/svg+xml".to_string(),
            data: BASE64.encode(svg),
            width,
            height,
        },
    }
}
