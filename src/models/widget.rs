//! Widget description handed to the host for display
//!
//! The host owns actual text layout and composition; this is only the
//! serializable tree of what to show.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::color::Rgb;

/// Vertical linear gradient
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gradient {
    pub colors: Vec<Rgb>,
    pub locations: Vec<f64>,
}

impl Gradient {
    pub fn new(start: Rgb, end: Rgb) -> Self {
        Self {
            colors: vec![start, end],
            locations: vec![0.1, 1.0],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    Regular,
    Medium,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextElement {
    pub text: String,
    pub color: Rgb,
    pub font_size: f64,
    pub weight: FontWeight,
    pub align: Align,
    /// Host may shrink the text down to this factor to fit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_scale_factor: Option<f64>,
}

impl TextElement {
    pub fn new(text: impl Into<String>, color: Rgb, font_size: f64, weight: FontWeight) -> Self {
        Self {
            text: text.into(),
            color,
            font_size,
            weight,
            align: Align::Left,
            minimum_scale_factor: None,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn minimum_scale_factor(mut self, factor: f64) -> Self {
        self.minimum_scale_factor = Some(factor);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageElement {
    pub mime: String,
    /// Base64 encoded image bytes
    pub data: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetElement {
    Text(TextElement),
    Image(ImageElement),
    /// Flexible spacer when `length` is `None`
    Spacer { length: Option<f64> },
    Row { children: Vec<WidgetElement> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Widget {
    pub background: Gradient,
    pub elements: Vec<WidgetElement>,
    /// Advisory only, the host decides when to refresh
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_refresh: Option<DateTime<Utc>>,
}

impl Widget {
    pub fn new(background: Gradient) -> Self {
        Self {
            background,
            elements: Vec::new(),
            next_refresh: None,
        }
    }

    pub fn push(&mut self, element: WidgetElement) {
        self.elements.push(element);
    }

    pub fn add_text(&mut self, text: TextElement) {
        self.push(WidgetElement::Text(text));
    }

    pub fn add_spacer(&mut self, length: f64) {
        self.push(WidgetElement::Spacer { length: Some(length) });
    }

    /// All text shown by the widget, depth first
    #[cfg(test)]
    pub fn texts(&self) -> Vec<&str> {
        fn collect<'a>(elements: &'a [WidgetElement], out: &mut Vec<&'a str>) {
            for element in elements {
                match element {
                    WidgetElement::Text(t) => out.push(&t.text),
                    WidgetElement::Row { children } => collect(children, out),
                    _ => {}
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.elements, &mut out);
        out
    }

    pub fn images(&self) -> Vec<&ImageElement> {
        self.elements
            .iter()
            .filter_map(|e| match e {
                WidgetElement::Image(img) => Some(img),
                _ => None,
            })
            .collect()
    }
}
