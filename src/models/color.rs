//! Color models shared by the chart renderer and the widget description

use serde::{Serialize, Serializer};

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(0xff, 0xff, 0xff);
    pub const RED: Rgb = Rgb(0xff, 0x3b, 0x30);
    pub const GREEN: Rgb = Rgb(0x34, 0xc7, 0x59);
    pub const ORANGE: Rgb = Rgb(0xff, 0x95, 0x00);
    pub const GRAY: Rgb = Rgb(0x8e, 0x8e, 0x93);

    /// Format as `#rrggbb`
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Semantic trend color, A-share convention (up is red, down is green)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendColor {
    Red,
    Green,
    Orange,
    Gray,
}

impl TrendColor {
    pub fn rgb(&self) -> Rgb {
        match self {
            TrendColor::Red => Rgb::RED,
            TrendColor::Green => Rgb::GREEN,
            TrendColor::Orange => Rgb::ORANGE,
            TrendColor::Gray => Rgb::GRAY,
        }
    }
}
