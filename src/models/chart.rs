//! Chart geometry models

/// A point in drawing units, origin at the top-left of the chart box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub(crate) fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Drawing box of the chart
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ChartSize {
    fn default() -> Self {
        Self {
            width: 535.0,
            height: 80.0,
        }
    }
}

/// Straight segments or smoothed curves between chart points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SmoothingMode {
    #[default]
    Straight,
    Smooth,
}

/// A single drawing instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point2D),
    LineTo(Point2D),
    CurveTo {
        to: Point2D,
        cp1: Point2D,
        cp2: Point2D,
    },
}

/// Ordered drawing instructions for one render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartPath {
    pub commands: Vec<PathCommand>,
}

impl ChartPath {
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Points the path passes through (control points excluded)
    #[cfg(test)]
    pub fn vertices(&self) -> Vec<Point2D> {
        self.commands
            .iter()
            .map(|c| match c {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => *p,
                PathCommand::CurveTo { to, .. } => *to,
            })
            .collect()
    }
}

/// Output of the chart renderer
#[derive(Debug, Clone, PartialEq)]
pub enum ChartImage {
    /// Transparent PNG of the stroked path
    Chart { png: Vec<u8>, width: u32, height: u32 },
    /// SVG with a centered "not enough data" message
    Placeholder { svg: String, width: u32, height: u32 },
}
