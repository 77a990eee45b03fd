//! Units of measurement and the small value types that carry them.
//!
//! Every page is created with a [Unit]; everything drawn on that page is
//! expressed in that unit and converted to points only when the content
//! stream is rendered.

use crate::PDFError;
use derive_more::{Add, Mul, Sub};

/// A unit of length understood by pages and the content renderer
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Unit {
    /// PostScript points, 1/72 of an inch. The unit of the output format.
    Pt = 0,
    Mm = 1,
    Cm = 2,
    In = 3,
}

// Points per unit, indexed by `Unit as usize`.
const POINTS_PER: [f64; 4] = [1.0, 72.0 / 25.4, 72.0 / 2.54, 72.0];

// CONVERSION[from][to]
const CONVERSION: [[f64; 4]; 4] = [
    [
        1.0,
        POINTS_PER[0] / POINTS_PER[1],
        POINTS_PER[0] / POINTS_PER[2],
        POINTS_PER[0] / POINTS_PER[3],
    ],
    [
        POINTS_PER[1] / POINTS_PER[0],
        1.0,
        POINTS_PER[1] / POINTS_PER[2],
        POINTS_PER[1] / POINTS_PER[3],
    ],
    [
        POINTS_PER[2] / POINTS_PER[0],
        POINTS_PER[2] / POINTS_PER[1],
        1.0,
        POINTS_PER[2] / POINTS_PER[3],
    ],
    [
        POINTS_PER[3] / POINTS_PER[0],
        POINTS_PER[3] / POINTS_PER[1],
        POINTS_PER[3] / POINTS_PER[2],
        1.0,
    ],
];

impl Unit {
    /// Convert `value`, measured in `self`, into `to`
    pub fn convert(self, value: f64, to: Unit) -> f64 {
        convert_unit(value, self, to)
    }

    /// Convert `value`, measured in `self`, into points
    pub fn to_pt(self, value: f64) -> f64 {
        convert_unit(value, self, Unit::Pt)
    }
}

impl TryFrom<i32> for Unit {
    type Error = PDFError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Unit::Pt),
            1 => Ok(Unit::Mm),
            2 => Ok(Unit::Cm),
            3 => Ok(Unit::In),
            _ => Err(PDFError::InvalidUnit(value)),
        }
    }
}

/// Convert a length between two units. Converting between identical units
/// returns `value` untouched.
pub fn convert_unit(value: f64, from: Unit, to: Unit) -> f64 {
    if from == to {
        return value;
    }
    CONVERSION[from as usize][to as usize] * value
}

/// A position, in whatever unit the page it is used on was created with
#[derive(Debug, Default, Copy, Clone, PartialEq, Add, Sub, Mul)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Point {
        Point { x, y }
    }

    /// Re-express this point in another unit
    pub fn change_unit(self, from: Unit, to: Unit) -> Point {
        Point {
            x: convert_unit(self.x, from, to),
            y: convert_unit(self.y, from, to),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

/// A width and height, in whatever unit the page it is used on was created with
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Size {
        Size { width, height }
    }

    /// Re-express this size in another unit
    pub fn change_unit(self, from: Unit, to: Unit) -> Size {
        Size {
            width: convert_unit(self.width, from, to),
            height: convert_unit(self.height, from, to),
        }
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Size { width, height }
    }
}
