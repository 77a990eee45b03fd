//! 2D transformation matrices for content positioning.

use crate::writer::Real;
use std::fmt;

/// An affine transformation matrix, as understood by the `cm` operator.
///
/// The matrix is represented as [a, b, c, d, e, f] corresponding to:
/// ```text
/// | a  b  0 |
/// | c  d  0 |
/// | e  f  1 |
/// ```
///
/// # Composing transforms
///
/// Transforms can be chained using [`then`](Transform::then) or the builder methods
/// [`with_translate`](Transform::with_translate) and [`with_scale`](Transform::with_scale).
/// Operations are applied in the order they're chained.
///
/// ```
/// use pdf_compose::Transform;
///
/// // scale a unit square up to 100 by 50 points, then move it 72 points right and up
/// let transform = Transform::scale(100.0, 50.0).with_translate(72.0, 72.0);
/// assert_eq!(transform.to_string(), "100 0 0 50 72 72");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no transformation)
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a translation transform, in points
    pub fn translate(x: f64, y: f64) -> Self {
        Transform {
            e: x,
            f: y,
            ..Transform::identity()
        }
    }

    /// Create a scaling transform
    pub fn scale(sx: f64, sy: f64) -> Self {
        Transform {
            a: sx,
            d: sy,
            ..Transform::identity()
        }
    }

    /// Create a rotation transform (angle in radians)
    pub fn rotate(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a skew transform. The shear factors are turned into angles with
    /// the arctangent, `x` shearing along the x axis and `y` along the y axis.
    pub fn skew(x: f64, y: f64) -> Self {
        Transform {
            b: x.atan(),
            c: y.atan(),
            ..Transform::identity()
        }
    }

    /// Combine this transform with another (self * other)
    pub fn then(self, other: Transform) -> Self {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Add a translation to this transform
    pub fn with_translate(self, x: f64, y: f64) -> Self {
        self.then(Transform::translate(x, y))
    }

    /// Add a scale to this transform
    pub fn with_scale(self, sx: f64, sy: f64) -> Self {
        self.then(Transform::scale(sx, sy))
    }
}

/// The six operands of `cm`, separated by spaces
impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            Real(self.a),
            Real(self.b),
            Real(self.c),
            Real(self.d),
            Real(self.e),
            Real(self.f)
        )
    }
}
