//! Circular arcs approximated by cubic Bézier curves.
//!
//! The output format has no arc primitive, so an arc is split into pieces of
//! at most a quarter turn and each piece is replaced by the usual four point
//! cubic approximation.

use crate::units::Point;
use crate::PDFError;
use std::f64::consts::FRAC_PI_2;

/// Distance factor of the inner control points, `4/3 * (sqrt(2) - 1)`
pub const KAPPA: f64 = 0.5522847498;

/// Most segments a single arc may be split into, i.e. 256 full turns
pub const MAX_ARC_SEGMENTS: usize = 1024;

/// One cubic piece of an approximated arc
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ArcSegment {
    /// Angle the segment starts at, in radians
    pub from_angle: f64,
    /// Angle the segment ends at, in radians
    pub to_angle: f64,
    pub control1: Point,
    pub control2: Point,
    pub to: Point,
}

/// Where an arc begins
pub fn arc_start(centre: Point, radius: f64, start: f64) -> Point {
    centre + Point::new(start.cos(), start.sin()) * radius
}

/// Split an arc into cubic segments from `start` to `start + sweep`. The
/// sweep is divided into the fewest equal steps of at most π/2. A zero or
/// non-finite sweep yields no segments; a sweep needing more than
/// [MAX_ARC_SEGMENTS] segments is rejected.
pub fn arc_segments(
    centre: Point,
    radius: f64,
    start: f64,
    sweep: f64,
) -> Result<Vec<ArcSegment>, PDFError> {
    if !sweep.is_finite() || !start.is_finite() {
        return Ok(Vec::new());
    }

    let quarters = (sweep.abs() / FRAC_PI_2).ceil();
    if quarters > MAX_ARC_SEGMENTS as f64 {
        return Err(PDFError::ArcSweep(sweep));
    }

    let count = quarters as usize;
    let mut segments = Vec::with_capacity(count);
    let mut a1 = start;
    for i in 1..=count {
        // the last step lands exactly on the end angle
        let a2 = if i == count {
            start + sweep
        } else {
            start + sweep * i as f64 / count as f64
        };
        segments.push(partial_arc(centre, radius, a1, a2));
        a1 = a2;
    }

    Ok(segments)
}

// Approximate an arc of no more than π/2 from a1 to a2. The curve is built
// symmetric about the x axis, then rotated onto the bisector of a1..a2.
fn partial_arc(centre: Point, radius: f64, a1: f64, a2: f64) -> ArcSegment {
    let half = (a2 - a1) / 2.0;
    let x4 = radius * half.cos();
    let y4 = radius * half.sin();
    let x1 = x4;
    let y1 = -y4;

    let f = KAPPA * half.tan();
    let x2 = x1 + f * y4;
    let y2 = y1 + f * x4;
    let x3 = x2;
    let y3 = -y2;

    let (sin, cos) = (half + a1).sin_cos();
    ArcSegment {
        from_angle: a1,
        to_angle: a2,
        control1: Point {
            x: x2 * cos - y2 * sin + centre.x,
            y: x2 * sin + y2 * cos + centre.y,
        },
        control2: Point {
            x: x3 * cos - y3 * sin + centre.x,
            y: x3 * sin + y3 * cos + centre.y,
        },
        to: arc_start(centre, radius, a2),
    }
}
