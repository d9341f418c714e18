//! Catmull-Rom spline interpolation over sparse shade-index control points.

use float_cmp::approx_eq;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Value returned for every target when there are no control points at all.
pub const NEUTRAL_DEFAULT: f32 = 50.0;

/// A known sample for one channel at a ramp position.
///
/// `x` is a shade index. It is only fractional for the virtual white/black
/// anchors injected by the anchor extrapolator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlPoint {
    pub x: f32,
    pub y: f32,
}

impl ControlPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Sort control points by `x` and drop repeated `x` values.
///
/// The first point seen for a given `x` wins. Bracketing assumes strictly
/// increasing `x`, so this runs before every evaluation.
pub fn prepare_points(points: &[ControlPoint]) -> Vec<ControlPoint> {
    let mut sorted: Vec<ControlPoint> = points.to_vec();
    // Stable sort keeps the first occurrence ahead of later duplicates
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut unique: Vec<ControlPoint> = Vec::with_capacity(sorted.len());
    for point in sorted {
        match unique.last() {
            Some(prev) if approx_eq!(f32, prev.x, point.x, ulps = 2) => {
                warn!(
                    x = point.x,
                    kept = prev.y,
                    dropped = point.y,
                    "duplicate control point x, keeping first"
                );
            }
            _ => unique.push(point),
        }
    }
    unique
}

/// Catmull-Rom basis through `v0..v3`, evaluated between `v1` and `v2`.
pub fn catmull_rom(v0: f32, v1: f32, v2: f32, v3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * v1
        + (-v0 + v2) * t
        + (2.0 * v0 - 5.0 * v1 + 4.0 * v2 - v3) * t2
        + (-v0 + 3.0 * v1 - 3.0 * v2 + v3) * t3)
}

/// Evaluate the spline through `points` at each target index.
///
/// Targets outside the control-point span clamp to the nearest boundary
/// value; this function never extrapolates. With no points every target
/// gets [`NEUTRAL_DEFAULT`], with one point every target gets its value.
///
/// # Example
///
/// ```
/// use shadesmith::spline::{ControlPoint, interpolate};
///
/// let points = [ControlPoint::new(0.0, 10.0), ControlPoint::new(4.0, 90.0)];
/// let values = interpolate(&points, &[0.0, 2.0, 4.0, 6.0]);
/// assert_eq!(values[0], 10.0);
/// assert_eq!(values[3], 90.0);
/// ```
pub fn interpolate(points: &[ControlPoint], targets: &[f32]) -> Vec<f32> {
    let points = prepare_points(points);

    match points.as_slice() {
        [] => vec![NEUTRAL_DEFAULT; targets.len()],
        [only] => vec![only.y; targets.len()],
        points => targets.iter().map(|&idx| evaluate_at(points, idx)).collect(),
    }
}

/// Evaluate at one index. `points` is sorted, unique and has at least two entries.
fn evaluate_at(points: &[ControlPoint], idx: f32) -> f32 {
    let first = points[0];
    let last = points[points.len() - 1];

    if idx <= first.x {
        return first.y;
    }
    if idx >= last.x {
        return last.y;
    }

    // Exact hits return the anchor itself rather than a t=1 evaluation
    if let Some(hit) = points.iter().find(|p| p.x == idx) {
        return hit.y;
    }

    let segment = points
        .windows(2)
        .position(|pair| pair[0].x <= idx && idx <= pair[1].x)
        .unwrap_or(points.len() - 2);

    let p1 = points[segment];
    let p2 = points[segment + 1];
    let p0 = points[segment.saturating_sub(1)];
    let p3 = points[(segment + 2).min(points.len() - 1)];

    let t = (idx - p1.x) / (p2.x - p1.x);
    catmull_rom(p0.y, p1.y, p2.y, p3.y, t)
}

/// Slope between two control points.
pub(crate) fn slope(a: ControlPoint, b: ControlPoint) -> f32 {
    (b.y - a.y) / (b.x - a.x)
}
