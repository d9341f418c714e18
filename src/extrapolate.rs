//! Extrapolation beyond the locked span: linear extension, white/black
//! anchors, and the per-channel dispatcher that picks between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::Channel;
use crate::scale::ShadeScale;
use crate::spline::{ControlPoint, NEUTRAL_DEFAULT, interpolate, prepare_points, slope};

/// How a hue set extends its curves past the locked shades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExtrapolationMode {
    /// Pull S and V toward white and a natural (desaturated) black
    #[default]
    Functional,
    /// Pull toward white and a rich, fully saturated black
    FunctionalSaturated,
    /// Extend linearly and hard-clamp, no forced pull
    Expressive,
}

impl ExtrapolationMode {
    pub const ALL: [ExtrapolationMode; 3] = [
        ExtrapolationMode::Functional,
        ExtrapolationMode::FunctionalSaturated,
        ExtrapolationMode::Expressive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Functional => "functional",
            Self::FunctionalSaturated => "functional-saturated",
            Self::Expressive => "expressive",
        }
    }

    /// Whether saturation/value extrapolation uses the white/black anchors.
    pub fn uses_anchors(self) -> bool {
        matches!(self, Self::Functional | Self::FunctionalSaturated)
    }
}

impl fmt::Display for ExtrapolationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an extrapolation mode string that names no known mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModeError(pub String);

impl fmt::Display for UnknownModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown extrapolation mode '{}' (expected functional, functional-saturated or expressive)",
            self.0
        )
    }
}

impl std::error::Error for UnknownModeError {}

impl FromStr for ExtrapolationMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| UnknownModeError(s.to_string()))
    }
}

/// Output of [`extrapolate_with_fallback`].
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackResult {
    /// One value per requested target
    pub values: Vec<f32>,
    /// Whether white/black anchors shaped the result
    pub anchor_used: bool,
}

/// Spline inside the span, straight-line extension of the boundary
/// segments outside it.
///
/// Results are unbounded; callers clamp or wrap them afterward.
///
/// # Example
///
/// ```
/// use shadesmith::extrapolate::linear_extrapolate;
/// use shadesmith::spline::ControlPoint;
///
/// let points = [ControlPoint::new(2.0, 40.0), ControlPoint::new(4.0, 60.0)];
/// let values = linear_extrapolate(&points, &[0.0, 3.0, 8.0]);
/// assert_eq!(values[0], 20.0);
/// assert_eq!(values[2], 100.0);
/// ```
pub fn linear_extrapolate(points: &[ControlPoint], targets: &[f32]) -> Vec<f32> {
    let points = prepare_points(points);

    let (first, last) = match points.as_slice() {
        [] => return vec![NEUTRAL_DEFAULT; targets.len()],
        [only] => return vec![only.y; targets.len()],
        [first, .., last] => (*first, *last),
    };

    let left_slope = slope(points[0], points[1]);
    let right_slope = slope(points[points.len() - 2], last);
    let inside = interpolate(&points, targets);

    targets
        .iter()
        .zip(inside)
        .map(|(&idx, spline_value)| {
            if idx < first.x {
                first.y + left_slope * (idx - first.x)
            } else if idx > last.x {
                last.y + right_slope * (idx - last.x)
            } else {
                spline_value
            }
        })
        .collect()
}

/// Synthetic values for the white and black anchors of one channel.
fn anchor_values(
    channel: Channel,
    mode: ExtrapolationMode,
    first: ControlPoint,
    last: ControlPoint,
) -> (f32, f32) {
    match channel {
        // White and black are achromatic; hue just holds its nearest value
        Channel::H => (first.y, last.y),
        Channel::S => {
            let black = match mode {
                ExtrapolationMode::Functional => 0.0,
                ExtrapolationMode::FunctionalSaturated => 100.0,
                ExtrapolationMode::Expressive => last.y,
            };
            (0.0, black)
        }
        Channel::V => (100.0, 0.0),
    }
}

/// Extend the control points with virtual white/black anchors, then run
/// the spline over the extended set.
///
/// The white anchor sits at [`ShadeScale::white_index`] and is only added
/// when the real points do not already start at index 0; likewise the
/// black anchor at [`ShadeScale::black_index`] is only added when they do
/// not reach the last index. An anchor is also skipped when its index does
/// not lie outside the real points, which happens on scales whose labels
/// run past 1000. Anchors bend the curve but are never returned.
pub fn anchor_extrapolate(
    points: &[ControlPoint],
    targets: &[f32],
    channel: Channel,
    scale: &ShadeScale,
    mode: ExtrapolationMode,
) -> Vec<f32> {
    let real = prepare_points(points);
    let (Some(&first), Some(&last)) = (real.first(), real.last()) else {
        return interpolate(&real, targets);
    };

    let (white, black) = anchor_values(channel, mode, first, last);
    let last_index = scale.last_index() as f32;
    let (white_index, black_index) = (scale.white_index(), scale.black_index());

    let mut extended = Vec::with_capacity(real.len() + 2);
    if first.x > 0.0 {
        if white_index < first.x {
            extended.push(ControlPoint::new(white_index, white));
        } else {
            debug!(white_index, first = first.x, "white anchor inside locked span, skipped");
        }
    }
    extended.extend_from_slice(&real);
    if last.x < last_index {
        if black_index > last.x {
            extended.push(ControlPoint::new(black_index, black));
        } else {
            debug!(black_index, last = last.x, "black anchor inside locked span, skipped");
        }
    }

    debug!(
        %channel,
        %mode,
        real = real.len(),
        anchors = extended.len() - real.len(),
        "anchor extrapolation"
    );

    interpolate(&extended, targets)
}

/// Resolve one channel's values over `targets` using the strategy the
/// channel and mode call for.
///
/// - Hue always extends linearly and never reports an anchor.
/// - Saturation and value use the white/black anchors in the functional
///   modes, and linear extension clamped to `[0, 100]` in expressive mode.
pub fn extrapolate_with_fallback(
    points: &[ControlPoint],
    targets: &[f32],
    channel: Channel,
    scale: &ShadeScale,
    mode: ExtrapolationMode,
) -> FallbackResult {
    match channel {
        Channel::H => FallbackResult {
            values: linear_extrapolate(points, targets),
            anchor_used: false,
        },
        Channel::S | Channel::V if mode.uses_anchors() => FallbackResult {
            values: anchor_extrapolate(points, targets, channel, scale, mode),
            anchor_used: !points.is_empty(),
        },
        Channel::S | Channel::V => FallbackResult {
            values: linear_extrapolate(points, targets)
                .into_iter()
                .map(|v| channel.clamp(v))
                .collect(),
            anchor_used: false,
        },
    }
}
