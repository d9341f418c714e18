//! HSV, RGB and hex conversions for shade colors.
//!
//! Shades store their color as HSV with hue in degrees `[0, 360)` and
//! saturation/value as percentages `[0, 100]`. Conversions go through the
//! `palette` crate so the sector math matches every other color tool.

use std::fmt;

use csscolorparser::Color as CssColor;
use palette::{FromColor, Srgb};
use serde::{Deserialize, Serialize};

/// Saturation below which a color counts as achromatic.
pub const ACHROMATIC_THRESHOLD: f32 = 1.0;

/// Error type for color parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorError {
    /// Text could not be parsed as a CSS color
    Parse { input: String, reason: String },
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { input, reason } => write!(f, "Invalid color '{}': {}", input, reason),
        }
    }
}

impl std::error::Error for ColorError {}

/// A color in HSV percentage space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in degrees, `[0, 360)`
    pub h: f32,
    /// Saturation, `[0, 100]`
    pub s: f32,
    /// Value (brightness), `[0, 100]`
    pub v: f32,
}

impl Hsv {
    pub const fn new(h: f32, s: f32, v: f32) -> Self {
        Self { h, s, v }
    }

    /// Read a single channel.
    pub fn get(&self, channel: Channel) -> f32 {
        match channel {
            Channel::H => self.h,
            Channel::S => self.s,
            Channel::V => self.v,
        }
    }

    /// Return a copy with one channel replaced (and clamped to its range).
    pub fn with(self, channel: Channel, value: f32) -> Self {
        let value = channel.clamp(value);
        match channel {
            Channel::H => Self { h: value, ..self },
            Channel::S => Self { s: value, ..self },
            Channel::V => Self { v: value, ..self },
        }
    }

    /// Wrap hue and clamp saturation/value into their ranges.
    pub fn normalized(self) -> Self {
        Self {
            h: Channel::H.clamp(self.h),
            s: Channel::S.clamp(self.s),
            v: Channel::V.clamp(self.v),
        }
    }
}

/// One of the three HSV channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    H,
    S,
    V,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::H, Channel::S, Channel::V];

    /// Bring a raw channel value back into range.
    ///
    /// Hue wraps around the color wheel; saturation and value clamp to
    /// `[0, 100]`. Every extrapolated value passes through here before it
    /// reaches a shade.
    pub fn clamp(self, value: f32) -> f32 {
        match self {
            Self::H => normalize_hue(value),
            Self::S | Self::V => value.clamp(0.0, 100.0),
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::H => "Hue",
            Self::S => "Saturation",
            Self::V => "Value",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Wrap a hue angle into `[0, 360)`.
pub fn normalize_hue(h: f32) -> f32 {
    ((h % 360.0) + 360.0) % 360.0
}

/// Whether a color carries no meaningful hue.
pub fn is_achromatic(hsv: Hsv) -> bool {
    hsv.s < ACHROMATIC_THRESHOLD
}

/// Convert HSV percentages to 8-bit sRGB.
///
/// # Example
///
/// ```
/// use shadesmith::color::{Hsv, hsv_to_rgb};
///
/// let red = hsv_to_rgb(Hsv::new(0.0, 100.0, 100.0));
/// assert_eq!((red.red, red.green, red.blue), (255, 0, 0));
/// ```
pub fn hsv_to_rgb(hsv: Hsv) -> Srgb<u8> {
    let hsv = hsv.normalized();
    let native: palette::Hsv = palette::Hsv::new(hsv.h, hsv.s / 100.0, hsv.v / 100.0);
    let rgb: Srgb = Srgb::from_color(native);
    clamp_rgb(Srgb::new(rgb.red * 255.0, rgb.green * 255.0, rgb.blue * 255.0))
}

/// Convert 8-bit sRGB to HSV percentages.
pub fn rgb_to_hsv(rgb: Srgb<u8>) -> Hsv {
    let native: palette::Hsv = palette::Hsv::from_color(rgb.into_format::<f32>());
    Hsv {
        h: normalize_hue(native.hue.into_positive_degrees()),
        s: native.saturation * 100.0,
        v: native.value * 100.0,
    }
}

/// Clamp an sRGB color on the 0-255 scale and round to 8 bits.
///
/// Spline arithmetic can overshoot the gamut slightly, so every value is
/// clamped before it is encoded.
pub fn clamp_rgb(color: Srgb<f32>) -> Srgb<u8> {
    let channel = |c: f32| c.clamp(0.0, 255.0).round() as u8;
    Srgb::new(channel(color.red), channel(color.green), channel(color.blue))
}

/// Convert sRGB to a `#rrggbb` hex string.
pub fn rgb_to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Convert HSV percentages straight to a `#rrggbb` hex string.
pub fn hsv_to_hex(hsv: Hsv) -> String {
    rgb_to_hex(hsv_to_rgb(hsv))
}

/// Parse any CSS color string into `Srgb<u8>`.
///
/// Supports: hex (#RRGGBB), rgb(), hsl(), hsv(), named colors, etc.
pub fn parse_color(input: &str) -> Result<Srgb<u8>, ColorError> {
    let css_color: CssColor = input.parse().map_err(|e| ColorError::Parse {
        input: input.to_string(),
        reason: format!("{}", e),
    })?;
    let [r, g, b, _a] = css_color.to_rgba8();
    Ok(Srgb::new(r, g, b))
}

/// Parse a CSS color string into HSV percentages.
pub fn hex_to_hsv(input: &str) -> Result<Hsv, ColorError> {
    parse_color(input).map(rgb_to_hsv)
}
