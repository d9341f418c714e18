//! Shade ramps: individual shades, hue sets and palettes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::{Channel, ColorError, Hsv, hex_to_hsv, hsv_to_hex, is_achromatic};
use crate::extrapolate::ExtrapolationMode;
use crate::scale::ShadeScale;

/// Placeholder color for new shades before any generation or edit.
pub const PLACEHOLDER_HSV: Hsv = Hsv::new(0.0, 0.0, 50.0);

/// Where a generated shade's color came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtrapolationMethod {
    /// Inside the locked span, on the spline
    Interpolated,
    /// Outside the span, straight-line extension
    Linear,
    /// Outside the span, bent toward the white/black anchors
    Adjusted,
}

impl ExtrapolationMethod {
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Interpolated => "interpolated",
            Self::Linear => "linear",
            Self::Adjusted => "adjusted",
        }
    }

    /// Tooltip text explaining how a shade was produced under `mode`.
    pub fn describe(self, mode: ExtrapolationMode) -> String {
        match self {
            Self::Interpolated => {
                "Interpolated on a smooth curve between locked shades".to_string()
            }
            Self::Linear => format!(
                "Extended linearly past the locked shades ({} mode)",
                mode
            ),
            Self::Adjusted => match mode {
                ExtrapolationMode::FunctionalSaturated => {
                    "Curved toward white and a rich saturated black".to_string()
                }
                _ => "Curved toward white and black anchors".to_string(),
            },
        }
    }
}

impl fmt::Display for ExtrapolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// One swatch of a ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shade {
    pub index: usize,
    pub label: u32,
    pub hsv: Hsv,
    /// `#rrggbb`, always the hex form of `hsv`
    pub color: String,
    pub locked: bool,
    pub selected_for_h: bool,
    pub selected_for_s: bool,
    pub selected_for_v: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extrapolation_method: Option<ExtrapolationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_mode: Option<ExtrapolationMode>,
}

impl Shade {
    /// New unlocked shade with the placeholder color, selected for all channels.
    pub fn new(index: usize, label: u32) -> Self {
        Self {
            index,
            label,
            hsv: PLACEHOLDER_HSV,
            color: hsv_to_hex(PLACEHOLDER_HSV),
            locked: false,
            selected_for_h: true,
            selected_for_s: true,
            selected_for_v: true,
            extrapolation_method: None,
            generation_mode: None,
        }
    }

    pub fn is_selected_for(&self, channel: Channel) -> bool {
        match channel {
            Channel::H => self.selected_for_h,
            Channel::S => self.selected_for_s,
            Channel::V => self.selected_for_v,
        }
    }

    pub fn channel_value(&self, channel: Channel) -> f32 {
        self.hsv.get(channel)
    }

    pub fn set_selected_for(&mut self, channel: Channel, selected: bool) {
        match channel {
            Channel::H => self.selected_for_h = selected,
            Channel::S => self.selected_for_s = selected,
            Channel::V => self.selected_for_v = selected,
        }
    }

    /// Whether this shade contributes a control point to `channel`.
    ///
    /// Only locked, selected shades anchor a channel; achromatic shades
    /// carry no usable hue and never anchor the hue channel.
    pub fn anchors(&self, channel: Channel) -> bool {
        if !self.locked || !self.is_selected_for(channel) {
            return false;
        }
        match channel {
            Channel::H => self.hsv.s > 1.0,
            Channel::S | Channel::V => true,
        }
    }

    pub fn is_achromatic(&self) -> bool {
        is_achromatic(self.hsv)
    }

    /// Manual color edit. Clears the provenance tag.
    pub fn set_hsv(&mut self, hsv: Hsv) {
        self.hsv = hsv.normalized();
        self.color = hsv_to_hex(self.hsv);
        self.extrapolation_method = None;
    }

    /// Manual edit from color text (hex or any CSS color).
    pub fn set_hex(&mut self, input: &str) -> Result<(), ColorError> {
        let hsv = hex_to_hsv(input)?;
        self.set_hsv(hsv);
        Ok(())
    }

    /// Curve edit of a single channel, e.g. dragging a point on the V curve.
    pub fn set_channel(&mut self, channel: Channel, value: f32) {
        self.set_hsv(self.hsv.with(channel, value));
    }

    /// Store a generated color along with its provenance.
    pub(crate) fn apply_generated(
        &mut self,
        hsv: Hsv,
        method: ExtrapolationMethod,
        mode: ExtrapolationMode,
    ) {
        self.hsv = hsv;
        self.color = hsv_to_hex(hsv);
        self.extrapolation_method = Some(method);
        self.generation_mode = Some(mode);
    }

    /// Explanation of the current provenance tag, if any.
    pub fn explanation(&self) -> Option<String> {
        let method = self.extrapolation_method?;
        Some(method.describe(self.generation_mode.unwrap_or_default()))
    }
}

/// One color ramp (one palette key), lightest shade first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HueSet {
    pub name: String,
    pub shades: Vec<Shade>,
    #[serde(default)]
    pub extrapolation_mode: ExtrapolationMode,
}

impl HueSet {
    /// A gray ramp from near-white to near-black across `scale`.
    pub fn new(name: impl Into<String>, scale: &ShadeScale) -> Self {
        let last = scale.last_index().max(1) as f32;
        let shades = scale
            .labels()
            .iter()
            .enumerate()
            .map(|(index, &label)| {
                let mut shade = Shade::new(index, label);
                let v = 95.0 - 85.0 * index as f32 / last;
                shade.set_hsv(Hsv::new(0.0, 0.0, v));
                shade
            })
            .collect();

        Self {
            name: name.into(),
            shades,
            extrapolation_mode: ExtrapolationMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: ExtrapolationMode) -> Self {
        self.extrapolation_mode = mode;
        self
    }

    pub fn shade(&self, label: u32) -> Option<&Shade> {
        self.shades.iter().find(|s| s.label == label)
    }

    pub fn shade_mut(&mut self, label: u32) -> Option<&mut Shade> {
        self.shades.iter_mut().find(|s| s.label == label)
    }

    /// The scale implied by this ramp's labels.
    ///
    /// Ramps whose labels are not strictly increasing get evenly spaced
    /// labels of the same length, so index math still lines up.
    pub fn scale(&self) -> ShadeScale {
        ShadeScale::new(self.shades.iter().map(|s| s.label).collect())
            .unwrap_or_else(|| ShadeScale::evenly_spaced(self.shades.len()))
    }

    /// Set a shade's color and lock it as an anchor.
    ///
    /// Returns `false` when no shade carries `label`.
    pub fn lock(&mut self, label: u32, hsv: Hsv) -> bool {
        match self.shade_mut(label) {
            Some(shade) => {
                shade.set_hsv(hsv);
                shade.locked = true;
                true
            }
            None => false,
        }
    }

    pub fn unlock(&mut self, label: u32) -> bool {
        match self.shade_mut(label) {
            Some(shade) => {
                shade.locked = false;
                true
            }
            None => false,
        }
    }

    pub fn locked_indices(&self) -> Vec<usize> {
        self.shades
            .iter()
            .filter(|s| s.locked)
            .map(|s| s.index)
            .collect()
    }

    /// Replace the shades with a fresh generation pass.
    ///
    /// Returns whether the expressive-mode anchor advisory fired.
    pub fn regenerate(&mut self) -> bool {
        let result = crate::generate::generate_hue_set(self);
        self.shades = result.shades;
        result.anchor_advisory
    }
}

/// A named collection of hue sets sharing one scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    pub name: String,
    pub scale: ShadeScale,
    pub hue_sets: Vec<HueSet>,
}

impl Palette {
    pub fn new(name: impl Into<String>, scale: ShadeScale) -> Self {
        Self {
            name: name.into(),
            scale,
            hue_sets: Vec::new(),
        }
    }

    pub fn hue_set(&self, name: &str) -> Option<&HueSet> {
        self.hue_sets.iter().find(|h| h.name == name)
    }

    /// Fetch a hue set by name, creating a default gray ramp if missing.
    pub fn hue_set_or_insert(&mut self, name: &str) -> &mut HueSet {
        let position = match self.hue_sets.iter().position(|h| h.name == name) {
            Some(position) => position,
            None => {
                self.hue_sets.push(HueSet::new(name, &self.scale));
                self.hue_sets.len() - 1
            }
        };
        &mut self.hue_sets[position]
    }

    pub fn remove_hue_set(&mut self, name: &str) -> Option<HueSet> {
        let position = self.hue_sets.iter().position(|h| h.name == name)?;
        Some(self.hue_sets.remove(position))
    }
}
