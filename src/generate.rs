//! Shade-set generation: fill every unlocked shade from the locked anchors.

use std::fmt;

use rayon::prelude::*;
use tracing::{debug, info, warn};

#[cfg(debug_assertions)]
use tracing::instrument;

use crate::color::{Channel, Hsv};
use crate::extrapolate::{ExtrapolationMode, extrapolate_with_fallback};
use crate::shade::{ExtrapolationMethod, HueSet, Palette, Shade};
use crate::spline::ControlPoint;

/// Hue used when no locked shade carries any chroma.
pub const DEFAULT_HUE: f32 = 0.0;

/// Raised when anchors had to bend the curve of a hue set in expressive
/// mode, which usually means a locked color sits at an extreme.
#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub hue_set: String,
    pub mode: ExtrapolationMode,
    pub channels: Vec<Channel>,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let channels: Vec<&str> = self.channels.iter().map(|c| c.display_name()).collect();
        write!(
            f,
            "{}: white/black anchors were needed for {} in {} mode; a locked color may be out of range",
            self.hue_set,
            channels.join(", "),
            self.mode
        )
    }
}

/// Result of generating one hue set.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Full replacement ramp, same length and order as the input
    pub shades: Vec<Shade>,
    /// Whether the expressive-mode anchor advisory fired
    pub anchor_advisory: bool,
    /// Channels whose dispatcher reported an anchor
    pub anchor_channels: Vec<Channel>,
}

/// Control points for one channel from the locked, selected shades.
pub fn control_points(shades: &[Shade], channel: Channel) -> Vec<ControlPoint> {
    shades
        .iter()
        .enumerate()
        .filter(|(_, s)| s.anchors(channel))
        .map(|(i, s)| ControlPoint::new(i as f32, s.channel_value(channel)))
        .collect()
}

/// Fallback hue when no shade anchors the hue channel.
fn default_hue(shades: &[Shade]) -> f32 {
    shades
        .iter()
        .find(|s| s.locked && s.hsv.s > 1.0)
        .map(|s| s.hsv.h)
        .unwrap_or(DEFAULT_HUE)
}

/// The advisory for a generation pass, if one is due.
///
/// Only expressive mode promises no forced pull toward white and black, so
/// only there is an anchor worth reporting. The current dispatcher never
/// anchors expressive saturation or value, so this stays `None` in practice
/// until a channel policy does.
pub fn advisory_for(
    hue_set: &str,
    mode: ExtrapolationMode,
    anchor_channels: &[Channel],
) -> Option<Advisory> {
    (mode == ExtrapolationMode::Expressive && !anchor_channels.is_empty()).then(|| Advisory {
        hue_set: hue_set.to_string(),
        mode,
        channels: anchor_channels.to_vec(),
    })
}

/// Generate a hue set without an advisory callback.
///
/// # Example
///
/// ```
/// use shadesmith::color::Hsv;
/// use shadesmith::generate::generate_hue_set;
/// use shadesmith::scale::ShadeScale;
/// use shadesmith::shade::{ExtrapolationMethod, HueSet};
///
/// let mut set = HueSet::new("primary", &ShadeScale::default());
/// set.lock(200, Hsv::new(210.0, 50.0, 80.0));
/// set.lock(700, Hsv::new(210.0, 20.0, 30.0));
///
/// let result = generate_hue_set(&set);
/// assert_eq!(result.shades.len(), 10);
/// assert_eq!(result.shades[4].extrapolation_method, Some(ExtrapolationMethod::Interpolated));
/// ```
pub fn generate_hue_set(hue_set: &HueSet) -> GenerationResult {
    generate_hue_set_with(hue_set, |_| {})
}

/// Generate a hue set, calling `on_advisory` at most once.
///
/// Locked shades are copied through untouched; every other shade is
/// recomputed from scratch. The input is never modified.
#[cfg_attr(debug_assertions, instrument(skip(hue_set, on_advisory), fields(hue_set = %hue_set.name)))]
pub fn generate_hue_set_with<F>(hue_set: &HueSet, mut on_advisory: F) -> GenerationResult
where
    F: FnMut(&Advisory),
{
    let shades = &hue_set.shades;
    let mode = hue_set.extrapolation_mode;

    let locked: Vec<usize> = shades
        .iter()
        .enumerate()
        .filter(|(_, s)| s.locked)
        .map(|(i, _)| i)
        .collect();
    let (Some(&span_start), Some(&span_end)) = (locked.iter().min(), locked.iter().max()) else {
        debug!("no locked shades, nothing to generate");
        return GenerationResult {
            shades: shades.clone(),
            anchor_advisory: false,
            anchor_channels: Vec::new(),
        };
    };

    let scale = hue_set.scale();
    let targets: Vec<f32> = (0..shades.len()).map(|i| i as f32).collect();

    let mut anchor_channels = Vec::new();
    let mut channel_values: [Vec<f32>; 3] = Default::default();

    for (slot, channel) in Channel::ALL.into_iter().enumerate() {
        let points = control_points(shades, channel);

        if channel == Channel::H && points.is_empty() {
            let hue = default_hue(shades);
            debug!(hue, "no chromatic hue anchors, using constant hue");
            channel_values[slot] = vec![hue; targets.len()];
            continue;
        }

        let result = extrapolate_with_fallback(&points, &targets, channel, &scale, mode);
        if result.anchor_used {
            anchor_channels.push(channel);
        }
        channel_values[slot] = result.values;
    }

    let [h_values, s_values, v_values] = &channel_values;
    let fallback_method = if anchor_channels.is_empty() {
        ExtrapolationMethod::Linear
    } else {
        ExtrapolationMethod::Adjusted
    };

    let generated: Vec<Shade> = shades
        .iter()
        .enumerate()
        .map(|(i, shade)| {
            if shade.locked {
                return shade.clone();
            }
            let hsv = Hsv::new(
                Channel::H.clamp(h_values[i]),
                Channel::S.clamp(s_values[i]),
                Channel::V.clamp(v_values[i]),
            );
            let method = if (span_start..=span_end).contains(&i) {
                ExtrapolationMethod::Interpolated
            } else {
                fallback_method
            };

            let mut shade = shade.clone();
            shade.apply_generated(hsv, method, mode);
            shade
        })
        .collect();

    let advisory = advisory_for(&hue_set.name, mode, &anchor_channels);
    let anchor_advisory = advisory.is_some();
    if let Some(advisory) = advisory {
        warn!(%advisory, "anchor fallback in expressive mode");
        on_advisory(&advisory);
    }

    info!(
        shades = generated.len(),
        locked = locked.len(),
        %mode,
        anchors = anchor_channels.len(),
        "hue set generated"
    );

    GenerationResult {
        shades: generated,
        anchor_advisory,
        anchor_channels,
    }
}

/// Result of generating every hue set of a palette.
#[derive(Debug, Clone)]
pub struct PaletteGeneration {
    pub palette: Palette,
    pub advisories: Vec<Advisory>,
}

/// Generate every hue set of a palette.
///
/// Hue sets are independent, so they run in parallel; output order
/// matches input order.
pub fn generate_palette(palette: &Palette) -> PaletteGeneration {
    let results: Vec<(HueSet, Option<Advisory>)> = palette
        .hue_sets
        .par_iter()
        .map(|set| {
            let mut advisory = None;
            let result = generate_hue_set_with(set, |a| advisory = Some(a.clone()));
            let generated = HueSet {
                name: set.name.clone(),
                shades: result.shades,
                extrapolation_mode: set.extrapolation_mode,
            };
            (generated, advisory)
        })
        .collect();

    let mut hue_sets = Vec::with_capacity(results.len());
    let mut advisories = Vec::new();
    for (set, advisory) in results {
        hue_sets.push(set);
        advisories.extend(advisory);
    }

    PaletteGeneration {
        palette: Palette {
            name: palette.name.clone(),
            scale: palette.scale.clone(),
            hue_sets,
        },
        advisories,
    }
}
