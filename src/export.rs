//! Material-UI palette output.

use std::fmt::Write as _;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::shade::{HueSet, Palette};

/// A palette in Material-UI shape: `{ "<key>": { "<label>": "#rrggbb" } }`.
///
/// Keys and labels keep ramp order when serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct MuiPalette {
    pub entries: Vec<(String, Vec<(String, String)>)>,
}

/// One palette key's shades, serialized as an ordered map.
struct Ramp<'a>(&'a [(String, String)]);

impl Serialize for Ramp<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, color) in self.0 {
            map.serialize_entry(label, color)?;
        }
        map.end()
    }
}

impl Serialize for MuiPalette {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, shades) in &self.entries {
            map.serialize_entry(name, &Ramp(shades))?;
        }
        map.end()
    }
}

impl MuiPalette {
    pub fn from_palette(palette: &Palette) -> Self {
        Self {
            entries: palette
                .hue_sets
                .iter()
                .map(|set| (set.name.clone(), ramp_entries(set)))
                .collect(),
        }
    }

    /// Hex color for `key` at `label`.
    pub fn get(&self, key: &str, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == key)?
            .1
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, color)| color.as_str())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

fn ramp_entries(set: &HueSet) -> Vec<(String, String)> {
    set.shades
        .iter()
        .map(|shade| (shade.label.to_string(), shade.color.clone()))
        .collect()
}

/// Plain-text table of each shade's color and where it came from.
pub fn render_provenance(set: &HueSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", set.name, set.extrapolation_mode);
    for shade in &set.shades {
        let origin = match (shade.locked, shade.extrapolation_method) {
            (true, _) => "locked".to_string(),
            (false, Some(method)) => method.to_string(),
            (false, None) => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "  {:>4}  {}  h={:>5.1} s={:>5.1} v={:>5.1}  {}",
            shade.label, shade.color, shade.hsv.h, shade.hsv.s, shade.hsv.v, origin
        );
    }
    out
}
