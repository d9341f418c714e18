//! Import Material-UI palette files.
//!
//! Accepts the `{ "<key>": { "<label>": "<color>" } }` shape in JSON or
//! YAML. Numeric labels become locked shades; non-numeric keys such as
//! `main` or `contrastText` are skipped.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use color_eyre::eyre::{Result, WrapErr, bail, eyre};
use serde::Deserialize;
use serde::de::IgnoredAny;
use tracing::{debug, warn};

use crate::color::hex_to_hsv;
use crate::extrapolate::ExtrapolationMode;
use crate::scale::ShadeScale;
use crate::shade::{HueSet, Palette};

/// A palette key's value: a shade map, or anything else (`mode`,
/// `contrastThreshold`, ...), which carries no ramp and is ignored.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Entry {
    Ramp(BTreeMap<Label, String>),
    Other(IgnoredAny),
}

/// Shade key. YAML yields bare numbers, JSON always yields strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(untagged)]
enum Label {
    Number(u32),
    Text(String),
}

impl Label {
    fn number(&self) -> Option<u32> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Import a palette file. Every shade present in the file is locked.
///
/// With a `scale`, the palette is built on the union of its labels and the
/// file's labels, so shades the file leaves out are generated.
pub fn import_palette(
    path: &Path,
    mode: ExtrapolationMode,
    scale: Option<&ShadeScale>,
) -> Result<Palette> {
    let content = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Imported Palette".to_string());

    parse_palette(&content, path, &name, mode, scale)
}

fn parse_palette(
    content: &str,
    path: &Path,
    name: &str,
    mode: ExtrapolationMode,
    scale: Option<&ShadeScale>,
) -> Result<Palette> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let raw: BTreeMap<String, Entry> = if is_json {
        serde_json::from_str(content).wrap_err("Failed to parse palette JSON")?
    } else {
        serde_yaml::from_str(content).wrap_err("Failed to parse palette YAML")?
    };

    palette_from_entries(raw, name, mode, scale)
}

/// Parse palette text directly; `json` selects the format.
pub fn import_palette_str(
    content: &str,
    json: bool,
    mode: ExtrapolationMode,
    scale: Option<&ShadeScale>,
) -> Result<Palette> {
    let path = if json { "palette.json" } else { "palette.yaml" };
    parse_palette(content, Path::new(path), "Imported Palette", mode, scale)
}

fn palette_from_entries(
    raw: BTreeMap<String, Entry>,
    name: &str,
    mode: ExtrapolationMode,
    scale: Option<&ShadeScale>,
) -> Result<Palette> {
    let mut ramps: Vec<(String, Vec<(u32, String)>)> = Vec::new();

    for (key, entry) in raw {
        let shades = match entry {
            Entry::Ramp(shades) => shades,
            Entry::Other(_) => {
                debug!(key = %key, "skipping non-ramp palette entry");
                continue;
            }
        };

        let mut numeric = Vec::new();
        for (label, color) in shades {
            match label.number() {
                Some(number) => numeric.push((number, color)),
                None => warn!(key = %key, label = %label, "skipping non-numeric shade label"),
            }
        }
        if !numeric.is_empty() {
            ramps.push((key, numeric));
        }
    }

    if ramps.is_empty() {
        bail!("Palette contains no numeric shade ramps");
    }

    // Every hue set shares one scale: the union of labels seen anywhere
    let mut labels: BTreeSet<u32> = ramps
        .iter()
        .flat_map(|(_, shades)| shades.iter().map(|(label, _)| *label))
        .collect();
    if let Some(scale) = scale {
        let file_labels = labels.len();
        labels.extend(scale.labels().iter().copied());
        debug!(
            file_labels,
            scale_labels = scale.len(),
            merged = labels.len(),
            "merged imported labels with configured scale"
        );
    }
    let scale = ShadeScale::new(labels.into_iter().collect())
        .ok_or_else(|| eyre!("Palette labels do not form a valid scale"))?;

    let mut palette = Palette::new(name, scale);
    for (key, shades) in ramps {
        let mut hue_set = HueSet::new(key.clone(), &palette.scale).with_mode(mode);
        for (label, color) in shades {
            let hsv = hex_to_hsv(&color)
                .wrap_err_with(|| format!("Invalid color for {}.{}", key, label))?;
            hue_set.lock(label, hsv);
        }
        palette.hue_sets.push(hue_set);
    }

    Ok(palette)
}
