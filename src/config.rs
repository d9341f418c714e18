//! TOML configuration file support for palette generation.

use std::path::Path;

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::color::{hex_to_hsv, hsv_to_hex};
use crate::extrapolate::{ExtrapolationMode, UnknownModeError};
use crate::scale::{MUI_LABELS, ShadeScale};
use crate::shade::Palette;

/// Error type for configuration operations.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading/writing file
    Io(std::io::Error),
    /// TOML parsing error
    Parse(toml::de::Error),
    /// TOML serialization error
    Serialize(toml::ser::Error),
    /// Layered configuration could not be extracted
    Figment(Box<figment::Error>),
    /// Invalid color format
    InvalidColor(String),
    /// Unrecognized extrapolation mode
    InvalidMode(UnknownModeError),
    /// Anchor label missing from the scale
    UnknownLabel { hue_set: String, label: u32 },
    /// Scale labels empty or not strictly increasing
    InvalidScale(Vec<u32>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Parse(e) => write!(f, "TOML parse error: {}", e),
            Self::Serialize(e) => write!(f, "TOML serialize error: {}", e),
            Self::Figment(e) => write!(f, "Configuration error: {}", e),
            Self::InvalidColor(s) => write!(f, "Invalid color: {}", s),
            Self::InvalidMode(e) => write!(f, "Invalid mode: {}", e),
            Self::UnknownLabel { hue_set, label } => {
                write!(f, "Hue set '{}' has no shade labelled {}", hue_set, label)
            }
            Self::InvalidScale(labels) => write!(
                f,
                "Invalid scale {:?}: labels must be non-empty and strictly increasing",
                labels
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(e: toml::ser::Error) -> Self {
        Self::Serialize(e)
    }
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Figment(Box::new(e))
    }
}

impl From<UnknownModeError> for ConfigError {
    fn from(e: UnknownModeError) -> Self {
        Self::InvalidMode(e)
    }
}

/// Root configuration structure for TOML files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteConfig {
    /// Palette metadata
    pub palette: PaletteMetadata,
    /// Shade scale
    pub scale: ScaleConfig,
    /// Generation defaults
    pub generation: GenerationConfig,
    /// Hue sets with their locked anchors
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hue_sets: Vec<HueSetConfig>,
}

/// Palette metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteMetadata {
    /// Name of the palette
    pub name: String,
    /// Author of the palette
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Default for PaletteMetadata {
    fn default() -> Self {
        Self {
            name: "Generated Palette".to_string(),
            author: None,
        }
    }
}

/// Shade scale settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaleConfig {
    /// Shade labels, lightest first
    pub labels: Vec<u32>,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            labels: MUI_LABELS.to_vec(),
        }
    }
}

/// Generation defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Default extrapolation mode for hue sets that don't set one
    pub mode: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            mode: ExtrapolationMode::default().to_string(),
        }
    }
}

/// One hue set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HueSetConfig {
    /// Palette key, e.g. `primary`
    pub name: String,
    /// Extrapolation mode override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    /// Locked shades
    pub anchors: Vec<AnchorConfig>,
}

/// A locked shade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorConfig {
    /// Shade label, e.g. 500
    pub label: u32,
    /// Color in any CSS format
    pub color: String,
    /// Contributes to hue interpolation
    #[serde(default = "enabled")]
    pub hue: bool,
    /// Contributes to saturation interpolation
    #[serde(default = "enabled")]
    pub saturation: bool,
    /// Contributes to value interpolation
    #[serde(default = "enabled")]
    pub value: bool,
}

fn enabled() -> bool {
    true
}

/// Values set on the command line, layered over the config file.
///
/// Only fields that are `Some` are serialized, so unset flags never
/// clobber file settings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<NameOverride>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<ScaleConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NameOverride {
    pub name: String,
}

impl ConfigOverrides {
    pub fn new(name: Option<String>, labels: Option<Vec<u32>>, mode: Option<String>) -> Self {
        Self {
            palette: name.map(|name| NameOverride { name }),
            scale: labels.map(|labels| ScaleConfig { labels }),
            generation: mode.map(|mode| GenerationConfig { mode }),
        }
    }
}

impl PaletteConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load defaults, then the TOML file (if any), then CLI overrides.
    pub fn load_layered(
        path: Option<&Path>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            // Figment treats a missing file as empty; a named file must exist
            std::fs::metadata(path)?;
            figment = figment.merge(Toml::file(path));
        }
        let config: Self = figment.merge(Serialized::defaults(overrides)).extract()?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_mode(&self) -> Result<ExtrapolationMode, ConfigError> {
        Ok(self.generation.mode.parse()?)
    }

    pub fn shade_scale(&self) -> Result<ShadeScale, ConfigError> {
        ShadeScale::new(self.scale.labels.clone())
            .ok_or_else(|| ConfigError::InvalidScale(self.scale.labels.clone()))
    }

    /// Build the palette described by this configuration.
    ///
    /// Every anchor becomes a locked shade; modes and colors are validated
    /// here so bad input fails before any generation runs.
    pub fn to_palette(&self) -> Result<Palette, ConfigError> {
        let mut palette = Palette::new(self.palette.name.clone(), self.shade_scale()?);
        self.apply_hue_sets(&mut palette)?;
        Ok(palette)
    }

    /// Lock this configuration's anchors onto `palette`.
    ///
    /// Hue sets missing from the palette are created on its scale with the
    /// configured mode. Existing hue sets keep their shades, take the
    /// configured anchors on top and only change mode when one is set
    /// explicitly.
    pub fn apply_hue_sets(&self, palette: &mut Palette) -> Result<(), ConfigError> {
        let default_mode = self.default_mode()?;

        for set_config in &self.hue_sets {
            let explicit_mode = set_config
                .mode
                .as_deref()
                .map(str::parse::<ExtrapolationMode>)
                .transpose()?;
            let existed = palette.hue_set(&set_config.name).is_some();
            let hue_set = palette.hue_set_or_insert(&set_config.name);
            match explicit_mode {
                Some(mode) => hue_set.extrapolation_mode = mode,
                None if !existed => hue_set.extrapolation_mode = default_mode,
                None => {}
            }

            for anchor in &set_config.anchors {
                let hsv = hex_to_hsv(&anchor.color)
                    .map_err(|e| ConfigError::InvalidColor(e.to_string()))?;
                let shade =
                    hue_set
                        .shade_mut(anchor.label)
                        .ok_or_else(|| ConfigError::UnknownLabel {
                            hue_set: set_config.name.clone(),
                            label: anchor.label,
                        })?;
                shade.set_hsv(hsv);
                shade.locked = true;
                shade.selected_for_h = anchor.hue;
                shade.selected_for_s = anchor.saturation;
                shade.selected_for_v = anchor.value;
            }
        }

        Ok(())
    }

    /// Create from a palette, keeping only its locked shades as anchors.
    pub fn from_palette(palette: &Palette, default_mode: ExtrapolationMode) -> Self {
        let hue_sets = palette
            .hue_sets
            .iter()
            .map(|set| HueSetConfig {
                name: set.name.clone(),
                mode: (set.extrapolation_mode != default_mode)
                    .then(|| set.extrapolation_mode.to_string()),
                anchors: set
                    .shades
                    .iter()
                    .filter(|s| s.locked)
                    .map(|s| AnchorConfig {
                        label: s.label,
                        color: hsv_to_hex(s.hsv),
                        hue: s.selected_for_h,
                        saturation: s.selected_for_s,
                        value: s.selected_for_v,
                    })
                    .collect(),
            })
            .collect();

        Self {
            palette: PaletteMetadata {
                name: palette.name.clone(),
                author: None,
            },
            scale: ScaleConfig {
                labels: palette.scale.labels().to_vec(),
            },
            generation: GenerationConfig {
                mode: default_mode.to_string(),
            },
            hue_sets,
        }
    }
}
