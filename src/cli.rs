//! CLI argument handling.

pub use crate::cli_args::{Cli, ModeArg, OutputFormat, parse_anchor_arg};

use crate::color::{Hsv, hex_to_hsv};
use crate::config::ConfigOverrides;
use crate::extrapolate::ExtrapolationMode;

impl From<ModeArg> for ExtrapolationMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Functional => ExtrapolationMode::Functional,
            ModeArg::FunctionalSaturated => ExtrapolationMode::FunctionalSaturated,
            ModeArg::Expressive => ExtrapolationMode::Expressive,
        }
    }
}

/// A parsed `--anchor` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchorArg {
    pub hue_set: String,
    pub label: u32,
    pub hsv: Hsv,
}

impl AnchorArg {
    /// Parse `NAME:LABEL=COLOR`.
    pub fn parse(s: &str) -> Result<Self, String> {
        parse_anchor_arg(s)?;
        let (target, color) = s.split_once('=').unwrap_or((s, ""));
        let (name, label) = target.split_once(':').unwrap_or((target, ""));
        let label = label
            .trim()
            .parse()
            .map_err(|_| format!("shade label '{}' is not a number", label))?;
        let hsv = hex_to_hsv(color.trim()).map_err(|e| e.to_string())?;
        Ok(Self {
            hue_set: name.trim().to_string(),
            label,
            hsv,
        })
    }
}

impl Cli {
    /// Parse every `--anchor` argument.
    pub fn parsed_anchors(&self) -> Result<Vec<AnchorArg>, String> {
        self.anchors.iter().map(|a| AnchorArg::parse(a)).collect()
    }

    /// Convert flat CLI args to nested overrides for Figment merging.
    ///
    /// Only flags that are explicitly set end up in the overrides, allowing
    /// proper layering with TOML file settings.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides::new(
            self.name.clone(),
            self.scale.clone(),
            self.mode.map(|m| ExtrapolationMode::from(m).to_string()),
        )
    }
}
