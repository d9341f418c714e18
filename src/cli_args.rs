//! CLI argument definitions (build.rs compatible).
//!
//! This module contains only struct/enum definitions with no dependencies on
//! other crate modules, allowing it to be included from build.rs for man page
//! generation.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Output format selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON palette object (default, drop-in for createTheme)
    #[default]
    Json,
    /// YAML palette object
    Yaml,
}

/// CLI-compatible extrapolation mode enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Pull toward white and a natural black
    Functional,
    /// Pull toward white and a rich saturated black
    FunctionalSaturated,
    /// Extend linearly and clamp, no forced pull
    Expressive,
}

/// Validate an `--anchor NAME:LABEL=COLOR` argument.
pub fn parse_anchor_arg(s: &str) -> Result<String, String> {
    let (target, color) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME:LABEL=COLOR, got '{}'", s))?;
    let (name, label) = target
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:LABEL before '=', got '{}'", target))?;
    if name.trim().is_empty() {
        return Err(format!("missing palette key in '{}'", s));
    }
    label
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("shade label '{}' is not a number", label))?;
    color
        .trim()
        .parse::<csscolorparser::Color>()
        .map_err(|e| format!("invalid color '{}': {}", color, e))?;
    Ok(s.to_string())
}

/// Material-UI palette generator using HSV Catmull-Rom curves.
#[derive(Parser, Debug)]
#[command(name = "shadesmith")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Lock a shade: NAME:LABEL=COLOR, e.g. primary:500=#1976d2 (repeatable)
    #[arg(short, long = "anchor", value_name = "NAME:LABEL=COLOR", value_parser = parse_anchor_arg)]
    pub anchors: Vec<String>,

    /// Extrapolation mode used past the locked shades
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Shade labels, lightest first (default: 50,100,200,...,900)
    #[arg(long, value_delimiter = ',', value_name = "LABELS")]
    pub scale: Option<Vec<u32>>,

    /// Palette name
    #[arg(long)]
    pub name: Option<String>,

    /// Import a Material-UI palette file (JSON or YAML); its shades become anchors.
    /// Missing labels of --scale are generated and --config hue sets are merged on top
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Print how each shade was produced to stderr
    #[arg(long)]
    pub explain: bool,

    /// Load configuration from TOML file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Save current configuration to TOML file
    #[arg(long, value_name = "FILE")]
    pub save_config: Option<PathBuf>,

    /// Log file path (logging is off unless set)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error (default: info)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Generate shell completions for the specified shell
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<clap_complete::Shell>,
}
