//! CLI entry point for shadesmith.

use std::io;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr, bail, eyre};

use shadesmith::cli::{Cli, OutputFormat};
use shadesmith::config::PaletteConfig;
use shadesmith::export::{MuiPalette, render_provenance};
use shadesmith::generate::generate_palette;
use shadesmith::import::import_palette;
use shadesmith::logging::init_logging;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "shadesmith", &mut io::stdout());
        return Ok(());
    }

    let _guard = cli
        .log_file
        .as_deref()
        .map(|path| init_logging(Some(path), Some(&cli.log_level)));

    let config = PaletteConfig::load_layered(cli.config.as_deref(), &cli.to_config_overrides())
        .wrap_err("Failed to load configuration")?;
    let mode = config.default_mode()?;

    // Start from an imported palette or the config's hue sets; config hue
    // sets are layered over an import
    let mut palette = match cli.input {
        Some(ref path) => {
            let scale = config.shade_scale()?;
            let mut palette = import_palette(path, mode, Some(&scale))?;
            if let Some(ref name) = cli.name {
                palette.name = name.clone();
            }
            config
                .apply_hue_sets(&mut palette)
                .wrap_err("Failed to apply configured hue sets to the imported palette")?;
            palette
        }
        None => config.to_palette()?,
    };

    let anchors = cli.parsed_anchors().map_err(|e| eyre!(e))?;
    for anchor in anchors {
        let hue_set = palette.hue_set_or_insert(&anchor.hue_set);
        if hue_set.shades.iter().all(|s| !s.locked) {
            hue_set.extrapolation_mode = mode;
        }
        if !hue_set.lock(anchor.label, anchor.hsv) {
            bail!(
                "Hue set '{}' has no shade labelled {}",
                anchor.hue_set,
                anchor.label
            );
        }
    }

    if palette.hue_sets.is_empty() {
        bail!("Nothing to generate: pass --anchor, --config or --input");
    }

    if let Some(ref path) = cli.save_config {
        PaletteConfig::from_palette(&palette, mode)
            .save(path)
            .wrap_err_with(|| format!("Failed to save config to {}", path.display()))?;
        eprintln!("Saved configuration to {}", path.display());
    }

    let generation = generate_palette(&palette);

    for advisory in &generation.advisories {
        eprintln!("Warning: {advisory}");
    }

    if cli.explain {
        for hue_set in &generation.palette.hue_sets {
            eprint!("{}", render_provenance(hue_set));
        }
    }

    let mui = MuiPalette::from_palette(&generation.palette);
    let output = match cli.format {
        OutputFormat::Json => {
            let mut json = mui.to_json().wrap_err("Failed to serialize palette to JSON")?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => mui.to_yaml().wrap_err("Failed to serialize palette to YAML")?,
    };

    if let Some(ref path) = cli.output {
        std::fs::write(path, &output)
            .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
        eprintln!("Wrote palette to {}", path.display());
    } else {
        print!("{output}");
    }

    Ok(())
}
