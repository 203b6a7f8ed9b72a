use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vela_core::render_config::RenderPreset;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the preset to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a full default RenderPreset as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let preset = RenderPreset::default();
    let toml_str = toml::to_string_pretty(&preset)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write preset to {}", path.display()))?;
        println!("Default preset saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
