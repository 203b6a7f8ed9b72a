mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vela", about = "Astronomical image render-configuration tool")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute percentile scale bounds from a histogram file
    Percentiles(commands::percentiles::PercentilesArgs),
    /// Build a color-scale gradient stop list
    Colorscale(commands::colorscale::ColorscaleArgs),
    /// Compute the required frame view for a viewport geometry
    View(commands::view::ViewArgs),
    /// List available colormaps
    Colormaps(commands::colormaps::ColormapsArgs),
    /// Print or save a default render preset as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Percentiles(args) => commands::percentiles::run(args),
        Commands::Colorscale(args) => commands::colorscale::run(args),
        Commands::View(args) => commands::view::run(args),
        Commands::Colormaps(args) => commands::colormaps::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
