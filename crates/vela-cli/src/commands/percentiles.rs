use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use vela_core::histogram::Histogram;

#[derive(Args)]
pub struct PercentilesArgs {
    /// Input histogram JSON file ({"first_bin_center", "bin_width", "bins"})
    pub file: PathBuf,

    /// Percentile ranks in [0, 100], ascending
    #[arg(short, long, value_delimiter = ',', default_values_t = vec![90.0, 99.0, 99.9])]
    pub ranks: Vec<f64>,
}

pub fn run(args: &PercentilesArgs) -> Result<()> {
    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let histogram: Histogram =
        serde_json::from_str(&text).context("Failed to parse histogram JSON")?;

    println!("Bins:        {}", histogram.bins.len());
    println!("Bin width:   {}", histogram.bin_width);
    println!("Lower bound: {}", histogram.lower_bound());
    println!("Upper bound: {}", histogram.upper_bound());
    println!("Total count: {}", histogram.total_count());

    let values = histogram.percentiles(&args.ranks)?;
    if values.is_empty() {
        bail!("histogram has zero total count; percentiles are undeterminable");
    }

    println!();
    for (rank, value) in args.ranks.iter().zip(&values) {
        println!("{:>8}%  {}", rank, value);
    }
    Ok(())
}
