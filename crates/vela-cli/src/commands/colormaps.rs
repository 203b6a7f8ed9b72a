use anyhow::Result;
use clap::Args;
use console::Style;
use vela_core::colormap::{mono_names, palette_names};

#[derive(Args)]
pub struct ColormapsArgs {}

pub fn run(_args: &ColormapsArgs) -> Result<()> {
    let header = Style::new().cyan().bold();

    println!("{}", header.apply_to("Palettes"));
    for name in palette_names() {
        println!("  {}", name);
    }
    println!();
    println!("{}", header.apply_to("Mono gradients"));
    for name in mono_names() {
        println!("  {}", name);
    }
    Ok(())
}
