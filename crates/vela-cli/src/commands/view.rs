use anyhow::Result;
use clap::Args;
use vela_core::viewport::{OverlayPadding, ViewSurface, Viewport};

#[derive(Args)]
pub struct ViewArgs {
    /// Image width in pixels
    #[arg(long)]
    pub image_width: f64,

    /// Image height in pixels
    #[arg(long)]
    pub image_height: f64,

    /// Render widget width in CSS pixels
    #[arg(long)]
    pub view_width: f64,

    /// Render widget height in CSS pixels
    #[arg(long)]
    pub view_height: f64,

    /// Overlay padding: top,bottom,left,right
    #[arg(long, value_delimiter = ',', num_args = 4, default_values_t = vec![0.0, 0.0, 0.0, 0.0])]
    pub padding: Vec<f64>,

    /// Zoom level (image pixels per screen pixel is 1/zoom); omit to fit
    #[arg(long)]
    pub zoom: Option<f64>,

    /// View center, image coordinates (default: image midpoint)
    #[arg(long, num_args = 2, value_delimiter = ',')]
    pub center: Option<Vec<f64>>,

    /// Enable high-DPI rendering
    #[arg(long)]
    pub hidpi: bool,

    /// Device pixel ratio (used with --hidpi)
    #[arg(long, default_value_t = 2.0)]
    pub pixel_ratio: f64,
}

pub fn run(args: &ViewArgs) -> Result<()> {
    let surface = ViewSurface {
        view_width: args.view_width,
        view_height: args.view_height,
        padding: OverlayPadding {
            top: args.padding[0],
            bottom: args.padding[1],
            left: args.padding[2],
            right: args.padding[3],
        },
        hidpi_enabled: args.hidpi,
        pixel_ratio: args.pixel_ratio,
    };

    let mut viewport = Viewport::new(args.image_width, args.image_height, surface);
    match args.zoom {
        Some(zoom) => viewport.set_zoom(zoom),
        None => {
            let zoom = viewport.fit_zoom();
            tracing::debug!(zoom, "fit zoom");
        }
    }
    if let Some(center) = &args.center {
        viewport.set_center(center[0], center[1]);
    }

    let view = viewport.required_frame_view();
    println!("Zoom:   {}", viewport.zoom_level);
    println!("Center: ({}, {})", viewport.center.x, viewport.center.y);
    println!("X:      [{}, {}]", view.x_min, view.x_max);
    println!("Y:      [{}, {}]", view.y_min, view.y_max);
    println!("Mip:    {}", view.mip);
    Ok(())
}
