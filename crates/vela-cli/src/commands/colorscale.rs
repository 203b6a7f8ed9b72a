use anyhow::Result;
use clap::{Args, ValueEnum};
use vela_core::colormap::ColorMapSpec;
use vela_core::colorscale::build_color_scale;
use vela_core::consts::COLOR_GRADIENT_SAMPLES;
use vela_core::scaling::{ScalingKind, ScalingParams};

#[derive(Clone, Copy, ValueEnum)]
pub enum ScalingArg {
    Linear,
    Log,
    Sqrt,
    Square,
    Power,
    Gamma,
}

impl From<ScalingArg> for ScalingKind {
    fn from(arg: ScalingArg) -> Self {
        match arg {
            ScalingArg::Linear => ScalingKind::Linear,
            ScalingArg::Log => ScalingKind::Log,
            ScalingArg::Sqrt => ScalingKind::Sqrt,
            ScalingArg::Square => ScalingKind::Square,
            ScalingArg::Power => ScalingKind::Power,
            ScalingArg::Gamma => ScalingKind::Gamma,
        }
    }
}

#[derive(Args)]
pub struct ColorscaleArgs {
    /// Named palette
    #[arg(long, default_value = "inferno", conflicts_with_all = ["mono", "custom_start"])]
    pub colormap: String,

    /// Single-hue mono gradient (e.g. Red, Cyan)
    #[arg(long)]
    pub mono: Option<String>,

    /// Custom gradient start color (hex, with --custom-end)
    #[arg(long, requires = "custom_end")]
    pub custom_start: Option<String>,

    /// Custom gradient end color (hex)
    #[arg(long)]
    pub custom_end: Option<String>,

    /// Transfer function
    #[arg(long, value_enum, default_value_t = ScalingArg::Linear)]
    pub scaling: ScalingArg,

    /// Alpha for the power transfer function
    #[arg(long, default_value_t = 1000.0)]
    pub alpha: f64,

    /// Gamma exponent, clamped to [0.1, 2.0]
    #[arg(long, default_value_t = 1.0)]
    pub gamma: f64,

    /// Bias, clamped to [-1, 1]
    #[arg(long, default_value_t = 0.0)]
    pub bias: f64,

    /// Contrast, clamped to [0, 2]
    #[arg(long, default_value_t = 1.0)]
    pub contrast: f64,

    /// Invert the colormap
    #[arg(long)]
    pub inverted: bool,

    /// Number of palette samples
    #[arg(long, default_value_t = COLOR_GRADIENT_SAMPLES)]
    pub samples: usize,
}

pub fn run(args: &ColorscaleArgs) -> Result<()> {
    let colormap = if let (Some(start), Some(end)) = (&args.custom_start, &args.custom_end) {
        ColorMapSpec::custom(start, end)?
    } else if let Some(mono) = &args.mono {
        ColorMapSpec::mono(mono)?
    } else {
        ColorMapSpec::palette(&args.colormap)?
    };

    let mut scaling = ScalingParams::new(args.scaling.into());
    scaling.set_alpha(args.alpha);
    scaling.set_gamma(args.gamma);
    scaling.set_bias(args.bias);
    scaling.set_contrast(args.contrast);
    scaling.inverted = args.inverted;

    let stops = build_color_scale(&colormap, &scaling, args.samples);
    println!("Colormap: {}", colormap.name());
    println!("Scaling:  {}", ScalingKind::from(args.scaling).name());
    println!("Stops:    {}", stops.len());
    println!();
    for (position, color) in &stops {
        println!(
            "{:.6}  rgba({}, {}, {}, {})",
            position, color.r, color.g, color.b, color.a
        );
    }
    Ok(())
}
