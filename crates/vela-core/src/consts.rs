/// Base constant K for the log transfer function: log(x*K + 1) / log(K + 1).
/// Large values emphasize the low end of the intensity range.
pub const LOG_APPROXIMATION_BASE: f64 = 1000.0;

/// Valid range for the gamma scaling parameter.
pub const GAMMA_MIN: f64 = 0.1;
pub const GAMMA_MAX: f64 = 2.0;

/// Valid range for the power-scaling alpha parameter.
pub const ALPHA_MIN: f64 = 0.1;
pub const ALPHA_MAX: f64 = 1_000_000.0;

/// Valid range for the colormap bias parameter.
pub const BIAS_MIN: f64 = -1.0;
pub const BIAS_MAX: f64 = 1.0;

/// Valid range for the colormap contrast parameter.
pub const CONTRAST_MIN: f64 = 0.0;
pub const CONTRAST_MAX: f64 = 2.0;

/// Decimation (mip) rounding hysteresis: fractional parts below this
/// threshold round down, everything else rounds up. Keeps the mip level
/// stable when the zoom level hovers near an integer boundary.
pub const MIP_ROUND_THRESHOLD: f64 = 0.25;

/// Number of palette samples taken when building a color-scale stop list.
pub const COLOR_GRADIENT_SAMPLES: usize = 256;

/// Preset percentile ranks offered for scale-bound selection.
pub const PERCENTILE_RANKS: [f64; 8] = [90.0, 95.0, 99.0, 99.5, 99.9, 99.95, 99.99, 100.0];

/// Default percentile rank applied to newly created render configs.
pub const DEFAULT_PERCENTILE_RANK: f64 = 99.9;

/// Sentinel stored in `selected_percentile` when the scale bounds have been
/// manually overridden and no longer track a percentile rank.
pub const MANUAL_SCALE_SENTINEL: f64 = -1.0;

/// Region id carried by whole-image (per-channel) histogram updates.
pub const IMAGE_REGION_ID: i32 = -1;

/// Region id carried by whole-cube histogram updates.
pub const CUBE_REGION_ID: i32 = -2;

/// Small epsilon for floating-point degeneracy checks.
pub const EPSILON: f64 = 1e-10;
