use serde::{Deserialize, Serialize};

use crate::consts::{
    ALPHA_MAX, ALPHA_MIN, BIAS_MAX, BIAS_MIN, CONTRAST_MAX, CONTRAST_MIN, EPSILON, GAMMA_MAX,
    GAMMA_MIN, LOG_APPROXIMATION_BASE,
};

/// Intensity-to-normalized-value transfer function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalingKind {
    Linear,
    Log,
    Sqrt,
    Square,
    Power,
    Gamma,
}

impl ScalingKind {
    pub const ALL: [ScalingKind; 6] = [
        ScalingKind::Linear,
        ScalingKind::Log,
        ScalingKind::Sqrt,
        ScalingKind::Square,
        ScalingKind::Power,
        ScalingKind::Gamma,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScalingKind::Linear => "Linear",
            ScalingKind::Log => "Log",
            ScalingKind::Sqrt => "Square root",
            ScalingKind::Square => "Squared",
            ScalingKind::Power => "Power",
            ScalingKind::Gamma => "Gamma",
        }
    }
}

/// Parameters of the active transfer function.
///
/// `forward` maps a value already normalized to [0, 1] (linearly rescaled
/// from `[scale_min, scale_max]`) back onto [0, 1] through the selected
/// nonlinearity, a bias/contrast affine step, and an optional flip. The
/// mapping is monotonic for every valid parameter combination; the
/// color-scale builder relies on that to deduplicate gradient stops.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScalingParams {
    pub kind: ScalingKind,
    /// Base for the power transfer function.
    pub alpha: f64,
    /// Exponent for the gamma transfer function, in [0.1, 2.0].
    pub gamma: f64,
    /// Post-transform offset, in [-1, 1].
    pub bias: f64,
    /// Post-transform slope around the midpoint, in [0, 2].
    pub contrast: f64,
    /// Flip the final result: y -> 1 - y.
    pub inverted: bool,
}

impl Default for ScalingParams {
    fn default() -> Self {
        Self {
            kind: ScalingKind::Linear,
            alpha: 1000.0,
            gamma: 1.0,
            bias: 0.0,
            contrast: 1.0,
            inverted: false,
        }
    }
}

impl ScalingParams {
    pub fn new(kind: ScalingKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha.clamp(ALPHA_MIN, ALPHA_MAX);
    }

    pub fn set_gamma(&mut self, gamma: f64) {
        self.gamma = gamma.clamp(GAMMA_MIN, GAMMA_MAX);
    }

    pub fn set_bias(&mut self, bias: f64) {
        self.bias = bias.clamp(BIAS_MIN, BIAS_MAX);
    }

    pub fn set_contrast(&mut self, contrast: f64) {
        self.contrast = contrast.clamp(CONTRAST_MIN, CONTRAST_MAX);
    }

    /// Full forward transfer: nonlinearity, then bias/contrast, then flip.
    pub fn forward(&self, x: f64) -> f64 {
        let y = self.base_forward(x.clamp(0.0, 1.0));
        let y = apply_bias_contrast(y, self.bias, self.contrast);
        if self.inverted {
            1.0 - y
        } else {
            y
        }
    }

    /// Monotone inverse of [`forward`](Self::forward).
    ///
    /// The bias/contrast step saturates at the domain boundary, so the
    /// inverse is exact only over the unsaturated interior; saturated values
    /// map to the nearest boundary.
    pub fn inverse(&self, y: f64) -> f64 {
        let y = y.clamp(0.0, 1.0);
        let y = if self.inverted { 1.0 - y } else { y };
        let y = invert_bias_contrast(y, self.bias, self.contrast);
        self.base_inverse(y)
    }

    fn base_forward(&self, x: f64) -> f64 {
        let v = match self.kind {
            ScalingKind::Linear => x,
            ScalingKind::Log => {
                let k = LOG_APPROXIMATION_BASE;
                (x * k + 1.0).ln() / (k + 1.0).ln()
            }
            ScalingKind::Sqrt => x.sqrt(),
            ScalingKind::Square => x * x,
            ScalingKind::Power => {
                let a = self.alpha.clamp(ALPHA_MIN, ALPHA_MAX);
                if (a - 1.0).abs() < EPSILON {
                    x
                } else {
                    (a.powf(x) - 1.0) / (a - 1.0)
                }
            }
            ScalingKind::Gamma => x.powf(self.gamma.clamp(GAMMA_MIN, GAMMA_MAX)),
        };
        v.clamp(0.0, 1.0)
    }

    fn base_inverse(&self, y: f64) -> f64 {
        let x = match self.kind {
            ScalingKind::Linear => y,
            ScalingKind::Log => {
                let k = LOG_APPROXIMATION_BASE;
                ((k + 1.0).powf(y) - 1.0) / k
            }
            ScalingKind::Sqrt => y * y,
            ScalingKind::Square => y.sqrt(),
            ScalingKind::Power => {
                let a = self.alpha.clamp(ALPHA_MIN, ALPHA_MAX);
                if (a - 1.0).abs() < EPSILON {
                    y
                } else {
                    (y * (a - 1.0) + 1.0).ln() / a.ln()
                }
            }
            ScalingKind::Gamma => y.powf(1.0 / self.gamma.clamp(GAMMA_MIN, GAMMA_MAX)),
        };
        x.clamp(0.0, 1.0)
    }
}

fn apply_bias_contrast(y: f64, bias: f64, contrast: f64) -> f64 {
    ((y - 0.5) * contrast + 0.5 + bias).clamp(0.0, 1.0)
}

fn invert_bias_contrast(y: f64, bias: f64, contrast: f64) -> f64 {
    if contrast.abs() < EPSILON {
        // The forward step collapsed the whole range onto one value; pick the
        // midpoint as the representative preimage.
        return 0.5;
    }
    ((y - 0.5 - bias) / contrast + 0.5).clamp(0.0, 1.0)
}
