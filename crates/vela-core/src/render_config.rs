use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::colormap::{ColorMapSpec, Rgba};
use crate::colorscale::build_color_scale;
use crate::consts::{DEFAULT_PERCENTILE_RANK, MANUAL_SCALE_SENTINEL};
use crate::error::Result;
use crate::histogram::{Histogram, HistogramUpdate};
use crate::scaling::{ScalingKind, ScalingParams};

/// Shared handle for render configs that participate in sibling linking.
pub type SharedRenderConfig = Rc<RefCell<RenderConfig>>;

/// Per-image render configuration: transfer-function parameters, colormap,
/// histograms and per-polarization scale bounds.
///
/// Scale bounds follow a small state machine per polarization index: no
/// histogram yet, percentile-tracked (bounds recomputed on every histogram
/// update), or manually overridden (rank sentinel -1, bounds frozen until
/// the user edits them or selects a new rank).
pub struct RenderConfig {
    scaling: ScalingParams,
    colormap: ColorMapSpec,
    scale_min: Vec<f64>,
    scale_max: Vec<f64>,
    selected_percentile: Vec<f64>,
    channel_histogram: Option<Histogram>,
    cube_histogram: Option<Histogram>,
    use_cube_histogram: bool,
    cube_histogram_progress: f64,
    stokes_index: usize,
    visible: bool,
    siblings: Vec<Weak<RefCell<RenderConfig>>>,
    propagating: Cell<bool>,
}

impl RenderConfig {
    /// `stokes_count` is the number of polarization channels of the owning
    /// frame; zero is treated as one.
    pub fn new(stokes_count: usize) -> Self {
        let len = stokes_count.max(1);
        Self {
            scaling: ScalingParams::default(),
            colormap: ColorMapSpec::default(),
            scale_min: vec![0.0; len],
            scale_max: vec![1.0; len],
            selected_percentile: vec![DEFAULT_PERCENTILE_RANK; len],
            channel_histogram: None,
            cube_histogram: None,
            use_cube_histogram: false,
            cube_histogram_progress: 0.0,
            stokes_index: 0,
            visible: true,
            siblings: Vec::new(),
            propagating: Cell::new(false),
        }
    }

    pub fn shared(stokes_count: usize) -> SharedRenderConfig {
        Rc::new(RefCell::new(Self::new(stokes_count)))
    }

    // -----------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------

    pub fn scaling(&self) -> &ScalingParams {
        &self.scaling
    }

    pub fn colormap(&self) -> &ColorMapSpec {
        &self.colormap
    }

    pub fn stokes_index(&self) -> usize {
        self.stokes_index
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn cube_histogram_progress(&self) -> f64 {
        self.cube_histogram_progress
    }

    pub fn scale_min(&self) -> f64 {
        self.scale_min[self.stokes_index]
    }

    pub fn scale_max(&self) -> f64 {
        self.scale_max[self.stokes_index]
    }

    /// Selected percentile rank for the current polarization;
    /// [`MANUAL_SCALE_SENTINEL`] when the bounds are manually overridden.
    pub fn selected_percentile(&self) -> f64 {
        self.selected_percentile[self.stokes_index]
    }

    /// The authoritative histogram: the cube histogram when enabled and
    /// present, the channel histogram otherwise.
    pub fn histogram(&self) -> Option<&Histogram> {
        if self.use_cube_histogram && self.cube_histogram.is_some() {
            self.cube_histogram.as_ref()
        } else {
            self.channel_histogram.as_ref()
        }
    }

    /// Exact value bounds of the authoritative histogram.
    pub fn histogram_bounds(&self) -> Option<(f64, f64)> {
        self.histogram()
            .filter(|h| !h.bins.is_empty())
            .map(|h| (h.lower_bound(), h.upper_bound()))
    }

    /// The outbound gradient stop list for the GPU raster renderer.
    pub fn color_scale(&self, sample_count: usize) -> Vec<(f64, Rgba)> {
        build_color_scale(&self.colormap, &self.scaling, sample_count)
    }

    // -----------------------------------------------------------------
    // Histogram updates
    // -----------------------------------------------------------------

    /// Route an inbound backend histogram message to the channel or cube slot.
    pub fn apply_histogram_update(&mut self, update: &HistogramUpdate) {
        if update.is_cube() {
            self.update_cube_histogram(update.histogram.clone(), update.progress);
        } else {
            self.update_channel_histogram(update.histogram.clone());
        }
    }

    pub fn update_channel_histogram(&mut self, histogram: Histogram) {
        self.channel_histogram = Some(histogram);
        if self.selected_percentile() > 0.0 && !self.use_cube_histogram {
            self.set_percentile_rank(self.selected_percentile());
        }
    }

    pub fn update_cube_histogram(&mut self, histogram: Histogram, progress: f64) {
        self.cube_histogram = Some(histogram);
        self.cube_histogram_progress = progress.clamp(0.0, 1.0);
        if self.selected_percentile() > 0.0 && self.use_cube_histogram {
            self.set_percentile_rank(self.selected_percentile());
        }
    }

    pub fn set_use_cube_histogram(&mut self, val: bool) {
        if val != self.use_cube_histogram {
            self.use_cube_histogram = val;
            if self.selected_percentile() > 0.0 {
                self.set_percentile_rank(self.selected_percentile());
            }
        }
    }

    // -----------------------------------------------------------------
    // Scale bounds
    // -----------------------------------------------------------------

    /// Select a percentile rank and recompute the scale bounds from the
    /// authoritative histogram.
    ///
    /// Returns true when the bounds were updated. A rank outside [0, 100]
    /// leaves all state untouched; a missing or zero-count histogram records
    /// the rank but keeps the prior bounds (they are recomputed on the next
    /// histogram update).
    pub fn set_percentile_rank(&mut self, rank: f64) -> bool {
        if !(0.0..=100.0).contains(&rank) {
            return false;
        }
        let i = self.stokes_index;
        self.selected_percentile[i] = rank;

        let Some((min_val, max_val)) = self.percentile_bounds(rank) else {
            return false;
        };
        self.scale_min[i] = min_val;
        self.scale_max[i] = max_val;
        debug!(rank, min_val, max_val, "percentile scale bounds updated");
        self.update_siblings();
        true
    }

    fn percentile_bounds(&self, rank: f64) -> Option<(f64, f64)> {
        let histogram = self.histogram()?;
        if rank == 100.0 {
            // Full range: exact histogram edges, no interpolation.
            return Some((histogram.lower_bound(), histogram.upper_bound()));
        }
        let complement = 100.0 - rank;
        let ranks = [complement.min(rank), complement.max(rank)];
        match histogram.percentiles(&ranks) {
            Ok(values) if values.len() == 2 => Some((values[0], values[1])),
            // Zero-count histogram: undeterminable, keep prior bounds.
            Ok(_) => None,
            Err(err) => {
                tracing::warn!(%err, "percentile computation rejected histogram");
                None
            }
        }
    }

    /// Manually override the scale bounds, leaving percentile tracking.
    pub fn set_custom_scale(&mut self, min_val: f64, max_val: f64) {
        let i = self.stokes_index;
        self.scale_min[i] = min_val.min(max_val);
        self.scale_max[i] = max_val.max(min_val);
        self.selected_percentile[i] = MANUAL_SCALE_SENTINEL;
        self.update_siblings();
    }

    // -----------------------------------------------------------------
    // Transfer-function and colormap parameters
    // -----------------------------------------------------------------

    pub fn set_scaling(&mut self, kind: ScalingKind) {
        self.scaling.kind = kind;
        self.update_siblings();
    }

    pub fn set_gamma(&mut self, gamma: f64) {
        self.scaling.set_gamma(gamma);
        self.update_siblings();
    }

    pub fn set_alpha(&mut self, alpha: f64) {
        self.scaling.set_alpha(alpha);
        self.update_siblings();
    }

    pub fn set_bias(&mut self, bias: f64) {
        self.scaling.set_bias(bias);
        self.update_siblings();
    }

    pub fn reset_bias(&mut self) {
        self.scaling.bias = 0.0;
        self.update_siblings();
    }

    pub fn set_contrast(&mut self, contrast: f64) {
        self.scaling.set_contrast(contrast);
        self.update_siblings();
    }

    pub fn reset_contrast(&mut self) {
        self.scaling.contrast = 1.0;
        self.update_siblings();
    }

    pub fn set_inverted(&mut self, inverted: bool) {
        self.scaling.inverted = inverted;
        self.update_siblings();
    }

    pub fn set_colormap(&mut self, colormap: ColorMapSpec) {
        self.colormap = colormap;
        self.update_siblings();
    }

    /// Replace the colormap with a custom two-color gradient.
    pub fn set_custom_gradient(&mut self, start_hex: &str, end_hex: &str) -> Result<()> {
        self.colormap = ColorMapSpec::custom(start_hex, end_hex)?;
        self.update_siblings();
        Ok(())
    }

    pub fn set_stokes_index(&mut self, index: usize) {
        self.stokes_index = index.min(self.scale_min.len() - 1);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn toggle_visibility(&mut self) {
        self.visible = !self.visible;
    }

    // -----------------------------------------------------------------
    // Sibling propagation
    // -----------------------------------------------------------------

    /// Register another config to receive this one's parameters on change.
    /// The link is one-directional; use [`link_siblings`] for a mutual link.
    pub fn link_sibling(&mut self, sibling: &SharedRenderConfig) {
        self.siblings.push(Rc::downgrade(sibling));
    }

    pub fn unlink_all_siblings(&mut self) {
        self.siblings.clear();
    }

    /// Push the full parameter set to every linked sibling.
    ///
    /// Called after every mutation that affects the visual scale. The
    /// `propagating` flag and the non-broadcasting [`update_from`] receiver
    /// keep cyclic link graphs from recursing; dropped or currently borrowed
    /// siblings are skipped.
    pub fn update_siblings(&self) {
        if self.propagating.get() {
            return;
        }
        self.propagating.set(true);
        for handle in &self.siblings {
            if let Some(sibling) = handle.upgrade() {
                if let Ok(mut config) = sibling.try_borrow_mut() {
                    config.update_from(self);
                }
            }
        }
        self.propagating.set(false);
    }

    /// Copy the visual parameter set from a linked sibling.
    ///
    /// Final bounds are copied directly and percentile tracking is switched
    /// off on the receiving side; re-running the percentile computation here
    /// would feed back between mutually linked frames.
    pub fn update_from(&mut self, other: &RenderConfig) {
        let i = self.stokes_index;
        self.scaling = other.scaling;
        self.colormap = other.colormap.clone();
        self.scale_min[i] = other.scale_min();
        self.scale_max[i] = other.scale_max();
        self.selected_percentile[i] = MANUAL_SCALE_SENTINEL;
    }

    // -----------------------------------------------------------------
    // Presets
    // -----------------------------------------------------------------

    /// Snapshot of the visual parameters, for saving alongside a workspace.
    pub fn preset(&self) -> RenderPreset {
        RenderPreset {
            scaling: self.scaling,
            colormap: self.colormap.clone(),
            scale_min: self.scale_min.clone(),
            scale_max: self.scale_max.clone(),
            selected_percentile: self.selected_percentile.clone(),
            visible: self.visible,
        }
    }

    /// Restore a previously saved snapshot and broadcast it to siblings.
    pub fn apply_preset(&mut self, preset: &RenderPreset) {
        let len = self.scale_min.len();
        self.scaling = preset.scaling;
        self.colormap = preset.colormap.clone();
        self.scale_min = resized(&preset.scale_min, len, 0.0);
        self.scale_max = resized(&preset.scale_max, len, 1.0);
        self.selected_percentile = resized(&preset.selected_percentile, len, MANUAL_SCALE_SENTINEL);
        self.visible = preset.visible;
        self.update_siblings();
    }
}

/// Link two configs in both directions so that edits on either side are
/// mirrored on the other.
pub fn link_siblings(a: &SharedRenderConfig, b: &SharedRenderConfig) {
    a.borrow_mut().link_sibling(b);
    b.borrow_mut().link_sibling(a);
}

/// Serializable snapshot of a [`RenderConfig`]'s visual parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RenderPreset {
    pub scaling: ScalingParams,
    pub colormap: ColorMapSpec,
    pub scale_min: Vec<f64>,
    pub scale_max: Vec<f64>,
    pub selected_percentile: Vec<f64>,
    pub visible: bool,
}

impl Default for RenderPreset {
    fn default() -> Self {
        RenderConfig::new(1).preset()
    }
}

fn resized(values: &[f64], len: usize, fill: f64) -> Vec<f64> {
    let mut out = values.to_vec();
    out.resize(len, fill);
    out
}
