mod common;

use approx::assert_relative_eq;
use vela_core::colormap::ColorMapSpec;
use vela_core::consts::{DEFAULT_PERCENTILE_RANK, MANUAL_SCALE_SENTINEL};
use vela_core::histogram::{Histogram, HistogramUpdate};
use vela_core::render_config::{link_siblings, RenderConfig, RenderPreset};
use vela_core::scaling::ScalingKind;

use common::make_histogram;

fn ramp_histogram() -> Histogram {
    make_histogram(vec![1.0, 2.0, 3.0, 4.0])
}

// ---------------------------------------------------------------------------
// Percentile tracking
// ---------------------------------------------------------------------------

#[test]
fn test_new_config_defaults() {
    let config = RenderConfig::new(4);
    assert_relative_eq!(config.scale_min(), 0.0);
    assert_relative_eq!(config.scale_max(), 1.0);
    assert_relative_eq!(config.selected_percentile(), DEFAULT_PERCENTILE_RANK);
    assert!(config.histogram().is_none());
    assert!(config.visible());
}

#[test]
fn test_histogram_update_recomputes_tracked_bounds() {
    let mut config = RenderConfig::new(1);
    // No histogram yet: the rank is recorded but bounds stay put.
    assert!(!config.set_percentile_rank(90.0));
    assert_relative_eq!(config.selected_percentile(), 90.0);
    assert_relative_eq!(config.scale_min(), 0.0);
    assert_relative_eq!(config.scale_max(), 1.0);

    config.update_channel_histogram(ramp_histogram());
    assert_relative_eq!(config.scale_min(), 1.0, epsilon = 1e-12);
    assert_relative_eq!(config.scale_max(), 3.75, epsilon = 1e-12);
}

#[test]
fn test_rank_100_uses_exact_histogram_edges() {
    let mut config = RenderConfig::new(1);
    config.update_channel_histogram(ramp_histogram());
    assert!(config.set_percentile_rank(100.0));
    assert_eq!(config.scale_min(), 0.0);
    assert_eq!(config.scale_max(), 4.0);
}

#[test]
fn test_invalid_rank_mutates_nothing() {
    let mut config = RenderConfig::new(1);
    config.update_channel_histogram(ramp_histogram());
    let min_before = config.scale_min();
    let max_before = config.scale_max();
    let rank_before = config.selected_percentile();

    assert!(!config.set_percentile_rank(150.0));
    assert!(!config.set_percentile_rank(-3.0));
    assert_eq!(config.scale_min(), min_before);
    assert_eq!(config.scale_max(), max_before);
    assert_eq!(config.selected_percentile(), rank_before);
}

#[test]
fn test_zero_count_histogram_keeps_prior_bounds() {
    let mut config = RenderConfig::new(1);
    config.update_channel_histogram(ramp_histogram());
    assert!(config.set_percentile_rank(90.0));
    let min_before = config.scale_min();
    let max_before = config.scale_max();

    config.update_channel_histogram(make_histogram(vec![0.0, 0.0, 0.0, 0.0]));
    assert_eq!(config.scale_min(), min_before);
    assert_eq!(config.scale_max(), max_before);
}

#[test]
fn test_custom_scale_freezes_tracking() {
    let mut config = RenderConfig::new(1);
    config.update_channel_histogram(ramp_histogram());

    config.set_custom_scale(-2.0, 7.0);
    assert_eq!(config.scale_min(), -2.0);
    assert_eq!(config.scale_max(), 7.0);
    assert_eq!(config.selected_percentile(), MANUAL_SCALE_SENTINEL);

    // Later histogram updates must not touch manually chosen bounds.
    config.update_channel_histogram(make_histogram(vec![9.0, 9.0]));
    assert_eq!(config.scale_min(), -2.0);
    assert_eq!(config.scale_max(), 7.0);
}

#[test]
fn test_custom_scale_normalizes_swapped_bounds() {
    let mut config = RenderConfig::new(1);
    config.set_custom_scale(5.0, -5.0);
    assert!(config.scale_min() <= config.scale_max());
}

#[test]
fn test_bounds_are_per_polarization() {
    let mut config = RenderConfig::new(2);
    config.update_channel_histogram(ramp_histogram());
    assert!(config.set_percentile_rank(90.0));
    let stokes0_min = config.scale_min();

    config.set_stokes_index(1);
    assert_relative_eq!(config.scale_min(), 0.0);
    config.set_custom_scale(0.2, 0.8);

    config.set_stokes_index(0);
    assert_eq!(config.scale_min(), stokes0_min);
    assert_relative_eq!(config.selected_percentile(), 90.0);
}

// ---------------------------------------------------------------------------
// Cube histogram
// ---------------------------------------------------------------------------

#[test]
fn test_cube_histogram_becomes_authoritative_when_enabled() {
    let mut config = RenderConfig::new(1);
    config.update_channel_histogram(ramp_histogram());
    assert!(config.set_percentile_rank(100.0));
    assert_eq!(config.scale_max(), 4.0);

    // A cube histogram twice as wide.
    config.update_cube_histogram(Histogram::new(0.5, 2.0, vec![1.0, 2.0, 3.0, 4.0]), 0.5);
    assert_relative_eq!(config.cube_histogram_progress(), 0.5);
    // Not yet authoritative.
    assert_eq!(config.scale_max(), 4.0);

    config.set_use_cube_histogram(true);
    assert_relative_eq!(config.scale_max(), 0.5 + 3.5 * 2.0, epsilon = 1e-12);

    config.set_use_cube_histogram(false);
    assert_eq!(config.scale_max(), 4.0);
}

#[test]
fn test_histogram_update_routing() {
    let mut config = RenderConfig::new(1);

    let channel = HistogramUpdate {
        region_id: vela_core::consts::IMAGE_REGION_ID,
        channel: 0,
        stokes: 0,
        progress: 1.0,
        histogram: ramp_histogram(),
    };
    config.apply_histogram_update(&channel);
    assert!(config.histogram().is_some());
    assert!(config.cube_histogram_progress() == 0.0);

    let cube = HistogramUpdate {
        region_id: vela_core::consts::CUBE_REGION_ID,
        channel: -1,
        stokes: 0,
        progress: 0.25,
        histogram: ramp_histogram(),
    };
    config.apply_histogram_update(&cube);
    assert_relative_eq!(config.cube_histogram_progress(), 0.25);
}

// ---------------------------------------------------------------------------
// Sibling propagation
// ---------------------------------------------------------------------------

#[test]
fn test_sibling_receives_parameters_and_bounds() {
    let a = RenderConfig::shared(1);
    let b = RenderConfig::shared(1);
    link_siblings(&a, &b);

    a.borrow_mut().update_channel_histogram(ramp_histogram());
    a.borrow_mut().set_scaling(ScalingKind::Log);
    a.borrow_mut().set_gamma(1.5);

    let b_ref = b.borrow();
    assert_eq!(b_ref.scaling().kind, ScalingKind::Log);
    assert_relative_eq!(b_ref.scaling().gamma, 1.5);
    // Bounds are copied directly; the receiver leaves percentile tracking.
    assert_eq!(b_ref.scale_min(), a.borrow().scale_min());
    assert_eq!(b_ref.scale_max(), a.borrow().scale_max());
    assert_eq!(b_ref.selected_percentile(), MANUAL_SCALE_SENTINEL);
}

#[test]
fn test_cyclic_links_terminate() {
    let a = RenderConfig::shared(1);
    let b = RenderConfig::shared(1);
    let c = RenderConfig::shared(1);
    link_siblings(&a, &b);
    link_siblings(&b, &c);
    link_siblings(&c, &a);

    a.borrow_mut().set_contrast(1.4);
    assert_relative_eq!(b.borrow().scaling().contrast, 1.4);
    assert_relative_eq!(c.borrow().scaling().contrast, 1.4);
}

#[test]
fn test_sibling_update_does_not_rebroadcast() {
    let a = RenderConfig::shared(1);
    let b = RenderConfig::shared(1);
    let c = RenderConfig::shared(1);
    // Chain: a -> b -> c, but no link from b back to c's source.
    a.borrow_mut().link_sibling(&b);
    b.borrow_mut().link_sibling(&c);

    a.borrow_mut().set_bias(0.3);
    assert_relative_eq!(b.borrow().scaling().bias, 0.3);
    // update_from must not fan out further.
    assert_relative_eq!(c.borrow().scaling().bias, 0.0);
}

#[test]
fn test_colormap_propagates_to_siblings() {
    let a = RenderConfig::shared(1);
    let b = RenderConfig::shared(1);
    link_siblings(&a, &b);

    a.borrow_mut()
        .set_colormap(ColorMapSpec::palette("viridis").unwrap());
    assert_eq!(b.borrow().colormap().name(), "viridis");

    a.borrow_mut().set_custom_gradient("#000000", "#FF0000").unwrap();
    assert_eq!(b.borrow().colormap().name(), "custom");
}

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

#[test]
fn test_preset_roundtrip() {
    let mut config = RenderConfig::new(2);
    config.update_channel_histogram(ramp_histogram());
    config.set_scaling(ScalingKind::Gamma);
    config.set_gamma(0.5);
    config.set_custom_scale(-1.0, 3.0);
    config.set_inverted(true);

    let preset = config.preset();
    let json = serde_json::to_string(&preset).unwrap();
    let restored: RenderPreset = serde_json::from_str(&json).unwrap();

    let mut other = RenderConfig::new(2);
    other.apply_preset(&restored);
    assert_eq!(other.scaling().kind, ScalingKind::Gamma);
    assert_relative_eq!(other.scaling().gamma, 0.5);
    assert!(other.scaling().inverted);
    assert_eq!(other.scale_min(), -1.0);
    assert_eq!(other.scale_max(), 3.0);
    assert_eq!(other.selected_percentile(), MANUAL_SCALE_SENTINEL);
}
