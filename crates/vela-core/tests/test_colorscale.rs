use vela_core::colormap::{ColorMapSpec, Rgba};
use vela_core::colorscale::build_color_scale;
use vela_core::error::VelaError;
use vela_core::scaling::{ScalingKind, ScalingParams};

// ---------------------------------------------------------------------------
// Colormap sampling
// ---------------------------------------------------------------------------

#[test]
fn test_hex_parsing() {
    assert_eq!(Rgba::from_hex("#FF8000").unwrap(), Rgba::opaque(255, 128, 0));
    assert_eq!(Rgba::from_hex("00ff00").unwrap(), Rgba::opaque(0, 255, 0));
    assert!(matches!(
        Rgba::from_hex("#12345"),
        Err(VelaError::InvalidHexColor(_))
    ));
    assert!(Rgba::from_hex("#GGGGGG").is_err());
}

#[test]
fn test_unknown_colormap_rejected() {
    assert!(matches!(
        ColorMapSpec::palette("no-such-map"),
        Err(VelaError::UnknownColormap(_))
    ));
    assert!(ColorMapSpec::mono("no-such-hue").is_err());
}

#[test]
fn test_gray_palette_endpoints_and_midpoint() {
    let gray = ColorMapSpec::palette("gray").unwrap();
    assert_eq!(gray.sample(0.0), Rgba::opaque(0, 0, 0));
    assert_eq!(gray.sample(1.0), Rgba::opaque(255, 255, 255));
    assert_eq!(gray.sample(0.5), Rgba::opaque(128, 128, 128));
}

#[test]
fn test_mono_gradient_ramps_from_black() {
    let red = ColorMapSpec::mono("Red").unwrap();
    assert_eq!(red.sample(0.0), Rgba::opaque(0, 0, 0));
    assert_eq!(red.sample(1.0), Rgba::opaque(255, 0, 0));
    assert_eq!(red.sample(0.5), Rgba::opaque(128, 0, 0));
}

#[test]
fn test_custom_gradient() {
    let custom = ColorMapSpec::custom("#000000", "#0000FF").unwrap();
    assert_eq!(custom.sample(0.5), Rgba::opaque(0, 0, 128));
    assert_eq!(custom.name(), "custom");
}

// ---------------------------------------------------------------------------
// Stop-list construction
// ---------------------------------------------------------------------------

#[test]
fn test_linear_scaling_keeps_uniform_stops() {
    let gray = ColorMapSpec::palette("gray").unwrap();
    let scaling = ScalingParams::default();
    let stops = build_color_scale(&gray, &scaling, 16);
    assert!(stops.len() >= 2);
    assert_eq!(stops.first().unwrap().0, 0.0);
    assert_eq!(stops.last().unwrap().0, 1.0);
    for pair in stops.windows(2) {
        assert!(pair[0].0 < pair[1].0, "stop positions must be ascending");
    }
}

#[test]
fn test_stop_colors_follow_transfer_function() {
    // With sqrt scaling, the stop carrying palette color t sits at t^2.
    let gray = ColorMapSpec::palette("gray").unwrap();
    let scaling = ScalingParams::new(ScalingKind::Sqrt);
    let stops = build_color_scale(&gray, &scaling, 64);
    for (pos, color) in &stops {
        let t = pos.sqrt();
        let expected = (t * 255.0).round() as i32;
        assert!(
            (color.r as i32 - expected).abs() <= 3,
            "stop at {pos}: got {} expected ~{expected}",
            color.r
        );
    }
}

#[test]
fn test_nonlinear_scaling_compresses_stop_spacing() {
    let gray = ColorMapSpec::palette("gray").unwrap();
    let scaling = ScalingParams::new(ScalingKind::Log);
    let stops = build_color_scale(&gray, &scaling, 32);
    // Log emphasizes the low end: most stop positions crowd below 0.5.
    let low = stops.iter().filter(|(pos, _)| *pos < 0.5).count();
    assert!(low > stops.len() / 2);
}

#[test]
fn test_inverted_scaling_reverses_colors() {
    let gray = ColorMapSpec::palette("gray").unwrap();
    let mut scaling = ScalingParams::default();
    scaling.inverted = true;
    let stops = build_color_scale(&gray, &scaling, 16);
    assert!(stops.first().unwrap().1.r > stops.last().unwrap().1.r);
    for pair in stops.windows(2) {
        assert!(pair[0].0 < pair[1].0);
    }
}

#[test]
fn test_zero_contrast_collapses_to_flat_pair() {
    for name in ["gray", "viridis", "jet"] {
        let map = ColorMapSpec::palette(name).unwrap();
        let mut scaling = ScalingParams::default();
        scaling.set_contrast(0.0);
        let stops = build_color_scale(&map, &scaling, 128);
        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].0, 0.0);
        assert_eq!(stops[1].0, 1.0);
        assert_eq!(stops[0].1, stops[1].1, "flat gradient must repeat one color");
    }
}

#[test]
fn test_minimum_two_stops() {
    let map = ColorMapSpec::mono("Blue").unwrap();
    for contrast in [0.0, 0.5, 1.0, 2.0] {
        let mut scaling = ScalingParams::new(ScalingKind::Log);
        scaling.set_contrast(contrast);
        let stops = build_color_scale(&map, &scaling, 2);
        assert!(stops.len() >= 2);
    }
}

#[test]
fn test_saturated_run_carries_boundary_color() {
    // Strong negative bias clamps the top of the transfer function: every
    // palette sample from t = 0.1 upward lands on position 1.0. The stop
    // kept there must show the color the function actually maps 1.0 to,
    // not the palette's white end.
    let gray = ColorMapSpec::palette("gray").unwrap();
    let mut scaling = ScalingParams::default();
    scaling.set_bias(-0.9);
    let stops = build_color_scale(&gray, &scaling, 256);
    let (pos, color) = stops.last().unwrap();
    assert_eq!(*pos, 1.0);
    let expected = (scaling.forward(1.0) * 255.0).round() as i32;
    assert!(
        (color.r as i32 - expected).abs() <= 1,
        "top stop: got {} expected ~{expected}",
        color.r
    );
    assert!(color.r < 64, "saturated top stop must not jump to white");
}

#[test]
fn test_duplicate_positions_are_collapsed() {
    // Heavy bias saturates a large part of the transfer function, so many
    // palette samples land on the same position.
    let gray = ColorMapSpec::palette("gray").unwrap();
    let mut scaling = ScalingParams::default();
    scaling.set_bias(0.9);
    let stops = build_color_scale(&gray, &scaling, 256);
    assert!(stops.len() < 256);
    for pair in stops.windows(2) {
        assert!(pair[0].0 < pair[1].0, "duplicate stop positions remain");
    }
}
