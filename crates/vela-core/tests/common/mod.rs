use vela_core::histogram::Histogram;
use vela_core::viewport::ViewSurface;

/// Histogram with unit-width bins, first bin centered at 0.5 (so the lower
/// bound is exactly 0.0 and bin edges fall on integers).
#[allow(dead_code)]
pub fn make_histogram(bins: Vec<f64>) -> Histogram {
    Histogram::new(0.5, 1.0, bins)
}

/// A plain render surface with no padding and no high-DPI scaling.
#[allow(dead_code)]
pub fn make_surface(width: f64, height: f64) -> ViewSurface {
    ViewSurface::new(width, height)
}
