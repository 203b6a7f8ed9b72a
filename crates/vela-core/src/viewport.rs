use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::MIP_ROUND_THRESHOLD;
use crate::geometry::{FrameView, Point2D};

/// Margins reserved around the image area for axis labels and the colorbar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayPadding {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

/// The render surface: full widget size, overlay padding and DPI handling.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewSurface {
    pub view_width: f64,
    pub view_height: f64,
    pub padding: OverlayPadding,
    /// Render at native resolution on high-DPI displays.
    pub hidpi_enabled: bool,
    /// Device pixel ratio reported by the display.
    pub pixel_ratio: f64,
}

impl ViewSurface {
    pub fn new(view_width: f64, view_height: f64) -> Self {
        Self {
            view_width,
            view_height,
            padding: OverlayPadding::default(),
            hidpi_enabled: false,
            pixel_ratio: 1.0,
        }
    }

    /// Width of the image area: the view minus horizontal padding.
    pub fn render_width(&self) -> f64 {
        self.view_width - self.padding.left - self.padding.right
    }

    /// Height of the image area: the view minus vertical padding.
    pub fn render_height(&self) -> f64 {
        self.view_height - self.padding.top - self.padding.bottom
    }

    /// The high-DPI multiplier, active only when high-DPI rendering is on.
    pub fn effective_pixel_ratio(&self) -> f64 {
        if self.hidpi_enabled {
            self.pixel_ratio
        } else {
            1.0
        }
    }
}

/// Pan/zoom state of one displayed image, and the transform from that state
/// to the sub-region and decimation level of image data to request.
#[derive(Clone, Debug)]
pub struct Viewport {
    pub center: Point2D,
    pub zoom_level: f64,
    pub surface: ViewSurface,
    pub image_width: f64,
    pub image_height: f64,
}

impl Viewport {
    pub fn new(image_width: f64, image_height: f64, surface: ViewSurface) -> Self {
        Self {
            // Half-pixel convention: pixel centers are offset by 0.5 from
            // array indices, so the image midpoint is dim/2 + 0.5.
            center: Point2D::new(image_width / 2.0 + 0.5, image_height / 2.0 + 0.5),
            zoom_level: 1.0,
            surface,
            image_width,
            image_height,
        }
    }

    /// The image-space rectangle and mip level the current view requires.
    ///
    /// While the zoom or the render surface is not yet valid (startup races,
    /// collapsed layouts) this returns the unit placeholder view instead of
    /// propagating NaN/infinity into downstream GPU uniforms.
    pub fn required_frame_view(&self) -> FrameView {
        if self.zoom_level <= 0.0
            || self.surface.render_width() <= 0.0
            || self.surface.render_height() <= 0.0
        {
            return FrameView::unit();
        }

        let pixel_ratio = self.surface.effective_pixel_ratio();
        let image_width = pixel_ratio * self.surface.render_width() / self.zoom_level;
        let image_height = pixel_ratio * self.surface.render_height() / self.zoom_level;

        FrameView {
            x_min: self.center.x - image_width / 2.0,
            x_max: self.center.x + image_width / 2.0,
            y_min: self.center.y - image_height / 2.0,
            y_max: self.center.y + image_height / 2.0,
            mip: mip_for_zoom(self.zoom_level),
        }
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom_level = zoom;
    }

    pub fn set_center(&mut self, x: f64, y: f64) {
        self.center = Point2D::new(x, y);
    }

    /// Set a new zoom level while keeping the image point `(x, y)` fixed at
    /// its current position on screen.
    pub fn zoom_to_point(&mut self, x: f64, y: f64, zoom: f64) {
        if zoom <= 0.0 {
            return;
        }
        let ratio = self.zoom_level / zoom;
        self.center = Point2D::new(
            x + ratio * (self.center.x - x),
            y + ratio * (self.center.y - y),
        );
        self.zoom_level = zoom;
        debug!(zoom, x, y, "zoom to point");
    }

    /// Fit the image width to the render surface and recenter.
    pub fn fit_zoom_x(&mut self) -> f64 {
        self.zoom_level = self.zoom_for_fit_x();
        self.recenter();
        self.zoom_level
    }

    /// Fit the image height to the render surface and recenter.
    pub fn fit_zoom_y(&mut self) -> f64 {
        self.zoom_level = self.zoom_for_fit_y();
        self.recenter();
        self.zoom_level
    }

    /// Fit the whole image inside the render surface and recenter.
    pub fn fit_zoom(&mut self) -> f64 {
        self.zoom_level = self.zoom_for_fit_x().min(self.zoom_for_fit_y());
        self.recenter();
        self.zoom_level
    }

    fn recenter(&mut self) {
        self.center = Point2D::new(self.image_width / 2.0 + 0.5, self.image_height / 2.0 + 0.5);
    }

    fn zoom_for_fit_x(&self) -> f64 {
        if self.image_width <= 0.0 {
            return 1.0;
        }
        self.surface.render_width() * self.surface.effective_pixel_ratio() / self.image_width
    }

    fn zoom_for_fit_y(&self) -> f64 {
        if self.image_height <= 0.0 {
            return 1.0;
        }
        self.surface.render_height() * self.surface.effective_pixel_ratio() / self.image_height
    }
}

/// Decimation level for a zoom factor, with hysteresis around integer
/// boundaries: fractional parts below [`MIP_ROUND_THRESHOLD`] round down,
/// everything else rounds up. This keeps the mip from flickering between
/// adjacent levels while the zoom hovers near a threshold.
pub fn mip_for_zoom(zoom_level: f64) -> u32 {
    let mip_exact = (1.0 / zoom_level).max(1.0);
    let rounded = if mip_exact.fract() < MIP_ROUND_THRESHOLD {
        mip_exact.floor()
    } else {
        mip_exact.ceil()
    };
    rounded as u32
}
