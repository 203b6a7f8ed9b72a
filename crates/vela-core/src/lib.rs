pub mod error;
pub mod consts;
pub mod geometry;
pub mod histogram;
pub mod scaling;
pub mod colormap;
pub mod colorscale;
pub mod render_config;
pub mod viewport;
