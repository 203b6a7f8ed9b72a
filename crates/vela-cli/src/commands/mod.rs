pub mod colormaps;
pub mod colorscale;
pub mod config;
pub mod percentiles;
pub mod view;
