use thiserror::Error;

#[derive(Error, Debug)]
pub enum VelaError {
    #[error("Invalid histogram: {0}")]
    InvalidHistogram(String),

    #[error("Percentile rank {rank} out of range [0, 100]")]
    InvalidRank { rank: f64 },

    #[error("Percentile ranks must be ascending: {rank} follows {prev}")]
    UnsortedRanks { prev: f64, rank: f64 },

    #[error("Unknown colormap: {0}")]
    UnknownColormap(String),

    #[error("Invalid hex color: {0}")]
    InvalidHexColor(String),
}

pub type Result<T> = std::result::Result<T, VelaError>;
