use serde::{Deserialize, Serialize};

use crate::error::{Result, VelaError};

/// An 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const BLACK: Rgba = Rgba::opaque(0, 0, 0);

    /// Parse a `#RRGGBB` (or `RRGGBB`) hex string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(VelaError::InvalidHexColor(hex.to_string()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| VelaError::InvalidHexColor(hex.to_string()))?;
        Ok(Self::opaque(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        ))
    }

    /// Linear interpolation between two colors, `t` in [0, 1].
    pub fn lerp(a: Rgba, b: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| ((1.0 - t) * x as f64 + t * y as f64).round() as u8;
        Rgba {
            r: mix(a.r, b.r),
            g: mix(a.g, b.g),
            b: mix(a.b, b.b),
            a: mix(a.a, b.a),
        }
    }
}

/// Control-point gradient: (position in [0, 1], RGB).
type PaletteStops = &'static [(f64, [u8; 3])];

/// Named palettes, sampled by piecewise-linear interpolation between
/// control points. Positions are ascending and span [0, 1].
const PALETTES: &[(&str, PaletteStops)] = &[
    ("gray", &[(0.0, [0, 0, 0]), (1.0, [255, 255, 255])]),
    ("greys", &[(0.0, [255, 255, 255]), (1.0, [0, 0, 0])]),
    (
        "viridis",
        &[
            (0.0, [68, 1, 84]),
            (0.25, [59, 82, 139]),
            (0.5, [33, 145, 140]),
            (0.75, [94, 201, 98]),
            (1.0, [253, 231, 37]),
        ],
    ),
    (
        "inferno",
        &[
            (0.0, [0, 0, 4]),
            (0.25, [87, 16, 110]),
            (0.5, [188, 55, 84]),
            (0.75, [249, 142, 9]),
            (1.0, [252, 255, 164]),
        ],
    ),
    (
        "plasma",
        &[
            (0.0, [13, 8, 135]),
            (0.25, [126, 3, 168]),
            (0.5, [204, 71, 120]),
            (0.75, [248, 149, 64]),
            (1.0, [240, 249, 33]),
        ],
    ),
    (
        "magma",
        &[
            (0.0, [0, 0, 4]),
            (0.25, [81, 18, 124]),
            (0.5, [183, 55, 121]),
            (0.75, [252, 137, 97]),
            (1.0, [252, 253, 191]),
        ],
    ),
    (
        "hot",
        &[
            (0.0, [0, 0, 0]),
            (0.365, [255, 0, 0]),
            (0.746, [255, 255, 0]),
            (1.0, [255, 255, 255]),
        ],
    ),
    (
        "afmhot",
        &[
            (0.0, [0, 0, 0]),
            (0.25, [128, 0, 0]),
            (0.5, [255, 128, 0]),
            (0.75, [255, 255, 128]),
            (1.0, [255, 255, 255]),
        ],
    ),
    ("cool", &[(0.0, [0, 255, 255]), (1.0, [255, 0, 255])]),
    (
        "jet",
        &[
            (0.0, [0, 0, 127]),
            (0.125, [0, 0, 255]),
            (0.375, [0, 255, 255]),
            (0.625, [255, 255, 0]),
            (0.875, [255, 0, 0]),
            (1.0, [127, 0, 0]),
        ],
    ),
    (
        "rainbow",
        &[
            (0.0, [128, 0, 255]),
            (0.25, [0, 181, 235]),
            (0.5, [128, 255, 128]),
            (0.75, [255, 181, 0]),
            (1.0, [255, 0, 0]),
        ],
    ),
    (
        "seismic",
        &[
            (0.0, [0, 0, 77]),
            (0.25, [0, 0, 255]),
            (0.5, [255, 255, 255]),
            (0.75, [255, 0, 0]),
            (1.0, [128, 0, 0]),
        ],
    ),
    (
        "coolwarm",
        &[
            (0.0, [59, 76, 192]),
            (0.5, [221, 221, 221]),
            (1.0, [180, 4, 38]),
        ],
    ),
    (
        "RdBu",
        &[
            (0.0, [103, 0, 31]),
            (0.5, [247, 247, 247]),
            (1.0, [5, 48, 97]),
        ],
    ),
    (
        "gnuplot2",
        &[
            (0.0, [0, 0, 0]),
            (0.25, [0, 0, 255]),
            (0.5, [200, 0, 255]),
            (0.75, [255, 100, 0]),
            (1.0, [255, 255, 255]),
        ],
    ),
    (
        "cubehelix",
        &[
            (0.0, [0, 0, 0]),
            (0.25, [22, 60, 78]),
            (0.5, [84, 121, 47]),
            (0.75, [184, 135, 162]),
            (1.0, [255, 255, 255]),
        ],
    ),
];

/// Single-hue gradients rendered as black -> hue.
const MONO_GRADIENTS: &[(&str, [u8; 3])] = &[
    ("Red", [255, 0, 0]),
    ("Orange", [255, 165, 0]),
    ("Yellow", [255, 255, 0]),
    ("Green", [0, 255, 0]),
    ("Cyan", [0, 255, 255]),
    ("Blue", [0, 0, 255]),
    ("Violet", [127, 0, 255]),
];

pub fn palette_names() -> Vec<&'static str> {
    PALETTES.iter().map(|(name, _)| *name).collect()
}

pub fn mono_names() -> Vec<&'static str> {
    MONO_GRADIENTS.iter().map(|(name, _)| *name).collect()
}

/// The active colormap: a named palette, a single-hue mono gradient, or a
/// custom two-color gradient.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ColorMapSpec {
    Palette(String),
    Mono(String),
    Custom { start: Rgba, end: Rgba },
}

impl ColorMapSpec {
    /// A named palette; the name is validated against the palette table.
    pub fn palette(name: &str) -> Result<Self> {
        if PALETTES.iter().any(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Ok(Self::Palette(name.to_string()))
        } else {
            Err(VelaError::UnknownColormap(name.to_string()))
        }
    }

    /// A single-hue gradient; the name is validated against the mono table.
    pub fn mono(name: &str) -> Result<Self> {
        if MONO_GRADIENTS.iter().any(|(n, _)| n.eq_ignore_ascii_case(name)) {
            Ok(Self::Mono(name.to_string()))
        } else {
            Err(VelaError::UnknownColormap(name.to_string()))
        }
    }

    /// A custom gradient between two hex colors.
    pub fn custom(start_hex: &str, end_hex: &str) -> Result<Self> {
        Ok(Self::Custom {
            start: Rgba::from_hex(start_hex)?,
            end: Rgba::from_hex(end_hex)?,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            ColorMapSpec::Palette(name) | ColorMapSpec::Mono(name) => name,
            ColorMapSpec::Custom { .. } => "custom",
        }
    }

    /// Sample the colormap at `t` in [0, 1].
    pub fn sample(&self, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        match self {
            ColorMapSpec::Palette(name) => {
                let stops = PALETTES
                    .iter()
                    .find(|(n, _)| n.eq_ignore_ascii_case(name))
                    .map(|(_, stops)| *stops)
                    .unwrap_or(PALETTES[0].1);
                sample_stops(stops, t)
            }
            ColorMapSpec::Mono(name) => {
                let hue = MONO_GRADIENTS
                    .iter()
                    .find(|(n, _)| n.eq_ignore_ascii_case(name))
                    .map(|(_, rgb)| *rgb)
                    .unwrap_or([255, 255, 255]);
                Rgba::lerp(Rgba::BLACK, Rgba::opaque(hue[0], hue[1], hue[2]), t)
            }
            ColorMapSpec::Custom { start, end } => Rgba::lerp(*start, *end, t),
        }
    }
}

impl Default for ColorMapSpec {
    fn default() -> Self {
        ColorMapSpec::Palette("inferno".to_string())
    }
}

fn sample_stops(stops: PaletteStops, t: f64) -> Rgba {
    let first = stops[0];
    let last = stops[stops.len() - 1];
    if t <= first.0 {
        return Rgba::opaque(first.1[0], first.1[1], first.1[2]);
    }
    if t >= last.0 {
        return Rgba::opaque(last.1[0], last.1[1], last.1[2]);
    }
    for pair in stops.windows(2) {
        let (t0, rgb0) = pair[0];
        let (t1, rgb1) = pair[1];
        if t <= t1 {
            let local = if t1 > t0 { (t - t0) / (t1 - t0) } else { 0.0 };
            return Rgba::lerp(
                Rgba::opaque(rgb0[0], rgb0[1], rgb0[2]),
                Rgba::opaque(rgb1[0], rgb1[1], rgb1[2]),
                local,
            );
        }
    }
    Rgba::opaque(last.1[0], last.1[1], last.1[2])
}
