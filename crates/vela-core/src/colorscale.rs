use crate::colormap::{ColorMapSpec, Rgba};
use crate::consts::EPSILON;
use crate::scaling::ScalingParams;

/// Position quantization used to collapse duplicate gradient stops.
const POSITION_QUANTUM: f64 = 65535.0;

/// Build a sparse gradient stop list mapping normalized intensity to color.
///
/// The list is ordered by position; linearly interpolating between
/// consecutive stops reproduces the palette under the active transfer
/// function, so the stop at position `p` carries the palette color at
/// `forward(p)`. Runs of samples collapsing onto one quantized position are
/// merged, keeping the stop list small for the GPU gradient uniform. The
/// result always has at least two stops.
pub fn build_color_scale(
    colormap: &ColorMapSpec,
    scaling: &ScalingParams,
    sample_count: usize,
) -> Vec<(f64, Rgba)> {
    let n = sample_count.max(2);

    // Zero contrast collapses the transfer function onto a single output
    // value: the whole image renders as one flat color.
    if scaling.contrast.abs() < EPSILON {
        return flat_scale(colormap, scaling);
    }

    let mut samples = Vec::with_capacity(n);
    for i in 0..n {
        let t = i as f64 / (n - 1) as f64;
        samples.push(scaling.inverse(t));
    }
    if scaling.inverted {
        samples.reverse();
    }

    let quantize = |pos: f64| (pos * POSITION_QUANTUM).round() as u32;

    // A transfer function that never varies over its domain also renders
    // flat; downstream shader code requires a two-stop gradient either way.
    let first_q = quantize(samples[0]);
    if samples.iter().all(|&pos| quantize(pos) == first_q) {
        return flat_scale(colormap, scaling);
    }

    // Collapse each run of identical quantized positions into one stop. The
    // stop color is the palette color the transfer function maps the kept
    // position to, so a run saturating at either end of the range carries
    // the boundary color rather than the palette extreme.
    let mut stops = Vec::new();
    for i in 0..n {
        let last_of_run = i + 1 == n || quantize(samples[i + 1]) != quantize(samples[i]);
        if last_of_run {
            let pos = samples[i];
            stops.push((pos, colormap.sample(scaling.forward(pos))));
        }
    }

    if stops.len() < 2 {
        let color = stops[0].1;
        return vec![(0.0, color), (1.0, color)];
    }
    stops
}

fn flat_scale(colormap: &ColorMapSpec, scaling: &ScalingParams) -> Vec<(f64, Rgba)> {
    let color = colormap.sample(scaling.forward(0.5));
    vec![(0.0, color), (1.0, color)]
}
