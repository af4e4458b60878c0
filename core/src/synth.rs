use crate::{
    range::DisplayRange,
    registry::Registry,
    render::{Curve, LineWeight},
    signal::Signal,
};
use itertools::izip;

/// Fixed cardinality of the sample grid.
pub const NUM_SAMPLES: usize = 1000;

/// Evenly spaced half-open grid over `[0, duration)`: `t_i = i · duration / N`.
/// Note the divisor is `N`, not `N - 1`, so the final sample is
/// `(N - 1)/N · duration` and the grid never reaches `duration` itself.
pub fn time_grid(duration: f64) -> Vec<f64> {
    (0..NUM_SAMPLES)
        .map(|i| i as f64 * duration / NUM_SAMPLES as f64)
        .collect()
}

pub(crate) fn sample_over(signal: &Signal, grid: &[f64]) -> Vec<f64> {
    grid.iter().map(|&t| signal.sample(t)).collect()
}

pub(crate) fn accumulate(total: &mut [f64], samples: &[f64]) {
    for (acc, sample) in izip!(total, samples) {
        *acc += sample;
    }
}

pub(crate) fn curve_name(signal: &Signal) -> String {
    format!("f={}Hz", signal.frequency_hz)
}

pub(crate) const TOTAL_CURVE_NAME: &str = "Total";

/// Result of one synthesis pass: per-signal curves for the individual
/// surface, their elementwise sum for the combined surface, and the grid both
/// share. The horizontal domain is `[0, duration)`.
#[derive(Clone, Debug)]
pub struct SynthOutput {
    pub grid: Vec<f64>,
    pub curves: Vec<Curve>,
    pub total: Curve,
    pub duration: f64,
}

/// Samples every signal over a fresh grid, accumulating the running sum in
/// registry order, and expands the display range to fit the current
/// amplitudes. The curve at the selected index is emphasized. Returns `None`
/// for an empty registry, in which case the caller must purge both surfaces
/// and skip all further computation.
pub fn synthesize(
    registry: &Registry,
    duration: f64,
    range: &mut DisplayRange,
) -> Option<SynthOutput> {
    if registry.is_empty() {
        return None;
    }
    let grid = time_grid(duration);
    let mut total = vec![0.0; NUM_SAMPLES];
    let curves = registry
        .signals()
        .iter()
        .enumerate()
        .map(|(index, signal)| {
            let samples = sample_over(signal, &grid);
            accumulate(&mut total, &samples);
            let weight = if registry.selected_index() == Some(index) {
                LineWeight::Emphasized
            } else {
                LineWeight::Normal
            };
            Curve {
                name: curve_name(signal),
                samples,
                weight,
            }
        })
        .collect();
    range.expand_to_fit(registry.signals());
    Some(SynthOutput {
        grid,
        curves,
        total: Curve {
            name: TOTAL_CURVE_NAME.to_string(),
            samples: total,
            weight: LineWeight::Emphasized,
        },
        duration,
    })
}
