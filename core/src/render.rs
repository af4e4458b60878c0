/// The two plot surfaces shared by synthesis and animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceId {
    /// One curve per signal.
    Individual,
    /// The elementwise sum of every signal.
    Combined,
}

/// Exactly two weight levels; emphasis is the only load-bearing styling
/// difference between curves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineWeight {
    Normal,
    Emphasized,
}

/// A named, sampled curve. The time values live in the shared grid passed
/// alongside the curves, so only the samples are stored per curve.
#[derive(Clone, Debug, PartialEq)]
pub struct Curve {
    pub name: String,
    pub samples: Vec<f64>,
    pub weight: LineWeight,
}

/// Axis configuration for one surface: titles plus the fixed, non-interactive
/// bounds. The vertical range is shared by both surfaces.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisConfig {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub y_range: (f64, f64),
    pub x_max: f64,
}

/// Narrow seam to the charting library. `render` replaces the plot at
/// `surface` with the given curves; `purge` clears it to empty. Keeping this
/// behind a trait lets tests record calls instead of drawing.
pub trait ChartRenderer {
    fn render(
        &mut self,
        surface: SurfaceId,
        grid: &[f64],
        curves: &[Curve],
        axes: &AxisConfig,
    );

    fn purge(&mut self, surface: SurfaceId);
}
