use crate::signal::Signal;

const DEFAULT_BOUND: f64 = 5.0;
const HEADROOM: f64 = 1.2;

/// Shared vertical bounds for both plot surfaces. Monotonically
/// non-shrinking: once expanded to fit a signal the bounds never contract,
/// even after that signal is edited down or deleted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRange {
    y_min: f64,
    y_max: f64,
}

impl Default for DisplayRange {
    fn default() -> Self {
        Self {
            y_min: -DEFAULT_BOUND,
            y_max: DEFAULT_BOUND,
        }
    }
}

impl DisplayRange {
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.y_min, self.y_max)
    }

    /// Expands the bounds to `±1.2 × max |amplitude|` whenever any signal's
    /// amplitude magnitude exceeds the current bound magnitude.
    pub fn expand_to_fit(&mut self, signals: &[Signal]) {
        let max_amplitude = signals
            .iter()
            .map(|signal| signal.amplitude.abs())
            .fold(0.0, f64::max);
        if max_amplitude > self.y_min.abs() || max_amplitude > self.y_max.abs()
        {
            self.y_min = -HEADROOM * max_amplitude;
            self.y_max = HEADROOM * max_amplitude;
        }
    }
}
