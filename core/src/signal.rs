use std::f64::consts::PI;

/// A real sinusoid `A · sin(2π f t + φ)`. Two signals with identical fields
/// are indistinguishable; identity is registry position only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Signal {
    pub amplitude: f64,
    pub frequency_hz: f64,
    pub phase_rads: f64,
}

impl Signal {
    pub fn new(amplitude: f64, frequency_hz: f64, phase_rads: f64) -> Self {
        Self {
            amplitude,
            frequency_hz,
            phase_rads,
        }
    }

    pub fn sample(&self, t: f64) -> f64 {
        self.amplitude
            * (2.0 * PI * self.frequency_hz * t + self.phase_rads).sin()
    }
}
