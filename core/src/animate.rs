use crate::{
    registry::Registry,
    render::{Curve, LineWeight},
    signal::Signal,
    synth::{TOTAL_CURVE_NAME, accumulate, curve_name, sample_over, time_grid},
};

/// One step of the progressive reveal: the curves for signals `0..=step` and
/// their running total. Curves carry no emphasis during animation.
#[derive(Clone, Debug)]
pub struct StepFrame {
    pub step: usize,
    pub curves: Vec<Curve>,
    pub total: Curve,
}

/// Stepwise synthesis for the progressive-sum animation. Snapshots the
/// registry at construction, so edits made while a reveal is running don't
/// affect it. Each `next` call reveals one more signal in registry order;
/// iteration ends after the last one.
#[derive(Clone, Debug)]
pub struct ProgressiveSynth {
    signals: Vec<Signal>,
    grid: Vec<f64>,
    curves: Vec<Curve>,
    total: Vec<f64>,
    next: usize,
    duration: f64,
}

impl ProgressiveSynth {
    pub fn new(registry: &Registry, duration: f64) -> Self {
        let grid = time_grid(duration);
        let total = vec![0.0; grid.len()];
        Self {
            signals: registry.signals().to_vec(),
            grid,
            curves: Vec::new(),
            total,
            next: 0,
            duration,
        }
    }

    pub fn grid(&self) -> &[f64] {
        &self.grid
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.signals.len()
    }
}

impl Iterator for ProgressiveSynth {
    type Item = StepFrame;

    fn next(&mut self) -> Option<StepFrame> {
        let signal = self.signals.get(self.next)?;
        let samples = sample_over(signal, &self.grid);
        accumulate(&mut self.total, &samples);
        self.curves.push(Curve {
            name: curve_name(signal),
            samples,
            weight: LineWeight::Normal,
        });
        let step = self.next;
        self.next += 1;
        Some(StepFrame {
            step,
            curves: self.curves.clone(),
            total: Curve {
                name: TOTAL_CURVE_NAME.to_string(),
                samples: self.total.clone(),
                weight: LineWeight::Emphasized,
            },
        })
    }
}
