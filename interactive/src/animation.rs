use std::time::{Duration, Instant};
use superpose_core::{
    AxisConfig, ChartRenderer, DisplayRange, ProgressiveSynth, SurfaceId,
};

/// Drives a [`ProgressiveSynth`] on a fixed cadence. The host calls [`tick`]
/// from its frame loop; a step fires once its deadline has passed and the
/// next deadline is scheduled relative to the firing time, like a chain of
/// deferred callbacks. Nothing here blocks.
///
/// [`tick`]: AnimationDriver::tick
pub struct AnimationDriver {
    steps: ProgressiveSynth,
    next_due: Option<Instant>,
    step_delay: Duration,
}

impl AnimationDriver {
    /// The first step fires on the first tick after construction.
    pub fn new(steps: ProgressiveSynth, step_delay: Duration) -> Self {
        Self {
            steps,
            next_due: None,
            step_delay,
        }
    }

    /// Renders every step whose deadline has passed. Returns the deadline of
    /// the next pending step, or `None` once the sequence has completed.
    pub fn tick(
        &mut self,
        now: Instant,
        range: DisplayRange,
        renderer: &mut impl ChartRenderer,
    ) -> Option<Instant> {
        loop {
            if let Some(due) = self.next_due {
                if now < due {
                    return Some(due);
                }
            }
            let frame = self.steps.next()?;
            log::debug!("animation step {}", frame.step);
            let axes = AxisConfig {
                title: "Progressive sum".to_string(),
                x_title: "Time (s)".to_string(),
                y_title: "Amplitude".to_string(),
                y_range: range.bounds(),
                x_max: self.steps.duration(),
            };
            renderer.render(
                SurfaceId::Individual,
                self.steps.grid(),
                &frame.curves,
                &axes,
            );
            renderer.render(
                SurfaceId::Combined,
                self.steps.grid(),
                std::slice::from_ref(&frame.total),
                &AxisConfig {
                    title: "Resulting signal".to_string(),
                    ..axes
                },
            );
            if self.steps.is_done() {
                return None;
            }
            self.next_due = Some(now + self.step_delay);
        }
    }
}
