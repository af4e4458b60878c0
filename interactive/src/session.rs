use crate::{animation::AnimationDriver, event::ControlEvent};
use std::time::{Duration, Instant};
use superpose_core::{
    AxisConfig, ChartRenderer, DisplayRange, ProgressiveSynth, Registry,
    Signal, SurfaceId, synthesize,
};

#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Delay between animation steps. default: 800ms
    pub step_delay: Duration,
    /// Initial value of the duration-in-periods slider. default: 2.0
    pub initial_duration: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_delay: Duration::from_millis(800),
            initial_duration: 2.0,
        }
    }
}

/// Mirror of the four input sliders. `duration` is the "number of periods"
/// parameter, interpreted as an absolute time span in seconds rather than
/// scaled per signal frequency.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderState {
    pub amplitude: f64,
    pub frequency_hz: f64,
    pub phase_rads: f64,
    pub duration: f64,
}

/// Owns all state that lives for the session: the registry, the shared
/// display range, the slider mirror, and at most one running animation.
/// Every mutation comes in as a [`ControlEvent`] and its observable output
/// goes out through the [`ChartRenderer`] passed to the handler, so the whole
/// layer is testable with a recording renderer.
pub struct Session {
    registry: Registry,
    range: DisplayRange,
    sliders: SliderState,
    animation: Option<AnimationDriver>,
    step_delay: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            registry: Registry::new(),
            range: DisplayRange::default(),
            sliders: SliderState {
                amplitude: 1.0,
                frequency_hz: 1.0,
                phase_rads: 0.0,
                duration: config.initial_duration,
            },
            animation: None,
            step_delay: config.step_delay,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn display_range(&self) -> DisplayRange {
        self.range
    }

    pub fn sliders(&self) -> SliderState {
        self.sliders
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// One human-readable entry per signal, in registry order.
    pub fn selector_labels(&self) -> Vec<String> {
        self.registry
            .signals()
            .iter()
            .enumerate()
            .map(|(index, signal)| {
                format!(
                    "#{}: A={}, f={}Hz, φ={:.2}rad",
                    index + 1,
                    signal.amplitude,
                    signal.frequency_hz,
                    signal.phase_rads,
                )
            })
            .collect()
    }

    pub fn handle(
        &mut self,
        event: ControlEvent,
        renderer: &mut impl ChartRenderer,
    ) {
        match event {
            ControlEvent::SetAmplitude(amplitude) => {
                self.sliders.amplitude = amplitude;
                if let Some(signal) = self.registry.selected_mut() {
                    signal.amplitude = amplitude;
                    self.draw_all(renderer);
                }
            }
            ControlEvent::SetFrequency(frequency_hz) => {
                self.sliders.frequency_hz = frequency_hz;
                if let Some(signal) = self.registry.selected_mut() {
                    signal.frequency_hz = frequency_hz;
                    self.draw_all(renderer);
                }
            }
            ControlEvent::SetPhase(phase_rads) => {
                self.sliders.phase_rads = phase_rads;
                if let Some(signal) = self.registry.selected_mut() {
                    signal.phase_rads = phase_rads;
                    self.draw_all(renderer);
                }
            }
            ControlEvent::SetDuration(duration) => {
                self.sliders.duration = duration;
                self.draw_all(renderer);
            }
            ControlEvent::Add => {
                let signal = Signal::new(
                    self.sliders.amplitude,
                    self.sliders.frequency_hz,
                    self.sliders.phase_rads,
                );
                let index = self.registry.add(signal);
                log::info!("added signal #{}: {:?}", index + 1, signal);
                self.draw_all(renderer);
            }
            ControlEvent::Select(index) => {
                if let Some(signal) = self.registry.select(index) {
                    self.sliders.amplitude = signal.amplitude;
                    self.sliders.frequency_hz = signal.frequency_hz;
                    self.sliders.phase_rads = signal.phase_rads;
                }
                // Selection changes emphasis even though curve data is
                // unchanged.
                self.draw_all(renderer);
            }
            ControlEvent::DeleteSelected => {
                if let Some(index) = self.registry.selected_index() {
                    self.registry.remove(index);
                    log::info!("removed signal #{}", index + 1);
                    self.draw_all(renderer);
                }
            }
            ControlEvent::Clear => {
                self.registry.clear();
                log::info!("cleared all signals");
                self.draw_all(renderer);
            }
            ControlEvent::Animate => {
                if self.registry.is_empty() {
                    return;
                }
                if self.animation.is_some() {
                    // Single-active policy: restarting replaces the running
                    // sequence rather than racing a second one against it.
                    log::info!("restarting progressive animation");
                }
                self.animation = Some(AnimationDriver::new(
                    ProgressiveSynth::new(
                        &self.registry,
                        self.sliders.duration,
                    ),
                    self.step_delay,
                ));
            }
        }
    }

    /// Advances a pending animation. Hosts call this from their frame loop;
    /// the return value is the deadline of the next step so the host can
    /// schedule its next wakeup, `None` when no animation is running.
    pub fn tick(
        &mut self,
        now: Instant,
        renderer: &mut impl ChartRenderer,
    ) -> Option<Instant> {
        let range = self.range;
        if let Some(animation) = self.animation.as_mut() {
            let next_due = animation.tick(now, range, renderer);
            if next_due.is_none() {
                log::info!("progressive animation complete");
                self.animation = None;
            }
            next_due
        } else {
            None
        }
    }

    /// Re-synthesizes from the current state and replaces both surfaces. An
    /// empty registry purges them instead.
    pub fn draw_all(&mut self, renderer: &mut impl ChartRenderer) {
        match synthesize(&self.registry, self.sliders.duration, &mut self.range)
        {
            None => {
                renderer.purge(SurfaceId::Individual);
                renderer.purge(SurfaceId::Combined);
            }
            Some(out) => {
                let axes = AxisConfig {
                    title: "Individual signals".to_string(),
                    x_title: "Time (s)".to_string(),
                    y_title: "Amplitude".to_string(),
                    y_range: self.range.bounds(),
                    x_max: out.duration,
                };
                renderer.render(
                    SurfaceId::Individual,
                    &out.grid,
                    &out.curves,
                    &axes,
                );
                renderer.render(
                    SurfaceId::Combined,
                    &out.grid,
                    std::slice::from_ref(&out.total),
                    &AxisConfig {
                        title: "Resulting signal".to_string(),
                        ..axes
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use superpose_core::Curve;

    #[derive(Clone, Debug, PartialEq)]
    enum Call {
        Render {
            surface: SurfaceId,
            curves: Vec<Curve>,
            y_range: (f64, f64),
        },
        Purge(SurfaceId),
    }

    #[derive(Default)]
    struct Recording {
        calls: Vec<Call>,
    }

    impl Recording {
        fn last_individual_curves(&self) -> &[Curve] {
            self.calls
                .iter()
                .rev()
                .find_map(|call| match call {
                    Call::Render {
                        surface: SurfaceId::Individual,
                        curves,
                        ..
                    } => Some(curves.as_slice()),
                    _ => None,
                })
                .expect("no render call on the individual surface")
        }
    }

    impl ChartRenderer for Recording {
        fn render(
            &mut self,
            surface: SurfaceId,
            _grid: &[f64],
            curves: &[Curve],
            axes: &AxisConfig,
        ) {
            self.calls.push(Call::Render {
                surface,
                curves: curves.to_vec(),
                y_range: axes.y_range,
            });
        }

        fn purge(&mut self, surface: SurfaceId) {
            self.calls.push(Call::Purge(surface));
        }
    }

    fn quick_session() -> Session {
        Session::new(Config {
            step_delay: Duration::from_millis(800),
            initial_duration: 1.0,
        })
    }

    #[test]
    fn empty_draw_purges_both_surfaces() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        session.draw_all(&mut renderer);
        assert_eq!(
            renderer.calls,
            vec![
                Call::Purge(SurfaceId::Individual),
                Call::Purge(SurfaceId::Combined)
            ]
        );
    }

    #[test]
    fn add_commits_slider_values_and_renders() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        session.handle(ControlEvent::SetAmplitude(2.0), &mut renderer);
        session.handle(ControlEvent::SetFrequency(3.0), &mut renderer);
        // No selection yet, so slider moves alone must not render.
        assert!(renderer.calls.is_empty());
        session.handle(ControlEvent::Add, &mut renderer);
        assert_eq!(
            session.registry().signals(),
            &[Signal::new(2.0, 3.0, 0.0)]
        );
        assert_eq!(session.registry().selected_index(), Some(0));
        assert_eq!(renderer.last_individual_curves().len(), 1);
    }

    #[test]
    fn editing_the_selected_signal_redraws() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        session.handle(ControlEvent::Add, &mut renderer);
        renderer.calls.clear();
        session.handle(ControlEvent::SetFrequency(4.0), &mut renderer);
        assert_eq!(session.registry().signals()[0].frequency_hz, 4.0);
        assert!(!renderer.calls.is_empty());
    }

    #[test]
    fn editing_with_no_selection_only_moves_the_slider() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        session.handle(ControlEvent::Add, &mut renderer);
        session.handle(ControlEvent::Select(9), &mut renderer);
        renderer.calls.clear();
        session.handle(ControlEvent::SetAmplitude(7.0), &mut renderer);
        assert!(renderer.calls.is_empty());
        assert_eq!(session.sliders().amplitude, 7.0);
        assert_eq!(session.registry().signals()[0].amplitude, 1.0);
    }

    #[test]
    fn select_mirrors_the_signal_into_the_sliders() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        session.handle(ControlEvent::SetAmplitude(2.5), &mut renderer);
        session.handle(ControlEvent::SetPhase(0.5), &mut renderer);
        session.handle(ControlEvent::Add, &mut renderer);
        session.handle(ControlEvent::SetAmplitude(9.0), &mut renderer);
        session.handle(ControlEvent::Add, &mut renderer);
        session.handle(ControlEvent::Select(0), &mut renderer);
        let sliders = session.sliders();
        assert_eq!(sliders.amplitude, 2.5);
        assert_eq!(sliders.frequency_hz, 1.0);
        assert_eq!(sliders.phase_rads, 0.5);
        // The selected curve is the emphasized one.
        let curves = renderer.last_individual_curves();
        assert_eq!(
            curves[0].weight,
            superpose_core::LineWeight::Emphasized
        );
        assert_eq!(curves[1].weight, superpose_core::LineWeight::Normal);
    }

    #[test]
    fn deleting_the_only_signal_purges_on_redraw() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        session.handle(ControlEvent::Add, &mut renderer);
        renderer.calls.clear();
        session.handle(ControlEvent::DeleteSelected, &mut renderer);
        assert!(session.registry().is_empty());
        assert_eq!(session.registry().selected_index(), None);
        assert_eq!(
            renderer.calls,
            vec![
                Call::Purge(SurfaceId::Individual),
                Call::Purge(SurfaceId::Combined)
            ]
        );
    }

    #[test]
    fn delete_without_selection_is_a_guarded_noop() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        session.handle(ControlEvent::Add, &mut renderer);
        session.handle(ControlEvent::Select(5), &mut renderer);
        renderer.calls.clear();
        session.handle(ControlEvent::DeleteSelected, &mut renderer);
        assert_eq!(session.registry().len(), 1);
        assert!(renderer.calls.is_empty());
    }

    #[test]
    fn loud_signal_expands_the_rendered_range() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        session.handle(ControlEvent::SetAmplitude(10.0), &mut renderer);
        session.handle(ControlEvent::Add, &mut renderer);
        match renderer.calls.last().unwrap() {
            Call::Render { y_range, .. } => {
                assert_eq!(*y_range, (-12.0, 12.0))
            }
            call => panic!("expected a render call, got {:?}", call),
        }
    }

    #[test]
    fn selector_labels_match_the_display_format() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        session.handle(ControlEvent::SetAmplitude(2.0), &mut renderer);
        session.handle(ControlEvent::SetFrequency(3.0), &mut renderer);
        session.handle(ControlEvent::SetPhase(0.5), &mut renderer);
        session.handle(ControlEvent::Add, &mut renderer);
        assert_eq!(
            session.selector_labels(),
            vec!["#1: A=2, f=3Hz, φ=0.50rad".to_string()]
        );
    }

    #[test]
    fn animation_reveals_one_curve_per_step() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        for frequency in [1.0, 2.0, 3.0] {
            session
                .handle(ControlEvent::SetFrequency(frequency), &mut renderer);
            session.handle(ControlEvent::Add, &mut renderer);
        }
        session.handle(ControlEvent::Animate, &mut renderer);
        assert!(session.is_animating());
        let start = Instant::now();
        renderer.calls.clear();

        let deadline = session.tick(start, &mut renderer).unwrap();
        assert_eq!(deadline, start + Duration::from_millis(800));
        assert_eq!(renderer.last_individual_curves().len(), 1);

        // Between steps nothing new is rendered.
        let calls_after_first_step = renderer.calls.len();
        session.tick(start + Duration::from_millis(100), &mut renderer);
        assert_eq!(renderer.calls.len(), calls_after_first_step);

        session.tick(start + Duration::from_millis(800), &mut renderer);
        assert_eq!(renderer.last_individual_curves().len(), 2);

        let done =
            session.tick(start + Duration::from_millis(1600), &mut renderer);
        assert_eq!(renderer.last_individual_curves().len(), 3);
        assert_eq!(done, None);
        assert!(!session.is_animating());
    }

    #[test]
    fn animation_totals_are_partial_sums() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        session.handle(ControlEvent::SetAmplitude(1.0), &mut renderer);
        session.handle(ControlEvent::Add, &mut renderer);
        session.handle(ControlEvent::SetAmplitude(2.0), &mut renderer);
        session.handle(ControlEvent::Add, &mut renderer);
        session.handle(ControlEvent::Animate, &mut renderer);
        let start = Instant::now();
        renderer.calls.clear();
        session.tick(start, &mut renderer);
        let first_total = match &renderer.calls[1] {
            Call::Render { curves, .. } => curves[0].samples.clone(),
            call => panic!("expected a render call, got {:?}", call),
        };
        session.tick(start + Duration::from_millis(800), &mut renderer);
        let second_total = match renderer.calls.last().unwrap() {
            Call::Render { curves, .. } => curves[0].samples.clone(),
            call => panic!("expected a render call, got {:?}", call),
        };
        // Second signal has double the amplitude at the same frequency and
        // phase, so the accumulated total is three times the first step's.
        for (a, b) in first_total.iter().zip(&second_total) {
            assert!((3.0 * a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn retriggering_animation_restarts_from_the_first_signal() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        for _ in 0..3 {
            session.handle(ControlEvent::Add, &mut renderer);
        }
        session.handle(ControlEvent::Animate, &mut renderer);
        let start = Instant::now();
        session.tick(start, &mut renderer);
        session.tick(start + Duration::from_millis(800), &mut renderer);
        assert_eq!(renderer.last_individual_curves().len(), 2);
        session.handle(ControlEvent::Animate, &mut renderer);
        session.tick(start + Duration::from_millis(900), &mut renderer);
        assert_eq!(renderer.last_individual_curves().len(), 1);
    }

    #[test]
    fn animating_an_empty_registry_is_a_noop() {
        let mut session = quick_session();
        let mut renderer = Recording::default();
        session.handle(ControlEvent::Animate, &mut renderer);
        assert!(!session.is_animating());
        assert_eq!(
            session.tick(Instant::now(), &mut renderer),
            None
        );
        assert!(renderer.calls.is_empty());
    }
}
