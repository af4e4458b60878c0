/// Discrete UI events the session reacts to. Slider events carry the value
/// already parsed to `f64` at the input boundary; nothing downstream
/// revalidates it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControlEvent {
    SetAmplitude(f64),
    SetFrequency(f64),
    SetPhase(f64),
    SetDuration(f64),
    /// Commit the current slider values as a new signal.
    Add,
    /// Select the signal at this position; out-of-range clears the selection.
    Select(usize),
    DeleteSelected,
    Clear,
    /// Start (or restart) the progressive-sum animation.
    Animate,
}
