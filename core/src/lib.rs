pub mod animate;
pub use animate::{ProgressiveSynth, StepFrame};

pub mod range;
pub use range::DisplayRange;

pub mod registry;
pub use registry::Registry;

pub mod render;
pub use render::{AxisConfig, ChartRenderer, Curve, LineWeight, SurfaceId};

pub mod signal;
pub use signal::Signal;

pub mod synth;
pub use synth::{NUM_SAMPLES, SynthOutput, synthesize, time_grid};
