pub mod animation;
pub mod event;
pub use event::ControlEvent;
pub mod session;
pub use session::{Config, Session, SliderState};
