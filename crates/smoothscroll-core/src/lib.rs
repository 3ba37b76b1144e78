pub mod config;
pub mod error;
pub mod scroll;

pub use config::{AppConfig, PagerConfig, ScrollConfig, SpeedLevel, WheelConfig};
pub use error::{Error, Result};
pub use scroll::{AnimationState, Axis, ScrollAnimator, SpeedPolicy, Stepper};
