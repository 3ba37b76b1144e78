//! L4 Atomic Layer: Capabilities injected into the animator

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SpeedLevel;

/// Scroll axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Vertical,
    Horizontal,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Vertical => f.write_str("vertical"),
            Axis::Horizontal => f.write_str("horizontal"),
        }
    }
}

/// Applies one animation step to the visible view
///
/// Called from the background stepping loop, never while the animator's
/// lock is held.
pub trait Stepper: Send + Sync {
    fn apply(&self, axis: Axis, amount: i32);
}

impl<F> Stepper for F
where
    F: Fn(Axis, i32) + Send + Sync,
{
    fn apply(&self, axis: Axis, amount: i32) {
        self(axis, amount)
    }
}

/// Supplies the duration multiplier for new requests (smaller = faster)
pub trait SpeedPolicy: Send + Sync {
    fn speed_ratio(&self) -> f64;
}

impl SpeedPolicy for SpeedLevel {
    fn speed_ratio(&self) -> f64 {
        self.ratio()
    }
}

impl SpeedPolicy for f64 {
    fn speed_ratio(&self) -> f64 {
        *self
    }
}
