//! Smooth scrolling engine
//!
//! Turns "scroll by D" into a timed sequence of smaller scrolls with an
//! ease-out profile, one animator per scroll axis.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `config` - Derived timing values over [`ScrollConfig`]
//! - `rounds` - Pure round-count and step calculations
//! - `state` - Per-axis animation state record
//! - `stepper` - Axis, step sink and speed capabilities
//!
//! ## L3 Molecular Layer
//! - `animator` - Request merging and the background stepping loop
//!
//! # Usage
//!
//! ```ignore
//! use smoothscroll_core::scroll::{Axis, ScrollAnimator};
//! use smoothscroll_core::{ScrollConfig, SpeedLevel};
//!
//! let animator = ScrollAnimator::new(
//!     Axis::Vertical,
//!     ScrollConfig::default(),
//!     |axis, amount| println!("{axis}: {amount}"),
//!     SpeedLevel::Normal,
//! );
//!
//! // From the input handler (inside a tokio runtime)
//! animator.request(360.0)?;
//!
//! // On pointer-down
//! animator.stop()?;
//! ```

// L4 Atomic Layer
pub mod config;
pub mod rounds;
pub mod state;
pub mod stepper;

// L3 Molecular Layer
pub mod animator;

pub use animator::ScrollAnimator;
pub use config::ScrollConfigExt;
pub use rounds::{step_amount, total_rounds};
pub use state::AnimationState;
pub use stepper::{Axis, SpeedPolicy, Stepper};
