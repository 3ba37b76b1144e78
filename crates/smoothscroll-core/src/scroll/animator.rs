//! L3 Molecular Layer: Per-axis scroll animator
//!
//! Merges scroll requests into one running animation and drives the
//! background stepping loop that feeds the [`Stepper`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::{debug, error, trace, warn};

use super::config::ScrollConfigExt;
use super::rounds::{clamp_to_remaining, step_amount, total_rounds};
use super::state::AnimationState;
use super::stepper::{Axis, SpeedPolicy, Stepper};
use crate::config::ScrollConfig;
use crate::{Error, Result};

/// Everything guarded by the axis lock
#[derive(Default)]
struct Shared {
    state: AnimationState,
    /// Bumped for every loop started, so a superseded loop never touches the state
    generation: u64,
    /// Cancellation signal of the active loop
    cancel: Option<watch::Sender<bool>>,
    /// Generation of a loop that was dropped before its first poll
    unstarted_drop: Option<u64>,
}

impl Shared {
    /// Signal the active loop, if any, and go idle
    fn cancel_loop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // The loop may already be gone
            let _ = cancel.send(true);
        }
        self.state.reset_idle();
    }
}

struct Inner {
    axis: Axis,
    config: ScrollConfig,
    stepper: Box<dyn Stepper>,
    shared: Mutex<Shared>,
}

impl Inner {
    fn lock(&self) -> Result<MutexGuard<'_, Shared>> {
        self.shared.lock().map_err(|_| Error::LockPoisoned(self.axis))
    }

    /// Lock for cleanup paths, where idling a poisoned state is still correct
    fn lock_for_cleanup(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Owned by a stepping loop; idles the axis however the loop ends
///
/// Covers a panicking stepper and a task dropped by a runtime that is shutting
/// down, not only the loop's own return paths.
struct LoopGuard {
    inner: Arc<Inner>,
    generation: u64,
    started: bool,
}

impl Drop for LoopGuard {
    fn drop(&mut self) {
        let mut shared = self.inner.lock_for_cleanup();
        if shared.generation != self.generation {
            return;
        }

        if !self.started {
            shared.unstarted_drop = Some(self.generation);
        }
        if shared.state.running {
            warn!(
                axis = %self.inner.axis,
                generation = self.generation,
                started = self.started,
                "Stepping loop ended abnormally"
            );
            shared.state.reset_idle();
            shared.cancel = None;
        }
    }
}

/// Scroll animator for a single axis
///
/// `request()` and `stop()` are synchronous and only hold the axis lock
/// briefly, so they can be called straight from an input handler. The steps
/// themselves are emitted from a tokio task, at most one per axis.
pub struct ScrollAnimator {
    inner: Arc<Inner>,
    speed: Box<dyn SpeedPolicy>,
    runtime: Option<Handle>,
}

impl ScrollAnimator {
    /// Create an animator for `axis`
    pub fn new<S, P>(axis: Axis, config: ScrollConfig, stepper: S, speed: P) -> Self
    where
        S: Stepper + 'static,
        P: SpeedPolicy + 'static,
    {
        Self {
            inner: Arc::new(Inner {
                axis,
                config,
                stepper: Box::new(stepper),
                shared: Mutex::new(Shared::default()),
            }),
            speed: Box::new(speed),
            runtime: None,
        }
    }

    /// Spawn stepping loops on `handle` instead of the caller's runtime
    ///
    /// Needed when requests come from a thread that is not inside a tokio
    /// runtime, such as a blocking terminal event loop.
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.runtime = Some(handle);
        self
    }

    pub fn axis(&self) -> Axis {
        self.inner.axis
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.inner.config
    }

    /// Copy of the current animation state
    pub fn snapshot(&self) -> Result<AnimationState> {
        Ok(self.inner.lock()?.state)
    }

    /// Check if a stepping loop is active
    pub fn is_running(&self) -> bool {
        self.snapshot().map(|state| state.running).unwrap_or(false)
    }

    /// Scroll by `distance`, at the speed reported by the speed policy
    pub fn request(&self, distance: f64) -> Result<()> {
        self.request_with_ratio(distance, self.speed.speed_ratio())
    }

    /// Scroll by `distance` with an explicit duration multiplier
    ///
    /// A zero distance is ignored. If a loop is already running the request is
    /// merged into it; otherwise a new loop is started, unless the merged
    /// distance is too small to plan any tick, in which case the axis stays idle.
    pub fn request_with_ratio(&self, distance: f64, speed_ratio: f64) -> Result<()> {
        if !distance.is_finite() {
            warn!(axis = %self.inner.axis, distance, "Rejected scroll request");
            return Err(Error::InvalidDistance(distance));
        }
        if distance == 0.0 {
            return Ok(());
        }
        if !speed_ratio.is_finite() || speed_ratio <= 0.0 {
            warn!(axis = %self.inner.axis, speed_ratio, "Rejected scroll request");
            return Err(Error::InvalidSpeedRatio(speed_ratio));
        }

        let config = &self.inner.config;
        let mut shared = self.inner.lock()?;

        shared
            .state
            .merge(distance, config.accelerate_threshold, config.accelerator);
        shared.state.total_rounds = total_rounds(config, speed_ratio, shared.state.total_distance);

        debug!(
            axis = %self.inner.axis,
            distance,
            remaining = shared.state.remaining_distance,
            total_rounds = shared.state.total_rounds,
            running = shared.state.running,
            "Merged scroll request"
        );

        if shared.state.running {
            return Ok(());
        }

        if shared.state.total_rounds == 0 {
            shared.state.reset_idle();
            return Ok(());
        }

        let handle = match self.runtime_handle() {
            Ok(handle) => handle,
            Err(e) => {
                shared.state.reset_idle();
                return Err(e);
            }
        };

        let (cancel_tx, cancel_rx) = watch::channel(false);
        shared.generation = shared.generation.wrapping_add(1);
        shared.cancel = Some(cancel_tx);
        shared.state.running = true;
        let generation = shared.generation;
        drop(shared);

        let guard = LoopGuard {
            inner: self.inner.clone(),
            generation,
            started: false,
        };
        handle.spawn(stepping_loop(guard, cancel_rx));

        // A runtime that is shutting down drops the task inside spawn()
        let mut shared = self.inner.lock()?;
        if shared.unstarted_drop == Some(generation) {
            shared.unstarted_drop = None;
            warn!(axis = %self.inner.axis, generation, "Runtime refused the stepping loop");
            return Err(Error::NoRuntime("runtime is shutting down".to_string()));
        }
        Ok(())
    }

    /// Cancel the running animation, if any
    ///
    /// Returns without waiting for the loop task. The state is idle when this
    /// returns; the loop notices the signal within one tick and emits nothing
    /// further, except a step it had already computed before the call.
    pub fn stop(&self) -> Result<()> {
        let mut shared = self.inner.lock()?;
        if !shared.state.running {
            return Ok(());
        }

        shared.cancel_loop();

        debug!(axis = %self.inner.axis, generation = shared.generation, "Scroll animation stopped");
        Ok(())
    }

    /// Stop every animator in `animators`, returning the first failure
    ///
    /// A failing axis does not keep the others running.
    pub fn stop_all<'a>(animators: impl IntoIterator<Item = &'a ScrollAnimator>) -> Result<()> {
        let mut first_error = None;
        for animator in animators {
            if let Err(e) = animator.stop() {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn runtime_handle(&self) -> Result<Handle> {
        match &self.runtime {
            Some(handle) => Ok(handle.clone()),
            None => Handle::try_current().map_err(|e| Error::NoRuntime(e.to_string())),
        }
    }
}

impl Drop for ScrollAnimator {
    fn drop(&mut self) {
        let mut shared = self.inner.lock_for_cleanup();
        if shared.state.running {
            shared.cancel_loop();
            debug!(
                axis = %self.inner.axis,
                generation = shared.generation,
                "Animator dropped, loop cancelled"
            );
        }
    }
}

/// Emit one step per tick until the step function reaches zero or `cancel` fires
async fn stepping_loop(mut guard: LoopGuard, mut cancel: watch::Receiver<bool>) {
    guard.started = true;
    let inner = guard.inner.clone();
    let generation = guard.generation;
    let axis = inner.axis;
    let interval = inner.config.tick_interval();
    debug!(axis = %axis, generation, "Stepping loop started");

    loop {
        let step = {
            let mut shared = match inner.lock() {
                Ok(shared) => shared,
                Err(e) => {
                    error!(axis = %axis, error = %e, "Stepping loop aborted");
                    return;
                }
            };

            // stop() already reset the state for us
            if *cancel.borrow() || shared.generation != generation {
                debug!(axis = %axis, generation, "Stepping loop cancelled");
                return;
            }

            let state = shared.state;
            let step = clamp_to_remaining(
                step_amount(state.round, state.total_rounds, state.total_distance),
                state.remaining_distance,
            );

            if step == 0 {
                shared.state.reset_idle();
                shared.cancel = None;
                debug!(axis = %axis, generation, rounds = state.round, "Stepping loop finished");
                return;
            }

            shared.state.advance(step);
            step
        };

        trace!(axis = %axis, step, "Scroll tick");
        inner.stepper.apply(axis, step);

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = cancel.changed() => {
                debug!(axis = %axis, generation, "Stepping loop cancelled");
                return;
            }
        }
    }
}
