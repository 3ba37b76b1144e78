//! L4 Atomic Layer: Per-axis animation state

/// Animation state of one scroll axis
///
/// Only ever mutated under the owning animator's lock. Callers receive copies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnimationState {
    /// Distance not yet emitted as steps
    pub remaining_distance: f64,
    /// Distance the current round count was computed against
    pub total_distance: f64,
    /// Current tick index
    pub round: u32,
    /// Planned number of ticks for the current animation
    pub total_rounds: u32,
    /// Whether a stepping loop is active
    pub running: bool,
}

impl AnimationState {
    /// Merge a new request into the state
    ///
    /// A request against the current direction (or on an idle axis) replaces
    /// the remainder. A same-direction request adds to it, doubled by
    /// `accelerator` once the previous animation got past `accelerate_threshold`
    /// ticks. Either way the decay curve restarts from round 0.
    pub fn merge(&mut self, distance: f64, accelerate_threshold: u32, accelerator: f64) {
        if signum(distance) != signum(self.remaining_distance) {
            self.remaining_distance = distance;
        } else {
            let boost = if self.round < accelerate_threshold {
                1.0
            } else {
                accelerator
            };
            self.remaining_distance += distance * boost;
        }

        self.round = 0;
        self.total_distance = self.remaining_distance;
    }

    /// Record one emitted step
    pub fn advance(&mut self, step: i32) {
        self.round += 1;
        self.remaining_distance -= step as f64;
    }

    /// Return to the idle values
    pub fn reset_idle(&mut self) {
        self.round = self.total_rounds;
        self.total_distance = 0.0;
        self.remaining_distance = 0.0;
        self.running = false;
    }

    /// Nothing left to animate and no loop active
    pub fn is_idle(&self) -> bool {
        !self.running && self.remaining_distance == 0.0 && self.total_distance == 0.0
    }
}

/// Sign as -1, 0 or 1 (`f64::signum` maps 0.0 to 1.0)
fn signum(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}
