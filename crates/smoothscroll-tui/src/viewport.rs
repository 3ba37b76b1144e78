//! Scrollable viewport over a block of text
//!
//! Offsets are kept in wheel units so animation steps smaller than one row
//! still accumulate. Vertical amounts follow the wheel convention (positive
//! moves toward the top); horizontal amounts are positive toward the right.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use smoothscroll_core::{Axis, PagerConfig, Stepper};

use crate::wheel::{PageDirection, PageScroller};

/// Viewport geometry and offsets
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewportState {
    /// Horizontal offset in wheel units
    pub offset_x: f64,
    /// Vertical offset in wheel units
    pub offset_y: f64,
    /// Content size in rows
    pub content_rows: usize,
    /// Content size in columns
    pub content_cols: usize,
    /// Visible rows
    pub view_rows: u16,
    /// Visible columns
    pub view_cols: u16,
}

/// Shared viewport, cheap to clone
///
/// Clones share the same offsets, so one clone can be handed to the
/// animators as their stepper while another is used for rendering.
#[derive(Debug, Clone)]
pub struct Viewport {
    state: Arc<Mutex<ViewportState>>,
    units_per_line: f64,
    units_per_column: f64,
}

impl Viewport {
    pub fn new(config: &PagerConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(ViewportState::default())),
            units_per_line: positive_or(config.units_per_line, 40.0),
            units_per_column: positive_or(config.units_per_column, 10.0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewportState> {
        // Offsets stay meaningful even if a holder panicked
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> ViewportState {
        *self.lock()
    }

    /// Update content and visible size, keeping offsets in range
    pub fn resize(&self, content_rows: usize, content_cols: usize, view_rows: u16, view_cols: u16) {
        let mut state = self.lock();
        state.content_rows = content_rows;
        state.content_cols = content_cols;
        state.view_rows = view_rows;
        state.view_cols = view_cols;
        self.clamp(&mut state);
    }

    /// First visible row
    pub fn top_row(&self) -> usize {
        (self.lock().offset_y / self.units_per_line).round() as usize
    }

    /// First visible column
    pub fn left_col(&self) -> usize {
        (self.lock().offset_x / self.units_per_column).round() as usize
    }

    /// Wheel units covered by `rows` text rows
    pub fn rows_to_units(&self, rows: u16) -> f64 {
        rows as f64 * self.units_per_line
    }

    pub fn jump_to_top(&self) {
        self.lock().offset_y = 0.0;
    }

    pub fn jump_to_bottom(&self) {
        let mut state = self.lock();
        state.offset_y = self.max_y(&state);
    }

    fn max_y(&self, state: &ViewportState) -> f64 {
        state.content_rows.saturating_sub(state.view_rows as usize) as f64 * self.units_per_line
    }

    fn max_x(&self, state: &ViewportState) -> f64 {
        state.content_cols.saturating_sub(state.view_cols as usize) as f64 * self.units_per_column
    }

    fn clamp(&self, state: &mut ViewportState) {
        state.offset_y = state.offset_y.clamp(0.0, self.max_y(state));
        state.offset_x = state.offset_x.clamp(0.0, self.max_x(state));
    }

    fn shift(&self, axis: Axis, amount: f64) {
        let mut state = self.lock();
        match axis {
            Axis::Vertical => state.offset_y -= amount,
            Axis::Horizontal => state.offset_x += amount,
        }
        self.clamp(&mut state);
    }
}

impl Stepper for Viewport {
    fn apply(&self, axis: Axis, amount: i32) {
        self.shift(axis, amount as f64);
    }
}

impl PageScroller for Viewport {
    fn scroll_by(&self, axis: Axis, amount: f64) {
        self.shift(axis, amount);
    }

    fn scroll_page(&self, direction: PageDirection) {
        let page = self.rows_to_units(self.lock().view_rows.max(1));
        match direction {
            PageDirection::Up => self.shift(Axis::Vertical, page),
            PageDirection::Down => self.shift(Axis::Vertical, -page),
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}
