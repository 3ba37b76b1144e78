//! Wheel event routing
//!
//! Decides, per wheel event, whether it is ignored, turned into a page
//! scroll, animated on one of the two axes, or applied directly.

use std::sync::Arc;

use crossterm::event::KeyModifiers;
use tokio::runtime::Handle;
use tracing::debug;

use smoothscroll_core::{Axis, Result, ScrollAnimator, ScrollConfig, Stepper, WheelConfig};

/// Wheel delta of one notch
pub const WHEEL_DELTA: f64 = 120.0;

/// Direct, non-animated scrolling of the view
pub trait PageScroller: Send + Sync {
    /// Scroll immediately by `amount` wheel units
    fn scroll_by(&self, axis: Axis, amount: f64);

    /// Scroll vertically by one page
    fn scroll_page(&self, direction: PageDirection);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDirection {
    Up,
    Down,
}

/// Which wheel produced the event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelKind {
    /// Regular wheel, positive delta = away from the user (scroll up)
    Vertical,
    /// Horizontal tilt wheel, positive delta = tilt right
    Tilt,
}

/// Where the event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSource {
    /// A physical mouse wheel, animated when smooth scrolling is on
    Mouse,
    /// Touchpads, keyboards and synthesized events, always applied directly
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelEvent {
    pub delta: f64,
    pub kind: WheelKind,
    pub modifiers: KeyModifiers,
    pub source: InputSource,
}

impl WheelEvent {
    /// Plain mouse-wheel event without modifiers
    pub fn mouse(delta: f64) -> Self {
        Self {
            delta,
            kind: WheelKind::Vertical,
            modifiers: KeyModifiers::NONE,
            source: InputSource::Mouse,
        }
    }

    pub fn with_modifiers(mut self, modifiers: KeyModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_kind(mut self, kind: WheelKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_source(mut self, source: InputSource) -> Self {
        self.source = source;
        self
    }
}

/// What the router did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelOutcome {
    /// Left for the host to handle (disabled, or Ctrl held on the vertical wheel)
    Ignored,
    /// Scrolled by a full page
    Paged(PageDirection),
    /// Merged into the axis animation
    Animated(Axis),
    /// Applied immediately
    Direct(Axis),
}

/// Routes wheel events to the vertical and horizontal animators
pub struct WheelRouter {
    config: WheelConfig,
    vertical: ScrollAnimator,
    horizontal: ScrollAnimator,
    scroller: Arc<dyn PageScroller>,
}

impl WheelRouter {
    /// Create a router whose animators step `scroller`
    pub fn new<P>(wheel: WheelConfig, scroll: ScrollConfig, scroller: P) -> Self
    where
        P: PageScroller + Stepper + Clone + 'static,
    {
        let speed = scroll.speed;
        Self {
            config: wheel,
            vertical: ScrollAnimator::new(Axis::Vertical, scroll.clone(), scroller.clone(), speed),
            horizontal: ScrollAnimator::new(Axis::Horizontal, scroll, scroller.clone(), speed),
            scroller: Arc::new(scroller),
        }
    }

    /// Run both animators on `handle`
    pub fn with_runtime(mut self, handle: Handle) -> Self {
        self.vertical = self.vertical.with_runtime(handle.clone());
        self.horizontal = self.horizontal.with_runtime(handle);
        self
    }

    pub fn animator(&self, axis: Axis) -> &ScrollAnimator {
        match axis {
            Axis::Vertical => &self.vertical,
            Axis::Horizontal => &self.horizontal,
        }
    }

    /// Check if either axis is animating
    pub fn is_animating(&self) -> bool {
        self.vertical.is_running() || self.horizontal.is_running()
    }

    /// Handle one wheel event
    pub fn route(&self, event: WheelEvent) -> Result<WheelOutcome> {
        match event.kind {
            // Tilt notches have their own switch and ignore modifiers
            WheelKind::Tilt => {
                if !self.config.tilt_enabled || event.delta == 0.0 {
                    return Ok(WheelOutcome::Ignored);
                }
                // Tilt notches carry no useful magnitude, use a fixed step
                let delta = -event.delta.signum() * self.config.tilt_step;
                self.post(-delta, Axis::Horizontal, event.source)
            }
            WheelKind::Vertical => {
                if !self.config.enabled || event.modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(WheelOutcome::Ignored);
                }

                if self.config.alt_page && event.modifiers.contains(KeyModifiers::ALT) {
                    let direction = if event.delta < 0.0 {
                        PageDirection::Down
                    } else {
                        PageDirection::Up
                    };
                    self.scroller.scroll_page(direction);
                    return Ok(WheelOutcome::Paged(direction));
                }

                if self.config.shift_horizontal && event.modifiers.contains(KeyModifiers::SHIFT) {
                    return self.post(-event.delta, Axis::Horizontal, event.source);
                }

                self.post(event.delta, Axis::Vertical, event.source)
            }
        }
    }

    /// Pointer pressed: cancel both animations
    pub fn pointer_down(&self) -> Result<()> {
        ScrollAnimator::stop_all([&self.vertical, &self.horizontal])
    }

    fn post(&self, distance: f64, axis: Axis, source: InputSource) -> Result<WheelOutcome> {
        if self.config.smooth_enabled && source == InputSource::Mouse {
            self.animator(axis)
                .request(distance * self.config.distance_ratio)?;
            Ok(WheelOutcome::Animated(axis))
        } else {
            debug!(axis = %axis, distance, "Direct scroll");
            self.scroller.scroll_by(axis, distance);
            Ok(WheelOutcome::Direct(axis))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Step(Axis, i32),
        Direct(Axis, f64),
        Page(PageDirection),
    }

    #[derive(Clone, Default)]
    struct FakeView(Arc<Mutex<Vec<Call>>>);

    impl FakeView {
        fn calls(&self) -> Vec<Call> {
            self.0.lock().unwrap().clone()
        }

        fn stepped(&self, axis: Axis) -> i32 {
            self.calls()
                .iter()
                .filter_map(|call| match call {
                    Call::Step(a, amount) if *a == axis => Some(*amount),
                    _ => None,
                })
                .sum()
        }
    }

    impl Stepper for FakeView {
        fn apply(&self, axis: Axis, amount: i32) {
            self.0.lock().unwrap().push(Call::Step(axis, amount));
        }
    }

    impl PageScroller for FakeView {
        fn scroll_by(&self, axis: Axis, amount: f64) {
            self.0.lock().unwrap().push(Call::Direct(axis, amount));
        }

        fn scroll_page(&self, direction: PageDirection) {
            self.0.lock().unwrap().push(Call::Page(direction));
        }
    }

    fn router(view: &FakeView, wheel: WheelConfig) -> WheelRouter {
        WheelRouter::new(wheel, ScrollConfig::default(), view.clone())
    }

    #[tokio::test(start_paused = true)]
    async fn test_plain_wheel_animates_vertically() {
        let view = FakeView::default();
        let router = router(&view, WheelConfig::default());

        let outcome = router.route(WheelEvent::mouse(-WHEEL_DELTA)).unwrap();
        assert_eq!(outcome, WheelOutcome::Animated(Axis::Vertical));

        let state = router.animator(Axis::Vertical).snapshot().unwrap();
        assert!((state.total_distance + 132.0).abs() < 1e-9);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(view.stepped(Axis::Vertical), -132);
        assert_eq!(view.stepped(Axis::Horizontal), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shift_wheel_goes_horizontal_inverted() {
        let view = FakeView::default();
        let router = router(&view, WheelConfig::default());

        let event = WheelEvent::mouse(WHEEL_DELTA).with_modifiers(KeyModifiers::SHIFT);
        assert_eq!(
            router.route(event).unwrap(),
            WheelOutcome::Animated(Axis::Horizontal)
        );

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(view.stepped(Axis::Horizontal), -132);
        assert_eq!(view.stepped(Axis::Vertical), 0);
    }

    #[tokio::test]
    async fn test_ctrl_wheel_is_ignored() {
        let view = FakeView::default();
        let router = router(&view, WheelConfig::default());

        let event = WheelEvent::mouse(WHEEL_DELTA).with_modifiers(KeyModifiers::CONTROL);
        assert_eq!(router.route(event).unwrap(), WheelOutcome::Ignored);
        assert!(!router.is_animating());
        assert!(view.calls().is_empty());
    }

    #[tokio::test]
    async fn test_disabled_router_ignores_everything() {
        let view = FakeView::default();
        let wheel = WheelConfig {
            enabled: false,
            ..Default::default()
        };
        let router = router(&view, wheel);

        assert_eq!(
            router.route(WheelEvent::mouse(WHEEL_DELTA)).unwrap(),
            WheelOutcome::Ignored
        );
        assert!(view.calls().is_empty());
    }

    #[tokio::test]
    async fn test_alt_wheel_pages() {
        let view = FakeView::default();
        let router = router(&view, WheelConfig::default());

        let down = WheelEvent::mouse(-WHEEL_DELTA).with_modifiers(KeyModifiers::ALT);
        let up = WheelEvent::mouse(WHEEL_DELTA).with_modifiers(KeyModifiers::ALT);
        assert_eq!(
            router.route(down).unwrap(),
            WheelOutcome::Paged(PageDirection::Down)
        );
        assert_eq!(
            router.route(up).unwrap(),
            WheelOutcome::Paged(PageDirection::Up)
        );
        assert_eq!(
            view.calls(),
            vec![Call::Page(PageDirection::Down), Call::Page(PageDirection::Up)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_alt_paging_can_be_disabled() {
        let view = FakeView::default();
        let wheel = WheelConfig {
            alt_page: false,
            ..Default::default()
        };
        let router = router(&view, wheel);

        let event = WheelEvent::mouse(-WHEEL_DELTA).with_modifiers(KeyModifiers::ALT);
        assert_eq!(
            router.route(event).unwrap(),
            WheelOutcome::Animated(Axis::Vertical)
        );
    }

    #[tokio::test]
    async fn test_non_mouse_source_scrolls_directly() {
        let view = FakeView::default();
        let router = router(&view, WheelConfig::default());

        let event = WheelEvent::mouse(-WHEEL_DELTA).with_source(InputSource::Other);
        assert_eq!(
            router.route(event).unwrap(),
            WheelOutcome::Direct(Axis::Vertical)
        );
        assert_eq!(view.calls(), vec![Call::Direct(Axis::Vertical, -120.0)]);
        assert!(!router.is_animating());
    }

    #[tokio::test]
    async fn test_smooth_disabled_scrolls_directly() {
        let view = FakeView::default();
        let wheel = WheelConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        let router = router(&view, wheel);

        let event = WheelEvent::mouse(WHEEL_DELTA).with_modifiers(KeyModifiers::SHIFT);
        assert_eq!(
            router.route(event).unwrap(),
            WheelOutcome::Direct(Axis::Horizontal)
        );
        assert_eq!(view.calls(), vec![Call::Direct(Axis::Horizontal, -120.0)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tilt_uses_fixed_step() {
        let view = FakeView::default();
        let router = router(&view, WheelConfig::default());

        let right = WheelEvent::mouse(WHEEL_DELTA).with_kind(WheelKind::Tilt);
        assert_eq!(
            router.route(right).unwrap(),
            WheelOutcome::Animated(Axis::Horizontal)
        );
        let state = router.animator(Axis::Horizontal).snapshot().unwrap();
        assert!((state.total_distance - 22.0).abs() < 1e-9);

        let direct = FakeView::default();
        let plain = router_without_smooth(&direct);
        let left = WheelEvent::mouse(-WHEEL_DELTA).with_kind(WheelKind::Tilt);
        plain.route(left).unwrap();
        assert_eq!(direct.calls(), vec![Call::Direct(Axis::Horizontal, -20.0)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tilt_has_its_own_switch() {
        let view = FakeView::default();
        let wheel = WheelConfig {
            enabled: false,
            ..Default::default()
        };
        let router = router(&view, wheel);

        // Neither the main switch nor Ctrl affects tilt notches
        let tilt = WheelEvent::mouse(WHEEL_DELTA)
            .with_kind(WheelKind::Tilt)
            .with_modifiers(KeyModifiers::CONTROL);
        assert_eq!(
            router.route(tilt).unwrap(),
            WheelOutcome::Animated(Axis::Horizontal)
        );

        let view = FakeView::default();
        let wheel = WheelConfig {
            tilt_enabled: false,
            ..Default::default()
        };
        let router = self::router(&view, wheel);
        assert_eq!(router.route(tilt).unwrap(), WheelOutcome::Ignored);
        assert_eq!(
            router.route(WheelEvent::mouse(-WHEEL_DELTA)).unwrap(),
            WheelOutcome::Animated(Axis::Vertical)
        );
    }

    fn router_without_smooth(view: &FakeView) -> WheelRouter {
        let wheel = WheelConfig {
            smooth_enabled: false,
            ..Default::default()
        };
        router(view, wheel)
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_down_stops_both_axes() {
        let view = FakeView::default();
        let router = router(&view, WheelConfig::default());

        router.route(WheelEvent::mouse(-WHEEL_DELTA * 4.0)).unwrap();
        router
            .route(WheelEvent::mouse(WHEEL_DELTA * 4.0).with_modifiers(KeyModifiers::SHIFT))
            .unwrap();
        assert!(router.is_animating());

        tokio::time::sleep(Duration::from_millis(40)).await;
        router.pointer_down().unwrap();
        assert!(!router.is_animating());

        let count = view.calls().len();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(view.calls().len(), count);
    }
}
