use std::sync::Arc;

use anyhow::Result;
use crossterm::event::KeyModifiers;
use smoothscroll_core::{AppConfig, Axis};
use tokio::runtime::Handle;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::input::Action;
use crate::viewport::Viewport;
use crate::wheel::{PageDirection, PageScroller, WheelKind, WheelOutcome, WheelRouter};

/// Pager state
pub struct App {
    pub config: Arc<AppConfig>,
    /// Shown in the pager border
    pub title: String,
    pub lines: Vec<String>,
    /// Display width of the widest line
    pub content_width: usize,
    pub viewport: Viewport,
    pub router: WheelRouter,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl App {
    /// Create a pager over `text`, animating on `runtime`
    pub fn new(config: Arc<AppConfig>, title: impl Into<String>, text: &str, runtime: Handle) -> Self {
        let lines: Vec<String> = text.lines().map(|line| line.replace('\t', "    ")).collect();
        let content_width = lines.iter().map(|line| line.width()).max().unwrap_or(0);

        let viewport = Viewport::new(&config.pager);
        let router = WheelRouter::new(config.wheel.clone(), config.scroll.clone(), viewport.clone())
            .with_runtime(runtime);

        Self {
            config,
            title: title.into(),
            lines,
            content_width,
            viewport,
            router,
            status_message: None,
            should_quit: false,
        }
    }

    /// Check if a redraw is needed on every animation tick
    pub fn is_animating(&self) -> bool {
        self.router.is_animating()
    }

    /// Apply an input action
    pub fn handle_action(&mut self, action: Action) -> Result<()> {
        if action != Action::None {
            self.status_message = None;
        }

        match action {
            Action::Quit => {
                self.router.pointer_down()?;
                self.should_quit = true;
            }
            Action::Wheel(event) => {
                let outcome = self.router.route(event)?;
                debug!(?event, ?outcome, "Wheel event");
                let ctrl_wheel = event.kind == WheelKind::Vertical
                    && event.modifiers.contains(KeyModifiers::CONTROL);
                if outcome == WheelOutcome::Ignored && ctrl_wheel && self.config.wheel.enabled {
                    self.status_message = Some("Ctrl+wheel is left to the terminal".to_string());
                }
            }
            Action::PointerDown => self.router.pointer_down()?,
            Action::ScrollLines(lines) => {
                // Positive lines move down, which is a negative wheel amount
                let amount = -(lines as f64) * self.config.pager.units_per_line;
                self.viewport.scroll_by(Axis::Vertical, amount);
            }
            Action::HalfPage(direction) => {
                let half = self.viewport.rows_to_units((self.viewport.snapshot().view_rows / 2).max(1));
                let distance = match direction {
                    PageDirection::Up => half,
                    PageDirection::Down => -half,
                };
                self.router.animator(Axis::Vertical).request(distance)?;
            }
            Action::Page(direction) => {
                self.router.animator(Axis::Vertical).stop()?;
                self.viewport.scroll_page(direction);
            }
            Action::JumpToTop => {
                self.router.pointer_down()?;
                self.viewport.jump_to_top();
            }
            Action::JumpToBottom => {
                self.router.pointer_down()?;
                self.viewport.jump_to_bottom();
            }
            Action::None => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wheel::{WheelEvent, WHEEL_DELTA};
    use std::time::Duration;

    fn app() -> App {
        let text = (0..200)
            .map(|i| format!("line {}\twith a tab", i))
            .collect::<Vec<_>>()
            .join("\n");
        let app = App::new(Arc::new(AppConfig::default()), "test", &text, Handle::current());
        app.viewport.resize(app.lines.len(), app.content_width, 20, 10);
        app
    }

    #[tokio::test]
    async fn test_new_expands_tabs() {
        let app = app();
        assert_eq!(app.lines.len(), 200);
        assert_eq!(app.lines[0], "line 0    with a tab");
        assert_eq!(app.content_width, "line 199    with a tab".len());
    }

    #[tokio::test]
    async fn test_line_scrolling() {
        let mut app = app();
        app.handle_action(Action::ScrollLines(3)).unwrap();
        assert_eq!(app.viewport.top_row(), 3);
        app.handle_action(Action::ScrollLines(-5)).unwrap();
        assert_eq!(app.viewport.top_row(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wheel_animates_viewport() {
        let mut app = app();
        app.handle_action(Action::Wheel(WheelEvent::mouse(-WHEEL_DELTA)))
            .unwrap();
        assert!(app.is_animating());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(!app.is_animating());
        // 132 units at 40 units per line
        assert_eq!(app.viewport.top_row(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_half_page_is_animated() {
        let mut app = app();
        app.handle_action(Action::HalfPage(PageDirection::Down))
            .unwrap();
        assert!(app.is_animating());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(app.viewport.top_row(), 10);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_down_freezes_viewport() {
        let mut app = app();
        app.handle_action(Action::Wheel(WheelEvent::mouse(-WHEEL_DELTA * 5.0)))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;

        app.handle_action(Action::PointerDown).unwrap();
        let frozen = app.viewport.snapshot().offset_y;
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(app.viewport.snapshot().offset_y, frozen);
        assert!(!app.is_animating());
    }

    #[tokio::test]
    async fn test_ctrl_wheel_sets_status() {
        let mut app = app();
        let event = WheelEvent::mouse(WHEEL_DELTA).with_modifiers(KeyModifiers::CONTROL);
        app.handle_action(Action::Wheel(event)).unwrap();
        assert!(app.status_message.is_some());

        app.handle_action(Action::ScrollLines(1)).unwrap();
        assert!(app.status_message.is_none());

        // A tilt notch ignored by its own switch is not a Ctrl+wheel
        let mut config = AppConfig::default();
        config.wheel.tilt_enabled = false;
        let mut app = App::new(Arc::new(config), "test", "text", Handle::current());
        let tilt = WheelEvent::mouse(WHEEL_DELTA)
            .with_kind(WheelKind::Tilt)
            .with_modifiers(KeyModifiers::CONTROL);
        app.handle_action(Action::Wheel(tilt)).unwrap();
        assert!(app.status_message.is_none());
    }

    #[tokio::test]
    async fn test_quit_and_jumps() {
        let mut app = app();
        app.handle_action(Action::JumpToBottom).unwrap();
        assert_eq!(app.viewport.top_row(), 180);
        app.handle_action(Action::JumpToTop).unwrap();
        assert_eq!(app.viewport.top_row(), 0);

        app.handle_action(Action::Quit).unwrap();
        assert!(app.should_quit);
    }
}
