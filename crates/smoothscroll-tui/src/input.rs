use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use crate::wheel::{InputSource, PageDirection, WheelEvent, WheelKind, WHEEL_DELTA};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    /// Mouse wheel or tilt-wheel notch
    Wheel(WheelEvent),
    /// Mouse button pressed, cancels running animations
    PointerDown,
    /// Move by a number of lines without animation (positive = down)
    ScrollLines(i32),
    /// Animated half-page scroll
    HalfPage(PageDirection),
    /// Full page scroll
    Page(PageDirection),
    JumpToTop,
    JumpToBottom,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Line scrolling
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::ScrollLines(1),
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::ScrollLines(-1),
        (KeyCode::Down, KeyModifiers::NONE) => Action::ScrollLines(1),
        (KeyCode::Up, KeyModifiers::NONE) => Action::ScrollLines(-1),

        // Smooth half pages
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::HalfPage(PageDirection::Down),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::HalfPage(PageDirection::Up),

        // Full pages
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::Page(PageDirection::Down),
        (KeyCode::Char('b'), KeyModifiers::CONTROL) => Action::Page(PageDirection::Up),
        (KeyCode::PageDown, _) => Action::Page(PageDirection::Down),
        (KeyCode::PageUp, _) => Action::Page(PageDirection::Up),
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::Page(PageDirection::Down),

        // Jump to top/bottom
        (KeyCode::Char('g'), KeyModifiers::NONE) => Action::JumpToTop,
        (KeyCode::Home, _) => Action::JumpToTop,
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Action::JumpToBottom,
        (KeyCode::End, _) => Action::JumpToBottom,

        _ => Action::None,
    }
}

/// Handle a mouse event and return the corresponding action
///
/// Terminals report one event per wheel notch, so each becomes a full
/// [`WHEEL_DELTA`].
pub fn handle_mouse_event(mouse: MouseEvent) -> Action {
    let wheel = |delta: f64, kind: WheelKind| {
        Action::Wheel(WheelEvent {
            delta,
            kind,
            modifiers: mouse.modifiers,
            source: InputSource::Mouse,
        })
    };

    match mouse.kind {
        MouseEventKind::ScrollUp => wheel(WHEEL_DELTA, WheelKind::Vertical),
        MouseEventKind::ScrollDown => wheel(-WHEEL_DELTA, WheelKind::Vertical),
        MouseEventKind::ScrollRight => wheel(WHEEL_DELTA, WheelKind::Tilt),
        MouseEventKind::ScrollLeft => wheel(-WHEEL_DELTA, WheelKind::Tilt),
        MouseEventKind::Down(_) => Action::PointerDown,
        _ => Action::None,
    }
}
