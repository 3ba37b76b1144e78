use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};
use tokio::runtime::Handle;
use tracing::info;

use smoothscroll_core::{scroll::ScrollConfigExt, AppConfig};
use smoothscroll_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event},
    widgets::{PagerWidget, StatusBarWidget},
};

pub async fn run(config: Arc<AppConfig>, file: &Path) -> Result<()> {
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let title = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let mut app = App::new(config.clone(), title.clone(), &text, Handle::current());
    info!(file = %file.display(), lines = app.lines.len(), "Opened file");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle(format!("{} - smoothscroll", title))
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let event_handler = EventHandler::with_animation_tick(
        config.pager.tick_rate_ms,
        config.scroll.tick_interval().as_millis() as u64,
    );

    let result = main_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal even if the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    // Track if we need high frame rate for smooth scrolling
    // This is checked at the END of each iteration to determine NEXT iteration's tick rate
    let mut needs_fast_update = false;

    loop {
        // Draw UI
        terminal.draw(|frame| {
            let size = frame.area();

            // Main layout: content + status bar
            let main_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(size);

            PagerWidget::render(frame, main_layout[0], app);
            StatusBarWidget::render(frame, main_layout[1], app);
        })?;

        if let Some(event) = event_handler.next(needs_fast_update)? {
            match event {
                AppEvent::Key(key) => app.handle_action(handle_key_event(key))?,
                AppEvent::Mouse(mouse) => app.handle_action(handle_mouse_event(mouse))?,
                // The pager re-reads its area on every draw
                AppEvent::Resize(_, _) | AppEvent::Tick => {}
            }
        }

        // Steps land in the background, keep redrawing until they stop
        needs_fast_update = app.is_animating();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
