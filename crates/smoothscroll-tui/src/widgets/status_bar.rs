use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use smoothscroll_core::Axis;

use crate::app::App;
use crate::theme::GruvboxMaterial;

pub struct StatusBarWidget;

impl StatusBarWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let status_text = if let Some(msg) = &app.status_message {
            format!(" {}", msg)
        } else {
            format!(
                " Ln {}/{} | Col {} | {} | {}",
                app.viewport.top_row() + 1,
                app.lines.len().max(1),
                app.viewport.left_col() + 1,
                Self::axis_status(app, Axis::Vertical),
                Self::axis_status(app, Axis::Horizontal),
            )
        };

        let help_hint = " q:quit j/k:line C-d/C-u:half page wheel:scroll ";
        let padding_len = area.width.saturating_sub(
            status_text.len() as u16 + help_hint.len() as u16,
        ) as usize;

        let status_style = if app.status_message.is_some() {
            Style::default().fg(GruvboxMaterial::WARNING).bg(GruvboxMaterial::BG2)
        } else {
            Style::default().fg(GruvboxMaterial::FG0).bg(GruvboxMaterial::BG2)
        };

        let line = Line::from(vec![
            Span::styled(status_text, status_style),
            Span::styled(
                " ".repeat(padding_len),
                Style::default().bg(GruvboxMaterial::BG2),
            ),
            Span::styled(
                help_hint,
                Style::default()
                    .fg(GruvboxMaterial::GREY2)
                    .bg(GruvboxMaterial::BG2),
            ),
        ]);

        let paragraph = Paragraph::new(line).style(Style::default().bg(GruvboxMaterial::BG1));
        frame.render_widget(paragraph, area);
    }

    fn axis_status(app: &App, axis: Axis) -> String {
        let label = match axis {
            Axis::Vertical => "V",
            Axis::Horizontal => "H",
        };
        match app.router.animator(axis).snapshot() {
            Ok(state) if state.running => format!(
                "{} {}/{} {:+.0}",
                label, state.round, state.total_rounds, state.remaining_distance
            ),
            Ok(_) => format!("{} idle", label),
            Err(_) => format!("{} error", label),
        }
    }
}
