use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::theme::GruvboxMaterial;

pub struct PagerWidget;

impl PagerWidget {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let border_style = if app.is_animating() {
            Style::default().fg(GruvboxMaterial::ACCENT)
        } else {
            Style::default().fg(GruvboxMaterial::GREY0)
        };

        let block = Block::default()
            .title(format!(" {} ", app.title))
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(GruvboxMaterial::BG0));

        let inner_area = block.inner(area);
        frame.render_widget(block, area);

        // Keep the viewport's limits in sync with what is actually visible
        app.viewport.resize(
            app.lines.len(),
            app.content_width,
            inner_area.height,
            inner_area.width,
        );

        let top = app.viewport.top_row().min(app.lines.len());
        let bottom = (top + inner_area.height as usize).min(app.lines.len());
        let left = app.viewport.left_col().min(u16::MAX as usize) as u16;

        let text = Text::from(
            app.lines[top..bottom]
                .iter()
                .map(|line| Line::raw(line.as_str()))
                .collect::<Vec<_>>(),
        );

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(GruvboxMaterial::FG0))
            .scroll((0, left));
        frame.render_widget(paragraph, inner_area);
    }
}
