use crate::app::App;
use crate::constants::MODEL_LABEL;
use crate::effects::{apply_scanlines, clock_text};
use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub const HEADER_HEIGHT: u16 = 3;

pub fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(Color::Green))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let glow = Style::default()
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD);
    let label = Style::default().fg(Color::Green);

    let title = Line::from(vec![
        Span::styled("▣ ", glow),
        Span::styled(app.effects.title().to_string(), glow),
    ]);

    let ready = if app.effects.cursor_visible() {
        "READY█"
    } else {
        "READY "
    };
    let status = Line::from(vec![
        Span::styled("⚙ ", label),
        Span::styled(MODEL_LABEL, label),
        Span::raw("   "),
        Span::styled("⚡ STATUS: ONLINE", label),
        Span::raw("   "),
        Span::styled(ready, label),
    ]);

    f.render_widget(Paragraph::new(vec![title, status]), inner);

    let clock = clock_text(Local::now());
    let clock_width = (clock.len() as u16).min(inner.width);
    f.render_widget(
        Paragraph::new(Span::styled(clock, glow)).alignment(Alignment::Right),
        Rect {
            x: inner.right().saturating_sub(clock_width),
            y: inner.y,
            width: clock_width,
            height: inner.height.min(1),
        },
    );

    if app.scanlines {
        apply_scanlines(f.buffer_mut(), area);
    }
}
