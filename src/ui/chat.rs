use crate::app::App;
use crate::constants::INPUT_AREA_HEIGHT;
use crate::ui::{bubble::render_message, prompt::draw_prompt};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::Line,
    widgets::{Block, Padding, Paragraph},
    Frame,
};

pub fn draw_chat(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(INPUT_AREA_HEIGHT)].as_ref())
        .split(area);

    draw_messages(f, chunks[0], app);
    draw_prompt(f, chunks[1], app);
}

fn draw_messages(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    let block = Block::default().padding(Padding::horizontal(1));
    let inner = block.inner(area);

    let spinner = app.effects.spinner();
    let mut lines: Vec<Line> = Vec::new();
    for message in app.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, inner.width, spinner));
    }

    let total_lines = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let max_scroll = total_lines.saturating_sub(inner.height);
    // Keep the offset in range so scrolling back down responds immediately.
    app.scroll_offset = app.scroll_offset.min(max_scroll);
    let top = max_scroll - app.scroll_offset;

    f.render_widget(Paragraph::new(lines).block(block).scroll((top, 0)), area);
}
