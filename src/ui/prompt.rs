use crate::app::App;
use crate::constants::{INPUT_PLACEHOLDER, PROMPT};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const VISIBLE_INPUT_LINES: usize = 2;

/// Prompt line, input box and the `NEURAL_LINK` status bar.
pub fn draw_prompt(f: &mut Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(VISIBLE_INPUT_LINES as u16 + 2),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Span::styled(separator, Style::default().fg(Color::DarkGray))),
        chunks[0],
    );

    let accent = Style::default().fg(Color::Green);
    let cursor = if app.effects.cursor_visible() { "█" } else { " " };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("⌨ ", accent),
            Span::styled(PROMPT, accent.add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(cursor, accent),
        ])),
        chunks[1],
    );

    draw_input_box(f, chunks[2], app);
    draw_status_bar(f, chunks[3], app);
}

fn draw_input_box(f: &mut Frame<'_>, area: Rect, app: &App) {
    let disabled = app.is_disabled();
    let border_style = if disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::LightGreen)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(" EXEC ", border_style));
    let inner = block.inner(area);

    let text = app.input.text();
    let all_lines: Vec<&str> = text.split('\n').collect();
    let first_visible = all_lines.len().saturating_sub(VISIBLE_INPUT_LINES);

    let content: Vec<Line> = if text.is_empty() {
        let hint = Style::default()
            .fg(if disabled { Color::DarkGray } else { Color::Green })
            .add_modifier(Modifier::DIM);
        vec![Line::from(Span::styled(INPUT_PLACEHOLDER, hint))]
    } else {
        let style = if disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White)
        };
        all_lines[first_visible..]
            .iter()
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect()
    };

    // Horizontal scroll so the cursor column stays in view.
    let before_cursor: String = text.chars().take(app.input.cursor()).collect();
    let cursor_row = before_cursor.matches('\n').count();
    let cursor_col = before_cursor
        .rsplit('\n')
        .next()
        .map(|s| s.width())
        .unwrap_or(0) as u16;
    let h_scroll = cursor_col.saturating_sub(inner.width.saturating_sub(1));

    f.render_widget(
        Paragraph::new(content).block(block).scroll((0, h_scroll)),
        area,
    );

    if !disabled && cursor_row >= first_visible && inner.width > 0 && inner.height > 0 {
        let row = (cursor_row - first_visible) as u16;
        if row < inner.height {
            f.set_cursor_position((inner.x + cursor_col - h_scroll, inner.y + row));
        }
    }
}

fn draw_status_bar(f: &mut Frame<'_>, area: Rect, app: &App) {
    let style = Style::default().fg(Color::Green).add_modifier(Modifier::DIM);

    let link = if app.is_disabled() {
        Line::from(vec![
            Span::styled(app.effects.spinner(), Style::default().fg(Color::LightGreen)),
            Span::styled(" NEURAL_LINK: PROCESSING", style),
        ])
    } else {
        Line::from(Span::styled("  NEURAL_LINK: READY", style))
    };
    f.render_widget(Paragraph::new(link), area);

    let chars = format!("CHARS: {}", app.input.char_count());
    f.render_widget(
        Paragraph::new(Span::styled(chars, style)).alignment(Alignment::Right),
        area,
    );
}
