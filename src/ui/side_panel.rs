use crate::app::App;
use crate::effects::apply_scanlines;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

const GAUGE_CELLS: usize = 10;

fn gauge(label: &str, percent: u8) -> Line<'static> {
    let filled = (percent as usize * GAUGE_CELLS + 50) / 100;
    let color = match percent {
        0..=59 => Color::Green,
        60..=84 => Color::Yellow,
        _ => Color::Red,
    };
    Line::from(vec![
        Span::styled(format!("{:<4}", label), Style::default().fg(Color::Green)),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(GAUGE_CELLS - filled),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(format!(" {:>3}%", percent), Style::default().fg(Color::LightGreen)),
    ])
}

pub fn draw_side_panel(f: &mut Frame<'_>, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(0)].as_ref())
        .split(area);

    let frame_style = Style::default().fg(Color::Green);
    let title_style = Style::default()
        .fg(Color::LightGreen)
        .add_modifier(Modifier::BOLD);

    let metrics = app.effects.metrics;
    let monitor = Paragraph::new(vec![
        gauge("CPU", metrics.cpu),
        gauge("MEM", metrics.memory),
        Line::from(vec![
            Span::styled("NET ", Style::default().fg(Color::Green)),
            Span::styled(
                format!("{} KB/s", metrics.network_kbps),
                Style::default().fg(Color::LightGreen),
            ),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(frame_style)
            .title(Span::styled(" SYS.MONITOR ", title_style)),
    );
    f.render_widget(monitor, chunks[0]);

    let feed = Block::default()
        .borders(Borders::ALL)
        .border_style(frame_style)
        .title(Span::styled(" NEURAL_FEED ", title_style));
    let feed_inner = feed.inner(chunks[1]);
    f.render_widget(feed, chunks[1]);

    app.effects.rain.resize(feed_inner.width, feed_inner.height);
    f.render_widget(&app.effects.rain, feed_inner);

    if app.scanlines {
        apply_scanlines(f.buffer_mut(), area);
    }
}
