use crate::constants::{ASSISTANT_LABEL, LOADING_TEXT, USER_LABEL};
use crate::models::Message;
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

struct BubbleTheme {
    border: Style,
    text: Style,
    label: Style,
    alignment: Alignment,
}

fn theme(message: &Message) -> BubbleTheme {
    if message.is_user() {
        BubbleTheme {
            border: Style::default().fg(Color::Blue),
            text: Style::default().fg(Color::LightBlue),
            label: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            alignment: Alignment::Right,
        }
    } else {
        BubbleTheme {
            border: Style::default().fg(Color::Green),
            text: Style::default().fg(Color::LightGreen),
            label: Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
            alignment: Alignment::Left,
        }
    }
}

/// Lines of text inside the frame, wrapped to `width` columns.
fn body_lines(message: &Message, width: usize, spinner: &str) -> Vec<String> {
    if message.is_loading {
        return vec![format!("{} {} >", spinner, LOADING_TEXT)];
    }

    let mut lines = Vec::new();
    for raw in message.content.lines() {
        if raw.is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(wrap(raw, width).into_iter().map(|l| l.into_owned()));
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Renders one message as a labelled, box-drawn bubble at most three
/// quarters of `width` wide. User bubbles are right-aligned.
pub fn render_message(message: &Message, width: u16, spinner: &str) -> Vec<Line<'static>> {
    let theme = theme(message);
    let max_width = ((width as usize) * 3 / 4).max(8).min(width as usize);
    let inner_width = max_width.saturating_sub(4).max(1);

    let body = body_lines(message, inner_width, spinner);
    let box_width = body
        .iter()
        .map(|l| UnicodeWidthStr::width(l.as_str()))
        .max()
        .unwrap_or(0)
        .clamp(1, inner_width);

    let timestamp = message.timestamp.format("%H:%M").to_string();
    let time_style = Style::default().fg(Color::DarkGray);
    let label_line = if message.is_user() {
        Line::from(vec![
            Span::styled(timestamp, time_style),
            Span::raw(" "),
            Span::styled(USER_LABEL, theme.label),
        ])
    } else {
        Line::from(vec![
            Span::styled("› ", theme.label),
            Span::styled(ASSISTANT_LABEL, theme.label),
            Span::raw(" "),
            Span::styled(timestamp, time_style),
        ])
    };

    let rule = "─".repeat(box_width + 2);
    let mut lines = vec![
        label_line,
        Line::from(Span::styled(format!("┌{}┐", rule), theme.border)),
    ];

    let text_style = if message.is_loading {
        theme.text.add_modifier(Modifier::SLOW_BLINK)
    } else {
        theme.text
    };
    for text in body {
        let pad = box_width.saturating_sub(UnicodeWidthStr::width(text.as_str()));
        lines.push(Line::from(vec![
            Span::styled("│ ", theme.border),
            Span::styled(format!("{}{}", text, " ".repeat(pad)), text_style),
            Span::styled(" │", theme.border),
        ]));
    }

    lines.push(Line::from(Span::styled(format!("└{}┘", rule), theme.border)));

    lines
        .into_iter()
        .map(|line| line.alignment(theme.alignment))
        .collect()
}
