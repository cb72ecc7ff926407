// src/ui.rs

pub mod bubble;
pub mod chat;
pub mod header;
pub mod prompt;
pub mod quit_confirm;
pub mod side_panel;

use crate::app::{App, Screen};
use crate::constants::SIDE_PANEL_WIDTH;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Block,
    Frame,
};

/// Below this width the side panel is dropped so the chat stays readable.
const MIN_WIDTH_FOR_SIDE_PANEL: u16 = 70;

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.area();
    f.render_widget(Block::default().style(Style::default().bg(Color::Black)), size);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(header::HEADER_HEIGHT), Constraint::Min(1)].as_ref())
        .split(size);

    header::draw_header(f, vertical[0], app);

    let body = if size.width >= MIN_WIDTH_FOR_SIDE_PANEL {
        let horizontal = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(SIDE_PANEL_WIDTH)].as_ref())
            .split(vertical[1]);
        side_panel::draw_side_panel(f, horizontal[1], app);
        horizontal[0]
    } else {
        vertical[1]
    };

    chat::draw_chat(f, body, app);

    if app.screen == Screen::QuitConfirm {
        quit_confirm::draw_quit_confirm(f, size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::Effects;
    use crate::simulator::{ResponseSimulator, TemplatePicker};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::{Duration, Instant};

    struct FirstTemplate;

    impl TemplatePicker for FirstTemplate {
        fn pick(&mut self, _count: usize) -> usize {
            0
        }
    }

    fn test_app() -> App {
        let simulator =
            ResponseSimulator::new(Duration::from_millis(2000), Box::new(FirstTemplate));
        let effects = Effects::new(0.5, Duration::from_millis(2000), Some(11), Instant::now());
        App::with_parts(simulator, effects)
    }

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..height {
            for x in 0..width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_initial_screen() {
        let mut app = test_app();
        let screen = render(&mut app, 110, 32);

        assert!(screen.contains("NEURAL.INTERFACE.v2.1"));
        assert!(screen.contains("[AI_CORE]"));
        assert!(screen.contains("SYSTEM INITIALIZED..."));
        assert!(screen.contains("user@neural-interface:~$"));
        assert!(screen.contains("NEURAL_LINK: READY"));
        assert!(screen.contains("CPU"));
    }

    #[test]
    fn test_pending_then_resolved() {
        let mut app = test_app();
        let pending = app.submit("status".to_string()).unwrap();

        let screen = render(&mut app, 110, 32);
        assert!(screen.contains("[USER]"));
        assert!(screen.contains("PROCESSING..."));
        assert!(screen.contains("NEURAL_LINK: PROCESSING"));

        app.complete_response(&pending);
        let screen = render(&mut app, 110, 32);
        assert!(screen.contains("PROCESSING QUERY: \"status\""));
        assert!(screen.contains("NEURAL_LINK: READY"));
    }

    #[test]
    fn test_narrow_terminal_hides_side_panel() {
        let mut app = test_app();
        let screen = render(&mut app, 60, 24);
        assert!(!screen.contains("SYS.MONITOR"));
        assert!(screen.contains("[AI_CORE]"));
    }

    #[test]
    fn test_quit_overlay() {
        let mut app = test_app();
        app.screen = Screen::QuitConfirm;
        let screen = render(&mut app, 110, 32);
        assert!(screen.contains("TERMINATE SESSION?"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = test_app();
        app.submit("status".to_string()).unwrap();
        render(&mut app, 8, 4);
        render(&mut app, 1, 1);
    }
}
