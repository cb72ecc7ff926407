// src/tui.rs

use crate::app::App;
use crate::config::Config;
use crate::errors::{NeuralError, NeuralResult};
use crate::event::{spawn_input_reader, AppEvent, EVENT_CHANNEL_CAPACITY};
use crate::simulator::schedule;
use crate::ui;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::{debug, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    io,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;

/// Lets Shift+Enter arrive as a modified Enter instead of a bare `\r`.
const KEYBOARD_FLAGS: KeyboardEnhancementFlags = KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES;

/// Takes over the terminal, runs the chat until the user quits and restores
/// the terminal even when the loop fails.
pub async fn run_ui(config: &Config) -> NeuralResult<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Without the protocol Alt+Enter is the only newline key.
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(stdout, PushKeyboardEnhancementFlags(KEYBOARD_FLAGS))?;
    } else {
        debug!("Keyboard enhancement unsupported, Shift+Enter will submit");
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let app = App::new(config, Instant::now());
    let res = run_app(&mut terminal, app, Duration::from_millis(config.tick_rate_ms)).await;

    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    info!("Terminal restored");

    res
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
) -> NeuralResult<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(EVENT_CHANNEL_CAPACITY);
    let _reader = spawn_input_reader(tx.clone());
    let mut ticker = tokio::time::interval(tick_rate);

    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        tokio::select! {
            event = rx.recv() => match event {
                Some(event) => dispatch(&mut app, event, &tx),
                None => return Err(NeuralError::ChannelClosed),
            },
            _ = ticker.tick() => app.on_tick(Instant::now()),
        }

        if app.should_quit() {
            info!("Quit requested");
            break;
        }
    }

    Ok(())
}

/// Applies one channel event to `app`. An accepted submission schedules its
/// reply back onto `tx`.
fn dispatch(app: &mut App, event: AppEvent, tx: &mpsc::Sender<AppEvent>) {
    match event {
        AppEvent::Input(event) => {
            if let Some(pending) = app.handle_event(event) {
                schedule(app.simulator.delay(), pending, tx.clone());
            }
        }
        AppEvent::ResponseReady(pending) => app.complete_response(&pending),
    }
}
