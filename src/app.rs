use crate::config::Config;
use crate::constants::SEED_MESSAGE;
use crate::effects::Effects;
use crate::input::{InputController, InputOutcome};
use crate::models::Message;
use crate::simulator::{PendingResponse, RandomPicker, ResponseSimulator};
use crate::store::MessageStore;
use crossterm::event::{Event as CEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, error, info};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Chat,
    QuitConfirm,
    Quit,
}

/// All UI state. Owned by the event loop and only mutated through these
/// methods.
pub struct App {
    pub screen: Screen,
    pub store: MessageStore,
    pub input: InputController,
    pub simulator: ResponseSimulator,
    pub effects: Effects,
    pub scanlines: bool,
    /// Lines scrolled up from the bottom of the transcript; 0 follows new output.
    pub scroll_offset: u16,
}

impl App {
    pub fn new(config: &Config, now: Instant) -> App {
        let simulator = ResponseSimulator::new(
            Duration::from_millis(config.response_delay_ms),
            Box::new(RandomPicker::from_seed_option(config.template_seed)),
        );
        let effects = Effects::new(
            config.rain_density,
            Duration::from_millis(config.metrics_refresh_ms),
            None,
            now,
        );
        let mut app = App::with_parts(simulator, effects);
        app.scanlines = config.scanlines;
        app
    }

    pub fn with_parts(simulator: ResponseSimulator, effects: Effects) -> App {
        App {
            screen: Screen::Chat,
            store: MessageStore::with_seed(Message::assistant(SEED_MESSAGE)),
            input: InputController::new(),
            simulator,
            effects,
            scanlines: true,
            scroll_offset: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    /// The prompt is disabled while a simulated reply is pending.
    pub fn is_disabled(&self) -> bool {
        self.simulator.is_busy()
    }

    pub fn should_quit(&self) -> bool {
        self.screen == Screen::Quit
    }

    /// Returns a pending response when the event caused a submission; the
    /// caller is responsible for scheduling it.
    pub fn handle_event(&mut self, event: CEvent) -> Option<PendingResponse> {
        match event {
            CEvent::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PendingResponse> {
        match self.screen {
            Screen::Chat => self.handle_chat_key(key),
            Screen::QuitConfirm => {
                self.handle_quit_confirm_key(key);
                None
            }
            Screen::Quit => None,
        }
    }

    fn handle_chat_key(&mut self, key: KeyEvent) -> Option<PendingResponse> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.screen = Screen::QuitConfirm,
            KeyCode::Char('c') if ctrl => self.screen = Screen::QuitConfirm,
            KeyCode::PageUp => self.scroll_up(5),
            KeyCode::PageDown => self.scroll_down(5),
            KeyCode::End if ctrl => self.scroll_to_bottom(),
            _ => {
                let disabled = self.is_disabled();
                match self.input.handle_key(key, disabled) {
                    InputOutcome::Submitted(text) => return self.submit(text),
                    InputOutcome::Edited => {}
                    InputOutcome::Ignored if disabled => {
                        debug!("Input ignored while a response is pending")
                    }
                    InputOutcome::Ignored => {}
                }
            }
        }
        None
    }

    fn handle_quit_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.screen = Screen::Quit;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.screen = Screen::Chat;
            }
            _ => {}
        }
    }

    /// Sends `text` trimmed: user message plus placeholder. Blank text is dropped.
    pub fn submit(&mut self, text: String) -> Option<PendingResponse> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        match self.simulator.begin(&mut self.store, text.to_string()) {
            Ok(pending) => {
                info!("Accepted submission #{}", pending.ticket);
                self.scroll_to_bottom();
                Some(pending)
            }
            Err(e) => {
                debug!("Submission rejected: {}", e);
                None
            }
        }
    }

    /// Applies a delivered `ResponseReady`.
    pub fn complete_response(&mut self, pending: &PendingResponse) {
        match self.simulator.resolve(&mut self.store, pending) {
            Ok(true) => self.scroll_to_bottom(),
            Ok(false) => {}
            Err(e) => error!("Failed to resolve response #{}: {}", pending.ticket, e),
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        self.effects.on_tick(now);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = 0;
    }
}
