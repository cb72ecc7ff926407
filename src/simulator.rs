//! Fake "AI" replies: canned templates delivered after a fixed delay.
//!
//! The simulator owns the idle/awaiting state that disables the prompt. The
//! delay itself runs in a tokio task (`schedule`) which posts
//! `AppEvent::ResponseReady` back to the UI loop, so every mutation of the
//! transcript happens on the loop.

use crate::errors::{NeuralError, NeuralResult};
use crate::event::AppEvent;
use crate::models::Message;
use crate::store::MessageStore;
use log::{debug, info, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub const QUERY_SLOT: &str = "{query}";

pub const RESPONSE_TEMPLATES: [&str; 3] = [
    "PROCESSING QUERY: \"{query}\"\n\n> NEURAL PATHWAYS ACTIVATED\n> ANALYZING INPUT PATTERNS...\n> GENERATING RESPONSE MATRIX...\n\nCOMPLETE. DEEPSEEK CORE STANDING BY FOR NEXT COMMAND.",
    "QUERY RECEIVED: {query}\n\n[SYSTEM] Initializing response protocol...\n[CORE] DeepSeek neural network engaged\n[OUTPUT] Ready for deployment\n\nAWAITING FURTHER INSTRUCTIONS...",
    ">>> PROCESSING REQUEST\n>>> ACCESSING KNOWLEDGE BASE\n>>> COMPILING RESPONSE\n\nINPUT: \"{query}\"\nSTATUS: ACKNOWLEDGED\nNEXT: AWAITING LLM INTEGRATION",
];

/// Chooses which template answers a query. Must return an index below `count`.
pub trait TemplatePicker: Send {
    fn pick(&mut self, count: usize) -> usize;
}

/// Uniform choice backed by `StdRng`; seed it for reproducible runs.
#[derive(Debug)]
pub struct RandomPicker {
    rng: StdRng,
}

impl RandomPicker {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os_rng(),
        }
    }
}

impl TemplatePicker for RandomPicker {
    fn pick(&mut self, count: usize) -> usize {
        self.rng.random_range(0..count)
    }
}

/// Substitutes `query` into the template verbatim.
pub fn render_template(template: &str, query: &str) -> String {
    template.replace(QUERY_SLOT, query)
}

/// Handle for one in-flight reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingResponse {
    pub ticket: u64,
    pub prompt: String,
    pub placeholder_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatorState {
    Idle,
    Awaiting(PendingResponse),
}

pub struct ResponseSimulator {
    delay: Duration,
    picker: Box<dyn TemplatePicker>,
    state: SimulatorState,
    next_ticket: u64,
}

impl ResponseSimulator {
    pub fn new(delay: Duration, picker: Box<dyn TemplatePicker>) -> Self {
        Self {
            delay,
            picker,
            state: SimulatorState::Idle,
            next_ticket: 1,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn state(&self) -> &SimulatorState {
        &self.state
    }

    /// True while a reply is pending; the prompt is disabled meanwhile.
    pub fn is_busy(&self) -> bool {
        matches!(self.state, SimulatorState::Awaiting(_))
    }

    /// Appends the user message and a placeholder, then waits for `resolve`.
    pub fn begin(&mut self, store: &mut MessageStore, text: String) -> NeuralResult<PendingResponse> {
        if self.is_busy() {
            return Err(NeuralError::Busy);
        }
        if store.has_placeholder() {
            return Err(NeuralError::store_error("store already holds a placeholder"));
        }

        store.push(Message::user(text.clone()))?;
        let placeholder_id = store.push_placeholder()?;

        let pending = PendingResponse {
            ticket: self.next_ticket,
            prompt: text,
            placeholder_id,
        };
        self.next_ticket += 1;
        self.state = SimulatorState::Awaiting(pending.clone());

        debug!(
            "Awaiting simulated response #{} ({} chars)",
            pending.ticket,
            pending.prompt.chars().count()
        );
        Ok(pending)
    }

    /// Picks a template for `prompt`. Returns the template index and the text.
    pub fn compose(&mut self, prompt: &str) -> (usize, String) {
        let idx = self.picker.pick(RESPONSE_TEMPLATES.len()) % RESPONSE_TEMPLATES.len();
        (idx, render_template(RESPONSE_TEMPLATES[idx], prompt))
    }

    /// Swaps the placeholder for the composed reply and goes back to idle.
    /// Returns `Ok(false)` for a stale or unknown ticket, leaving everything as is.
    /// If the placeholder is no longer last, it is dropped and the error returned.
    pub fn resolve(&mut self, store: &mut MessageStore, pending: &PendingResponse) -> NeuralResult<bool> {
        match &self.state {
            SimulatorState::Awaiting(current) if current == pending => {}
            _ => {
                warn!("Ignoring stale simulated response #{}", pending.ticket);
                return Ok(false);
            }
        }

        let (idx, content) = self.compose(&pending.prompt);
        let result = store.replace_placeholder(pending.placeholder_id, Message::assistant(content));
        self.state = SimulatorState::Idle;
        if let Err(e) = result {
            // Idle must never coexist with a loading message.
            store.discard_placeholder(pending.placeholder_id);
            return Err(e);
        }

        info!("Resolved response #{} with template {}", pending.ticket, idx);
        Ok(true)
    }
}

/// Waits `delay`, then posts `ResponseReady` for `pending`.
pub fn schedule(
    delay: Duration,
    pending: PendingResponse,
    tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let ticket = pending.ticket;
        if tx.send(AppEvent::ResponseReady(pending)).await.is_err() {
            debug!("UI loop gone before response #{} was delivered", ticket);
        }
    })
}
