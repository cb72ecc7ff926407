use crate::simulator::PendingResponse;
use crossterm::event::{self, Event as CEvent};
use log::{debug, warn};
use std::time::Duration;
use tokio::sync::mpsc;

pub const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Everything the UI loop reacts to, besides its own tick interval.
#[derive(Debug)]
pub enum AppEvent {
    Input(CEvent),
    ResponseReady(PendingResponse),
}

/// Forwards terminal events into `tx` from a blocking thread until the
/// receiver goes away.
pub fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) -> tokio::task::JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        let timeout = Duration::from_millis(100);
        loop {
            if tx.is_closed() {
                debug!("Input reader stopping: channel closed");
                return;
            }
            match event::poll(timeout) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.blocking_send(AppEvent::Input(ev)).is_err() {
                            return;
                        }
                    }
                    Err(e) => warn!("Failed to read terminal event: {}", e),
                },
                Ok(false) => {}
                Err(e) => {
                    warn!("Terminal event poll failed, stopping reader: {}", e);
                    return;
                }
            }
        }
    })
}
