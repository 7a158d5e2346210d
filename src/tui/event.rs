//! Event handling for the TUI
//!
//! A background thread polls crossterm and forwards key presses, resizes
//! and periodic ticks over a channel.

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Terminal events
#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Periodic tick, used to expire status messages
    Tick,
}

/// Event handler for terminal events
pub struct EventHandler {
    receiver: mpsc::Receiver<Event>,
}

impl EventHandler {
    /// Start the polling thread with the given tick rate
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                match event::poll(timeout) {
                    Ok(true) => {
                        let forwarded = match event::read() {
                            Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                                sender.send(Event::Key(key))
                            }
                            Ok(CrosstermEvent::Resize(width, height)) => {
                                sender.send(Event::Resize(width, height))
                            }
                            Ok(_) => Ok(()),
                            Err(e) => {
                                log::error!("Failed to read terminal event: {}", e);
                                return;
                            }
                        };
                        if forwarded.is_err() {
                            return;
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        log::error!("Failed to poll terminal events: {}", e);
                        return;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { receiver }
    }

    /// Get the next event (blocking)
    pub fn next(&self) -> Result<Event, mpsc::RecvError> {
        self.receiver.recv()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new(Duration::from_millis(250))
    }
}
