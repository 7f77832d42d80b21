//! Terminal event pump for hosts that run a channel-driven loop.
//!
//! A background task polls for terminal events and forwards them over a
//! channel, sending a tick whenever nothing arrives within the tick rate so
//! animations and scheme changes still advance.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};
use tokio::sync::mpsc;

/// Events delivered to the host loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Raw terminal input, ready for [`DevBar::handle_event`](crate::DevBar::handle_event).
    Input(Event),
    Tick,
}

/// Spawn a reader over the real terminal.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    spawn_reader_with(tick_rate, |timeout| {
        if event::poll(timeout)? {
            event::read().map(Some)
        } else {
            Ok(None)
        }
    })
}

/// Spawn a reader over any blocking event source.  `source` waits up to the
/// given timeout and returns `Ok(None)` when nothing arrived.  The task ends
/// when the receiver is dropped or the source fails.
pub fn spawn_reader_with<F>(tick_rate: Duration, mut source: F) -> mpsc::UnboundedReceiver<AppEvent>
where
    F: FnMut(Duration) -> io::Result<Option<Event>> + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();

    // Polling blocks, so keep it off the async workers.
    tokio::task::spawn_blocking(move || loop {
        let next = match source(tick_rate) {
            Ok(Some(ev @ (Event::Key(_) | Event::Mouse(_) | Event::Resize(..)))) => AppEvent::Input(ev),
            Ok(Some(_)) => continue,
            Ok(None) => AppEvent::Tick,
            Err(err) => {
                tracing::warn!(%err, "event source failed, stopping reader");
                break;
            }
        };
        if tx.send(next).is_err() {
            break; // receiver dropped
        }
    });

    rx
}
