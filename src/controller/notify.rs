//! Outbound notifications for the (excluded) presentation layer.
//!
//! Decoupled observer wiring: subscribers get their own channel and dead
//! receivers are silently dropped on the next emit.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::engine::SongMetadata;

use super::machine::PlaybackState;

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    /// A new track was selected and the engine was asked to start it.
    TrackLoaded(PathBuf),
    StateChanged(PlaybackState),
    /// Duration became known (or was revised), in seconds.
    DurationChanged(f64),
    /// Tag data forwarded straight from the engine.
    Metadata(SongMetadata),
    /// The auto-close timer fired: the session should be hidden/torn down.
    Closed,
}

#[derive(Default)]
pub struct NotifyBus {
    subscribers: Vec<Sender<Notification>>,
}

impl NotifyBus {
    pub fn subscribe(&mut self) -> Receiver<Notification> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn emit(&mut self, notification: Notification) {
        self.subscribers
            .retain(|s| s.send(notification.clone()).is_ok());
    }
}
