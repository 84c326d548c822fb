//! Playback controller: the state machine coordinating the playlist, the
//! current session and the external engine.
//!
//! The controller owns all mutable state and runs on a single thread; engine
//! callbacks reach it only through the event channel drained by
//! `process_events`, never by direct mutation.

mod machine;
mod notify;
mod snapshot;

pub use machine::{PlaybackController, PlaybackState};
pub use notify::Notification;
pub use snapshot::{PlaylistItemView, ViewSnapshot};
