//! External playback engine interface and the rodio-backed implementation.
//!
//! The controller only ever talks to an [`Engine`] through fire-and-forget
//! commands and receives its asynchronous callbacks as [`EngineEvent`]s over
//! a channel, so the real backend and the test mock are interchangeable.

mod player;
mod sink;
mod thread;
mod types;

pub use player::RodioEngine;
pub use types::{DurationHandle, Engine, EngineEvent, SongMetadata};
