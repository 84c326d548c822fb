//! Engine-facing small types: the command trait, callback events and handles.

use std::path::Path;
use std::sync::{Arc, Mutex};

/// Commands understood by an external playback engine.
///
/// All methods are fire-and-forget; results come back asynchronously as
/// [`EngineEvent`]s on the channel handed to the engine at construction.
pub trait Engine {
    /// Tear down any current instance and start decoding `path`.
    fn start_instance(&mut self, path: &Path);
    /// Resume the current instance.
    fn play(&mut self);
    /// Pause the current instance.
    fn pause(&mut self);
    /// Jump to an absolute position in seconds.
    fn skip_to(&mut self, seconds: f64);
    /// Tear down the current instance, if any.
    fn stop(&mut self);
    /// Last-known track duration in seconds; 0.0 when unknown.
    fn duration(&self) -> f64;
}

/// Asynchronous callbacks emitted by the engine, delivered on its own thread
/// and drained by the controller's owning thread.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// The engine determined (or revised) the track duration in seconds.
    DurationChanged(f64),
    /// Tag data became available for the current track.
    MetadataChanged(SongMetadata),
    /// The current track played to its end.
    EndOfFile,
    /// Starting an instance failed; the carried text is diagnostic only.
    StartFailed(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongMetadata {
    pub title: String,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<String>,
}

/// Last-known duration shared between the engine thread and its handle.
pub type DurationHandle = Arc<Mutex<f64>>;

/// Commands sent to the rodio engine thread.
#[derive(Debug)]
pub(super) enum EngineCmd {
    Start(std::path::PathBuf),
    Play,
    Pause,
    SkipTo(f64),
    Stop,
    Quit,
}
