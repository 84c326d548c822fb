//! Mutable record of the currently loaded track: path, position, status.
//!
//! Only the controller mutates a session. Elapsed time is advanced locally by
//! the tick and corrected externally by seeks; duration stays 0 until the
//! engine reports it.

use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Default, Clone)]
pub struct PlaybackSession {
    /// Position of `current_path` in the playlist; `None` when the track was
    /// selected out-of-band (single-file mode).
    pub current_index: Option<usize>,
    pub current_path: Option<PathBuf>,
    /// Elapsed playback time in seconds, locally ticked.
    pub elapsed: f64,
    /// Track duration in seconds; 0.0 until reported by the engine.
    pub duration: f64,
    pub playing: bool,
}

impl PlaybackSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance elapsed time by a wall-clock delta while playing.
    pub fn tick(&mut self, delta: Duration) {
        if self.playing {
            self.elapsed += delta.as_secs_f64();
        }
    }

    /// Load a new track: zero elapsed, clear duration, set the path.
    pub fn reset(&mut self, path: &Path) {
        self.current_path = Some(path.to_path_buf());
        self.elapsed = 0.0;
        self.duration = 0.0;
    }

    /// Normalized progress in `[0, 1]`; 0 while the duration is unknown.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_only_advances_while_playing() {
        let mut s = PlaybackSession::new();
        s.tick(Duration::from_secs(5));
        assert_eq!(s.elapsed, 0.0);

        s.playing = true;
        s.tick(Duration::from_millis(1500));
        assert!((s.elapsed - 1.5).abs() < 1e-9);
    }

    #[test]
    fn reset_zeroes_elapsed_and_duration() {
        let mut s = PlaybackSession::new();
        s.playing = true;
        s.elapsed = 42.0;
        s.duration = 180.0;

        s.reset(Path::new("/music/b.mp3"));
        assert_eq!(s.elapsed, 0.0);
        assert_eq!(s.duration, 0.0);
        assert_eq!(s.current_path.as_deref(), Some(Path::new("/music/b.mp3")));
    }

    #[test]
    fn progress_guards_unknown_duration() {
        let mut s = PlaybackSession::new();
        s.elapsed = 30.0;
        assert_eq!(s.progress(), 0.0);

        s.duration = 60.0;
        assert!((s.progress() - 0.5).abs() < 1e-9);

        // Elapsed may locally overshoot the reported duration.
        s.elapsed = 90.0;
        assert_eq!(s.progress(), 1.0);
    }
}
