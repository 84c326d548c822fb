//! Read-only view of the controller for the presentation layer.

use std::path::PathBuf;

use super::machine::PlaybackState;

/// One row of the visible playlist slice.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistItemView {
    /// File name, as shown in the list.
    pub name: String,
    pub path: PathBuf,
    pub is_current: bool,
}

/// Everything a renderer needs for one frame, precomputed.
#[derive(Debug, Clone)]
pub struct ViewSnapshot {
    pub state: PlaybackState,
    pub playing: bool,

    /// Track title from metadata, falling back to the file stem.
    pub title: String,
    pub artist: String,
    /// Source label: the file name of the current path.
    pub source: String,

    pub elapsed_text: String,
    pub total_text: String,
    /// Normalized progress in `[0, 1]`; 0 while the duration is unknown.
    pub progress: f64,

    pub has_previous: bool,
    pub has_next: bool,
    pub can_scroll_up: bool,
    pub can_scroll_down: bool,

    /// The scroll window's slice of the playlist.
    pub items: Vec<PlaylistItemView>,
}
