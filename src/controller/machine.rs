use std::path::Path;
use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::Settings;
use crate::engine::{Engine, EngineEvent};
use crate::error::{Error, Result};
use crate::playlist::Playlist;
use crate::scroll::ScrollWindow;
use crate::session::PlaybackSession;
use crate::timefmt::format_time;

use super::notify::{Notification, NotifyBus};
use super::snapshot::{PlaylistItemView, ViewSnapshot};

/// The controller's position in the playback lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    /// No track loaded, no engine instance.
    Idle,
    /// Engine instance requested, duration not yet known.
    Starting,
    Playing,
    Paused,
    /// The engine signaled end-of-file; the auto-close timer may be armed.
    Ended,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Idle
    }
}

/// The playback state machine.
///
/// Owns the playlist, the session and the scroll window for its lifetime;
/// issues fire-and-forget commands to the engine and consumes the engine's
/// events from the channel handed over at construction.
pub struct PlaybackController<E: Engine> {
    engine: E,
    events: Receiver<EngineEvent>,

    playlist: Playlist,
    session: PlaybackSession,
    scroll: ScrollWindow,

    state: PlaybackState,
    /// When the current `Starting` phase began, for the start timeout.
    starting_since: Option<Instant>,
    /// Auto-close deadline; `None` means disarmed.
    auto_close_at: Option<Instant>,
    /// Bumped on every arm/disarm so a stale fire can be told apart.
    close_generation: u64,

    /// Display-facing tag cache; forwarded from the engine, never persisted.
    display_title: Option<String>,
    display_artist: Option<String>,

    auto_close_secs: f64,
    start_timeout_secs: f64,

    notify: NotifyBus,
}

impl<E: Engine> PlaybackController<E> {
    pub fn new(engine: E, events: Receiver<EngineEvent>, settings: &Settings) -> Self {
        Self {
            engine,
            events,
            playlist: Playlist::new(),
            session: PlaybackSession::new(),
            scroll: ScrollWindow::new(settings.view.visible_items),
            state: PlaybackState::Idle,
            starting_since: None,
            auto_close_at: None,
            close_generation: 0,
            display_title: None,
            display_artist: None,
            auto_close_secs: settings.playback.auto_close_secs,
            start_timeout_secs: settings.playback.start_timeout_secs,
            notify: NotifyBus::default(),
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    /// Register an observer; notifications arrive on the returned channel.
    pub fn subscribe(&mut self) -> Receiver<Notification> {
        self.notify.subscribe()
    }

    // ---- user/UI intents -------------------------------------------------

    /// Load `path` into the session and ask the engine for a fresh instance.
    ///
    /// A missing path is rejected with no state change at all.
    pub fn select_and_play(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        self.disarm_auto_close();
        self.session.reset(path);
        // Out-of-band picks (not in the playlist) clear the index rather
        // than leaving it stale.
        self.session.current_index = self.playlist.index_of(path);
        self.session.playing = true;
        self.display_title = None;
        self.display_artist = None;

        self.starting_since = Some(Instant::now());
        self.engine.start_instance(path);
        self.set_state(PlaybackState::Starting);
        self.notify.emit(Notification::TrackLoaded(path.to_path_buf()));
        info!("starting {}", path.display());
        Ok(())
    }

    /// Flip play/pause on a live instance; with no instance, lazy-start the
    /// last selected path instead.
    pub fn toggle_play_pause(&mut self) {
        match self.state {
            PlaybackState::Playing => {
                self.session.playing = false;
                self.engine.pause();
                self.set_state(PlaybackState::Paused);
            }
            PlaybackState::Paused => {
                self.session.playing = true;
                self.engine.play();
                self.set_state(PlaybackState::Playing);
            }
            PlaybackState::Starting => {
                // Start command already in flight; leave it alone.
                debug!("toggle ignored while starting");
            }
            PlaybackState::Idle | PlaybackState::Ended => {
                let Some(path) = self.session.current_path.clone() else {
                    warn!("nothing selected to play");
                    return;
                };
                if let Err(e) = self.select_and_play(&path) {
                    warn!("cannot start {}: {}", path.display(), e);
                }
            }
        }
    }

    /// Jump to `fraction` of the track. No-op while the duration is unknown.
    pub fn seek_to(&mut self, fraction: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&fraction) {
            return Err(Error::InvalidRange(fraction));
        }
        let mut duration = self.session.duration;
        if duration <= 0.0 {
            // The session can lag the engine's own probe by one event.
            duration = self.engine.duration();
        }
        if duration <= 0.0 {
            warn!("seek ignored: duration not known yet");
            return Ok(());
        }
        let target = fraction * duration;
        self.session.duration = duration;
        self.session.elapsed = target;
        self.engine.skip_to(target);
        Ok(())
    }

    pub fn next(&mut self) {
        self.step(1);
    }

    pub fn previous(&mut self) {
        self.step(-1);
    }

    /// Move the playlist index by `delta`, clamped to `[0, len-1]`.
    /// If the clamp lands on the already-current index this is a no-op.
    fn step(&mut self, delta: i64) {
        if self.playlist.is_empty() {
            return;
        }
        let len = self.playlist.len() as i64;
        let target = match self.session.current_index {
            Some(i) => (i as i64 + delta).clamp(0, len - 1) as usize,
            // Single-file mode: navigation re-enters the playlist at the top.
            None => 0,
        };
        if self.session.current_index == Some(target) {
            return;
        }
        if let Some(path) = self.playlist.get(target).cloned() {
            if let Err(e) = self.select_and_play(&path) {
                warn!("skipping unplayable entry {}: {}", path.display(), e);
            }
        }
    }

    // ---- playlist operations --------------------------------------------

    pub fn add_to_playlist(&mut self, path: &Path) -> Result<()> {
        self.playlist.add(path)?;
        self.sync_playlist_view();
        Ok(())
    }

    /// Remove `path` from the playlist. Removing the playing entry leaves
    /// playback running in single-file mode.
    pub fn remove_from_playlist(&mut self, path: &Path) {
        self.playlist.remove(path);
        self.sync_playlist_view();
    }

    pub fn save_playlist(&self, destination: &Path) -> Result<()> {
        self.playlist.save(destination)
    }

    /// Replace the playlist wholesale from a text file.
    pub fn load_playlist(&mut self, source: &Path) -> Result<()> {
        self.playlist.load(source)?;
        self.scroll = ScrollWindow::new(self.scroll.window_size());
        self.sync_playlist_view();
        Ok(())
    }

    pub fn scroll_up(&mut self) {
        self.scroll.scroll_up();
    }

    pub fn scroll_down(&mut self) {
        self.scroll.scroll_down(self.playlist.len());
    }

    /// Re-derive everything that depends on playlist shape: the scroll
    /// offset and the current index (by path, so reorderings and removals
    /// cannot leave it pointing at the wrong entry).
    fn sync_playlist_view(&mut self) {
        self.scroll.clamp(self.playlist.len());
        self.session.current_index = self
            .session
            .current_path
            .as_deref()
            .and_then(|p| self.playlist.index_of(p));
    }

    // ---- engine events and time -----------------------------------------

    /// Drain all pending engine events, applying them in emission order.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_event(event);
        }
    }

    pub fn handle_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::DurationChanged(d) => {
                self.session.duration = d.max(0.0);
                if self.state == PlaybackState::Starting {
                    // First word back from the engine confirms the start.
                    self.starting_since = None;
                    self.set_state(PlaybackState::Playing);
                }
                self.notify.emit(Notification::DurationChanged(d));
            }
            EngineEvent::MetadataChanged(meta) => {
                self.display_title = Some(meta.title.clone());
                self.display_artist = meta.artist.clone();
                debug!("metadata: {} / {:?} / {:?}", meta.title, meta.album, meta.year);
                self.notify.emit(Notification::Metadata(meta));
            }
            EngineEvent::EndOfFile => {
                self.session.playing = false;
                self.arm_auto_close();
                self.set_state(PlaybackState::Ended);
            }
            EngineEvent::StartFailed(msg) => {
                warn!("engine start failed: {}", msg);
                self.fail_to_idle();
            }
        }
    }

    /// Periodic tick: advances elapsed time, enforces the start timeout and
    /// fires the auto-close timer. `now` comes from the caller so the two
    /// deadlines stay on one clock.
    pub fn tick(&mut self, delta: Duration, now: Instant) {
        self.session.tick(delta);

        if self.state == PlaybackState::Starting {
            if let Some(since) = self.starting_since {
                if now.duration_since(since).as_secs_f64() >= self.start_timeout_secs {
                    warn!("engine start timed out; returning to idle");
                    self.fail_to_idle();
                }
            }
        }

        if self.state == PlaybackState::Ended {
            if let Some(deadline) = self.auto_close_at {
                if now >= deadline {
                    debug!("auto-close generation {} fired", self.close_generation);
                    self.auto_close_at = None;
                    self.engine.stop();
                    self.session.playing = false;
                    self.set_state(PlaybackState::Idle);
                    self.notify.emit(Notification::Closed);
                }
            }
        }
    }

    fn arm_auto_close(&mut self) {
        self.close_generation = self.close_generation.wrapping_add(1);
        self.auto_close_at = Some(Instant::now() + Duration::from_secs_f64(self.auto_close_secs));
    }

    /// Any later arm supersedes a pending deadline; bumping the generation
    /// marks an already-captured one as stale.
    fn disarm_auto_close(&mut self) {
        self.close_generation = self.close_generation.wrapping_add(1);
        self.auto_close_at = None;
    }

    /// Recoverable engine failure: tear the instance down and go idle.
    fn fail_to_idle(&mut self) {
        self.engine.stop();
        self.session.playing = false;
        self.starting_since = None;
        self.set_state(PlaybackState::Idle);
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state != state {
            debug!("state {:?} -> {:?}", self.state, state);
            self.state = state;
            self.notify.emit(Notification::StateChanged(state));
        }
    }

    // ---- presentation ----------------------------------------------------

    /// Snapshot everything the presentation layer renders from.
    pub fn snapshot(&self) -> ViewSnapshot {
        let entries = self.playlist.entries();
        let offset = self.scroll.offset();
        let items = self
            .scroll
            .visible(entries)
            .iter()
            .enumerate()
            .map(|(i, p)| PlaylistItemView {
                name: file_name(p),
                path: p.clone(),
                is_current: self.session.current_index == Some(offset + i),
            })
            .collect();

        let len = self.playlist.len();
        let title = self
            .display_title
            .clone()
            .or_else(|| {
                self.session
                    .current_path
                    .as_deref()
                    .and_then(|p| p.file_stem())
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        ViewSnapshot {
            state: self.state,
            playing: self.session.playing,
            title,
            artist: self.display_artist.clone().unwrap_or_default(),
            source: self
                .session
                .current_path
                .as_deref()
                .map(|p| file_name(p))
                .unwrap_or_default(),
            elapsed_text: format_time(self.session.elapsed),
            total_text: format_time(self.session.duration),
            progress: self.session.progress(),
            has_previous: match self.session.current_index {
                Some(i) => i > 0,
                None => len > 0,
            },
            has_next: match self.session.current_index {
                Some(i) => i + 1 < len,
                None => len > 0,
            },
            can_scroll_up: self.scroll.can_scroll_up(),
            can_scroll_down: self.scroll.can_scroll_down(len),
            items,
        }
    }

    /// Stop the engine instance without waiting for the auto-close timer.
    pub fn shutdown(&mut self) {
        self.engine.stop();
        self.session.playing = false;
        self.set_state(PlaybackState::Idle);
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string()
}
