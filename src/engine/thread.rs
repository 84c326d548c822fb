//! The rodio engine thread: one decode/output instance at a time, driven by
//! commands and reporting back through `EngineEvent`s.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use log::{debug, warn};
use rodio::{OutputStreamBuilder, Sink};

use super::sink::create_sink_at;
use super::types::{DurationHandle, EngineCmd, EngineEvent, SongMetadata};

/// How often the thread wakes up to poll for end-of-file.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

pub(super) fn spawn_engine_thread(
    rx: Receiver<EngineCmd>,
    events: Sender<EngineEvent>,
    duration: DurationHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = OutputStreamBuilder::open_default_stream().expect("ERR: No audio output device");
        // rodio logs to stderr when OutputStream is dropped; noisy for us.
        let mut stream = stream;
        stream.log_on_drop(false);

        let mut sink: Option<Sink> = None;
        let mut current: Option<PathBuf> = None;
        let mut paused = true;

        fn set_duration(handle: &DurationHandle, secs: f64) {
            if let Ok(mut d) = handle.lock() {
                *d = secs;
            }
        }

        loop {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(cmd) => match cmd {
                    EngineCmd::Start(path) => {
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }

                        match create_sink_at(&stream, &path, Duration::ZERO) {
                            Ok(new_sink) => {
                                new_sink.play();
                                sink = Some(new_sink);
                                paused = false;

                                let (dur, meta) = probe(&path);
                                set_duration(&duration, dur);
                                let _ = events.send(EngineEvent::DurationChanged(dur));
                                let _ = events.send(EngineEvent::MetadataChanged(meta));

                                current = Some(path);
                            }
                            Err(msg) => {
                                warn!("engine start failed: {}", msg);
                                sink = None;
                                current = None;
                                paused = true;
                                set_duration(&duration, 0.0);
                                let _ = events.send(EngineEvent::StartFailed(msg));
                            }
                        }
                    }

                    EngineCmd::Play => {
                        if let Some(ref s) = sink {
                            s.play();
                            paused = false;
                        }
                    }

                    EngineCmd::Pause => {
                        if let Some(ref s) = sink {
                            s.pause();
                            paused = true;
                        }
                    }

                    EngineCmd::SkipTo(seconds) => {
                        // Scrubbing: rebuild the sink and skip into the file.
                        let Some(path) = current.clone() else {
                            continue;
                        };
                        if sink.is_none() {
                            continue;
                        }

                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }

                        let at = Duration::from_secs_f64(seconds.max(0.0));
                        match create_sink_at(&stream, &path, at) {
                            Ok(new_sink) => {
                                if !paused {
                                    new_sink.play();
                                }
                                sink = Some(new_sink);
                            }
                            Err(msg) => {
                                // The file may have vanished mid-session.
                                warn!("engine seek failed: {}", msg);
                                sink = None;
                                current = None;
                                paused = true;
                                let _ = events.send(EngineEvent::StartFailed(msg));
                            }
                        }
                    }

                    EngineCmd::Stop => {
                        if let Some(s) = sink.as_ref() {
                            s.stop();
                        }
                        sink = None;
                        current = None;
                        paused = true;
                        set_duration(&duration, 0.0);
                    }

                    EngineCmd::Quit => {
                        if let Some(ref s) = sink {
                            s.stop();
                        }
                        break;
                    }
                },
                Err(RecvTimeoutError::Timeout) => {
                    // Periodic end-of-file check: a drained sink means the
                    // instance finished on its own.
                    let finished = sink
                        .as_ref()
                        .map(|s| !paused && s.empty())
                        .unwrap_or(false);
                    if finished {
                        debug!("engine reached end of file");
                        sink = None;
                        paused = true;
                        let _ = events.send(EngineEvent::EndOfFile);
                    }
                }
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Read duration and tags from the file. Tag extraction lives on the engine
/// side on purpose; the controller never parses audio formats itself.
fn probe(path: &Path) -> (f64, SongMetadata) {
    let stem_title = || {
        path.file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string()
    };

    let mut meta = SongMetadata {
        title: stem_title(),
        ..SongMetadata::default()
    };
    let mut dur = 0.0;

    if let Ok(tagged) = lofty::read_from_path(path) {
        dur = tagged.properties().duration().as_secs_f64();

        if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
            if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                if !v.trim().is_empty() {
                    meta.title = v.to_string();
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::TrackArtist) {
                let v = v.trim();
                if !v.is_empty() {
                    meta.artist = Some(v.to_string());
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::AlbumTitle) {
                let v = v.trim();
                if !v.is_empty() {
                    meta.album = Some(v.to_string());
                }
            }
            if let Some(v) = tag.get_string(&ItemKey::Year) {
                let v = v.trim();
                if !v.is_empty() {
                    meta.year = Some(v.to_string());
                }
            }
        }
    }

    (dur, meta)
}
