//! Headless runtime: wires the controller, the rodio engine and a stdin
//! command reader into one `recv_timeout`-driven loop.

use std::env;
use std::io::BufRead;
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use log::{info, warn};

use crate::config::Settings;
use crate::controller::PlaybackController;
use crate::discovery::find_audio_files;
use crate::engine::{Engine, RodioEngine};

mod command;
mod event_loop;

pub fn run(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let (events_tx, events_rx) = mpsc::channel();
    let engine = RodioEngine::new(events_tx);
    let mut controller = PlaybackController::new(engine, events_rx, &settings);

    for arg in env::args().skip(1) {
        seed(&mut controller, &settings, Path::new(&arg));
    }

    let lines = spawn_stdin_reader();
    event_loop::run(&mut controller, &settings, lines)
}

/// Seed the playlist from a command-line argument: a directory is scanned
/// for audio files, anything else is added as a single track.
fn seed<E: Engine>(controller: &mut PlaybackController<E>, settings: &Settings, path: &Path) {
    if path.is_dir() {
        let found = find_audio_files(path, &settings.library);
        info!("found {} audio files under {}", found.len(), path.display());
        for p in found {
            if let Err(e) = controller.add_to_playlist(&p) {
                warn!("skipping {}: {}", p.display(), e);
            }
        }
    } else if let Err(e) = controller.add_to_playlist(path) {
        warn!("skipping {}: {}", path.display(), e);
    }
}

/// Read stdin line by line on its own thread; the receiver drains them in
/// the event loop. Dropping the sender when stdin closes ends the loop.
fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => {
                    if tx.send(l).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
    rx
}
