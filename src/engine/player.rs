//! Handle to the rodio engine thread.

use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use log::warn;

use super::thread::spawn_engine_thread;
use super::types::{DurationHandle, Engine, EngineCmd, EngineEvent};

/// The real engine: owns the command channel to a dedicated decode/output
/// thread. Events come back on the `events` sender given at construction.
pub struct RodioEngine {
    tx: Sender<EngineCmd>,
    duration: DurationHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl RodioEngine {
    pub fn new(events: Sender<EngineEvent>) -> Self {
        let (tx, rx) = mpsc::channel::<EngineCmd>();
        let duration: DurationHandle = Arc::new(Mutex::new(0.0));

        let handle = spawn_engine_thread(rx, events, duration.clone());

        Self {
            tx,
            duration,
            join: Mutex::new(Some(handle)),
        }
    }

    fn send(&self, cmd: EngineCmd) {
        if self.tx.send(cmd).is_err() {
            warn!("engine thread is gone; command dropped");
        }
    }

}

impl Drop for RodioEngine {
    /// Ask the thread to exit and wait for it, so the output stream is torn
    /// down before the process ends.
    fn drop(&mut self) {
        let _ = self.tx.send(EngineCmd::Quit);
        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl Engine for RodioEngine {
    fn start_instance(&mut self, path: &Path) {
        self.send(EngineCmd::Start(path.to_path_buf()));
    }

    fn play(&mut self) {
        self.send(EngineCmd::Play);
    }

    fn pause(&mut self) {
        self.send(EngineCmd::Pause);
    }

    fn skip_to(&mut self, seconds: f64) {
        self.send(EngineCmd::SkipTo(seconds));
    }

    fn stop(&mut self) {
        self.send(EngineCmd::Stop);
    }

    fn duration(&self) -> f64 {
        self.duration.lock().map(|d| *d).unwrap_or(0.0)
    }
}
