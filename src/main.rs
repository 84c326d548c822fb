//! filedeck: a headless playback/playlist controller.
//!
//! Tracks and playlists are given as command-line arguments; playback is
//! driven by text commands on stdin (`play`, `toggle`, `next`, `seek 0.5`,
//! `save list.m3u`, `status`, `quit`, ...).

mod config;
mod controller;
mod discovery;
mod engine;
mod error;
mod playlist;
mod runtime;
mod scroll;
mod session;
mod timefmt;

use config::Settings;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    colog::init();

    let settings = Settings::load()?;
    settings.validate()?;

    runtime::run(settings)
}
