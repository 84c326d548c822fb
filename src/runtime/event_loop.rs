use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use log::{debug, info, warn};

use crate::config::Settings;
use crate::controller::{Notification, PlaybackController, ViewSnapshot};
use crate::engine::Engine;

use super::command::Command;

/// Main runtime loop: applies stdin commands, drains engine events into the
/// controller and keeps the periodic tick going. Returns when stdin closes
/// or a quit command arrives.
pub fn run<E: Engine>(
    controller: &mut PlaybackController<E>,
    settings: &Settings,
    lines: Receiver<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let notifications = controller.subscribe();
    let tick = Duration::from_millis(settings.playback.tick_ms);
    let mut last_tick = Instant::now();

    loop {
        let quit = match lines.recv_timeout(tick) {
            Ok(line) => handle_line(controller, settings, &line),
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => true,
        };

        // Engine callbacks are applied here, on the owning thread, in the
        // order the engine emitted them.
        controller.process_events();

        let now = Instant::now();
        controller.tick(now.duration_since(last_tick), now);
        last_tick = now;

        for n in notifications.try_iter() {
            match n {
                Notification::Closed => info!("session auto-closed"),
                Notification::StateChanged(s) => debug!("now {:?}", s),
                Notification::TrackLoaded(p) => info!("loaded {}", p.display()),
                Notification::DurationChanged(d) => debug!("duration {:.1}s", d),
                Notification::Metadata(m) => info!(
                    "{} - {}",
                    m.artist.as_deref().unwrap_or("?"),
                    m.title
                ),
            }
        }

        if quit {
            break;
        }
    }

    controller.shutdown();
    Ok(())
}

/// Parse and apply one input line; true means quit.
fn handle_line<E: Engine>(
    controller: &mut PlaybackController<E>,
    settings: &Settings,
    line: &str,
) -> bool {
    let cmd = match Command::parse(line) {
        Ok(Some(cmd)) => cmd,
        Ok(None) => return false,
        Err(msg) => {
            warn!("{}", msg);
            return false;
        }
    };

    let result = match cmd {
        Command::Play(p) => controller.select_and_play(&p),
        Command::Toggle => {
            controller.toggle_play_pause();
            Ok(())
        }
        Command::Next => {
            controller.next();
            Ok(())
        }
        Command::Previous => {
            controller.previous();
            Ok(())
        }
        Command::Seek(frac) => controller.seek_to(frac),
        Command::Add(p) => controller.add_to_playlist(&p),
        Command::AddDir(p) => {
            super::seed(controller, settings, &p);
            Ok(())
        }
        Command::Remove(p) => {
            controller.remove_from_playlist(&p);
            Ok(())
        }
        Command::Save(p) => controller.save_playlist(&p),
        Command::Load(p) => controller.load_playlist(&p),
        Command::ScrollUp => {
            controller.scroll_up();
            Ok(())
        }
        Command::ScrollDown => {
            controller.scroll_down();
            Ok(())
        }
        Command::Status => {
            print_status(&controller.snapshot());
            Ok(())
        }
        Command::Quit => return true,
    };

    if let Err(e) = result {
        warn!("{}", e);
    }
    false
}

fn print_status(snap: &ViewSnapshot) {
    println!(
        "[{:?}] {} {} ({} / {}, {:.0}%)",
        snap.state,
        if snap.playing { ">" } else { "|" },
        snap.title,
        snap.elapsed_text,
        snap.total_text,
        snap.progress * 100.0
    );
    if !snap.artist.is_empty() {
        println!("  by {}  [{}]", snap.artist, snap.source);
    }
    for item in &snap.items {
        println!(
            " {} {}",
            if item.is_current { "*" } else { " " },
            item.name
        );
    }
    let mut hints: Vec<&str> = Vec::new();
    if snap.can_scroll_up {
        hints.push("up");
    }
    if snap.can_scroll_down {
        hints.push("down");
    }
    if !hints.is_empty() {
        println!("  (scroll: {})", hints.join("/"));
    }
}
