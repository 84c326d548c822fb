use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use std::sync::{Mutex, OnceLock};

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK.get_or_init(|| Mutex::new(())).lock().unwrap()
}

struct EnvGuard {
    key: &'static str,
    old: Option<std::ffi::OsString>,
}

impl EnvGuard {
    fn set(key: &'static str, val: &str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::set_var(key, val);
        }
        Self { key, old }
    }

    fn remove(key: &'static str) -> Self {
        let old = std::env::var_os(key);
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, old }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match self.old.take() {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn resolve_config_path_prefers_filedeck_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("FILEDECK_CONFIG_PATH", "/tmp/filedeck-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/filedeck-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("FILEDECK_CONFIG_PATH");
    let _g2 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    assert_eq!(
        default_config_path().unwrap(),
        std::path::PathBuf::from("/tmp/xdg-config-home/filedeck/config.toml")
    );
}

#[test]
fn defaults_match_documented_policies() {
    let s = Settings::default();
    assert_eq!(s.playback.auto_close_secs, 20.0);
    assert_eq!(s.playback.start_timeout_secs, 10.0);
    assert_eq!(s.playback.tick_ms, 200);
    assert_eq!(s.view.visible_items, 10);
    assert!(s.library.extensions.contains(&"mp3".to_string()));
    assert!(s.validate().is_ok());
}

#[test]
fn config_file_values_override_defaults() {
    let _lock = env_lock();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[playback]\nauto_close_secs = 5.0\n\n[view]\nvisible_items = 4\n",
    )
    .unwrap();

    let _g1 = EnvGuard::set("FILEDECK_CONFIG_PATH", path.to_str().unwrap());
    let s = Settings::load().unwrap();
    assert_eq!(s.playback.auto_close_secs, 5.0);
    assert_eq!(s.view.visible_items, 4);
    // Untouched sections keep their defaults.
    assert_eq!(s.playback.tick_ms, 200);
}

#[test]
fn env_vars_override_config_file() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("FILEDECK_CONFIG_PATH");
    let _g2 = EnvGuard::set("FILEDECK__PLAYBACK__AUTO_CLOSE_SECS", "7.5");
    let s = Settings::load().unwrap();
    assert_eq!(s.playback.auto_close_secs, 7.5);
}

#[test]
fn validate_rejects_degenerate_values() {
    let mut s = Settings::default();
    s.view.visible_items = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.tick_ms = 0;
    assert!(s.validate().is_err());

    let mut s = Settings::default();
    s.playback.start_timeout_secs = 0.0;
    assert!(s.validate().is_err());
}
