//! Ordered, persistable playlist of audio file paths.
//!
//! Entries are unique (exact string match) and keep insertion order, which
//! defines next/previous navigation order. Existence is checked once at
//! add-time only; a loaded playlist may contain stale paths that fail later
//! when actually selected for playback.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::{Error, Result};

#[derive(Debug, Default, Clone)]
pub struct Playlist {
    entries: Vec<PathBuf>,
}

impl Playlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Position of `path` in the playlist, if present.
    pub fn index_of(&self, path: &Path) -> Option<usize> {
        self.entries.iter().position(|p| p == path)
    }

    pub fn get(&self, index: usize) -> Option<&PathBuf> {
        self.entries.get(index)
    }

    /// Append `path` if it exists on disk and is not already present.
    ///
    /// Rejections are reported as errors so the caller can surface them,
    /// but the playlist itself is left untouched either way.
    pub fn add(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }
        if self.index_of(path).is_some() {
            warn!("already in playlist: {}", path.display());
            return Ok(());
        }
        self.entries.push(path.to_path_buf());
        Ok(())
    }

    /// Remove the first (by the uniqueness invariant, only) matching entry.
    /// No-op when absent.
    pub fn remove(&mut self, path: &Path) {
        if let Some(pos) = self.index_of(path) {
            self.entries.remove(pos);
        }
    }

    /// Write all entries to `destination`, one path per line, overwriting
    /// whatever was there.
    pub fn save(&self, destination: &Path) -> Result<()> {
        if destination.as_os_str().is_empty() {
            return Err(Error::EmptyInput);
        }
        let mut file = fs::File::create(destination)?;
        for entry in &self.entries {
            writeln!(file, "{}", entry.display())?;
        }
        Ok(())
    }

    /// Replace all entries wholesale with the lines of `source`.
    ///
    /// Lines are taken as-is with no per-line validation; missing files are
    /// tolerated until selected for playback. Blank lines are skipped so a
    /// trailing newline does not add a phantom entry.
    pub fn load(&mut self, source: &Path) -> Result<()> {
        if source.as_os_str().is_empty() {
            return Err(Error::EmptyInput);
        }
        if !source.exists() {
            return Err(Error::NotFound(source.to_path_buf()));
        }
        let text = fs::read_to_string(source)?;
        self.entries = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let p = dir.join(name);
        fs::write(&p, b"x").unwrap();
        p
    }

    #[test]
    fn add_dedupes_and_rejects_missing() {
        let dir = tempdir().unwrap();
        let a = touch(dir.path(), "a.mp3");
        let b = touch(dir.path(), "b.mp3");
        let missing = dir.path().join("gone.mp3");

        let mut pl = Playlist::new();
        pl.add(&a).unwrap();
        pl.add(&b).unwrap();
        pl.add(&a).unwrap(); // duplicate: accepted silently, not inserted
        assert!(matches!(pl.add(&missing), Err(Error::NotFound(_))));
        pl.add(&b).unwrap();

        assert_eq!(pl.len(), 2);
        assert_eq!(pl.index_of(&a), Some(0));
        assert_eq!(pl.index_of(&b), Some(1));
    }

    #[test]
    fn remove_is_idempotent() {
        let dir = tempdir().unwrap();
        let a = touch(dir.path(), "a.mp3");
        let b = touch(dir.path(), "b.mp3");

        let mut pl = Playlist::new();
        pl.add(&a).unwrap();
        pl.add(&b).unwrap();

        pl.remove(&a);
        assert_eq!(pl.entries(), &[b.clone()]);
        pl.remove(&a);
        assert_eq!(pl.entries(), &[b]);
    }

    #[test]
    fn save_then_load_round_trips_order() {
        let dir = tempdir().unwrap();
        let paths: Vec<PathBuf> = ["c.mp3", "a.mp3", "b.mp3"]
            .iter()
            .map(|n| touch(dir.path(), n))
            .collect();

        let mut pl = Playlist::new();
        for p in &paths {
            pl.add(p).unwrap();
        }

        let dest = dir.path().join("list.m3u");
        pl.save(&dest).unwrap();

        let mut loaded = Playlist::new();
        loaded.load(&dest).unwrap();
        assert_eq!(loaded.entries(), paths.as_slice());
    }

    #[test]
    fn load_replaces_wholesale_and_tolerates_stale_lines() {
        let dir = tempdir().unwrap();
        let a = touch(dir.path(), "a.mp3");

        let list = dir.path().join("list.txt");
        fs::write(&list, "/nowhere/x.mp3\n/nowhere/y.mp3\n").unwrap();

        let mut pl = Playlist::new();
        pl.add(&a).unwrap();
        pl.load(&list).unwrap();

        // Previous contents gone, unvalidated lines kept.
        assert_eq!(pl.len(), 2);
        assert_eq!(pl.get(0), Some(&PathBuf::from("/nowhere/x.mp3")));
    }

    #[test]
    fn load_missing_source_and_blank_paths_fail() {
        let mut pl = Playlist::new();
        assert!(matches!(
            pl.load(Path::new("/nowhere/missing.txt")),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(pl.load(Path::new("")), Err(Error::EmptyInput)));
        assert!(matches!(pl.save(Path::new("")), Err(Error::EmptyInput)));
    }
}
