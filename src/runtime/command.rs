//! Text commands accepted on stdin, mirroring the media window's buttons.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play(PathBuf),
    Toggle,
    Next,
    Previous,
    /// Seek to a fraction of the track in `[0, 1]`.
    Seek(f64),
    Add(PathBuf),
    AddDir(PathBuf),
    Remove(PathBuf),
    Save(PathBuf),
    Load(PathBuf),
    ScrollUp,
    ScrollDown,
    Status,
    Quit,
}

impl Command {
    /// Parse one input line. Empty lines are `None`; anything unparseable is
    /// an error string for the caller to report.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((v, r)) => (v, r.trim()),
            None => (line, ""),
        };

        let needs_path = |cmd: fn(PathBuf) -> Command| {
            if rest.is_empty() {
                Err(format!("'{}' needs a path", verb))
            } else {
                Ok(Some(cmd(PathBuf::from(rest))))
            }
        };

        match verb {
            "play" => needs_path(Command::Play),
            "toggle" | "p" => Ok(Some(Command::Toggle)),
            "next" | "n" => Ok(Some(Command::Next)),
            "prev" | "previous" => Ok(Some(Command::Previous)),
            "seek" => {
                let frac: f64 = rest
                    .parse()
                    .map_err(|_| format!("bad seek fraction: {:?}", rest))?;
                Ok(Some(Command::Seek(frac)))
            }
            "add" => needs_path(Command::Add),
            "add-dir" => needs_path(Command::AddDir),
            "rm" | "remove" => needs_path(Command::Remove),
            "save" => needs_path(Command::Save),
            "load" => needs_path(Command::Load),
            "up" => Ok(Some(Command::ScrollUp)),
            "down" => Ok(Some(Command::ScrollDown)),
            "status" | "ls" => Ok(Some(Command::Status)),
            "quit" | "q" => Ok(Some(Command::Quit)),
            other => Err(format!("unknown command: {:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_verbs_with_and_without_arguments() {
        assert_eq!(
            Command::parse("play /music/a.mp3").unwrap(),
            Some(Command::Play(PathBuf::from("/music/a.mp3")))
        );
        assert_eq!(Command::parse("p").unwrap(), Some(Command::Toggle));
        assert_eq!(Command::parse("seek 0.5").unwrap(), Some(Command::Seek(0.5)));
        assert_eq!(Command::parse("  quit  ").unwrap(), Some(Command::Quit));
        assert_eq!(Command::parse("").unwrap(), None);
    }

    #[test]
    fn paths_keep_internal_whitespace() {
        assert_eq!(
            Command::parse("add /music/My Song.mp3").unwrap(),
            Some(Command::Add(PathBuf::from("/music/My Song.mp3")))
        );
    }

    #[test]
    fn rejects_missing_arguments_and_unknown_verbs() {
        assert!(Command::parse("play").is_err());
        assert!(Command::parse("seek half").is_err());
        assert!(Command::parse("frobnicate").is_err());
    }
}
