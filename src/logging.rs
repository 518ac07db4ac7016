//! Log output selection.
//!
//! The binary picks a destination once at startup and installs the logger with
//! [`init`]. Nothing in the library installs or reconfigures logging.

use std::fs::OpenOptions;
use std::path::PathBuf;

use env_logger::{Builder, Env, Target};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogDestination {
    /// Appended to, created when missing.
    File(PathBuf),
    Stderr,
}

impl Default for LogDestination {
    fn default() -> LogDestination {
        LogDestination::Stderr
    }
}

/// Resolves `destination` to a writable target. A file that cannot be opened
/// degrades to stderr; the destination actually used is returned with the target.
pub fn open(destination: LogDestination) -> (LogDestination, Target) {
    match destination {
        LogDestination::File(path) => {
            match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => (LogDestination::File(path), Target::Pipe(Box::new(file))),
                Err(_) => (LogDestination::Stderr, Target::Stderr),
            }
        }
        LogDestination::Stderr => (LogDestination::Stderr, Target::Stderr),
    }
}

/// Installs env_logger (`RUST_LOG`, default `info`) writing to `destination`.
pub fn init(destination: LogDestination) -> LogDestination {
    let (effective, target) = open(destination);

    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.target(target);
    if let Err(e) = builder.try_init() {
        eprintln!("Logger already installed: {}", e);
    }

    effective
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;

    #[test]
    fn opens_file_in_append_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bloomsky.log");
        fs::write(&path, "first\n").unwrap();

        let (effective, target) = open(LogDestination::File(path.clone()));
        assert_eq!(effective, LogDestination::File(path.clone()));
        match target {
            Target::Pipe(mut pipe) => pipe.write_all(b"second\n").unwrap(),
            _ => panic!("expected a pipe target"),
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn unopenable_file_degrades_to_stderr() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("bloomsky.log");

        let (effective, target) = open(LogDestination::File(path));
        assert_eq!(effective, LogDestination::Stderr);
        assert!(matches!(target, Target::Stderr));
    }
}
