//! Session state and the shell that owns it

use crate::fs::{FileSystem, LocalFs};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Printed when the `exit` command ends the session.
pub const FAREWELL: &str = "$[See you next time ;D]> Bye!";

/// Per-session state handed to every command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub cwd: PathBuf,
}

impl Session {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    /// Start in the process's working directory.
    pub fn from_current_dir() -> std::io::Result<Self> {
        std::env::current_dir().map(Self::new)
    }

    /// Resolve a user-supplied name against the working directory.
    /// Absolute names are taken as-is.
    pub fn resolve(&self, name: &str) -> PathBuf {
        self.cwd.join(name)
    }

    pub fn cwd_display(&self) -> String {
        self.cwd.display().to_string()
    }
}

pub struct Shell {
    pub session: Session,
    fs: Arc<dyn FileSystem>,
}

impl Shell {
    /// Shell over the local disk.
    pub fn new(session: Session) -> Self {
        Self::with_fs(session, Arc::new(LocalFs))
    }

    pub fn with_fs(session: Session, fs: Arc<dyn FileSystem>) -> Self {
        Self { session, fs }
    }

    pub fn cwd(&self) -> &Path {
        &self.session.cwd
    }

    pub fn fs(&self) -> Arc<dyn FileSystem> {
        Arc::clone(&self.fs)
    }
}
