//! Syntax types for a single dirsh input line

use crate::fs::WriteMode;
use std::fmt;

/// One command name plus everything typed after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub params: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    /// `>`
    Overwrite,
    /// `>>`
    Append,
}

impl RedirectKind {
    pub const fn operator(self) -> &'static str {
        match self {
            Self::Overwrite => ">",
            Self::Append => ">>",
        }
    }

    pub const fn write_mode(self) -> WriteMode {
        match self {
            Self::Overwrite => WriteMode::Overwrite,
            Self::Append => WriteMode::Append,
        }
    }
}

/// How a line's output is consumed. Exactly one mode applies per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composition {
    /// `seg | seg | ...`, segments trimmed, empty ones kept
    Pipe(Vec<String>),
    /// `command > target` or `command >> target`
    Redirect {
        command: String,
        target: String,
        kind: RedirectKind,
    },
    Plain(String),
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Composition::Pipe(segments) => write!(f, "{}", segments.join(" | ")),
            Composition::Redirect {
                command,
                target,
                kind,
            } => write!(f, "{} {} {}", command, kind.operator(), target),
            Composition::Plain(line) => write!(f, "{}", line),
        }
    }
}
