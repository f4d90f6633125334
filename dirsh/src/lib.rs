//! dirsh - Interactive shell for everyday directory and file chores
//!
//! This crate provides:
//! - A fixed set of builtins (`pwd`, `cd`, `ls`, `mkdir`, `rmdir`, `touch`,
//!   `mv`, `rm`, `cat`, `help`, `exit`)
//! - Output redirection with `>` and `>>`, and text pipelines with `|`
//! - A pluggable [`FileSystem`] so sessions can run against any backend

pub mod ast;
pub mod error;
pub mod eval;
pub mod fs;
pub mod help;
pub mod lexer;
pub mod parser;
pub mod shell;

pub use error::{ShellError, ShellResult, ERROR_MARKER};
pub use eval::registry::OutputShape;
pub use eval::CommandResult;
pub use fs::{FileSystem, LocalFs, WriteMode};
pub use parser::parse;
pub use shell::{Session, Shell, FAREWELL};
