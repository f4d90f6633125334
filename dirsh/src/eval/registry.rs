//! Command registry: the fixed set of builtins and what each one expects.

use crate::error::{ShellError, ShellResult};
use crate::help::CommandHelp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    Help,
    Pwd,
    Cd,
    Ls,
    Mkdir,
    Rmdir,
    Touch,
    Mv,
    Rm,
    Cat,
    Exit,
}

/// Positional parameters a command takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Parameters are ignored
    None,
    /// Zero or more `-x` style flags
    Flags,
    /// One name, taken as the whole parameter string
    One { what: &'static str },
    /// Two whitespace-separated names
    Two { first: &'static str, second: &'static str },
}

/// Parameters after they were checked against an [`Arity`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Args<'a> {
    None,
    Flags(Vec<&'a str>),
    One(&'a str),
    Two(&'a str, &'a str),
}

impl Arity {
    pub fn parse(self, params: &str) -> ShellResult<Args<'_>> {
        match self {
            Self::None => Ok(Args::None),
            Self::Flags => {
                let flags: Vec<&str> = params.split_whitespace().collect();
                if let Some(word) = flags.iter().find(|w| w.len() < 2 || !w.starts_with('-')) {
                    return Err(ShellError::Usage(format!("Unknown option: {word}")));
                }
                Ok(Args::Flags(flags))
            }
            Self::One { what } => {
                let name = params.trim();
                if name.is_empty() {
                    return Err(ShellError::Usage(format!("Please specify a {what} name.")));
                }
                Ok(Args::One(name))
            }
            Self::Two { first, second } => {
                let words: Vec<&str> = params.split_whitespace().collect();
                match words.as_slice() {
                    [a, b] => Ok(Args::Two(*a, *b)),
                    _ => Err(ShellError::Usage(format!(
                        "Please provide {first} and {second}."
                    ))),
                }
            }
        }
    }
}

/// Whether a command's text is data or a report of what it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputShape {
    /// Produces data worth piping (paths, listings, file contents)
    #[default]
    Text,
    /// Produces a one-line status report
    Status,
}

pub struct CommandSpec {
    pub builtin: Builtin,
    pub name: &'static str,
    pub arity: Arity,
    pub output: OutputShape,
    /// Whether non-empty piped text replaces the typed parameters
    pub takes_piped_input: bool,
    pub help: CommandHelp,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        builtin: Builtin::Help,
        name: "help",
        arity: Arity::None,
        output: OutputShape::Text,
        takes_piped_input: true,
        help: CommandHelp {
            usage: "help",
            summary: "show this help",
        },
    },
    CommandSpec {
        builtin: Builtin::Pwd,
        name: "pwd",
        arity: Arity::None,
        output: OutputShape::Text,
        takes_piped_input: true,
        help: CommandHelp {
            usage: "pwd",
            summary: "print working directory",
        },
    },
    CommandSpec {
        builtin: Builtin::Cd,
        name: "cd",
        arity: Arity::One { what: "directory" },
        output: OutputShape::Status,
        takes_piped_input: true,
        help: CommandHelp {
            usage: "cd <directory>",
            summary: "change directory",
        },
    },
    CommandSpec {
        builtin: Builtin::Ls,
        name: "ls",
        arity: Arity::Flags,
        output: OutputShape::Text,
        takes_piped_input: true,
        help: CommandHelp {
            usage: "ls [-a | -r]",
            summary: "list current directory child items",
        },
    },
    CommandSpec {
        builtin: Builtin::Mkdir,
        name: "mkdir",
        arity: Arity::One { what: "directory" },
        output: OutputShape::Status,
        takes_piped_input: true,
        help: CommandHelp {
            usage: "mkdir <directory>",
            summary: "make directory",
        },
    },
    CommandSpec {
        builtin: Builtin::Rmdir,
        name: "rmdir",
        arity: Arity::One { what: "directory" },
        output: OutputShape::Status,
        takes_piped_input: true,
        help: CommandHelp {
            usage: "rmdir <directory>",
            summary: "remove empty directory",
        },
    },
    CommandSpec {
        builtin: Builtin::Touch,
        name: "touch",
        arity: Arity::One { what: "file" },
        output: OutputShape::Status,
        takes_piped_input: true,
        help: CommandHelp {
            usage: "touch <file>",
            summary: "create new file",
        },
    },
    CommandSpec {
        builtin: Builtin::Mv,
        name: "mv",
        arity: Arity::Two {
            first: "source",
            second: "destination",
        },
        output: OutputShape::Status,
        takes_piped_input: true,
        help: CommandHelp {
            usage: "mv <source> <destination>",
            summary: "cut/rename a file",
        },
    },
    CommandSpec {
        builtin: Builtin::Rm,
        name: "rm",
        arity: Arity::One { what: "file" },
        output: OutputShape::Status,
        takes_piped_input: true,
        help: CommandHelp {
            usage: "rm <file>",
            summary: "remove a file",
        },
    },
    CommandSpec {
        builtin: Builtin::Cat,
        name: "cat",
        arity: Arity::One { what: "file" },
        output: OutputShape::Text,
        takes_piped_input: false,
        help: CommandHelp {
            usage: "cat <file>",
            summary: "output file's content",
        },
    },
    CommandSpec {
        builtin: Builtin::Exit,
        name: "exit",
        arity: Arity::None,
        output: OutputShape::Status,
        takes_piped_input: true,
        help: CommandHelp {
            usage: "exit",
            summary: "leave the shell",
        },
    },
];

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        COMMANDS.iter().find(|c| c.name == name).map(|c| c.builtin)
    }

    pub fn spec(self) -> &'static CommandSpec {
        COMMANDS
            .iter()
            .find(|c| c.builtin == self)
            .unwrap_or_else(|| unreachable!("every builtin has a registry entry"))
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Parameters the handler actually sees.
    pub fn effective_params<'a>(self, declared: &'a str, piped: &'a str) -> &'a str {
        if !piped.is_empty() && self.spec().takes_piped_input {
            piped
        } else {
            declared
        }
    }
}

/// Registered command names, in help order.
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}
