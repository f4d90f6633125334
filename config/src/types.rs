use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirshConfig {
    pub shell: ShellConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Prompt template; `{cwd}` expands to the session directory.
    pub prompt: String,
    pub banner: bool,
    pub history: HistoryConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "$> ".to_string(),
            banner: true,
            history: HistoryConfig::default(),
        }
    }
}

impl ShellConfig {
    pub fn render_prompt(&self, cwd: &str) -> String {
        self.prompt.replace("{cwd}", cwd)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub enabled: bool,
    pub file: String,
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file: "~/.dirsh_history".to_string(),
            max_entries: 1000,
        }
    }
}

impl HistoryConfig {
    /// History file with `~` expanded to the home directory.
    pub fn path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.file).into_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Warn,
            format: LogFormat::Pretty,
            filter: String::new(),
        }
    }
}

impl LoggingConfig {
    /// Directive handed to the subscriber's `EnvFilter`.
    pub fn directive(&self) -> String {
        if self.filter.is_empty() {
            self.level.as_str().to_string()
        } else {
            self.filter.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            other => Err(ConfigError::InvalidValue(format!("unknown log level '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Compact,
}
