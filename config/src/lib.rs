//! dirsh configuration
//!
//! Provides layered YAML configuration for the dirsh shell.
//!
//! # Configuration Loading Priority
//!
//! 1. Compiled-in defaults
//! 2. `/etc/dirsh/dirsh.yaml` (system-wide)
//! 3. `~/.config/dirsh/dirsh.yaml` (user)
//! 4. `./dirsh.yaml` (project-local)
//! 5. `--config` / `DIRSH_CONFIG=/path/to/config.yaml` (explicit, replaces 2-4)
//! 6. Environment variables (highest priority)
//!
//! # Example Configuration
//!
//! ```yaml
//! shell:
//!   prompt: "{cwd} $> "
//!   history:
//!     enabled: true
//!     file: "~/.dirsh_history"
//!
//! logging:
//!   level: debug
//! ```

#![allow(missing_docs)]

mod error;
mod loader;
mod types;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use types::*;

/// Load configuration from default locations.
///
/// Searches for config files in order and merges them.
/// Environment variables override file values.
pub fn load() -> Result<DirshConfig, ConfigError> {
    ConfigLoader::new().load()
}

/// Load configuration from a specific file.
pub fn load_from_file(path: &str) -> Result<DirshConfig, ConfigError> {
    ConfigLoader::new().with_file(path).load()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = DirshConfig::default();
        assert_eq!(config.shell.prompt, "$> ");
        assert!(config.shell.banner);
        assert!(!config.shell.history.enabled);
        assert_eq!(config.logging.level, LogLevel::Warn);
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = r#"
shell:
  banner: false
"#;
        let config: DirshConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(!config.shell.banner);
        assert_eq!(config.shell.prompt, "$> "); // default
    }

    #[test]
    fn parse_full_config() {
        let yaml = r#"
shell:
  prompt: "{cwd}> "
  banner: true
  history:
    enabled: true
    file: "/tmp/dirsh_history"
    max_entries: 50

logging:
  level: debug
  format: compact
  filter: "dirsh=trace"
"#;
        let config: DirshConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.shell.prompt, "{cwd}> ");
        assert!(config.shell.history.enabled);
        assert_eq!(config.shell.history.max_entries, 50);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.logging.filter, "dirsh=trace");
    }
}
