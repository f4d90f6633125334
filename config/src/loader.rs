use crate::{ConfigError, DirshConfig, LogLevel};
use regex::Regex;
use std::path::{Path, PathBuf};

pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".config/dirsh/dirsh.yaml"));
        }
        search_paths.push(PathBuf::from("./dirsh.yaml"));

        #[cfg(unix)]
        search_paths.insert(0, PathBuf::from("/etc/dirsh/dirsh.yaml"));

        Self {
            explicit_file: None,
            search_paths,
        }
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.explicit_file = Some(PathBuf::from(path));
        self
    }

    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_paths = paths;
        self
    }

    pub fn load(&self) -> Result<DirshConfig, ConfigError> {
        let mut config = DirshConfig::default();

        if let Some(ref explicit) = self.explicit_file {
            config = self.read_file(explicit)?;
        } else if let Ok(env_path) = std::env::var("DIRSH_CONFIG") {
            config = self.read_file(Path::new(&env_path))?;
        } else {
            for path in &self.search_paths {
                if path.exists() {
                    tracing::debug!(path = %path.display(), "Merging config file");
                    let content =
                        std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
                            path: path.clone(),
                            source: e,
                        })?;
                    config = self.merge_yaml(&config, &content)?;
                }
            }
        }

        self.apply_env_overrides(&mut config)?;
        Ok(config)
    }

    fn read_file(&self, path: &Path) -> Result<DirshConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse_yaml(&content)
    }

    fn parse_yaml(&self, content: &str) -> Result<DirshConfig, ConfigError> {
        let expanded = self.expand_env_vars(content);
        if expanded.trim().is_empty() {
            return Ok(DirshConfig::default());
        }
        Ok(serde_yaml::from_str(&expanded)?)
    }

    fn merge_yaml(&self, base: &DirshConfig, content: &str) -> Result<DirshConfig, ConfigError> {
        let overlay = self.parse_yaml(content)?;
        Ok(Self::merge_configs(base, &overlay))
    }

    // A section replaces the base only when the overlay moved it off the defaults.
    fn merge_configs(base: &DirshConfig, overlay: &DirshConfig) -> DirshConfig {
        let defaults = DirshConfig::default();
        let mut result = base.clone();

        if overlay.shell.prompt != defaults.shell.prompt {
            result.shell.prompt = overlay.shell.prompt.clone();
        }
        if overlay.shell.banner != defaults.shell.banner {
            result.shell.banner = overlay.shell.banner;
        }
        if overlay.shell.history != defaults.shell.history {
            result.shell.history = overlay.shell.history.clone();
        }
        if overlay.logging != defaults.logging {
            result.logging = overlay.logging.clone();
        }

        result
    }

    fn expand_env_vars(&self, content: &str) -> String {
        let Ok(re) = Regex::new(r"\$\{([^}]+)\}") else {
            return content.to_string();
        };
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_default()
        })
        .to_string()
    }

    fn apply_env_overrides(&self, config: &mut DirshConfig) -> Result<(), ConfigError> {
        if let Ok(prompt) = std::env::var("DIRSH_PROMPT") {
            config.shell.prompt = prompt;
        }
        if let Ok(file) = std::env::var("DIRSH_HISTORY_FILE") {
            if !file.is_empty() {
                config.shell.history.enabled = true;
                config.shell.history.file = file;
            }
        }
        if let Ok(level) = std::env::var("DIRSH_LOG_LEVEL") {
            config.logging.level = env_log_level(&level)?;
        }
        Ok(())
    }
}

fn env_log_level(raw: &str) -> Result<LogLevel, ConfigError> {
    raw.parse::<LogLevel>().map_err(|e| match e {
        ConfigError::InvalidValue(msg) => ConfigError::InvalidValue(format!("DIRSH_LOG_LEVEL: {msg}")),
        other => other,
    })
}
