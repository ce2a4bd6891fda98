use serde::Deserialize;
use sqlguard_core::guard::KeywordGuard;
use std::path::{Path, PathBuf};
use crate::error::{ManifestError, Result};

pub const CONFIG_FILE: &str = "sqlguard.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub version: String,
    pub scripts: ScriptsConfig,
    #[serde(default)]
    pub guard: GuardConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct ScriptsConfig {
    pub path: PathBuf,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GuardConfig {
    /// Replaces the built-in keyword list when present.
    pub forbidden: Option<Vec<String>>,
    #[serde(default)]
    pub extra: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    pub path: PathBuf,
    #[serde(default)]
    pub pretty: bool,
}

fn default_extensions() -> Vec<String> {
    vec!["sql".to_string()]
}

impl GuardConfig {
    pub fn build(&self) -> KeywordGuard {
        let guard = match &self.forbidden {
            Some(keywords) => KeywordGuard::new(keywords),
            None => KeywordGuard::default(),
        };
        self.extra.iter().fold(guard, |guard, keyword| guard.with_keyword(keyword))
    }
}

impl ScriptsConfig {
    pub fn matches(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| self.extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
    }
}

impl Config {
    pub fn find_and_load(start_dir: &Path) -> Result<(Self, PathBuf)> {
        let mut current_dir = start_dir.to_path_buf();

        loop {
            let config_path = current_dir.join(CONFIG_FILE);
            if config_path.exists() {
                let config = Self::load(&config_path)?;
                return Ok((config, current_dir));
            }

            if !current_dir.pop() {
                return Err(ManifestError::ConfigNotFound(start_dir.to_path_buf()));
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::parse(&content, base)
    }

    /// Parses `content` and resolves relative paths against `base`.
    pub fn parse(content: &str, base: &Path) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.scripts.path = base.join(&config.scripts.path);
        config.output.path = base.join(&config.output.path);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.scripts.path.exists() {
            return Err(ManifestError::InvalidPath(self.scripts.path.clone()));
        }

        if self.scripts.extensions.is_empty() {
            return Err(ManifestError::InvalidConfig(
                "scripts.extensions must list at least one extension".to_string(),
            ));
        }

        if let Some(parent) = self.output.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ManifestError::InvalidPath(parent.to_path_buf()));
            }
        }

        Ok(())
    }
}
