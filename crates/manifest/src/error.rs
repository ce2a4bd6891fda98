use sqlguard_core::error::GuardError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Config file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {0}")]
    InvalidPath(PathBuf),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("{}: {source}", .path.display())]
    Guard {
        path: PathBuf,
        #[source]
        source: GuardError,
    },

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),
}

impl ManifestError {
    /// Detailed, multi-line description for terminal output.
    pub fn report(&self) -> String {
        match self {
            Self::Guard { path, source } => format!("{}\n{}", path.display(), source.report()),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ManifestError>;
