use crate::config::Config;
use crate::error::{ManifestError, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use sqlguard_core::guard::KeywordGuard;
use sqlguard_core::splitter::{split, Statement};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Statements extracted from every script under the configured path.
#[derive(Debug, Clone, Serialize)]
pub struct Manifest {
    pub version: String,
    pub files: Vec<ScriptEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScriptEntry {
    /// Path relative to the scripts directory.
    pub path: PathBuf,
    pub statements: Vec<Statement>,
    /// Set when the script ended inside a quote, comment or dollar-quoted block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_context: Option<String>,
}

pub struct Scanner {
    guard: KeywordGuard,
    entries: Vec<ScriptEntry>,
}

impl Scanner {
    pub fn new(guard: KeywordGuard) -> Self {
        Self {
            guard,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[ScriptEntry] {
        &self.entries
    }

    /// Splits and guards every matching script, stopping at the first violation.
    pub fn scan(&mut self, config: &Config) -> Result<()> {
        let root = &config.scripts.path;
        let files = collect_scripts(config)?;

        let progress = ProgressBar::new(files.len() as u64);
        progress.set_style(
            ProgressStyle::with_template("  {spinner} [{bar:30}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=> "),
        );

        for file in &files {
            progress.set_message(relative(root, file).display().to_string());
            let scanned = self.scan_file(root, file);
            progress.inc(1);
            if let Err(err) = scanned {
                progress.abandon();
                return Err(err);
            }
        }

        progress.finish_and_clear();
        Ok(())
    }

    fn scan_file(&mut self, root: &Path, path: &Path) -> Result<()> {
        let content = fs::read_to_string(path)?;
        let split = split(&content);
        let relative_path = relative(root, path);

        let open_context = split.open_context().map(|context| {
            warn!(path = %relative_path.display(), %context, "script ends inside an open context");
            context.to_string()
        });

        self.guard
            .check(split.statements())
            .map_err(|source| ManifestError::Guard {
                path: relative_path.clone(),
                source,
            })?;

        debug!(path = %relative_path.display(), count = split.statements().len(), "script accepted");

        self.entries.push(ScriptEntry {
            path: relative_path,
            statements: split.into_statements(),
            open_context,
        });
        Ok(())
    }

    pub fn manifest(&self, version: &str) -> Manifest {
        Manifest {
            version: version.to_string(),
            files: self.entries.clone(),
        }
    }

    pub fn write(&self, config: &Config) -> Result<()> {
        let manifest = self.manifest(&config.version);
        let json = if config.output.pretty {
            serde_json::to_string_pretty(&manifest)?
        } else {
            serde_json::to_string(&manifest)?
        };

        fs::write(&config.output.path, json)?;
        Ok(())
    }

    /// Prints a one-line summary per script, flagging open contexts.
    pub fn print_report(&self) {
        for entry in &self.entries {
            match &entry.open_context {
                Some(context) => println!(
                    "  {} {} ({} statements, {})",
                    style("!").yellow().bold(),
                    entry.path.display(),
                    entry.statements.len(),
                    style(context).yellow()
                ),
                None => println!(
                    "  {} {} ({} statements)",
                    style("✔").green(),
                    entry.path.display(),
                    entry.statements.len()
                ),
            }
        }
    }
}

fn collect_scripts(config: &Config) -> Result<Vec<PathBuf>> {
    let root = &config.scripts.path;
    if root.is_file() {
        return Ok(vec![root.clone()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|_| ManifestError::InvalidPath(root.clone()))?;
        if entry.file_type().is_file() && config.scripts.matches(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub(crate) fn relative(root: &Path, path: &Path) -> PathBuf {
    if root == path {
        return path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf());
    }
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
