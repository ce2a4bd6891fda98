use crate::config::{Config, ScriptsConfig};
use crate::error::Result;
use crate::generate;
use crate::scan::relative;
use console::style;
use notify::event::{CreateKind, ModifyKind};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tracing::{debug, info};

/// Decides which filesystem events should trigger a rescan.
struct ChangeFilter<'a> {
    root: PathBuf,
    output: PathBuf,
    scripts: &'a ScriptsConfig,
}

impl<'a> ChangeFilter<'a> {
    fn new(config: &'a Config) -> Self {
        Self {
            root: canonical(&config.scripts.path),
            output: canonical(&config.output.path),
            scripts: &config.scripts,
        }
    }

    /// The script an event touched, relative to the scripts directory.
    ///
    /// Only content writes and new files count. The manifest itself and files
    /// with other extensions are ignored so writing the output never loops.
    fn changed_script(&self, event: &Event) -> Option<PathBuf> {
        if !matches!(
            event.kind,
            EventKind::Modify(ModifyKind::Data(_)) | EventKind::Create(CreateKind::File)
        ) {
            return None;
        }

        event
            .paths
            .iter()
            .find(|path| **path != self.output && self.scripts.matches(path))
            .map(|path| relative(&self.root, path))
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Regenerates the manifest once, then again whenever a script changes.
///
/// A failing rescan is reported and the watcher keeps running; errors from
/// the watcher itself end the loop.
pub fn watch(config: &Config) -> Result<()> {
    println!("{}", style("SQLGuard").green().bold());
    generate(config)?;
    println!("  {} Manifest written to {}", style("➜").green(), config.output.path.display());

    let (tx, rx) = mpsc::channel();
    let mut watcher = RecommendedWatcher::new(tx, notify::Config::default())?;
    watcher.watch(&config.scripts.path, RecursiveMode::Recursive)?;
    info!(path = %config.scripts.path.display(), "watching scripts");

    let filter = ChangeFilter::new(config);
    for event in rx {
        let Some(changed) = filter.changed_script(&event?) else {
            continue;
        };
        println!("\n{} {}", style("[CHANGED]").yellow().bold(), style(changed.display()).cyan());

        match generate(config) {
            Ok(scanner) => {
                debug!(scripts = scanner.entries().len(), "manifest regenerated");
                println!("  {} {} scripts", style("✔").green(), scanner.entries().len());
            }
            Err(err) => println!("  {} {}", style("✖").red(), style(err.report()).red()),
        }
    }

    Ok(())
}
