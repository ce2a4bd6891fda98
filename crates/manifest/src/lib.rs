mod config;
mod error;
mod scan;
mod watch;

pub use config::{Config, GuardConfig, OutputConfig, ScriptsConfig, CONFIG_FILE};
pub use error::{ManifestError, Result};
pub use scan::{Manifest, Scanner, ScriptEntry};
pub use watch::watch;

pub fn check(config: &Config) -> Result<Scanner> {
    let mut scanner = Scanner::new(config.guard.build());
    scanner.scan(config)?;
    Ok(scanner)
}

pub fn generate(config: &Config) -> Result<Scanner> {
    let scanner = check(config)?;
    scanner.write(config)?;
    Ok(scanner)
}
