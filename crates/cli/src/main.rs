use clap::{Parser, Subcommand};
use console::style;
use sqlguard_core::prelude::*;
use sqlguard_manifest::{self, Config, ManifestError, CONFIG_FILE};
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new sqlguard.toml config file
    Init,

    /// Split and guard every script without writing output
    Check,

    /// Write the statement manifest once and exit
    Run,

    /// Write the statement manifest and rewrite it on changes
    Watch,

    /// Split a single file (or stdin) and print its statements
    Split {
        /// SQL file to split; reads stdin when omitted
        file: Option<PathBuf>,

        /// Print statements as a JSON array
        #[arg(long)]
        json: bool,

        /// Skip the destructive keyword check
        #[arg(long)]
        no_guard: bool,

        /// Additional forbidden keyword (repeatable)
        #[arg(long = "forbid", value_name = "KEYWORD")]
        forbid: Vec<String>,

        /// Fail when the input ends inside a quote, comment or dollar-quoted block
        #[arg(long)]
        strict: bool,
    },
}

#[derive(Debug, Error)]
enum SplitError {
    #[error("Could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Input ends inside an open context: {0}")]
    OpenContext(String),

    #[error(transparent)]
    Guard(#[from] GuardError),
}

const EXAMPLE_CONFIG: &str = r#"version = "1.0"

[scripts]
path = "sql/"
extensions = ["sql"]

[guard]
# forbidden = ["DROP TABLE", "TRUNCATE"]
extra = []

[output]
path = "statements.json"
pretty = true
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            let config_path = env::current_dir()?.join(CONFIG_FILE);
            if config_path.exists() {
                println!("Config file already exists at {}", config_path.display());
                return Ok(());
            }

            fs::write(&config_path, EXAMPLE_CONFIG)?;
            println!("Created {}", CONFIG_FILE);
            Ok(())
        }
        Commands::Split { file, json, no_guard, forbid, strict } => {
            let guard = (!no_guard).then(|| {
                forbid
                    .iter()
                    .fold(KeywordGuard::default(), |guard, keyword| guard.with_keyword(keyword))
            });

            match split_input(file, guard.as_ref(), strict) {
                Ok(statements) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&statements)?);
                    } else {
                        let rendered: Vec<&str> = statements.iter().map(|s| s.as_str()).collect();
                        println!("{}", rendered.join("\n\n"));
                    }
                    Ok(())
                }
                Err(SplitError::Guard(err)) => {
                    eprintln!("{} {}", style("✖").red(), style(err.report()).red());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("{} {}", style("✖").red(), style(e).red());
                    std::process::exit(1);
                }
            }
        }
        cmd => {
            match Config::find_and_load(&env::current_dir()?) {
                Ok((config, config_dir)) => {
                    env::set_current_dir(&config_dir)?;
                    println!("Using configuration from: {}", config_dir.display());

                    let outcome = match cmd {
                        Commands::Check => {
                            println!("Checking scripts...");
                            sqlguard_manifest::check(&config).map(|scanner| {
                                scanner.print_report();
                                println!("All checks passed!");
                            })
                        }
                        Commands::Run => {
                            println!("Writing statement manifest...");
                            sqlguard_manifest::generate(&config).map(|scanner| {
                                scanner.print_report();
                                println!("Done! Wrote {}", config.output.path.display());
                            })
                        }
                        Commands::Watch => {
                            println!("Starting watch mode...");
                            sqlguard_manifest::watch(&config)
                        }
                        Commands::Init | Commands::Split { .. } => unreachable!(),
                    };

                    match outcome {
                        Ok(()) => Ok(()),
                        Err(e @ ManifestError::Guard { .. }) => {
                            eprintln!("{} {}", style("✖").red(), style(e.report()).red());
                            std::process::exit(1);
                        }
                        Err(e) => Err(e.into()),
                    }
                }
                Err(ManifestError::ConfigNotFound(_)) => {
                    eprintln!("Error: No {} found in current directory or parent directories", CONFIG_FILE);
                    eprintln!("Run 'sqlguard init' to create a new config file");
                    std::process::exit(1);
                }
                Err(e) => Err(e.into()),
            }
        }
    }
}

fn split_input(
    file: Option<PathBuf>,
    guard: Option<&KeywordGuard>,
    strict: bool,
) -> Result<Vec<Statement>, SplitError> {
    let sql = match file {
        Some(path) => fs::read_to_string(&path).map_err(|source| SplitError::Read {
            path: path.display().to_string(),
            source,
        })?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|source| SplitError::Read {
                    path: "stdin".to_string(),
                    source,
                })?;
            buffer
        }
    };

    let split = split(&sql);
    if let Some(context) = split.open_context() {
        if strict {
            return Err(SplitError::OpenContext(context.to_string()));
        }
        eprintln!("{} {}", style("warning:").yellow().bold(), context);
    }

    let statements = split.into_statements();
    match guard {
        Some(guard) => Ok(prepare(&statements, guard)?),
        None => Ok(statements),
    }
}
