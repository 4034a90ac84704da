//! Command-line interface for viewmux.
//!
//! The subcommands drive the identifier bridge over a YAML tree fixture and
//! print results as JSON on stdout.

use crate::fixture::TreeFixture;
use crate::session::EmbeddingSession;
use crate::walker::TreeWalker;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use viewmux_a11y::HostNodeId;
use viewmux_config::{Config, LogLevel};

/// viewmux - input and accessibility bridge for embedded views
#[derive(Parser)]
#[command(name = "viewmux")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (off, error, warn, info, debug, trace); overrides RUST_LOG and the config
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Describe every node of a fixture tree as the host would see it
    Walk {
        /// YAML tree fixture
        fixture: PathBuf,

        /// Do not describe nodes deeper than this
        #[arg(long, value_name = "N")]
        max_depth: Option<usize>,

        /// Host id of the synthetic root (must be below the root id threshold)
        #[arg(long, value_name = "ID", default_value_t = 0)]
        root_id: u32,
    },
    /// Walk a fixture tree, then translate its recorded events
    Events {
        /// YAML tree fixture
        fixture: PathBuf,
    },
    /// Print the default config file path
    ConfigPath,
}

/// Result of CLI processing
pub enum CliResult {
    /// Subcommand completed
    Done,
    /// Exit with the given code
    Exit(i32),
}

/// Run the parsed command.
pub fn run(cli: Cli) -> Result<CliResult> {
    match cli.command {
        Commands::ConfigPath => {
            println!("{}", Config::config_path().display());
            Ok(CliResult::Done)
        }
        Commands::Walk {
            fixture,
            max_depth,
            root_id,
        } => {
            let config = load_config(cli.config.as_deref())?;
            walk(config, &fixture, max_depth, HostNodeId(root_id))
        }
        Commands::Events { fixture } => {
            let config = load_config(cli.config.as_deref())?;
            events(config, &fixture)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    crate::debug::apply_config_level(config.log_level);
    Ok(config)
}

fn open_session(config: Config, fixture: &Path) -> Result<EmbeddingSession<Arc<TreeFixture>>> {
    let fixture = Arc::new(TreeFixture::load(fixture)?);
    let enrich = config.bridge.traversal_order || config.bridge.label_relations;
    if enrich {
        EmbeddingSession::with_probe(config, Arc::clone(&fixture), fixture)
    } else {
        EmbeddingSession::new(config, fixture)
    }
}

fn walk(
    config: Config,
    fixture: &Path,
    max_depth: Option<usize>,
    root: HostNodeId,
) -> Result<CliResult> {
    let threshold = config.bridge.root_id_threshold;
    if root.0 >= threshold {
        anyhow::bail!(
            "--root-id {} is not below the root id threshold {}",
            root.0,
            threshold
        );
    }

    let session = open_session(config, fixture)?;
    let walker = TreeWalker::new().with_max_depth(max_depth);
    let nodes = session
        .walk(&walker, root)
        .context("Failed to walk fixture tree")?;

    println!("{}", serde_json::to_string_pretty(&nodes)?);
    if let Some(err) = session.bridge().lock().relationship_probe_error() {
        eprintln!("viewmux: warning: {err}");
    }
    Ok(CliResult::Done)
}

fn events(config: Config, fixture: &Path) -> Result<CliResult> {
    let session = open_session(config, fixture)?;
    session
        .walk(&TreeWalker::new(), HostNodeId(0))
        .context("Failed to walk fixture tree")?;

    let raw_events = {
        let bridge = session.bridge().lock();
        bridge.provider().events().to_vec()
    };

    let mut failures = 0;
    let results: Vec<_> = raw_events
        .into_iter()
        .enumerate()
        .map(|(index, raw)| match session.translate_event(raw) {
            Ok(event) => json!({ "index": index, "event": event }),
            Err(err) => {
                failures += 1;
                json!({ "index": index, "error": err.to_string() })
            }
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&results)?);
    if failures > 0 {
        eprintln!("viewmux: {failures} event(s) could not be attributed");
        return Ok(CliResult::Exit(1));
    }
    Ok(CliResult::Done)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_walk_with_global_flags() {
        let cli = Cli::try_parse_from([
            "viewmux",
            "walk",
            "tree.yaml",
            "--max-depth",
            "2",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        match cli.command {
            Commands::Walk {
                fixture,
                max_depth,
                root_id,
            } => {
                assert_eq!(fixture, PathBuf::from("tree.yaml"));
                assert_eq!(max_depth, Some(2));
                assert_eq!(root_id, 0);
            }
            _ => panic!("expected walk"),
        }
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        assert!(Cli::try_parse_from(["viewmux", "config-path", "--log-level", "loud"]).is_err());
    }
}
