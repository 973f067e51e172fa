//! AGENTS.md generator
//!
//! Reads `agents/*.md` and `agents/external/*.md` under the installation root
//! and rewrites `AGENTS.md` there. Typically run as `make docs`.

use anyhow::Result;
use clap::Parser;
use op_agent_docs::config::installation_root;
use op_agent_docs::{default_header_parser, generate_docs, GenerateOutcome, GeneratorConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "generate-agent-docs")]
#[command(about = "Generate AGENTS.md from agent definition files")]
struct Args {
    /// Installation root containing the agents directory
    #[arg(long)]
    root: Option<PathBuf>,

    /// Config file (default: <root>/agent-docs.toml if present)
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Log filter used when `RUST_LOG` is unset
const DEFAULT_LOG_FILTER: &str = "op_agent_docs=info,generate_agent_docs=info";

fn init_tracing() -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_LOG_FILTER)?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
    Ok(())
}

/// Installation root when `--root` is not given.
///
/// Searched upwards from the binary, then from this crate's source tree, and
/// finally the working directory.
fn default_root() -> op_agent_docs::Result<PathBuf> {
    let from_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| installation_root(&exe));
    let from_manifest = || installation_root(Path::new(env!("CARGO_MANIFEST_DIR")));

    match from_exe.or_else(from_manifest) {
        Some(root) => Ok(root),
        None => {
            debug!("No installation root found, using the working directory");
            Ok(std::env::current_dir()?)
        }
    }
}

fn run(args: Args) -> op_agent_docs::Result<GenerateOutcome> {
    let root = match args.root {
        Some(root) => root,
        None => default_root()?,
    };
    debug!("Installation root: {}", root.display());
    let config = GeneratorConfig::load(&root, args.config.as_deref())?;
    generate_docs(&config, default_header_parser())
}

fn main() -> ExitCode {
    if let Err(e) = init_tracing() {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let args = Args::parse();

    match run(args) {
        Ok(GenerateOutcome::Generated(summary)) => {
            if !summary.warnings.is_empty() {
                warn!("{} agent file(s) could not be read", summary.warnings.len());
            }
            info!("{}", summary.message());
            ExitCode::SUCCESS
        }
        Ok(GenerateOutcome::NoAgents { .. }) => {
            info!("No agents found!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
